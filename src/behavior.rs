use std::{
    any::Any,
    fmt::{self, Formatter},
    sync::Arc,
};

use crate::{invocation::Invocation, matcher::InvocationMatcher};

/// A type-erased value returned from a mocked method.
pub type ReturnValue = Box<dyn Any + Send>;

/// What a behavior produced: a return value, or a configured failure.
pub(crate) type Outcome = Result<ReturnValue, Raised>;

/// The failure a behavior was configured to raise.
///
/// Raised failures are propagated verbatim to the caller of the mocked
/// method; the engine neither swallows nor wraps them.
#[derive(Clone, Debug)]
pub struct Raised {
    message: String,
}

impl Raised {
    pub fn new(message: impl Into<String>) -> Self {
        Raised {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Raised {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Raised {}

/// The configured reaction of a behavior.
///
/// `Once` answers are replaced by `Consumed` on their first execution and
/// are never selected again; `Always` answers never exhaust.
pub(crate) enum Answer {
    Consumed,
    Once(Box<dyn FnOnce(&Invocation) -> Outcome + Send>),
    Always(Box<dyn FnMut(&Invocation) -> Outcome + Send>),
}

impl Answer {
    fn call(&mut self, invocation: &Invocation) -> Option<Outcome> {
        if let Answer::Always(answer) = self {
            return Some(answer(invocation));
        }

        match std::mem::replace(self, Answer::Consumed) {
            Answer::Consumed => None,
            Answer::Once(answer) => Some(answer(invocation)),
            Answer::Always(_) => unreachable!(),
        }
    }
}

/// A configured reaction bound to an invocation matcher.
pub(crate) struct Behavior {
    matcher: Arc<InvocationMatcher>,
    answer: Answer,
}

impl Behavior {
    pub fn new(matcher: Arc<InvocationMatcher>, answer: Answer) -> Self {
        Behavior { matcher, answer }
    }

    /// Executes this behavior against the invocation.
    ///
    /// Returns `None` when the matcher rejects the invocation or the
    /// answer was already consumed, so resolution can move on to the next
    /// registered behavior.
    pub fn call(&mut self, invocation: &Invocation) -> Option<Outcome> {
        if !self.matcher.matches(invocation) {
            return None;
        }
        self.answer.call(invocation)
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Behavior")
            .field("matcher", &self.matcher.to_string())
            .field(
                "answer",
                match &self.answer {
                    Answer::Consumed => &"Consumed",
                    Answer::Once(_) => &"Once",
                    Answer::Always(_) => &"Always",
                },
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        invocation::MethodId,
        matcher::{any, eq},
    };

    const GET: MethodId = MethodId::new("get", 1);

    fn outcome_of(behavior: &mut Behavior, arg: i32) -> Option<i32> {
        behavior
            .call(&Invocation::new("mock", GET, (arg,)))
            .map(|outcome| *outcome.unwrap().downcast::<i32>().unwrap())
    }

    #[test]
    fn once_answer_is_consumed_on_first_execution() {
        let matcher = Arc::new(InvocationMatcher::new(GET, (eq(3),)));
        let mut behavior = Behavior::new(matcher, Answer::Once(Box::new(|_| Ok(Box::new(9)))));

        assert_eq!(outcome_of(&mut behavior, 3), Some(9));
        assert_eq!(outcome_of(&mut behavior, 3), None);
    }

    #[test]
    fn rejected_invocation_does_not_consume() {
        let matcher = Arc::new(InvocationMatcher::new(GET, (eq(3),)));
        let mut behavior = Behavior::new(matcher, Answer::Once(Box::new(|_| Ok(Box::new(9)))));

        assert_eq!(outcome_of(&mut behavior, 4), None);
        assert_eq!(outcome_of(&mut behavior, 3), Some(9));
    }

    #[test]
    fn always_answer_never_exhausts() {
        let matcher = Arc::new(InvocationMatcher::new(GET, (any(),)));
        let mut behavior = Behavior::new(matcher, Answer::Always(Box::new(|_| Ok(Box::new(7)))));

        for _ in 0..20 {
            assert_eq!(outcome_of(&mut behavior, 0), Some(7));
        }
    }
}
