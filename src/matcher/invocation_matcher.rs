use std::fmt::{self, Formatter};

use super::{ArgMatcher, ArgMatcherSet};
use crate::invocation::{Invocation, MethodId};

/// Matcher for the invocation of a method.
///
/// Pairs a method identity with one [`ArgMatcher`] per declared
/// parameter. An [`Invocation`] matches iff the method identities are
/// equal and every positional matcher accepts its corresponding argument.
///
/// `matches` is a pure predicate; the same `InvocationMatcher` is shared
/// between the behavior that owns it and the scenario's expectation
/// registry.
pub struct InvocationMatcher {
    method: MethodId,
    matchers: Vec<Box<dyn ArgMatcher>>,
}

impl InvocationMatcher {
    /// Binds `matchers` positionally to the parameters of `method`.
    ///
    /// # Panics
    ///
    /// Panics if the number of matchers does not equal the method's
    /// declared arity. The mismatch is a configuration error in the test
    /// itself and is surfaced at registration, not at call time.
    pub fn new<M: ArgMatcherSet>(method: MethodId, matchers: M) -> Self {
        let matchers = matchers.into_matchers();
        assert!(
            matchers.len() == method.arity(),
            "standin: {} declares {} parameters but {} argument matchers were given",
            method,
            method.arity(),
            matchers.len(),
        );

        InvocationMatcher { method, matchers }
    }

    pub fn method(&self) -> MethodId {
        self.method
    }

    /// Returns whether the given invocation satisfies this matcher.
    pub fn matches(&self, invocation: &Invocation) -> bool {
        if self.method != invocation.method() {
            return false;
        }
        // construction guarantees the counts line up; recheck anyway so a
        // malformed invocation can never index out of bounds
        if invocation.args().len() != self.matchers.len() {
            return false;
        }
        self.matchers
            .iter()
            .zip(invocation.args())
            .all(|(matcher, arg)| matcher.matches(arg))
    }
}

impl fmt::Display for InvocationMatcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.method)?;
        let mut matchers = self.matchers.iter();
        if let Some(matcher) = matchers.next() {
            write!(f, "{}", matcher)?;
        }
        matchers.try_for_each(|matcher| write!(f, ", {}", matcher))?;
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{any, eq, null};

    const ADD: MethodId = MethodId::new("add", 2);
    const NOOP: MethodId = MethodId::new("noop", 0);

    #[test]
    fn positional_matching() {
        let matcher = InvocationMatcher::new(ADD, (eq(5), any()));

        assert!(matcher.matches(&Invocation::new("calc", ADD, (5, "x".to_string()))));
        assert!(matcher.matches(&Invocation::new("calc", ADD, vec![
            crate::Arg::of(5),
            crate::Arg::none(),
        ])));
        assert!(!matcher.matches(&Invocation::new("calc", ADD, (6, "x".to_string()))));
    }

    #[test]
    fn method_identity_is_checked_first() {
        let matcher = InvocationMatcher::new(NOOP, ());
        let other = MethodId::new("other", 0);

        assert!(matcher.matches(&Invocation::new("calc", NOOP, ())));
        assert!(!matcher.matches(&Invocation::new("calc", other, ())));
    }

    #[test]
    fn null_matcher_only_accepts_the_sentinel() {
        let matcher = InvocationMatcher::new(ADD, (null(), any()));

        let absent = Invocation::new("calc", ADD, vec![crate::Arg::none(), crate::Arg::of(1)]);
        let present = Invocation::new("calc", ADD, (0, 1));
        assert!(matcher.matches(&absent));
        assert!(!matcher.matches(&present));
    }

    #[test]
    fn display_renders_expectations() {
        let matcher = InvocationMatcher::new(ADD, (eq(5), any()));
        assert_eq!(matcher.to_string(), "add(5, _)");
    }

    #[test]
    #[should_panic(expected = "declares 2 parameters")]
    fn matcher_count_mismatch_is_fatal() {
        InvocationMatcher::new(ADD, (eq(5),));
    }
}
