use std::{any::Any, fmt, sync::Arc};

use crate::{
    behavior::{Answer, Raised},
    invocation::Invocation,
    matcher::InvocationMatcher,
    mock_object::MockObject,
};

/// Builder for a one-time behavior.
///
/// Similar to [`When`](super::When), but the registered behavior fires at
/// most once and takes priority over every always-matching behavior.
/// Because the behavior cannot run twice, return values need not be
/// cloneable and delegates may consume captured variables.
#[must_use = "a behavior is only registered by calling then_return, then, or then_raise"]
pub struct Once<'m> {
    mock: &'m MockObject,
    matcher: Arc<InvocationMatcher>,
}

impl<'m> Once<'m> {
    pub(crate) fn new(mock: &'m MockObject, matcher: Arc<InvocationMatcher>) -> Self {
        Once { mock, matcher }
    }

    /// Registers a behavior returning `value` on the first matching call.
    ///
    /// ```
    /// use standin::{matcher, MethodId, MockObject, Scenario};
    ///
    /// // does not implement Clone
    /// #[derive(PartialEq, Debug, Default)]
    /// pub struct Receipt(u32);
    ///
    /// const CHARGE: MethodId = MethodId::new("charge", 1);
    ///
    /// let scenario = Scenario::new();
    /// let till = MockObject::new("till", &scenario);
    /// till.when(CHARGE, (matcher::eq(100u32),))
    ///     .once()
    ///     .then_return(Receipt(100));
    ///
    /// assert_eq!(till.invoke::<_, Receipt>(CHARGE, (100u32,)), Receipt(100));
    /// ```
    pub fn then_return<T: Any + Send>(self, value: T) {
        self.then(move |_| value)
    }

    /// Registers a delegate computing the return value from the recorded
    /// invocation on the first matching call. The delegate may consume
    /// captured variables.
    pub fn then<O: Any + Send>(self, delegate: impl FnOnce(&Invocation) -> O + Send + 'static) {
        self.mock.add_one_time(
            self.matcher,
            Answer::Once(Box::new(move |invocation| {
                Ok(Box::new(delegate(invocation)))
            })),
        );
    }

    /// Registers a behavior failing the first matching call with the
    /// given message.
    pub fn then_raise(self, message: impl fmt::Display) {
        let raised = Raised::new(message.to_string());
        self.mock
            .add_one_time(self.matcher, Answer::Once(Box::new(move |_| Err(raised))));
    }
}
