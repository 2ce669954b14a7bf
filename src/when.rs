mod once;

use std::{any::Any, fmt, sync::Arc};

pub use once::Once;

use crate::{
    behavior::{Answer, Raised},
    invocation::Invocation,
    matcher::InvocationMatcher,
    mock_object::MockObject,
};

/// Builder for an always-matching behavior.
///
/// Created by [`MockObject::when`]. Each terminal method registers one
/// behavior; the order of registration is the order behaviors are tried
/// at resolution time. Switch to a one-time behavior with
/// [`once`](When::once).
#[must_use = "a behavior is only registered by calling then_return, then, or then_raise"]
pub struct When<'m> {
    mock: &'m MockObject,
    matcher: Arc<InvocationMatcher>,
}

impl<'m> When<'m> {
    pub(crate) fn new(mock: &'m MockObject, matcher: Arc<InvocationMatcher>) -> Self {
        When { mock, matcher }
    }

    /// Registers a behavior returning a clone of `value` on every
    /// matching call.
    ///
    /// For values that cannot be cloned, use [`once`](When::once) or
    /// [`then`](When::then).
    pub fn then_return<T: Any + Send + Clone>(self, value: T) {
        self.then(move |_| value.clone())
    }

    /// Registers a delegate computing the return value from the recorded
    /// invocation on every matching call.
    ///
    /// ```
    /// use standin::{matcher, MethodId, MockObject, Scenario};
    ///
    /// const ADD: MethodId = MethodId::new("add", 2);
    ///
    /// let scenario = Scenario::new();
    /// let calc = MockObject::new("calc", &scenario);
    /// calc.when(ADD, (matcher::any(), matcher::any()))
    ///     .then(|invocation| {
    ///         invocation.arg::<i32>(0).unwrap() + invocation.arg::<i32>(1).unwrap()
    ///     });
    ///
    /// assert_eq!(calc.invoke::<_, i32>(ADD, (2, 3)), 5);
    /// ```
    pub fn then<O: Any + Send>(
        self,
        mut delegate: impl FnMut(&Invocation) -> O + Send + 'static,
    ) {
        self.mock.add_always(
            self.matcher,
            Answer::Always(Box::new(move |invocation| {
                Ok(Box::new(delegate(invocation)))
            })),
        );
    }

    /// Registers a behavior failing every matching call with the given
    /// message.
    ///
    /// The failure surfaces as [`Failure::Raised`](crate::Failure) from
    /// [`MockObject::handle_invocation`], or as a panic from
    /// [`MockObject::invoke`].
    pub fn then_raise(self, message: impl fmt::Display) {
        let raised = Raised::new(message.to_string());
        self.mock.add_always(
            self.matcher,
            Answer::Always(Box::new(move |_| Err(raised.clone()))),
        );
    }

    /// Turns this into a one-time behavior: it fires at most once and is
    /// tried before every always-matching behavior.
    pub fn once(self) -> Once<'m> {
        Once::new(self.mock, self.matcher)
    }
}
