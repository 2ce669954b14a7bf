use std::{any::Any, fmt, marker::PhantomData};

use super::ArgMatcher;
use crate::invocation::Arg;

struct FromFn<T, F> {
    message: String,
    matcher: F,
    _marker: PhantomData<fn(&T)>,
}

impl<T, F> ArgMatcher for FromFn<T, F>
where
    T: Any,
    F: Fn(&T) -> bool + Send,
{
    fn matches(&self, arg: &Arg) -> bool {
        match arg.downcast_ref::<T>() {
            Some(value) => (self.matcher)(value),
            None => false,
        }
    }
}

impl<T, F> fmt::Display for FromFn<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Returns an [`ArgMatcher`] that succeeds based on the provided closure.
///
/// The matcher is typed: an argument of a different type than the closure
/// expects is rejected without calling the closure.
///
/// Prefer the [`from_fn!`](crate::from_fn!) macro, which stringifies the
/// closure into the expectation message. For complex argument matching
/// implement your own [`ArgMatcher`] to keep the expectation message
/// specific and short.
///
/// ```
/// use standin::matcher::{self, ArgMatcher};
/// use standin::Arg;
///
/// let contains_hello = matcher::from_fn(
///     |message: &String| message.contains("hello"),
///     "contains \"hello\"",
/// );
/// assert!(contains_hello.matches(&Arg::of("hello world".to_string())));
/// assert!(!contains_hello.matches(&Arg::of("bye world".to_string())));
/// ```
pub fn from_fn<T: Any>(
    matcher: impl Fn(&T) -> bool + Send + 'static,
    message: impl fmt::Display,
) -> impl ArgMatcher {
    FromFn {
        matcher,
        message: message.to_string(),
        _marker: PhantomData,
    }
}

/// Returns an [`ArgMatcher`] that succeeds based on the provided closure,
/// using the closure's own source text as the expectation message.
///
/// ```
/// use standin::{matcher::ArgMatcher, Arg};
///
/// let is_even = standin::from_fn!(|n: &i32| n % 2 == 0);
/// assert!(is_even.matches(&Arg::of(4)));
/// assert!(!is_even.matches(&Arg::of(5)));
/// println!("{}", is_even); // '|n: &i32| n % 2 == 0'
/// ```
#[macro_export]
macro_rules! from_fn {
    ($matcher:expr) => {
        $crate::matcher::from_fn($matcher, stringify!($matcher))
    };
}

/// Returns an [`ArgMatcher`] that succeeds if the pattern matches.
///
/// This macro has two forms:
/// * `pattern!(type => pattern)`
/// * `pattern!(type => pattern if guard)`
///
/// The type names the argument type the pattern is checked against; other
/// argument types are rejected.
///
/// ```
/// use standin::{matcher::ArgMatcher, Arg};
///
/// let exists_more_than_two = standin::pattern!(Option<i32> => Some(x) if *x > 2);
/// assert!(exists_more_than_two.matches(&Arg::of(Some(4))));
/// assert!(!exists_more_than_two.matches(&Arg::of(Some(1))));
/// println!("{}", exists_more_than_two); // 'Some(x) if *x > 2'
/// ```
#[macro_export]
macro_rules! pattern {
    ($ty:ty => $( $pattern:pat_param )|+ $( if $guard: expr )? $(,)?) => (
        $crate::matcher::from_fn(
            move |arg: &$ty| matches!(arg, $($pattern)|+ $(if $guard)?),
            stringify!($($pattern)|+ $(if $guard)?),
        )
    );
}
