//! Argument and invocation matchers.
//!
//! An [`ArgMatcher`] is a stateless predicate over a single type-erased
//! argument. Matchers are bound positionally to a method's parameters at
//! behavior-registration time, producing an [`InvocationMatcher`] that
//! decides whether a recorded [`Invocation`](crate::Invocation) satisfies
//! the expectation.

mod any;
mod eq;
mod from_fn;
mod invocation_matcher;
mod null;
mod set;

use std::fmt;

pub use any::{any, Any};
pub use eq::{eq, Eq};
pub use from_fn::from_fn;
pub use invocation_matcher::InvocationMatcher;
pub use null::{null, Null};
pub use set::ArgMatcherSet;

use crate::invocation::Arg;

/// Predicate over a single argument of a mocked method.
///
/// The `Display` implementation is the rendered expectation shown in
/// mismatch reports, so keep it short (e.g., `_` for the wildcard, the
/// `Debug` form of the expected value for equality).
///
/// Matchers are stateless and reusable; `matches` must not have side
/// effects.
pub trait ArgMatcher: fmt::Display + Send {
    /// Returns whether the given argument is acceptable.
    fn matches(&self, arg: &Arg) -> bool;
}
