use std::fmt::{self, Formatter};

use std::any::Any;

use super::ArgMatcher;
use crate::invocation::Arg;

/// Equality matcher.
///
/// The recorded argument is downcast to the expected value's type and
/// compared with `PartialEq`. An argument of a different type is simply
/// not a match; it is not an error.
pub struct Eq<Expected>(Expected);

impl<Expected: Any + fmt::Debug + PartialEq + Send> ArgMatcher for Eq<Expected> {
    fn matches(&self, arg: &Arg) -> bool {
        match arg.downcast_ref::<Expected>() {
            Some(actual) => actual == &self.0,
            None => false,
        }
    }
}

impl<Expected: fmt::Debug> fmt::Display for Eq<Expected> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Creates an [`Eq`](struct@Eq) matcher.
pub fn eq<Expected: Any + fmt::Debug + PartialEq + Send>(expected: Expected) -> Eq<Expected> {
    Eq(expected)
}
