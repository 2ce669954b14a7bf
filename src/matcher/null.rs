use std::fmt::{self, Formatter};

use super::ArgMatcher;
use crate::invocation::Arg;

/// Matches only the absent-value sentinel ([`Arg::none`]).
///
/// Any present value, of any type, is rejected.
pub struct Null;

impl ArgMatcher for Null {
    fn matches(&self, arg: &Arg) -> bool {
        arg.is_none()
    }
}

impl fmt::Display for Null {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("None")
    }
}

/// Creates a [`Null`] matcher.
pub fn null() -> Null {
    Null
}
