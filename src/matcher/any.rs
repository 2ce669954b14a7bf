use std::fmt::{self, Formatter};

use super::ArgMatcher;
use crate::invocation::Arg;

/// Wildcard matcher. Accepts every argument, including the absent-value
/// sentinel.
pub struct Any;

impl ArgMatcher for Any {
    fn matches(&self, _: &Arg) -> bool {
        true
    }
}

impl fmt::Display for Any {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("_")
    }
}

/// Creates an [`Any`] matcher.
pub fn any() -> Any {
    Any
}
