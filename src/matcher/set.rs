use paste::paste;

use super::ArgMatcher;

/// Conversion from a tuple of [`ArgMatcher`]s into the positional matcher
/// list of an [`InvocationMatcher`](super::InvocationMatcher).
///
/// Implemented for tuples of up to ten elements. `()` produces the empty
/// set (for methods with no parameters); a `Vec<Box<dyn ArgMatcher>>`
/// passes through unchanged for callers that build the list dynamically.
///
/// Note that a single matcher is spelled as a one-element tuple: don't
/// forget the trailing comma.
pub trait ArgMatcherSet {
    fn into_matchers(self) -> Vec<Box<dyn ArgMatcher>>;
}

impl ArgMatcherSet for Vec<Box<dyn ArgMatcher>> {
    fn into_matchers(self) -> Vec<Box<dyn ArgMatcher>> {
        self
    }
}

impl ArgMatcherSet for () {
    fn into_matchers(self) -> Vec<Box<dyn ArgMatcher>> {
        vec![]
    }
}

impl<AM: ArgMatcher + 'static> ArgMatcherSet for (AM,) {
    fn into_matchers(self) -> Vec<Box<dyn ArgMatcher>> {
        vec![Box::new(self.0)]
    }
}

// (a,b,c) => tuple!(b,c)
macro_rules! peel {
    ($idx:tt, $($other:tt,)+) => (tuple! { $($other,)+ })
}

// implement ArgMatcherSet for tuples of ArgMatchers
macro_rules! tuple {
    ($idx:tt,) => ();
    ($($idx:tt,)+) => (
        paste! {
            impl<$([<AM $idx>]: ArgMatcher + 'static),+> ArgMatcherSet for ($([<AM $idx>],)+) {
                fn into_matchers(self) -> Vec<Box<dyn ArgMatcher>> {
                    let ($([<am $idx>],)+) = self;
                    vec![$(Box::new([<am $idx>])),+]
                }
            }
        }
        peel! { $($idx,)+ }
    )
}

tuple! { 9, 8, 7, 6, 5, 4, 3, 2, 1, 0, }
