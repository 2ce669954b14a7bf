use std::{
    any::{self, Any},
    fmt::{self, Formatter},
    panic::Location,
};

use paste::paste;

/// A single type-erased argument value.
///
/// The `Debug` rendering and the type name are captured eagerly so that
/// reports can be produced long after the call, without requiring the
/// stored value itself to still be inspectable.
///
/// The absent-value sentinel ([`Arg::none`]) stands in for "no value was
/// passed here" (e.g., the `None` arm of an optional parameter). It is
/// matched exclusively by [`matcher::null`](crate::matcher::null).
pub struct Arg {
    value: Option<Box<dyn Any + Send>>,
    repr: String,
    type_name: &'static str,
}

impl Arg {
    /// Wraps a concrete value.
    pub fn of<T: Any + fmt::Debug + Send>(value: T) -> Self {
        Arg {
            repr: format!("{:?}", value),
            type_name: any::type_name::<T>(),
            value: Some(Box::new(value)),
        }
    }

    /// The absent-value sentinel.
    pub fn none() -> Self {
        Arg {
            value: None,
            repr: "None".to_string(),
            type_name: "",
        }
    }

    /// Maps `Some(v)` to [`Arg::of`] and `None` to [`Arg::none`].
    pub fn from_option<T: Any + fmt::Debug + Send>(value: Option<T>) -> Self {
        match value {
            Some(value) => Arg::of(value),
            None => Arg::none(),
        }
    }

    /// Whether this argument is the absent-value sentinel.
    pub fn is_none(&self) -> bool {
        self.value.is_none()
    }

    /// The wrapped value, if it is present and of type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.as_ref()?.downcast_ref()
    }

    /// The `Debug` rendering captured at construction time.
    pub fn repr(&self) -> &str {
        &self.repr
    }

    pub(crate) fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}

/// Identity of a mocked method: its name and declared parameter count.
///
/// Hand-written mock wrappers typically declare one `const` per method:
///
/// ```
/// use standin::MethodId;
///
/// const ADD: MethodId = MethodId::new("add", 2);
/// assert_eq!(ADD.arity(), 2);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MethodId {
    name: &'static str,
    arity: usize,
}

impl MethodId {
    pub const fn new(name: &'static str, arity: usize) -> Self {
        MethodId { name, arity }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn arity(&self) -> usize {
        self.arity
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// An immutable record of one intercepted call: who was called, which
/// method, with which arguments, and from where.
///
/// Created by the interception layer (usually through
/// [`MockObject::invoke`](crate::MockObject::invoke)) and owned by the
/// [`Scenario`](crate::Scenario) ledger until the next reset.
pub struct Invocation {
    target: &'static str,
    method: MethodId,
    args: Vec<Arg>,
    location: &'static Location<'static>,
}

impl Invocation {
    /// Records a call of `method` on `target`.
    ///
    /// The call site is captured from the caller; tag intermediate wrapper
    /// methods with `#[track_caller]` so the location points at the test.
    ///
    /// # Panics
    ///
    /// Panics if the number of arguments does not equal the method's
    /// declared arity. That is a bug in the wrapper, not a runtime
    /// condition, so it is surfaced immediately.
    #[track_caller]
    pub fn new<A: IntoArgs>(target: &'static str, method: MethodId, args: A) -> Self {
        let args = args.into_args();
        assert!(
            args.len() == method.arity(),
            "standin: {}.{} was invoked with {} arguments but declares {}",
            target,
            method,
            args.len(),
            method.arity(),
        );

        Invocation {
            target,
            method,
            args,
            location: Location::caller(),
        }
    }

    pub fn target(&self) -> &'static str {
        self.target
    }

    pub fn method(&self) -> MethodId {
        self.method
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// The argument at `index`, if present and of type `T`.
    ///
    /// Convenience for delegate closures that compute their answer from
    /// the actual arguments.
    pub fn arg<T: Any>(&self, index: usize) -> Option<&T> {
        self.args.get(index)?.downcast_ref()
    }

    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}(", self.target, self.method)?;
        let mut args = self.args.iter();
        if let Some(arg) = args.next() {
            write!(f, "{}", arg.repr())?;
        }
        args.try_for_each(|arg| write!(f, ", {}", arg.repr()))?;
        f.write_str(")")
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self, self.location)
    }
}

/// Conversion from a tuple of plain values into the argument list of an
/// [`Invocation`].
///
/// Implemented for tuples of up to ten elements, where each element is
/// `Any + Debug + Send`. Values are captured by value; wrappers for
/// methods taking borrows pass an owned copy (e.g. `a.to_string()` for a
/// `&str` parameter).
///
/// A `Vec<Arg>` passes through unchanged, for the cases the tuple impls
/// cannot express (per-position [`Arg::none`] / [`Arg::from_option`]).
///
/// Note that a single argument is spelled as a one-element tuple: don't
/// forget the trailing comma.
pub trait IntoArgs {
    fn into_args(self) -> Vec<Arg>;
}

impl IntoArgs for Vec<Arg> {
    fn into_args(self) -> Vec<Arg> {
        self
    }
}

impl IntoArgs for () {
    fn into_args(self) -> Vec<Arg> {
        vec![]
    }
}

impl<A0: Any + fmt::Debug + Send> IntoArgs for (A0,) {
    fn into_args(self) -> Vec<Arg> {
        vec![Arg::of(self.0)]
    }
}

// (a,b,c) => tuple!(b,c)
macro_rules! peel {
    ($idx:tt, $($other:tt,)+) => (tuple! { $($other,)+ })
}

// implement IntoArgs for tuples of values
macro_rules! tuple {
    ($idx:tt,) => ();
    ($($idx:tt,)+) => (
        paste! {
            impl<$([<A $idx>]: Any + fmt::Debug + Send),+> IntoArgs for ($([<A $idx>],)+) {
                fn into_args(self) -> Vec<Arg> {
                    let ($([<a $idx>],)+) = self;
                    vec![$(Arg::of([<a $idx>])),+]
                }
            }
        }
        peel! { $($idx,)+ }
    )
}

tuple! { 9, 8, 7, 6, 5, 4, 3, 2, 1, 0, }
