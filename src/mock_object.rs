use std::{
    any::Any,
    fmt::{self, Formatter},
    sync::Arc,
};

use parking_lot::Mutex;

use crate::{
    behavior::{Answer, Behavior, Raised, ReturnValue},
    invocation::{IntoArgs, Invocation, MethodId},
    matcher::{ArgMatcherSet, InvocationMatcher},
    scenario::Scenario,
    when::When,
};

/// What a mock does when no registered behavior matches a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strictness {
    /// Fall through to a harmless default return value.
    Lenient,
    /// Fail the call with an "unexpected invocation" diagnostic.
    Strict,
}

/// Why a mocked call did not produce a return value.
#[derive(Debug)]
pub enum Failure {
    /// No behavior matched and the mock is strict. Carries the rendered
    /// invocation and the full scenario report so the failure is
    /// debuggable without a rerun.
    Unexpected { invocation: String, report: String },
    /// A behavior was configured to raise; the failure is passed through
    /// verbatim.
    Raised(Raised),
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Unexpected { invocation, report } => {
                write!(f, "unexpected invocation: {}\n\n{}", invocation, report)
            }
            Failure::Raised(raised) => fmt::Display::fmt(raised, f),
        }
    }
}

impl std::error::Error for Failure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Failure::Unexpected { .. } => None,
            Failure::Raised(raised) => Some(raised),
        }
    }
}

/// The runtime substitute for a real dependency.
///
/// A `MockObject` owns the behaviors registered against it and shares a
/// [`Scenario`] with the rest of the test. Every call handled by the mock
/// is ledgered into the scenario first, then resolved against the
/// registered behaviors:
///
/// 1. one-time behaviors, in registration order, skipping consumed ones;
/// 2. always-matching behaviors, in registration order;
/// 3. the mock's default action ([`Strictness`]).
///
/// Resolution is first-match, not best-match: with overlapping matchers,
/// register the more specific behavior first. One-time behaviors always
/// take priority over always-matching ones, so a one-shot expectation can
/// override a general stub without unregistering it.
///
/// Calls are intercepted by a wrapper type that implements the mocked
/// trait by forwarding into [`invoke`](MockObject::invoke) (or, for
/// non-`Default` return types and custom failure handling,
/// [`handle_invocation`](MockObject::handle_invocation)).
pub struct MockObject {
    name: &'static str,
    scenario: Scenario,
    strictness: Strictness,
    behaviors: Mutex<Behaviors>,
}

#[derive(Default)]
struct Behaviors {
    one_time: Vec<Behavior>,
    always: Vec<Behavior>,
}

impl MockObject {
    /// Creates a lenient mock: unmatched calls fall through to a default
    /// return value.
    pub fn new(name: &'static str, scenario: &Scenario) -> Self {
        MockObject::with_strictness(name, scenario, Strictness::Lenient)
    }

    /// Creates a strict mock: unmatched calls fail with an "unexpected
    /// invocation" diagnostic.
    pub fn strict(name: &'static str, scenario: &Scenario) -> Self {
        MockObject::with_strictness(name, scenario, Strictness::Strict)
    }

    pub fn with_strictness(
        name: &'static str,
        scenario: &Scenario,
        strictness: Strictness,
    ) -> Self {
        MockObject {
            name,
            scenario: scenario.clone(),
            strictness,
            behaviors: Mutex::new(Behaviors::default()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// Starts declaring a behavior for `method` with one argument matcher
    /// per declared parameter.
    ///
    /// ```
    /// use standin::{matcher, MethodId, MockObject, Scenario};
    ///
    /// const ADD: MethodId = MethodId::new("add", 2);
    ///
    /// let scenario = Scenario::new();
    /// let calc = MockObject::new("calc", &scenario);
    /// calc.when(ADD, (matcher::eq(2), matcher::any())).then_return(5);
    ///
    /// assert_eq!(calc.invoke::<_, i32>(ADD, (2, 9)), 5);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the matcher count does not equal the method's arity.
    pub fn when<M: ArgMatcherSet>(&self, method: MethodId, matchers: M) -> When<'_> {
        When::new(self, Arc::new(InvocationMatcher::new(method, matchers)))
    }

    pub(crate) fn add_always(&self, matcher: Arc<InvocationMatcher>, answer: Answer) {
        self.behaviors
            .lock()
            .always
            .push(Behavior::new(Arc::clone(&matcher), answer));
        self.scenario.register_always_matching(self.name, matcher);
    }

    pub(crate) fn add_one_time(&self, matcher: Arc<InvocationMatcher>, answer: Answer) {
        self.behaviors
            .lock()
            .one_time
            .push(Behavior::new(Arc::clone(&matcher), answer));
        self.scenario.register_one_time_matching(self.name, matcher);
    }

    /// The interception boundary: ledgers the invocation, then resolves
    /// and executes exactly one behavior.
    ///
    /// The invocation is recorded even when nothing matches. `Ok(None)`
    /// means a lenient mock had no matching behavior; the caller supplies
    /// whatever default its return type calls for.
    pub fn handle_invocation(
        &self,
        invocation: Invocation,
    ) -> Result<Option<ReturnValue>, Failure> {
        let invocation = self.scenario.register_invocation(invocation);

        let mut behaviors = self.behaviors.lock();
        for behavior in behaviors.one_time.iter_mut() {
            if let Some(outcome) = behavior.call(&invocation) {
                return outcome.map(Some).map_err(Failure::Raised);
            }
        }
        for behavior in behaviors.always.iter_mut() {
            if let Some(outcome) = behavior.call(&invocation) {
                return outcome.map(Some).map_err(Failure::Raised);
            }
        }
        drop(behaviors);

        match self.strictness {
            Strictness::Lenient => Ok(None),
            Strictness::Strict => Err(Failure::Unexpected {
                invocation: invocation.to_string(),
                report: self.scenario.report().to_string(),
            }),
        }
    }

    /// Typed convenience over [`handle_invocation`] for hand-written
    /// wrappers.
    ///
    /// Constructs the [`Invocation`], downcasts the resolved return value
    /// to `O`, and substitutes `O::default()` for a lenient fall-through.
    /// Tag the wrapper method with `#[track_caller]` so the recorded call
    /// site points at the test.
    ///
    /// # Panics
    ///
    /// Panics when a strict mock receives an unexpected call, when a
    /// behavior raises its configured failure, or when a behavior was
    /// registered with a return value that is not an `O` (a configuration
    /// error in the test).
    ///
    /// [`handle_invocation`]: MockObject::handle_invocation
    #[track_caller]
    pub fn invoke<A: IntoArgs, O: Any + Default>(&self, method: MethodId, args: A) -> O {
        let invocation = Invocation::new(self.name, method, args);
        match self.handle_invocation(invocation) {
            Ok(Some(value)) => match value.downcast::<O>() {
                Ok(value) => *value,
                Err(_) => panic!(
                    "standin: a behavior for {}.{} returned a value of the wrong type (expected {})",
                    self.name,
                    method,
                    std::any::type_name::<O>(),
                ),
            },
            Ok(None) => O::default(),
            Err(failure) => panic!("{}", failure),
        }
    }

    /// Asserts on the shared scenario that this mock received a matching
    /// call.
    #[track_caller]
    pub fn assert_invoked<M: ArgMatcherSet>(&self, method: MethodId, matchers: M) {
        self.scenario.assert_invoked(self.name, method, matchers)
    }

    /// Asserts on the shared scenario that this mock never received a
    /// matching call.
    #[track_caller]
    pub fn assert_not_invoked<M: ArgMatcherSet>(&self, method: MethodId, matchers: M) {
        self.scenario.assert_not_invoked(self.name, method, matchers)
    }
}

impl fmt::Debug for MockObject {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let behaviors = self.behaviors.lock();
        f.debug_struct("MockObject")
            .field("name", &self.name)
            .field("strictness", &self.strictness)
            .field("one_time", &behaviors.one_time)
            .field("always", &behaviors.always)
            .finish()
    }
}
