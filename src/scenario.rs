use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    invocation::{Invocation, MethodId},
    matcher::{ArgMatcherSet, InvocationMatcher},
    report::ScenarioReport,
};

/// The append-only ledger of everything that happened during one test.
///
/// A `Scenario` records every invocation made against the mock objects
/// that share it, in strict call order, along with every expectation those
/// mocks registered (whether or not it ever fired). Tests query it to
/// verify that expected calls occurred; on failure the scenario renders
/// itself into a readable report.
///
/// The handle is cheap to clone; all clones observe the same ledger. A
/// scenario is scoped to exactly one test execution. There is no internal
/// synchronization beyond what keeps the ledger itself consistent:
/// concurrently running tests must each build their own scenario and mock
/// graph.
///
/// ```
/// use standin::{matcher, MethodId, MockObject, Scenario};
///
/// const GET: MethodId = MethodId::new("get", 0);
///
/// let scenario = Scenario::new();
/// let repo = MockObject::new("repo", &scenario);
/// repo.when(GET, ()).then_return(42);
///
/// assert_eq!(repo.invoke::<_, i32>(GET, ()), 42);
/// scenario.assert_invoked("repo", GET, ());
/// ```
#[derive(Clone, Default)]
pub struct Scenario {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    invocations: Vec<Arc<Invocation>>,
    expected: Vec<Expected>,
}

/// A registered expectation: which mock declared it, what it matches, and
/// whether it was one-time. Kept independently of the owning behavior so
/// reports can show "expected but never invoked" entries.
pub(crate) struct Expected {
    pub(crate) target: &'static str,
    pub(crate) matcher: Arc<InvocationMatcher>,
    pub(crate) one_time: bool,
}

impl Scenario {
    pub fn new() -> Self {
        Scenario::default()
    }

    /// Appends an invocation to the ledger. Called exactly once per
    /// intercepted call, before any behavior resolution. Never fails.
    pub(crate) fn register_invocation(&self, invocation: Invocation) -> Arc<Invocation> {
        let invocation = Arc::new(invocation);
        self.inner.lock().invocations.push(Arc::clone(&invocation));
        invocation
    }

    pub(crate) fn register_always_matching(
        &self,
        target: &'static str,
        matcher: Arc<InvocationMatcher>,
    ) {
        self.inner.lock().expected.push(Expected {
            target,
            matcher,
            one_time: false,
        });
    }

    pub(crate) fn register_one_time_matching(
        &self,
        target: &'static str,
        matcher: Arc<InvocationMatcher>,
    ) {
        self.inner.lock().expected.push(Expected {
            target,
            matcher,
            one_time: true,
        });
    }

    /// Clears the invocation ledger and the expectation registry.
    ///
    /// Call this between tests when reusing one scenario, before any mock
    /// is exercised. Behaviors live in their mock objects and are
    /// discarded with them; a consumed one-time behavior is never
    /// "un-consumed" by a reset.
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.invocations.clear();
        inner.expected.clear();
    }

    /// A snapshot of the ledger, in call order.
    pub fn invocations(&self) -> Vec<Arc<Invocation>> {
        self.inner.lock().invocations.clone()
    }

    /// Counts the ledgered invocations of `method` on `target` whose
    /// arguments satisfy `matchers`.
    pub fn invoked<M: ArgMatcherSet>(
        &self,
        target: &str,
        method: MethodId,
        matchers: M,
    ) -> usize {
        let matcher = InvocationMatcher::new(method, matchers);
        self.inner
            .lock()
            .invocations
            .iter()
            .filter(|invocation| invocation.target() == target && matcher.matches(invocation))
            .count()
    }

    /// Asserts that at least one matching invocation was recorded.
    ///
    /// # Panics
    ///
    /// Panics with the formatted scenario report when no recorded
    /// invocation matches. This is a test-assertion failure, carrying
    /// enough context to debug without a rerun.
    #[track_caller]
    pub fn assert_invoked<M: ArgMatcherSet>(&self, target: &str, method: MethodId, matchers: M) {
        let matcher = InvocationMatcher::new(method, matchers);
        let inner = self.inner.lock();
        let invoked = inner
            .invocations
            .iter()
            .any(|invocation| invocation.target() == target && matcher.matches(invocation));
        if !invoked {
            let report = ScenarioReport::new(&inner.invocations, &inner.expected);
            drop(inner);
            panic!(
                "standin: expected an invocation of {}.{} but none was observed\n\n{}",
                target, matcher, report
            );
        }
    }

    /// Asserts that no matching invocation was recorded.
    ///
    /// # Panics
    ///
    /// Panics with the formatted scenario report when a matching
    /// invocation is found.
    #[track_caller]
    pub fn assert_not_invoked<M: ArgMatcherSet>(
        &self,
        target: &str,
        method: MethodId,
        matchers: M,
    ) {
        let matcher = InvocationMatcher::new(method, matchers);
        let inner = self.inner.lock();
        let invoked = inner
            .invocations
            .iter()
            .any(|invocation| invocation.target() == target && matcher.matches(invocation));
        if invoked {
            let report = ScenarioReport::new(&inner.invocations, &inner.expected);
            drop(inner);
            panic!(
                "standin: expected no invocation of {}.{} but at least one was observed\n\n{}",
                target, matcher, report
            );
        }
    }

    /// Renders the current scenario contents into a report.
    pub fn report(&self) -> ScenarioReport {
        let inner = self.inner.lock();
        ScenarioReport::new(&inner.invocations, &inner.expected)
    }
}
