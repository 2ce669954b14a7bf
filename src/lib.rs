//! standin: scenario-based mocking.
//!
//! `standin` substitutes mock objects for real dependencies and records
//! everything that happens to them into a shared, per-test [`Scenario`]
//! ledger. Behaviors are declared against a mock with exact, wildcard,
//! absent-value, or custom-predicate argument matchers; every intercepted
//! call is ledgered first and then resolved against the declared
//! behaviors, one-time behaviors before always-matching ones, in
//! registration order, first match wins.
//!
//! ```
//! use standin::{matcher, MethodId, MockObject, Scenario};
//!
//! const ADD: MethodId = MethodId::new("add", 2);
//!
//! let scenario = Scenario::new();
//! let calc = MockObject::new("calc", &scenario);
//!
//! // the one-shot expectation overrides the general stub
//! calc.when(ADD, (matcher::eq(2), matcher::eq(3)))
//!     .once()
//!     .then_return(5);
//! calc.when(ADD, (matcher::any(), matcher::any())).then_return(0);
//!
//! assert_eq!(calc.invoke::<_, i32>(ADD, (2, 3)), 5);
//! assert_eq!(calc.invoke::<_, i32>(ADD, (2, 3)), 0);
//!
//! calc.assert_invoked(ADD, (matcher::eq(2), matcher::any()));
//! ```
//!
//! # Interception
//!
//! `standin` generates no proxies. A mocked dependency is a hand-written
//! wrapper type that implements the dependency's trait by forwarding each
//! method into [`MockObject::invoke`] (or [`MockObject::handle_invocation`]
//! for non-`Default` return types and custom failure handling):
//!
//! ```
//! use standin::{MethodId, MockObject};
//!
//! trait Greeter {
//!     fn greet(&self, name: &str) -> String;
//! }
//!
//! struct GreeterMock(MockObject);
//!
//! const GREET: MethodId = MethodId::new("greet", 1);
//!
//! impl Greeter for GreeterMock {
//!     #[track_caller]
//!     fn greet(&self, name: &str) -> String {
//!         self.0.invoke(GREET, (name.to_string(),))
//!     }
//! }
//! ```
//!
//! # Test isolation
//!
//! A scenario and its mock objects belong to exactly one test execution.
//! Build a fresh graph per test, or call [`Scenario::reset`] between
//! tests when reusing one. Nothing in the engine locks across tests;
//! parallel test methods must not share a scenario.

mod behavior;
mod invocation;
pub mod matcher;
mod mock_object;
pub mod report;
mod scenario;
pub mod when;

pub use behavior::{Raised, ReturnValue};
pub use invocation::{Arg, IntoArgs, Invocation, MethodId};
pub use mock_object::{Failure, MockObject, Strictness};
pub use report::ScenarioReport;
pub use scenario::Scenario;
pub use when::When;
