//! A hand-written wrapper type plays the interception layer: it
//! implements the dependency's trait by forwarding each call into the
//! mock engine.

use standin::{matcher, Failure, MethodId, MockObject, Scenario};

trait UserStore {
    fn insert(&self, name: &str, age: u32) -> u64;
    fn find(&self, id: u64) -> Result<String, String>;
}

const INSERT: MethodId = MethodId::new("insert", 2);
const FIND: MethodId = MethodId::new("find", 1);

struct UserStoreMock(MockObject);

impl UserStoreMock {
    fn new(scenario: &Scenario) -> Self {
        UserStoreMock(MockObject::new("user_store", scenario))
    }
}

impl UserStore for UserStoreMock {
    #[track_caller]
    fn insert(&self, name: &str, age: u32) -> u64 {
        self.0.invoke(INSERT, (name.to_string(), age))
    }

    // a method returning Result maps raised failures into its error arm
    // instead of panicking
    #[track_caller]
    fn find(&self, id: u64) -> Result<String, String> {
        let invocation = standin::Invocation::new(self.0.name(), FIND, (id,));
        match self.0.handle_invocation(invocation) {
            Ok(Some(value)) => Ok(*value.downcast::<String>().expect("stubbed wrong type")),
            Ok(None) => Ok(String::new()),
            Err(Failure::Raised(raised)) => Err(raised.message().to_string()),
            Err(failure @ Failure::Unexpected { .. }) => panic!("{}", failure),
        }
    }
}

fn exercise(store: &dyn UserStore) -> u64 {
    store.insert("ada", 36)
}

#[test]
fn wrapper_forwards_calls_through_the_mock() {
    let scenario = Scenario::new();
    let store = UserStoreMock::new(&scenario);

    store
        .0
        .when(INSERT, (matcher::eq("ada".to_string()), matcher::any()))
        .then_return(7u64);

    assert_eq!(exercise(&store), 7);
    store.0.assert_invoked(INSERT, (matcher::any(), matcher::eq(36u32)));
}

#[test]
fn wrapper_maps_raised_failures_into_its_error_type() {
    let scenario = Scenario::new();
    let store = UserStoreMock::new(&scenario);

    store
        .0
        .when(FIND, (matcher::eq(1u64),))
        .then_return("ada".to_string());
    store.0.when(FIND, (matcher::any(),)).then_raise("no such row");

    assert_eq!(store.find(1), Ok("ada".to_string()));
    assert_eq!(store.find(2), Err("no such row".to_string()));
}

#[test]
fn wrapper_call_sites_point_at_the_test() {
    let scenario = Scenario::new();
    let store = UserStoreMock::new(&scenario);

    store.insert("grace", 45);

    let report = scenario.report().to_string();
    assert!(report.contains("at tests/wrapper.rs:"), "{}", report);
}
