use standin::{matcher, Arg, MethodId, MockObject, Scenario};

const LOOKUP: MethodId = MethodId::new("lookup", 2);

#[test]
fn exact_and_wildcard_matchers_bind_positionally() {
    let scenario = Scenario::new();
    let dir = MockObject::new("dir", &scenario);

    dir.when(LOOKUP, (matcher::eq(5), matcher::any())).then_return(1);

    assert_eq!(dir.invoke::<_, i32>(LOOKUP, (5, "x".to_string())), 1);
    assert_eq!(
        dir.invoke::<_, i32>(
            LOOKUP,
            vec![Arg::of(5), Arg::none()],
        ),
        1
    );
    // first position rejects, short-circuiting to the lenient default
    assert_eq!(dir.invoke::<_, i32>(LOOKUP, (6, "x".to_string())), 0);
}

#[test]
fn null_matcher_accepts_only_the_absent_sentinel() {
    let scenario = Scenario::new();
    let dir = MockObject::new("dir", &scenario);

    dir.when(LOOKUP, (matcher::null(), matcher::any())).then_return(1);

    assert_eq!(
        dir.invoke::<_, i32>(LOOKUP, vec![Arg::none(), Arg::of(0)]),
        1
    );
    assert_eq!(dir.invoke::<_, i32>(LOOKUP, (1, 0)), 0);
}

#[test]
fn from_option_maps_none_to_the_sentinel() {
    let scenario = Scenario::new();
    let dir = MockObject::new("dir", &scenario);

    dir.when(LOOKUP, (matcher::null(), matcher::any())).then_return(1);

    let missing: Option<i32> = None;
    assert_eq!(
        dir.invoke::<_, i32>(LOOKUP, vec![Arg::from_option(missing), Arg::of(0)]),
        1
    );
    assert_eq!(
        dir.invoke::<_, i32>(LOOKUP, vec![Arg::from_option(Some(3)), Arg::of(0)]),
        0
    );
}

#[test]
fn eq_matcher_rejects_a_different_argument_type() {
    let scenario = Scenario::new();
    let dir = MockObject::new("dir", &scenario);

    // expecting an i64, invoked with an i32
    dir.when(LOOKUP, (matcher::eq(5i64), matcher::any())).then_return(1);

    assert_eq!(dir.invoke::<_, i32>(LOOKUP, (5i32, 0)), 0);
}

#[test]
fn custom_predicate_matcher() {
    let scenario = Scenario::new();
    let dir = MockObject::new("dir", &scenario);

    dir.when(
        LOOKUP,
        (
            standin::from_fn!(|n: &i32| n % 2 == 0),
            matcher::any(),
        ),
    )
    .then_return(1);

    assert_eq!(dir.invoke::<_, i32>(LOOKUP, (4, 0)), 1);
    assert_eq!(dir.invoke::<_, i32>(LOOKUP, (5, 0)), 0);
}

#[test]
fn pattern_matcher() {
    let scenario = Scenario::new();
    let dir = MockObject::new("dir", &scenario);

    dir.when(
        LOOKUP,
        (
            standin::pattern!(i32 => 1..=9),
            matcher::any(),
        ),
    )
    .then_return(1);

    assert_eq!(dir.invoke::<_, i32>(LOOKUP, (7, 0)), 1);
    assert_eq!(dir.invoke::<_, i32>(LOOKUP, (70, 0)), 0);
}

#[test]
#[should_panic(expected = "declares 2 parameters but 1 argument matchers were given")]
fn matcher_count_mismatch_fails_at_registration() {
    let scenario = Scenario::new();
    let dir = MockObject::new("dir", &scenario);

    dir.when(LOOKUP, (matcher::any(),)).then_return(1);
}
