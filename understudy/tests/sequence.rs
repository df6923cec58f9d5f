// vim: tw=80
//! `assert_invoked_in_sequence`: consecutive sequence assertions on one
//! mock must observe their calls in scenario order.
#![deny(warnings)]

use understudy::*;

fn get() -> MethodSig {
    MethodSig::returning::<u32>("get")
}

#[test]
fn calls_verified_in_scenario_order_succeed() {
    let ctx = MockContext::new();
    let repo = Mock::new("repo", &ctx);

    repo.invoke(get(), vec![Value::of(1u32)]).unwrap();
    repo.invoke(get(), vec![Value::of(2u32)]).unwrap();

    repo.assert_invoked_in_sequence().unwrap();
    repo.invoke(get(), vec![Value::of(1u32)]).unwrap();
    repo.assert_invoked_in_sequence().unwrap();
    repo.invoke(get(), vec![Value::of(2u32)]).unwrap();
}

#[test]
fn calls_verified_out_of_order_fail() {
    let ctx = MockContext::new();
    let repo = Mock::new("repo", &ctx);

    repo.invoke(get(), vec![Value::of(1u32)]).unwrap();
    repo.invoke(get(), vec![Value::of(2u32)]).unwrap();

    repo.assert_invoked_in_sequence().unwrap();
    repo.invoke(get(), vec![Value::of(2u32)]).unwrap();

    repo.assert_invoked_in_sequence().unwrap();
    let err = repo.invoke(get(), vec![Value::of(1u32)]).unwrap_err();
    assert!(matches!(err, MockError::Assertion(_)));
    let msg = err.to_string();
    assert!(msg.contains("out of sequence"), "{msg}");
}

#[test]
fn a_single_occurrence_is_consumed_by_one_assertion() {
    let ctx = MockContext::new();
    let repo = Mock::new("repo", &ctx);

    repo.invoke(get(), vec![Value::of(1u32)]).unwrap();

    repo.assert_invoked_in_sequence().unwrap();
    repo.invoke(get(), vec![Value::of(1u32)]).unwrap();

    // The only occurrence was consumed by the first sequence assertion.
    repo.assert_invoked_in_sequence().unwrap();
    let err = repo.invoke(get(), vec![Value::of(1u32)]).unwrap_err();
    assert!(matches!(err, MockError::Assertion(_)));
}

#[test]
fn repeated_calls_satisfy_repeated_assertions() {
    let ctx = MockContext::new();
    let repo = Mock::new("repo", &ctx);

    repo.invoke(get(), vec![Value::of(1u32)]).unwrap();
    repo.invoke(get(), vec![Value::of(1u32)]).unwrap();

    repo.assert_invoked_in_sequence().unwrap();
    repo.invoke(get(), vec![Value::of(1u32)]).unwrap();
    repo.assert_invoked_in_sequence().unwrap();
    repo.invoke(get(), vec![Value::of(1u32)]).unwrap();
}

#[test]
fn plain_assert_invoked_does_not_consume() {
    let ctx = MockContext::new();
    let repo = Mock::new("repo", &ctx);

    repo.invoke(get(), vec![Value::of(1u32)]).unwrap();

    repo.assert_invoked().unwrap();
    repo.invoke(get(), vec![Value::of(1u32)]).unwrap();
    repo.assert_invoked().unwrap();
    repo.invoke(get(), vec![Value::of(1u32)]).unwrap();
}
