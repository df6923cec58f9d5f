// vim: tw=80
//! A wildcard helper whose placeholder is never consumed by a call must be
//! reported at the next declaration attempt, not silently dropped.
#![deny(warnings)]

use understudy::*;

#[test]
fn dangling_matcher_fails_the_next_declaration() {
    let ctx = MockContext::new();
    let svc = Mock::new("svc", &ctx);

    let _stale = ctx.any_of::<u32>();
    let err = svc.returns(1u32).unwrap_err();
    assert!(matches!(
        err,
        MockError::Usage(UsageError::DanglingMatcher { .. })
    ));
    let msg = err.to_string();
    assert!(msg.contains("<any u32>"), "{msg}");
}

#[test]
fn the_stale_matcher_is_cleared_by_the_error() {
    let ctx = MockContext::new();
    let svc = Mock::new("svc", &ctx);

    let _stale = ctx.any_value();
    svc.returns(1u32).unwrap_err();

    svc.returns(2u32).unwrap();
    svc.invoke(MethodSig::returning::<u32>("get"), vec![]).unwrap();
    let out = svc.invoke(MethodSig::returning::<u32>("get"), vec![]).unwrap();
    assert_eq!(out.returned::<u32>(), Some(&2));
}

#[test]
fn a_matcher_not_consumed_by_the_pattern_call_is_dangling() {
    let ctx = MockContext::new();
    let svc = Mock::new("svc", &ctx);

    svc.returns(1u32).unwrap();
    let _unused = ctx.any_of::<String>();
    // The pattern call takes no arguments, so the capture dangles.
    let err = svc
        .invoke(MethodSig::returning::<u32>("get"), vec![])
        .unwrap_err();
    assert!(matches!(
        err,
        MockError::Usage(UsageError::DanglingMatcher { .. })
    ));
}
