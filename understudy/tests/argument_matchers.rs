// vim: tw=80
//! Wildcard argument matchers: positional placeholders, typed wildcards,
//! predicates, and the conflict errors around them.
#![deny(warnings)]

use understudy::*;

fn lookup() -> MethodSig {
    MethodSig::returning::<u32>("lookup")
}

#[test]
fn any_value_matches_anything() {
    let ctx = MockContext::new();
    let svc = Mock::new("svc", &ctx);

    svc.returns(1u32).unwrap();
    let arg = ctx.any_value();
    svc.invoke(lookup(), vec![arg]).unwrap();

    let s = svc.invoke(lookup(), vec![Value::of("x")]).unwrap();
    assert_eq!(s.returned::<u32>(), Some(&1));
    let n = svc.invoke(lookup(), vec![Value::of(9i64)]).unwrap();
    assert_eq!(n.returned::<u32>(), Some(&1));
}

#[test]
fn any_of_is_type_sensitive() {
    let ctx = MockContext::new();
    let svc = Mock::new("svc", &ctx);

    svc.returns(1u32).unwrap();
    let arg = ctx.any_of::<u32>();
    svc.invoke(lookup(), vec![arg]).unwrap();

    let hit = svc.invoke(lookup(), vec![Value::of(7u32)]).unwrap();
    assert_eq!(hit.returned::<u32>(), Some(&1));
    let miss = svc.invoke(lookup(), vec![Value::of(7i32)]).unwrap();
    assert_eq!(miss.returned::<u32>(), Some(&0));
}

#[test]
fn withf_uses_the_closure_as_the_predicate() {
    let ctx = MockContext::new();
    let svc = Mock::new("svc", &ctx);

    svc.returns(1u32).unwrap();
    let arg = ctx.withf(|x: &u32| x % 2 == 0);
    svc.invoke(lookup(), vec![arg]).unwrap();

    let even = svc.invoke(lookup(), vec![Value::of(4u32)]).unwrap();
    assert_eq!(even.returned::<u32>(), Some(&1));
    let odd = svc.invoke(lookup(), vec![Value::of(5u32)]).unwrap();
    assert_eq!(odd.returned::<u32>(), Some(&0));
}

#[test]
fn wildcards_mix_with_literals() {
    let ctx = MockContext::new();
    let svc = Mock::new("svc", &ctx);
    let sig = MethodSig::returning::<u32>("put");

    svc.returns(7u32).unwrap();
    let key = ctx.any_of::<String>();
    svc.invoke(sig.clone(), vec![key, Value::of(3u8)]).unwrap();

    let hit = svc
        .invoke(sig.clone(), vec![Value::of(String::from("k")), Value::of(3u8)])
        .unwrap();
    assert_eq!(hit.returned::<u32>(), Some(&7));
    let miss = svc
        .invoke(sig, vec![Value::of(String::from("k")), Value::of(4u8)])
        .unwrap();
    assert_eq!(miss.returned::<u32>(), Some(&0));
}

#[test]
fn matchers_can_be_captured_by_position() {
    let ctx = MockContext::new();
    let svc = Mock::new("svc", &ctx);

    svc.returns(1u32).unwrap();
    ctx.matcher_at(0, ArgMatcher::of_type::<String>()).unwrap();
    svc.invoke(lookup(), vec![Value::slot()]).unwrap();

    let hit = svc
        .invoke(lookup(), vec![Value::of(String::from("k"))])
        .unwrap();
    assert_eq!(hit.returned::<u32>(), Some(&1));
}

#[test]
fn literal_at_a_position_with_a_matcher_is_an_error() {
    let ctx = MockContext::new();
    let svc = Mock::new("svc", &ctx);

    svc.returns(1u32).unwrap();
    ctx.matcher_at(0, ArgMatcher::any()).unwrap();
    let err = svc.invoke(lookup(), vec![Value::of(5u32)]).unwrap_err();
    assert!(matches!(
        err,
        MockError::Usage(UsageError::LiteralWithMatcher { position: 0, .. })
    ));
}

#[test]
fn slot_without_a_captured_matcher_is_an_error() {
    let ctx = MockContext::new();
    let svc = Mock::new("svc", &ctx);

    svc.returns(1u32).unwrap();
    let err = svc.invoke(lookup(), vec![Value::slot()]).unwrap_err();
    assert!(matches!(
        err,
        MockError::Usage(UsageError::UnfilledSlot { position: 0, .. })
    ));
}

#[test]
fn a_placeholder_cannot_be_used_twice() {
    let ctx = MockContext::new();
    let svc = Mock::new("svc", &ctx);

    svc.returns(1u32).unwrap();
    let arg = ctx.any_value();
    let err = svc.invoke(lookup(), vec![arg.clone(), arg]).unwrap_err();
    assert!(matches!(
        err,
        MockError::Usage(UsageError::ReusedPlaceholder { position: 1, .. })
    ));
}

#[test]
fn two_matchers_for_one_position_is_an_error() {
    let ctx = MockContext::new();
    let svc = Mock::new("svc", &ctx);

    svc.returns(1u32).unwrap();
    ctx.matcher_at(0, ArgMatcher::any()).unwrap();
    let err = ctx.matcher_at(0, ArgMatcher::any()).unwrap_err();
    assert!(matches!(
        err,
        MockError::Usage(UsageError::ConflictingMatchers { position: 0 })
    ));

    // The first capture is intact; complete the declaration normally.
    svc.invoke(lookup(), vec![Value::slot()]).unwrap();
    let out = svc.invoke(lookup(), vec![Value::of(5u32)]).unwrap();
    assert_eq!(out.returned::<u32>(), Some(&1));
}

#[test]
fn a_placeholder_in_a_real_call_is_an_error() {
    let ctx = MockContext::new();
    let svc = Mock::new("svc", &ctx);

    // No declaration pending: the helper's placeholder has nowhere to go.
    let stray = ctx.any_value();
    let err = svc.invoke(lookup(), vec![stray]).unwrap_err();
    assert!(matches!(
        err,
        MockError::Usage(UsageError::StrayPlaceholder { position: 0, .. })
    ));

    // The stale capture was cleared; declarations work again.
    svc.returns(1u32).unwrap();
    svc.invoke(lookup(), vec![]).unwrap();
    let out = svc.invoke(lookup(), vec![]).unwrap();
    assert_eq!(out.returned::<u32>(), Some(&1));
}
