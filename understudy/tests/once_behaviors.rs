// vim: tw=80
//! One-shot behaviors: consumed by the first matching call, and checked
//! before the durable pool.
#![deny(warnings)]

use understudy::*;

fn get() -> MethodSig {
    MethodSig::returning::<u32>("get")
}

#[test]
fn fires_at_most_once_then_falls_through() {
    let ctx = MockContext::new();
    let repo = Mock::new("repo", &ctx);

    repo.returns(1u32).unwrap();
    repo.invoke(get(), vec![]).unwrap();
    repo.once_returns(9u32).unwrap();
    repo.invoke(get(), vec![]).unwrap();

    let first = repo.invoke(get(), vec![]).unwrap();
    assert_eq!(first.returned::<u32>(), Some(&9));
    let second = repo.invoke(get(), vec![]).unwrap();
    assert_eq!(second.returned::<u32>(), Some(&1));
}

#[test]
fn beats_a_durable_behavior_declared_later() {
    let ctx = MockContext::new();
    let repo = Mock::new("repo", &ctx);

    repo.once_returns(9u32).unwrap();
    repo.invoke(get(), vec![]).unwrap();
    repo.returns(1u32).unwrap();
    repo.invoke(get(), vec![]).unwrap();

    let first = repo.invoke(get(), vec![]).unwrap();
    assert_eq!(first.returned::<u32>(), Some(&9));
    let second = repo.invoke(get(), vec![]).unwrap();
    assert_eq!(second.returned::<u32>(), Some(&1));
}

#[test]
fn most_recent_one_shot_is_consumed_first() {
    let ctx = MockContext::new();
    let repo = Mock::new("repo", &ctx);

    repo.once_returns(1u32).unwrap();
    repo.invoke(get(), vec![]).unwrap();
    repo.once_returns(2u32).unwrap();
    repo.invoke(get(), vec![]).unwrap();

    let calls: Vec<u32> = (0..3)
        .map(|_| *repo.invoke(get(), vec![]).unwrap().returned::<u32>().unwrap())
        .collect();
    assert_eq!(calls, vec![2, 1, 0]);
}

#[test]
fn unmatched_one_shot_stays_available_for_its_own_pattern() {
    let ctx = MockContext::new();
    let repo = Mock::new("repo", &ctx);

    repo.once_returns(9u32).unwrap();
    repo.invoke(get(), vec![Value::of(5u8)]).unwrap();

    // A call with a different argument leaves the one-shot in place.
    let miss = repo.invoke(get(), vec![Value::of(6u8)]).unwrap();
    assert_eq!(miss.returned::<u32>(), Some(&0));

    let hit = repo.invoke(get(), vec![Value::of(5u8)]).unwrap();
    assert_eq!(hit.returned::<u32>(), Some(&9));
    let spent = repo.invoke(get(), vec![Value::of(5u8)]).unwrap();
    assert_eq!(spent.returned::<u32>(), Some(&0));
}
