// vim: tw=80
//! The handlers a declaration arms the session with: file the completed
//! pattern as behavior, or verify it against the scenario.

use std::sync::{Arc, Mutex};

use crate::behavior::{Behavior, BehaviorPool};
use crate::context::MockContext;
use crate::error::MockResult;
use crate::invocation::MatchingPattern;
use crate::session::MatchingHandler;
use crate::value::Value;

/// Files the completed pattern, with the declared behavior, into the
/// declaring mock's target pool.
pub(crate) struct BehaviorDefiningHandler {
    pool: Arc<Mutex<BehaviorPool>>,
    behavior: Option<Behavior>,
}

impl BehaviorDefiningHandler {
    pub(crate) fn new(pool: Arc<Mutex<BehaviorPool>>, behavior: Behavior) -> Self {
        BehaviorDefiningHandler {
            pool,
            behavior: Some(behavior),
        }
    }
}

impl MatchingHandler for BehaviorDefiningHandler {
    fn handle(&mut self, pattern: MatchingPattern, _ctx: &MockContext) -> MockResult<Value> {
        let behavior = self
            .behavior
            .take()
            .expect("a declaration handler is consumed exactly once");
        self.pool.lock().unwrap().define(pattern, behavior);
        Ok(Value::unit())
    }
}

pub(crate) struct AssertInvokedHandler;

impl MatchingHandler for AssertInvokedHandler {
    fn handle(&mut self, pattern: MatchingPattern, ctx: &MockContext) -> MockResult<Value> {
        ctx.scenario_lock().verify_invoked(&pattern)?;
        Ok(Value::unit())
    }
}

pub(crate) struct AssertNotInvokedHandler;

impl MatchingHandler for AssertNotInvokedHandler {
    fn handle(&mut self, pattern: MatchingPattern, ctx: &MockContext) -> MockResult<Value> {
        ctx.scenario_lock().verify_not_invoked(&pattern)?;
        Ok(Value::unit())
    }
}

/// Sequence-sensitive assert: shares the declaring mock's cursor into the
/// scenario, so consecutive sequence asserts on one mock must observe
/// calls in scenario order.
pub(crate) struct AssertInvokedInSequenceHandler {
    cursor: Arc<Mutex<usize>>,
}

impl AssertInvokedInSequenceHandler {
    pub(crate) fn new(cursor: Arc<Mutex<usize>>) -> Self {
        AssertInvokedInSequenceHandler { cursor }
    }
}

impl MatchingHandler for AssertInvokedInSequenceHandler {
    fn handle(&mut self, pattern: MatchingPattern, ctx: &MockContext) -> MockResult<Value> {
        let mut cursor = self.cursor.lock().unwrap();
        ctx.scenario_lock()
            .verify_invoked_in_sequence(&pattern, &mut cursor)?;
        Ok(Value::unit())
    }
}
