// vim: tw=80
//! The test-scoped context: one matching session, one scenario, one
//! default-value policy, shared by every mock of a test.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use predicates::prelude::Predicate;

use crate::defaults::{DefaultValuePolicy, TypeDefaults};
use crate::error::MockResult;
use crate::invocation::{ExecutedInvocation, MockId, ReturnSpec};
use crate::matcher::ArgMatcher;
use crate::scenario::Scenario;
use crate::session::MatchingSession;
use crate::value::Value;

/// Test-scoped engine state shared by every mock created during one test.
///
/// Create one per test and pass it to [`Mock::new`](crate::Mock::new);
/// cloning the handle shares the same underlying state. The context is
/// deliberately not global: dropping it at the end of the test drops every
/// declaration and observation with it, and a fresh test starts from a
/// fresh context. A test lifecycle hook that reuses one context across
/// tests calls [`reset`](MockContext::reset) in between.
#[derive(Clone)]
pub struct MockContext {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    session: Mutex<MatchingSession>,
    scenario: Mutex<Scenario>,
    defaults: Box<dyn DefaultValuePolicy>,
    next_mock_id: AtomicU64,
}

impl MockContext {
    /// A context with the stock [`TypeDefaults`] policy.
    pub fn new() -> MockContext {
        MockContext::builder().build()
    }

    pub fn builder() -> MockContextBuilder {
        MockContextBuilder { defaults: None }
    }

    /// Clear the scenario and disarm the session, as a test lifecycle hook
    /// does between tests. Behavior pools live with their mocks; use
    /// [`Mock::reset_behavior`](crate::Mock::reset_behavior) for those.
    pub fn reset(&self) {
        self.session_lock().reset();
        self.scenario_lock().reset();
    }

    /// Snapshot of every invocation executed so far, in scenario order.
    pub fn observed_invocations(&self) -> Vec<ExecutedInvocation> {
        self.scenario_lock().observed().to_vec()
    }

    // Wildcard helpers. Each captures a matcher into the session and
    // returns the placeholder that binds it to an argument position of the
    // call completing the current declaration.

    /// Wildcard accepting any argument value.
    pub fn any_value(&self) -> Value {
        self.session_lock().capture(ArgMatcher::any())
    }

    /// Wildcard accepting any argument of concrete type `T`.
    pub fn any_of<T: 'static>(&self) -> Value {
        self.session_lock().capture(ArgMatcher::of_type::<T>())
    }

    /// Wildcard accepting whatever the [`Predicate`] accepts.
    pub fn with<T, P>(&self, pred: P) -> Value
    where
        T: PartialEq + fmt::Debug + Send + Sync + 'static,
        P: Predicate<T> + Send + 'static,
    {
        self.session_lock().capture(ArgMatcher::where_pred(pred))
    }

    /// Wildcard accepting whatever the function accepts. Shorthand for
    /// [`with`](MockContext::with) around `predicate::function`.
    pub fn withf<T, F>(&self, f: F) -> Value
    where
        T: PartialEq + fmt::Debug + Send + Sync + 'static,
        F: Fn(&T) -> bool + Send + 'static,
    {
        self.session_lock().capture(ArgMatcher::where_fn(f))
    }

    /// Capture a matcher for an explicit argument position. The call that
    /// completes the declaration must pass [`Value::slot`] at that
    /// position; a literal there is a usage error.
    pub fn matcher_at(&self, position: usize, matcher: ArgMatcher) -> MockResult<()> {
        self.session_lock()
            .capture_at(position, matcher)
            .map_err(Into::into)
    }

    pub(crate) fn session_lock(&self) -> MutexGuard<'_, MatchingSession> {
        self.inner.session.lock().unwrap()
    }

    pub(crate) fn scenario_lock(&self) -> MutexGuard<'_, Scenario> {
        self.inner.scenario.lock().unwrap()
    }

    pub(crate) fn default_for(&self, ret: &ReturnSpec) -> Option<Value> {
        self.inner.defaults.default_for(ret)
    }

    pub(crate) fn allocate_mock_id(&self) -> MockId {
        MockId(self.inner.next_mock_id.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for MockContext {
    fn default() -> Self {
        MockContext::new()
    }
}

impl Drop for ContextInner {
    fn drop(&mut self) {
        if thread::panicking() {
            return;
        }
        if let Ok(session) = self.session.get_mut() {
            if let Some(pending) = session.pending_description() {
                panic!("{pending} was never completed with a call on a mock");
            }
            if session.has_captured_matchers() {
                panic!(
                    "argument matchers were captured but never consumed by \
                     a call on a mock"
                );
            }
        }
    }
}

/// Builds a [`MockContext`] with a non-stock configuration.
pub struct MockContextBuilder {
    defaults: Option<Box<dyn DefaultValuePolicy>>,
}

impl MockContextBuilder {
    /// Substitute the default-value policy consulted when no behavior
    /// matches a call.
    pub fn default_values(mut self, policy: impl DefaultValuePolicy + 'static) -> Self {
        self.defaults = Some(Box::new(policy));
        self
    }

    pub fn build(self) -> MockContext {
        MockContext {
            inner: Arc::new(ContextInner {
                session: Mutex::new(MatchingSession::new()),
                scenario: Mutex::new(Scenario::new()),
                defaults: self
                    .defaults
                    .unwrap_or_else(|| Box::new(TypeDefaults::new())),
                next_mock_id: AtomicU64::new(0),
            }),
        }
    }
}
