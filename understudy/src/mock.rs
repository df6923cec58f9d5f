// vim: tw=80
//! The mock handle: declaration operations on one mocked collaborator, and
//! the entry point its intercepted calls are delivered to.

use std::fmt;
use std::panic::Location;
use std::sync::{Arc, Mutex};

use fragile::Fragile;

use crate::behavior::{Behavior, BehaviorPool, CallOutcome};
use crate::context::MockContext;
use crate::dispatcher::Dispatcher;
use crate::error::MockResult;
use crate::handlers::{
    AssertInvokedHandler, AssertInvokedInSequenceHandler, AssertNotInvokedHandler,
    BehaviorDefiningHandler,
};
use crate::invocation::{ExecutedInvocation, MethodSig, MockId, RawCall};
use crate::session::MatchingHandler;
use crate::value::Value;

/// A handle on one mocked collaborator: declares behavior and assertions
/// for it, and receives its intercepted calls.
///
/// Every declaration method arms the shared session; the *next* call made
/// through [`invoke`](Mock::invoke) — on this or any other mock of the same
/// context — is captured as the matching pattern instead of executing. See
/// the crate-level docs for the full protocol.
pub struct Mock {
    name: Arc<str>,
    id: MockId,
    ctx: MockContext,
    one_shot: Arc<Mutex<BehaviorPool>>,
    durable: Arc<Mutex<BehaviorPool>>,
    seq_cursor: Arc<Mutex<usize>>,
    dispatcher: Dispatcher,
}

impl Mock {
    /// Create a mock named `name` (conventionally the collaborator's field
    /// name) in the given test context.
    pub fn new(name: impl Into<String>, ctx: &MockContext) -> Mock {
        let name: Arc<str> = Arc::from(name.into());
        let one_shot = Arc::new(Mutex::new(BehaviorPool::new(true)));
        let durable = Arc::new(Mutex::new(BehaviorPool::new(false)));
        Mock {
            name,
            id: ctx.allocate_mock_id(),
            ctx: ctx.clone(),
            one_shot: one_shot.clone(),
            durable: durable.clone(),
            seq_cursor: Arc::new(Mutex::new(0)),
            dispatcher: Dispatcher::new(ctx.clone(), one_shot, durable),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> MockId {
        self.id
    }

    /// Every matched call returns `value`, until overridden by a later
    /// declaration.
    #[track_caller]
    pub fn returns<T>(&self, value: T) -> MockResult<&Self>
    where
        T: PartialEq + fmt::Debug + Send + Sync + 'static,
    {
        self.define(Behavior::Return(Value::of(value)), false, "returns(..)")
    }

    /// One-shot variant of [`returns`](Mock::returns): consumed by the
    /// first matching call; later matches fall through to the next-best
    /// behavior or the type default.
    #[track_caller]
    pub fn once_returns<T>(&self, value: T) -> MockResult<&Self>
    where
        T: PartialEq + fmt::Debug + Send + Sync + 'static,
    {
        self.define(Behavior::Return(Value::of(value)), true, "once_returns(..)")
    }

    /// Every matched call raises `fault`, the same value each time.
    #[track_caller]
    pub fn raises<T>(&self, fault: T) -> MockResult<&Self>
    where
        T: PartialEq + fmt::Debug + Send + Sync + 'static,
    {
        self.define(Behavior::Raise(Value::of(fault)), false, "raises(..)")
    }

    /// One-shot variant of [`raises`](Mock::raises).
    #[track_caller]
    pub fn once_raises<T>(&self, fault: T) -> MockResult<&Self>
    where
        T: PartialEq + fmt::Debug + Send + Sync + 'static,
    {
        self.define(Behavior::Raise(Value::of(fault)), true, "once_raises(..)")
    }

    /// Like [`raises`](Mock::raises), but the factory produces a fresh
    /// fault per occurrence, for fault types that are built rather than
    /// shared.
    #[track_caller]
    pub fn raises_with<T, F>(&self, factory: F) -> MockResult<&Self>
    where
        T: PartialEq + fmt::Debug + Send + Sync + 'static,
        F: Fn() -> T + Send + 'static,
    {
        self.define(
            Behavior::RaiseWith(Box::new(move || Value::of(factory()))),
            false,
            "raises_with(..)",
        )
    }

    /// One-shot variant of [`raises_with`](Mock::raises_with).
    #[track_caller]
    pub fn once_raises_with<T, F>(&self, factory: F) -> MockResult<&Self>
    where
        T: PartialEq + fmt::Debug + Send + Sync + 'static,
        F: Fn() -> T + Send + 'static,
    {
        self.define(
            Behavior::RaiseWith(Box::new(move || Value::of(factory()))),
            true,
            "once_raises_with(..)",
        )
    }

    /// Every matched call runs `action` and uses its outcome.
    #[track_caller]
    pub fn performs<F>(&self, action: F) -> MockResult<&Self>
    where
        F: FnMut(&ExecutedInvocation) -> CallOutcome + Send + 'static,
    {
        self.define(Behavior::Perform(Box::new(action)), false, "performs(..)")
    }

    /// One-shot variant of [`performs`](Mock::performs).
    #[track_caller]
    pub fn once_performs<F>(&self, action: F) -> MockResult<&Self>
    where
        F: FnMut(&ExecutedInvocation) -> CallOutcome + Send + 'static,
    {
        self.define(Behavior::Perform(Box::new(action)), true, "once_performs(..)")
    }

    /// Single-threaded version of [`performs`](Mock::performs), for
    /// actions that are not `Send`. Invoking the mock from a different
    /// thread than the declaring one is a runtime error.
    #[track_caller]
    pub fn performs_st<F>(&self, action: F) -> MockResult<&Self>
    where
        F: FnMut(&ExecutedInvocation) -> CallOutcome + 'static,
    {
        let mut fragile = Fragile::new(action);
        let action = move |inv: &ExecutedInvocation| (fragile.get_mut())(inv);
        self.define(Behavior::Perform(Box::new(action)), false, "performs_st(..)")
    }

    /// Assert that a call matching the next invocation was observed at
    /// some point during the test, on this mock.
    #[track_caller]
    pub fn assert_invoked(&self) -> MockResult<&Self> {
        self.arm(Box::new(AssertInvokedHandler), "assert_invoked()")
    }

    /// Like [`assert_invoked`](Mock::assert_invoked), but consecutive
    /// sequence assertions on this mock must observe their calls in
    /// scenario order.
    #[track_caller]
    pub fn assert_invoked_in_sequence(&self) -> MockResult<&Self> {
        self.arm(
            Box::new(AssertInvokedInSequenceHandler::new(self.seq_cursor.clone())),
            "assert_invoked_in_sequence()",
        )
    }

    /// Assert that no call matching the next invocation was observed.
    #[track_caller]
    pub fn assert_not_invoked(&self) -> MockResult<&Self> {
        self.arm(Box::new(AssertNotInvokedHandler), "assert_not_invoked()")
    }

    /// Drop every behavior defined for this mock and disarm the session,
    /// leaving observed invocations in place.
    pub fn reset_behavior(&self) {
        self.one_shot.lock().unwrap().clear();
        self.durable.lock().unwrap().clear();
        self.ctx.session_lock().reset();
    }

    /// Deliver an intercepted call to the engine.
    ///
    /// This is the boundary the interception shim talks to: it supplies
    /// the member signature and argument values, and gets back the value
    /// to return or the fault to throw.
    #[track_caller]
    pub fn invoke(
        &self,
        method: impl Into<MethodSig>,
        args: Vec<Value>,
    ) -> MockResult<CallOutcome> {
        let call = RawCall {
            mock: self.id,
            mock_name: self.name.clone(),
            method: method.into(),
            args,
            location: Location::caller(),
        };
        self.dispatcher.dispatch(call)
    }

    #[track_caller]
    fn define(&self, behavior: Behavior, one_shot: bool, op: &str) -> MockResult<&Self> {
        let pool = if one_shot { &self.one_shot } else { &self.durable };
        self.arm(
            Box::new(BehaviorDefiningHandler::new(pool.clone(), behavior)),
            op,
        )
    }

    #[track_caller]
    fn arm(&self, handler: Box<dyn MatchingHandler>, op: &str) -> MockResult<&Self> {
        let description = format!("{}.{} declared at {}", self.name, op, Location::caller());
        self.ctx.session_lock().arm(handler, description)?;
        Ok(self)
    }
}

impl fmt::Debug for Mock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mock")
            .field("name", &self.name)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
