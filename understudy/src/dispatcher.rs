// vim: tw=80
//! Call routing: every intercepted call either completes a pending
//! declaration or executes for real.

use std::sync::{Arc, Mutex};

use tracing::trace;

use crate::behavior::{BehaviorPool, CallOutcome};
use crate::context::MockContext;
use crate::error::{MockError, MockResult, UsageError};
use crate::invocation::RawCall;

/// Per-mock routing core. An armed session captures the call as a matching
/// pattern and never touches the scenario or the pools; anything else is
/// recorded to the scenario and resolved against the pools, falling back to
/// the context's default-value policy.
pub(crate) struct Dispatcher {
    ctx: MockContext,
    one_shot: Arc<Mutex<BehaviorPool>>,
    durable: Arc<Mutex<BehaviorPool>>,
}

impl Dispatcher {
    pub(crate) fn new(
        ctx: MockContext,
        one_shot: Arc<Mutex<BehaviorPool>>,
        durable: Arc<Mutex<BehaviorPool>>,
    ) -> Dispatcher {
        Dispatcher {
            ctx,
            one_shot,
            durable,
        }
    }

    pub(crate) fn dispatch(&self, call: RawCall) -> MockResult<CallOutcome> {
        {
            let mut session = self.ctx.session_lock();
            if session.is_armed() {
                trace!(
                    mock = %call.mock_name,
                    method = call.method.name(),
                    "consuming call as a matching pattern"
                );
                return session
                    .consume(call, &self.ctx)
                    .map(CallOutcome::Return);
            }
        }
        self.dispatch_real(call)
    }

    fn dispatch_real(&self, call: RawCall) -> MockResult<CallOutcome> {
        // Wildcard placeholders are only meaningful in the declaration
        // path; one here means a helper escaped its declaration.
        if let Some(position) = call
            .args
            .iter()
            .position(|a| a.as_marker().is_some() || a.is_slot())
        {
            self.ctx.session_lock().clear_captured();
            return Err(UsageError::StrayPlaceholder {
                method: call.method.name().to_string(),
                position,
            }
            .into());
        }

        let inv = self.ctx.scenario_lock().record(call);
        trace!(invocation = %inv, seq = inv.seq, "dispatching");

        // A one-shot override beats a standing default; within each pool
        // the most recent definition wins.
        if let Some(outcome) = self.one_shot.lock().unwrap().resolve(&inv) {
            return Ok(outcome);
        }
        if let Some(outcome) = self.durable.lock().unwrap().resolve(&inv) {
            return Ok(outcome);
        }

        let ret = inv.method.return_spec();
        match self.ctx.default_for(ret) {
            Some(v) => {
                trace!(invocation = %inv, "no behavior matched; returning type default");
                Ok(CallOutcome::Return(v))
            }
            None => Err(MockError::UnsupportedReturnType { type_name: ret.name }),
        }
    }
}
