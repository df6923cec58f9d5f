// vim: tw=80
//! Declared behaviors and the per-mock pools that hold them.

use std::fmt;

use tracing::debug;

use crate::invocation::{ExecutedInvocation, MatchingPattern};
use crate::value::Value;

/// What a resolved call produces: a value to return or a fault to
/// propagate.
///
/// Faults are data, not engine errors. The interception shim decides how a
/// `Raise` reaches the caller; the test decides whether it was expected.
#[derive(Clone, Debug, PartialEq)]
pub enum CallOutcome {
    Return(Value),
    Raise(Value),
}

impl CallOutcome {
    /// The returned value, if this outcome is a return of type `T`.
    pub fn returned<T>(&self) -> Option<&T>
    where
        T: PartialEq + fmt::Debug + Send + Sync + 'static,
    {
        match self {
            CallOutcome::Return(v) => v.get::<T>(),
            CallOutcome::Raise(_) => None,
        }
    }

    /// The raised fault, if this outcome is a raise of type `T`.
    pub fn raised<T>(&self) -> Option<&T>
    where
        T: PartialEq + fmt::Debug + Send + Sync + 'static,
    {
        match self {
            CallOutcome::Raise(v) => v.get::<T>(),
            CallOutcome::Return(_) => None,
        }
    }

    pub fn is_raise(&self) -> bool {
        matches!(self, CallOutcome::Raise(_))
    }
}

type PerformFn = Box<dyn FnMut(&ExecutedInvocation) -> CallOutcome + Send>;
type FaultFn = Box<dyn Fn() -> Value + Send>;

/// Declared behavior for calls matching a pattern.
pub(crate) enum Behavior {
    /// Return the same value on every occurrence.
    Return(Value),
    /// Raise the same fault value on every occurrence.
    Raise(Value),
    /// Raise a freshly produced fault per occurrence.
    RaiseWith(FaultFn),
    /// Run a custom action and use whatever it produces.
    Perform(PerformFn),
}

impl Behavior {
    fn execute(&mut self, inv: &ExecutedInvocation) -> CallOutcome {
        match self {
            Behavior::Return(v) => CallOutcome::Return(v.clone()),
            Behavior::Raise(v) => CallOutcome::Raise(v.clone()),
            Behavior::RaiseWith(f) => CallOutcome::Raise(f()),
            Behavior::Perform(f) => f(inv),
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Behavior::Return(_) => "returns",
            Behavior::Raise(_) | Behavior::RaiseWith(_) => "raises",
            Behavior::Perform(_) => "performs",
        }
    }
}

struct BehaviorEntry {
    pattern: MatchingPattern,
    behavior: Behavior,
}

/// Insertion-ordered behavior entries for one mock.
///
/// The one-shot pool removes an entry on its first match; the durable pool
/// keeps entries for the whole test. Resolution scans most recently defined
/// first, so a later declaration overrides an earlier one for the calls
/// both match.
pub(crate) struct BehaviorPool {
    entries: Vec<BehaviorEntry>,
    one_shot: bool,
}

impl BehaviorPool {
    pub(crate) fn new(one_shot: bool) -> BehaviorPool {
        BehaviorPool {
            entries: Vec::new(),
            one_shot,
        }
    }

    pub(crate) fn define(&mut self, pattern: MatchingPattern, behavior: Behavior) {
        debug!(
            pattern = %pattern,
            one_shot = self.one_shot,
            op = behavior.describe(),
            "behavior defined"
        );
        self.entries.push(BehaviorEntry { pattern, behavior });
    }

    /// Resolve `inv` against this pool and run the winning behavior.
    pub(crate) fn resolve(&mut self, inv: &ExecutedInvocation) -> Option<CallOutcome> {
        let idx = self.entries.iter().rposition(|e| e.pattern.matches(inv))?;
        if self.one_shot {
            let mut entry = self.entries.remove(idx);
            Some(entry.behavior.execute(inv))
        } else {
            Some(self.entries[idx].behavior.execute(inv))
        }
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
