// vim: tw=80
//! The scenario: the append-only log of calls that really executed, and
//! the assertion scans over it.

use crate::error::AssertionFailure;
use crate::invocation::{ExecutedInvocation, MatchingPattern, MockId, RawCall};

/// Append-only log of every call executed during the test, shared by every
/// mock in the context. Sequence numbers are strictly increasing across
/// mocks, so assertions can reason about global call order.
pub(crate) struct Scenario {
    observed: Vec<ExecutedInvocation>,
    next_seq: u64,
}

impl Scenario {
    pub(crate) fn new() -> Scenario {
        Scenario {
            observed: Vec::new(),
            next_seq: 0,
        }
    }

    /// Record a real call, assigning it the next sequence number.
    pub(crate) fn record(&mut self, call: RawCall) -> ExecutedInvocation {
        let inv = ExecutedInvocation {
            mock: call.mock,
            mock_name: call.mock_name,
            method: call.method,
            args: call.args,
            seq: self.next_seq,
            location: call.location,
        };
        self.next_seq += 1;
        self.observed.push(inv.clone());
        inv
    }

    pub(crate) fn observed(&self) -> &[ExecutedInvocation] {
        &self.observed
    }

    pub(crate) fn verify_invoked(
        &self,
        pattern: &MatchingPattern,
    ) -> Result<(), AssertionFailure> {
        if self.observed.iter().any(|inv| pattern.matches(inv)) {
            Ok(())
        } else {
            Err(self.failure("expected invocation was never observed", pattern))
        }
    }

    pub(crate) fn verify_not_invoked(
        &self,
        pattern: &MatchingPattern,
    ) -> Result<(), AssertionFailure> {
        match self.observed.iter().find(|inv| pattern.matches(inv)) {
            None => Ok(()),
            Some(inv) => Err(self.failure(
                &format!("invocation was expected never, but was observed as #{}", inv.seq),
                pattern,
            )),
        }
    }

    /// Sequence-sensitive scan: the matching record must occur at or after
    /// `cursor`, which then advances past it. Records before the cursor
    /// were consumed by earlier sequence assertions.
    pub(crate) fn verify_invoked_in_sequence(
        &self,
        pattern: &MatchingPattern,
        cursor: &mut usize,
    ) -> Result<(), AssertionFailure> {
        let from = *cursor;
        if let Some(pos) = self
            .observed
            .iter()
            .skip(from)
            .position(|inv| pattern.matches(inv))
        {
            *cursor = from + pos + 1;
            return Ok(());
        }
        let reason = if self
            .observed
            .iter()
            .take(from)
            .any(|inv| pattern.matches(inv))
        {
            "expected invocation was observed out of sequence: it precedes \
             one already verified by an earlier sequence assertion"
        } else {
            "expected invocation was never observed"
        };
        Err(self.failure(reason, pattern))
    }

    fn failure(&self, reason: &str, pattern: &MatchingPattern) -> AssertionFailure {
        let mut observed = self.report_for(pattern.mock);
        if let Some(detail) = self.near_miss_detail(pattern) {
            observed.push('\n');
            observed.push_str(&detail);
        }
        AssertionFailure {
            reason: reason.to_string(),
            expected: format!("{pattern} (declared at {})", pattern.location),
            mock_name: pattern.mock_name.to_string(),
            observed,
        }
    }

    /// The ordered list of invocations observed on one mock, one per line,
    /// for failure reports.
    fn report_for(&self, mock: MockId) -> String {
        let lines: Vec<String> = self
            .observed
            .iter()
            .filter(|inv| inv.mock == mock)
            .map(|inv| format!("    {inv:?}"))
            .collect();
        if lines.is_empty() {
            "    (none)".to_string()
        } else {
            lines.join("\n")
        }
    }

    /// If some call reached the right member but an argument matcher
    /// rejected it, explain the first rejection; predicate matchers render
    /// their failure case tree.
    fn near_miss_detail(&self, pattern: &MatchingPattern) -> Option<String> {
        let near = self.observed.iter().find(|inv| {
            inv.mock == pattern.mock
                && inv.method.name() == pattern.method.name()
                && inv.args.len() == pattern.args.len()
                && !pattern.matches(inv)
        })?;
        let (position, matcher, value) = pattern
            .args
            .iter()
            .zip(&near.args)
            .enumerate()
            .find(|(_, (m, v))| !m.accepts(v))
            .map(|(i, (m, v))| (i, m, v))?;
        let explanation = matcher
            .explain_mismatch(value)
            .unwrap_or_else(|| format!("expected {matcher}, got {value:?}"));
        Some(format!(
            "  closest call #{}: argument {} rejected: {}",
            near.seq, position, explanation
        ))
    }

    pub(crate) fn reset(&mut self) {
        self.observed.clear();
        self.next_seq = 0;
    }
}
