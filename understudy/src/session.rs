// vim: tw=80
//! The matching session: the declare-intent half of the two-phase
//! declaration protocol, plus the captured-matcher scratch area.

use crate::context::MockContext;
use crate::error::{MockResult, UsageError};
use crate::invocation::{MatchingPattern, RawCall};
use crate::matcher::ArgMatcher;
use crate::value::{MarkerId, Value};

/// Receives the matching pattern built from the call that completes a
/// declaration. Implementations define behavior or verify the scenario.
pub(crate) trait MatchingHandler: Send {
    fn handle(&mut self, pattern: MatchingPattern, ctx: &MockContext) -> MockResult<Value>;
}

struct Armed {
    handler: Box<dyn MatchingHandler>,
    description: String,
}

enum Binding {
    Marker(MarkerId),
    Position(usize),
}

struct Captured {
    binding: Binding,
    matcher: ArgMatcher,
}

/// The single, test-scoped state machine linking a declared intent to the
/// very next intercepted call.
///
/// At most one declaration is armed at any instant; arming over a pending
/// declaration, or over matchers left dangling by an abandoned one, fails
/// fast instead of being silently absorbed.
pub(crate) struct MatchingSession {
    armed: Option<Armed>,
    captured: Vec<Captured>,
    next_marker: u64,
}

impl MatchingSession {
    pub(crate) fn new() -> MatchingSession {
        MatchingSession {
            armed: None,
            captured: Vec::new(),
            next_marker: 0,
        }
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub(crate) fn pending_description(&self) -> Option<&str> {
        self.armed.as_ref().map(|a| a.description.as_str())
    }

    pub(crate) fn has_captured_matchers(&self) -> bool {
        !self.captured.is_empty()
    }

    /// Arm the session for the next intercepted call.
    ///
    /// On failure the broken state is cleared first, so one mistake does
    /// not cascade into every later declaration of the test.
    pub(crate) fn arm(
        &mut self,
        handler: Box<dyn MatchingHandler>,
        description: String,
    ) -> Result<(), UsageError> {
        if let Some(pending) = self.armed.take() {
            self.captured.clear();
            return Err(UsageError::UnfinishedDeclaration {
                pending: pending.description,
            });
        }
        if !self.captured.is_empty() {
            let descriptions = self
                .captured
                .drain(..)
                .map(|c| c.matcher.to_string())
                .collect();
            return Err(UsageError::DanglingMatcher { descriptions });
        }
        self.armed = Some(Armed { handler, description });
        Ok(())
    }

    /// Capture a wildcard matcher. The returned placeholder binds it to
    /// whatever argument position the placeholder is passed at.
    pub(crate) fn capture(&mut self, matcher: ArgMatcher) -> Value {
        let id = MarkerId(self.next_marker);
        self.next_marker += 1;
        self.captured.push(Captured {
            binding: Binding::Marker(id),
            matcher,
        });
        Value::marker(id)
    }

    /// Capture a matcher for an explicit argument position. The matching
    /// call must pass [`Value::slot`] at that position.
    pub(crate) fn capture_at(
        &mut self,
        position: usize,
        matcher: ArgMatcher,
    ) -> Result<(), UsageError> {
        let dup = self
            .captured
            .iter()
            .any(|c| matches!(c.binding, Binding::Position(p) if p == position));
        if dup {
            return Err(UsageError::ConflictingMatchers { position });
        }
        self.captured.push(Captured {
            binding: Binding::Position(position),
            matcher,
        });
        Ok(())
    }

    /// Consume the next intercepted call: build the matching pattern from
    /// it, overlay the captured matchers, hand the pattern to the armed
    /// handler, and return the fabricated result of the declaration call.
    ///
    /// All session state is cleared before the handler runs, so a failing
    /// assertion leaves the session clean. Only the dispatcher calls this,
    /// after checking [`is_armed`](Self::is_armed) under the same lock.
    pub(crate) fn consume(&mut self, call: RawCall, ctx: &MockContext) -> MockResult<Value> {
        let mut armed = self
            .armed
            .take()
            .expect("consume() without an armed declaration");
        let captured = std::mem::take(&mut self.captured);
        let pattern = build_pattern(call, captured)?;
        armed.handler.handle(pattern, ctx)
    }

    /// Drop captured matchers without touching the armed declaration.
    /// Used when a placeholder leaks into a real call, so the stale
    /// helpers do not cascade into later declarations.
    pub(crate) fn clear_captured(&mut self) {
        self.captured.clear();
    }

    pub(crate) fn reset(&mut self) {
        self.armed = None;
        self.captured.clear();
    }
}

/// Fold the captured matchers into the raw call's argument list: wildcard
/// placeholders bind their marker's matcher, reserved slots bind the
/// matcher captured for that position, and everything else becomes a
/// literal equality matcher.
fn build_pattern(
    call: RawCall,
    mut captured: Vec<Captured>,
) -> Result<MatchingPattern, UsageError> {
    let RawCall {
        mock,
        mock_name,
        method,
        args,
        location,
    } = call;
    let method_name = method.name().to_string();

    let mut matchers = Vec::with_capacity(args.len());
    for (position, arg) in args.iter().enumerate() {
        let explicit = captured
            .iter()
            .position(|c| matches!(c.binding, Binding::Position(p) if p == position))
            .map(|idx| captured.remove(idx));

        if let Some(marker) = arg.as_marker() {
            if explicit.is_some() {
                return Err(UsageError::ConflictingMatchers { position });
            }
            let found = captured
                .iter()
                .position(|c| matches!(c.binding, Binding::Marker(m) if m == marker));
            match found {
                Some(idx) => matchers.push(captured.remove(idx).matcher),
                None => {
                    return Err(UsageError::ReusedPlaceholder {
                        method: method_name,
                        position,
                    })
                }
            }
        } else if arg.is_slot() {
            match explicit {
                Some(c) => matchers.push(c.matcher),
                None => {
                    return Err(UsageError::UnfilledSlot {
                        method: method_name,
                        position,
                    })
                }
            }
        } else {
            if explicit.is_some() {
                return Err(UsageError::LiteralWithMatcher {
                    method: method_name,
                    position,
                });
            }
            matchers.push(ArgMatcher::literal(arg.clone()));
        }
    }

    if !captured.is_empty() {
        let descriptions = captured.iter().map(|c| c.matcher.to_string()).collect();
        return Err(UsageError::DanglingMatcher { descriptions });
    }

    Ok(MatchingPattern {
        mock,
        mock_name,
        method,
        args: matchers,
        location,
    })
}
