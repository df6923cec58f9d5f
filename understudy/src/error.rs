// vim: tw=80
//! Fatal engine errors: protocol misuse, failed assertions, and
//! unsatisfiable default returns.
//!
//! Declared `raises` outcomes are not errors. They come back to the caller
//! as [`CallOutcome::Raise`](crate::CallOutcome::Raise) data.

use thiserror::Error;

/// Convenience alias for `Result<T, MockError>`.
pub type MockResult<T> = Result<T, MockError>;

/// Top-level error type for every fatal engine condition.
#[derive(Debug, Error)]
pub enum MockError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Assertion(#[from] AssertionFailure),

    /// No behavior matched the call and the default-value policy cannot
    /// synthesize a value for the declared return type.
    #[error("no default value available for return type `{type_name}`; \
             define a behavior for the call or register a default")]
    UnsupportedReturnType { type_name: &'static str },
}

/// Misuse of the declaration protocol. Always fatal, never retried.
#[derive(Debug, Error)]
pub enum UsageError {
    /// A declaration method was invoked while a previous declaration was
    /// still waiting for its matching call.
    #[error("{pending} was not followed by a call on a mock; complete it \
             before starting another declaration")]
    UnfinishedDeclaration { pending: String },

    /// Argument matchers were captured but never consumed by a call.
    #[error("dangling argument matcher(s): {}; a wildcard helper must be \
             used in the argument list of the next call on a mock",
            .descriptions.join(", "))]
    DanglingMatcher { descriptions: Vec<String> },

    /// A literal argument value and a position-captured matcher collided.
    #[error("argument {position} of `{method}` got both a literal value and \
             a matcher captured for that position")]
    LiteralWithMatcher { method: String, position: usize },

    /// Two matchers were captured for the same argument position.
    #[error("two matchers captured for argument position {position}")]
    ConflictingMatchers { position: usize },

    /// A reserved matcher slot was passed without a matcher captured for it.
    #[error("argument {position} of `{method}` is a matcher slot, but no \
             matcher was captured for that position")]
    UnfilledSlot { method: String, position: usize },

    /// A wildcard placeholder showed up in a real call.
    #[error("argument {position} of `{method}` is a matcher placeholder, \
             but no declaration is pending; wildcard helpers are only valid \
             in the call that completes a declaration")]
    StrayPlaceholder { method: String, position: usize },

    /// The same wildcard placeholder was used at two argument positions, or
    /// left over from an earlier declaration.
    #[error("the matcher placeholder at argument {position} of `{method}` \
             was already consumed; every wildcard helper produces exactly \
             one placeholder for exactly one position")]
    ReusedPlaceholder { method: String, position: usize },
}

/// A scenario assertion did not hold.
///
/// Carries the expected matching pattern and the ordered list of
/// invocations actually observed on that mock, so a failure can be
/// diagnosed without a debugger.
#[derive(Debug, Error)]
#[error("{reason}\n  expected: {expected}\n  observed invocations on \
         `{mock_name}`:\n{observed}")]
pub struct AssertionFailure {
    pub(crate) reason: String,
    pub(crate) expected: String,
    pub(crate) mock_name: String,
    pub(crate) observed: String,
}

impl AssertionFailure {
    /// Human-readable rendering of the expected matching pattern.
    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// The report of invocations observed on the mock, one per line.
    pub fn observed(&self) -> &str {
        &self.observed
    }
}
