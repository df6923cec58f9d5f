// vim: tw=80
//! Invocation records: the raw call delivered by the interception shim, the
//! executed invocation kept in the scenario, and the matching pattern built
//! during a declaration.

use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use crate::matcher::ArgMatcher;
use crate::value::Value;

/// Identity of one mock instance within a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MockId(pub(crate) u64);

/// Declared return type of a mocked member, consulted by the default-value
/// fallback when no behavior matches a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReturnSpec {
    pub(crate) id: TypeId,
    pub(crate) name: &'static str,
}

impl ReturnSpec {
    /// The return spec for type `R`.
    pub fn of<R: 'static>() -> ReturnSpec {
        ReturnSpec {
            id: TypeId::of::<R>(),
            name: std::any::type_name::<R>(),
        }
    }

    /// The return spec of a unit-returning member.
    pub fn unit() -> ReturnSpec {
        ReturnSpec::of::<()>()
    }
}

/// Signature of the mocked member a call goes through.
///
/// Two calls are for the same member when their names and arities agree;
/// the return spec only feeds the default-value fallback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodSig {
    name: Cow<'static, str>,
    ret: ReturnSpec,
}

impl MethodSig {
    /// A unit-returning member.
    pub fn new(name: impl Into<Cow<'static, str>>) -> MethodSig {
        MethodSig {
            name: name.into(),
            ret: ReturnSpec::unit(),
        }
    }

    /// A member returning `R`.
    pub fn returning<R: 'static>(name: impl Into<Cow<'static, str>>) -> MethodSig {
        MethodSig {
            name: name.into(),
            ret: ReturnSpec::of::<R>(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn return_spec(&self) -> &ReturnSpec {
        &self.ret
    }
}

impl From<&'static str> for MethodSig {
    fn from(name: &'static str) -> MethodSig {
        MethodSig::new(name)
    }
}

impl From<String> for MethodSig {
    fn from(name: String) -> MethodSig {
        MethodSig::new(name)
    }
}

/// A just-intercepted call, as the interception shim delivers it to the
/// dispatcher.
pub(crate) struct RawCall {
    pub(crate) mock: MockId,
    pub(crate) mock_name: Arc<str>,
    pub(crate) method: MethodSig,
    pub(crate) args: Vec<Value>,
    pub(crate) location: &'static Location<'static>,
}

/// One call that really executed, as recorded in the scenario.
#[derive(Clone)]
pub struct ExecutedInvocation {
    pub(crate) mock: MockId,
    pub(crate) mock_name: Arc<str>,
    pub(crate) method: MethodSig,
    pub(crate) args: Vec<Value>,
    pub(crate) seq: u64,
    pub(crate) location: &'static Location<'static>,
}

impl ExecutedInvocation {
    pub fn mock_id(&self) -> MockId {
        self.mock
    }

    pub fn mock_name(&self) -> &str {
        &self.mock_name
    }

    pub fn method(&self) -> &MethodSig {
        &self.method
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Borrow argument `index`, if present and of concrete type `T`.
    pub fn arg<T>(&self, index: usize) -> Option<&T>
    where
        T: PartialEq + fmt::Debug + Send + Sync + 'static,
    {
        self.args.get(index)?.get::<T>()
    }

    /// Position of this invocation in the scenario; strictly increasing
    /// across every mock of the test.
    pub fn sequence(&self) -> u64 {
        self.seq
    }

    /// Call site of the invocation.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl fmt::Display for ExecutedInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}(", self.mock_name, self.method.name())?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg:?}")?;
        }
        f.write_str(")")
    }
}

impl fmt::Debug for ExecutedInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} at {}", self.seq, self, self.location)
    }
}

/// A declared call shape: like an executed invocation, but every argument
/// slot holds a matcher rather than a literal value.
pub(crate) struct MatchingPattern {
    pub(crate) mock: MockId,
    pub(crate) mock_name: Arc<str>,
    pub(crate) method: MethodSig,
    pub(crate) args: Vec<ArgMatcher>,
    pub(crate) location: &'static Location<'static>,
}

impl MatchingPattern {
    /// Whether the executed invocation is one of the calls this pattern
    /// describes: same mock, same member, every argument accepted.
    pub(crate) fn matches(&self, inv: &ExecutedInvocation) -> bool {
        self.mock == inv.mock
            && self.method.name() == inv.method.name()
            && self.args.len() == inv.args.len()
            && self.args.iter().zip(&inv.args).all(|(m, v)| m.accepts(v))
    }
}

impl fmt::Display for MatchingPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}(", self.mock_name, self.method.name())?;
        for (i, m) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{m}")?;
        }
        f.write_str(")")
    }
}
