// vim: tw=80
//! A behavioral mock object library for Rust.
//!
//! Understudy scripts test doubles at runtime: a test declares what a call
//! on a mock should do, makes the call that shows *which* calls are meant,
//! and later asserts on the calls that actually happened. The engine is
//! value-based and needs no code generation; anything that can deliver a
//! structured call (member signature plus argument values) can drive it.
//!
//! # The declaration protocol
//!
//! Declarations are a two-step protocol. A declaration method such as
//! [`Mock::returns`] arms the context's matching session; the very next
//! call made through [`Mock::invoke`] is then captured as the *matching
//! pattern* instead of executing. Every later call that matches the
//! pattern resolves to the declared behavior.
//!
//! ```
//! use understudy::{Mock, MockContext, MethodSig};
//!
//! let ctx = MockContext::new();
//! let store = Mock::new("store", &ctx);
//!
//! // Declare: every matching call returns 7.
//! store.returns(7u32)?;
//! store.invoke(MethodSig::returning::<u32>("next_id"), vec![])?;
//!
//! // Real calls now resolve against the declared behavior.
//! let out = store.invoke(MethodSig::returning::<u32>("next_id"), vec![])?;
//! assert_eq!(out.returned::<u32>(), Some(&7));
//! # Ok::<(), understudy::MockError>(())
//! ```
//!
//! Declarations come in durable and one-shot flavors. A durable behavior
//! fires on every match until overridden; a one-shot behavior
//! ([`Mock::once_returns`] and friends) is consumed by its first match and
//! beats any durable behavior for that call. Among several candidates in
//! the same pool, the most recently declared one wins.
//!
//! # Argument matchers
//!
//! Pattern arguments are literal by default: the values passed in the
//! pattern call must compare equal on later calls. Wildcard helpers on
//! [`MockContext`] loosen individual positions. Each helper returns a
//! placeholder [`Value`] to pass at the position the wildcard applies to.
//!
//! ```
//! use understudy::{Mock, MockContext, MethodSig, Value};
//!
//! let ctx = MockContext::new();
//! let svc = Mock::new("svc", &ctx);
//!
//! svc.returns(String::from("hit"))?;
//! let key = ctx.any_of::<u32>();
//! svc.invoke(MethodSig::returning::<String>("lookup"), vec![key])?;
//!
//! let out = svc.invoke(
//!     MethodSig::returning::<String>("lookup"),
//!     vec![Value::of(7u32)],
//! )?;
//! assert_eq!(out.returned::<String>().map(String::as_str), Some("hit"));
//! # Ok::<(), understudy::MockError>(())
//! ```
//!
//! Custom predicates use the [`predicates`] crate, re-exported as
//! [`predicate`]:
//!
//! ```
//! use understudy::{predicate, Mock, MockContext, MethodSig, Value};
//!
//! let ctx = MockContext::new();
//! let gauge = Mock::new("gauge", &ctx);
//!
//! gauge.returns(true)?;
//! let level = ctx.with(predicate::gt(10i32));
//! gauge.invoke(MethodSig::returning::<bool>("over"), vec![level])?;
//!
//! let hit = gauge.invoke(MethodSig::returning::<bool>("over"), vec![Value::of(11i32)])?;
//! assert_eq!(hit.returned::<bool>(), Some(&true));
//!
//! // No behavior matches 3, so the call falls back to the type default.
//! let miss = gauge.invoke(MethodSig::returning::<bool>("over"), vec![Value::of(3i32)])?;
//! assert_eq!(miss.returned::<bool>(), Some(&false));
//! # Ok::<(), understudy::MockError>(())
//! ```
//!
//! A wildcard helper must be consumed by the call completing its
//! declaration; a helper invoked and then abandoned is reported as a
//! dangling matcher at the next declaration, not silently dropped.
//!
//! # Faults
//!
//! [`Mock::raises`] declares a fault as the call's outcome. Faults are
//! data, not engine errors: the call comes back as
//! [`CallOutcome::Raise`] and the caller decides what to do with it.
//!
//! ```
//! use understudy::{Mock, MockContext};
//!
//! let ctx = MockContext::new();
//! let disk = Mock::new("disk", &ctx);
//!
//! disk.raises(String::from("io failure"))?;
//! disk.invoke("flush", vec![])?;
//!
//! let out = disk.invoke("flush", vec![])?;
//! assert_eq!(out.raised::<String>().map(String::as_str), Some("io failure"));
//! # Ok::<(), understudy::MockError>(())
//! ```
//!
//! # Assertions
//!
//! Assertions reuse the declaration protocol: [`Mock::assert_invoked`],
//! [`Mock::assert_not_invoked`], and [`Mock::assert_invoked_in_sequence`]
//! arm the session, and the next call expresses the pattern to look for in
//! the scenario, the ordered log of every call that really executed.
//! Pattern calls themselves never appear in the scenario.
//!
//! ```
//! use understudy::{Mock, MockContext, Value};
//!
//! let ctx = MockContext::new();
//! let mailer = Mock::new("mailer", &ctx);
//!
//! mailer.invoke("send", vec![Value::of("hello")])?;
//!
//! mailer.assert_invoked()?;
//! mailer.invoke("send", vec![Value::of("hello")])?;
//! # Ok::<(), understudy::MockError>(())
//! ```
//!
//! A failed assertion carries the expected pattern and the ordered list of
//! calls observed on that mock, so failures are diagnosable without a
//! debugger.
//!
//! # Defaults
//!
//! A call no behavior matches still succeeds if the context's
//! [`DefaultValuePolicy`] can produce a zero equivalent for the declared
//! return type; the stock [`TypeDefaults`] policy covers the primitives
//! and can be extended or replaced through [`MockContext::builder`].
//! Otherwise the call fails with [`MockError::UnsupportedReturnType`].
//!
//! # Concurrency
//!
//! The engine assumes the single-threaded cooperative model of a test:
//! declaration/consumption pairs happen on one logical thread, one test at
//! a time. The armed transition is guarded by a lock, but driving the
//! declaration protocol from concurrent threads is unsupported.

mod behavior;
mod context;
mod defaults;
mod dispatcher;
mod error;
mod handlers;
mod invocation;
mod matcher;
mod mock;
mod scenario;
mod session;
mod value;

pub use predicates::prelude::{predicate, Predicate};

pub use crate::behavior::CallOutcome;
pub use crate::context::{MockContext, MockContextBuilder};
pub use crate::defaults::{DefaultValuePolicy, TypeDefaults};
pub use crate::error::{AssertionFailure, MockError, MockResult, UsageError};
pub use crate::invocation::{ExecutedInvocation, MethodSig, MockId, ReturnSpec};
pub use crate::matcher::ArgMatcher;
pub use crate::mock::Mock;
pub use crate::value::{ArgValue, Value};
