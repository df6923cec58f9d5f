// vim: tw=80
//! Argument matchers: the wildcard and predicate slots of a matching
//! pattern.

use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;

use predicates::prelude::*;
use predicates_tree::CaseTreeExt;

use crate::value::Value;

/// A typed predicate with its concrete argument type erased.
trait ErasedPredicate: Send {
    fn accepts(&self, value: &Value) -> bool;
    fn explain(&self, value: &Value) -> Option<String>;
    fn describe(&self) -> String;
}

struct TypedPredicate<T, P> {
    pred: P,
    _type: PhantomData<fn(&T)>,
}

impl<T, P> ErasedPredicate for TypedPredicate<T, P>
where
    T: PartialEq + fmt::Debug + Send + Sync + 'static,
    P: Predicate<T> + Send + 'static,
{
    fn accepts(&self, value: &Value) -> bool {
        value.get::<T>().map_or(false, |v| self.pred.eval(v))
    }

    fn explain(&self, value: &Value) -> Option<String> {
        let v = value.get::<T>()?;
        self.pred.find_case(false, v).map(|case| case.tree().to_string())
    }

    fn describe(&self) -> String {
        self.pred.to_string()
    }
}

enum Kind {
    Any,
    OfType { id: TypeId, name: &'static str },
    Eq(Value),
    Where(Box<dyn ErasedPredicate>),
}

/// Matcher for one argument position of a matching pattern.
///
/// Literal arguments become [`literal`](ArgMatcher::literal) matchers when
/// the pattern is built; the other constructors back the wildcard helpers
/// on [`MockContext`](crate::MockContext).
pub struct ArgMatcher(Kind);

impl ArgMatcher {
    /// Accepts any argument value.
    pub fn any() -> ArgMatcher {
        ArgMatcher(Kind::Any)
    }

    /// Accepts any argument of concrete type `T`.
    pub fn of_type<T: 'static>() -> ArgMatcher {
        ArgMatcher(Kind::OfType {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        })
    }

    /// Accepts arguments equal to the given literal.
    pub fn literal(value: Value) -> ArgMatcher {
        ArgMatcher(Kind::Eq(value))
    }

    /// Accepts whatever the [`Predicate`] accepts. Arguments of a different
    /// concrete type than `T` are rejected outright.
    pub fn where_pred<T, P>(pred: P) -> ArgMatcher
    where
        T: PartialEq + fmt::Debug + Send + Sync + 'static,
        P: Predicate<T> + Send + 'static,
    {
        ArgMatcher(Kind::Where(Box::new(TypedPredicate {
            pred,
            _type: PhantomData,
        })))
    }

    /// Accepts whatever the function accepts. Shorthand for
    /// [`where_pred`](ArgMatcher::where_pred) around `predicate::function`.
    pub fn where_fn<T, F>(f: F) -> ArgMatcher
    where
        T: PartialEq + fmt::Debug + Send + Sync + 'static,
        F: Fn(&T) -> bool + Send + 'static,
    {
        ArgMatcher::where_pred(predicate::function(f))
    }

    /// Whether this matcher accepts the executed argument value.
    pub fn accepts(&self, value: &Value) -> bool {
        match &self.0 {
            Kind::Any => true,
            Kind::OfType { id, .. } => value.type_id_of() == Some(*id),
            Kind::Eq(expected) => expected == value,
            Kind::Where(p) => p.accepts(value),
        }
    }

    /// Why the value was rejected, when the matcher can say more than its
    /// description. Only predicate matchers produce a case tree.
    pub(crate) fn explain_mismatch(&self, value: &Value) -> Option<String> {
        match &self.0 {
            Kind::Where(p) => p.explain(value),
            _ => None,
        }
    }
}

fn short_type_name(name: &str) -> &str {
    name.rsplit("::").next().unwrap_or(name)
}

impl fmt::Display for ArgMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Kind::Any => f.write_str("<any>"),
            Kind::OfType { name, .. } => {
                write!(f, "<any {}>", short_type_name(name))
            }
            Kind::Eq(v) => write!(f, "{v:?}"),
            Kind::Where(p) => write!(f, "<{}>", p.describe()),
        }
    }
}

#[cfg(test)]
mod t {
    use super::*;

    #[test]
    fn literal_matcher_is_type_and_value_sensitive() {
        let m = ArgMatcher::literal(Value::of(5u32));
        assert!(m.accepts(&Value::of(5u32)));
        assert!(!m.accepts(&Value::of(6u32)));
        assert!(!m.accepts(&Value::of(5i32)));
    }

    #[test]
    fn of_type_matches_any_value_of_that_type() {
        let m = ArgMatcher::of_type::<String>();
        assert!(m.accepts(&Value::of(String::from("a"))));
        assert!(m.accepts(&Value::of(String::new())));
        assert!(!m.accepts(&Value::of("a")));
    }

    #[test]
    fn predicate_matchers_reject_other_types_outright() {
        let m = ArgMatcher::where_pred(predicate::gt(10i32));
        assert!(m.accepts(&Value::of(11i32)));
        assert!(!m.accepts(&Value::of(10i32)));
        assert!(!m.accepts(&Value::of(11u32)));
    }

    #[test]
    fn display_is_compact() {
        assert_eq!(ArgMatcher::any().to_string(), "<any>");
        assert_eq!(ArgMatcher::of_type::<String>().to_string(), "<any String>");
        assert_eq!(ArgMatcher::literal(Value::of(7u8)).to_string(), "7");
    }
}
