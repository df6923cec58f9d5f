// vim: tw=80
//! Type-erased argument, return, and fault values.

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use downcast::{downcast, Any};

/// A value that can travel through the engine with its concrete type erased
/// while still supporting equality comparison and debug formatting.
///
/// Blanket-implemented for every `'static` type that is `PartialEq + Debug +
/// Send + Sync`; test code never implements this by hand.
pub trait ArgValue: Any + fmt::Debug + Send + Sync {
    /// Compare against another erased value, which may have a different
    /// concrete type.
    fn eq_value(&self, other: &dyn ArgValue) -> bool;

    /// `TypeId` of the concrete type behind the erasure.
    fn concrete_type_id(&self) -> TypeId;

    /// Name of the concrete type, for diagnostics.
    fn concrete_type_name(&self) -> &'static str;
}

downcast!(dyn ArgValue);

impl<T> ArgValue for T
where
    T: PartialEq + fmt::Debug + Send + Sync + 'static,
{
    fn eq_value(&self, other: &dyn ArgValue) -> bool {
        other.downcast_ref::<T>().map_or(false, |o| self == o)
    }

    fn concrete_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn concrete_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Binds a wildcard placeholder to the matcher captured for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct MarkerId(pub(crate) u64);

#[derive(Clone)]
enum Repr {
    Literal(Arc<dyn ArgValue>),
    /// Returned by wildcard helpers; the captured matcher applies at
    /// whatever argument position this value ends up in.
    Marker(MarkerId),
    /// Reserves an argument position for a matcher captured by position.
    Slot,
}

/// An argument, return, or fault value with its concrete type erased.
///
/// Cloning is cheap; the contained value is shared.
#[derive(Clone)]
pub struct Value(Repr);

impl Value {
    /// Wrap a concrete value.
    pub fn of<T>(value: T) -> Value
    where
        T: PartialEq + fmt::Debug + Send + Sync + 'static,
    {
        Value(Repr::Literal(Arc::new(value)))
    }

    /// The unit value.
    pub fn unit() -> Value {
        Value::of(())
    }

    /// Reserve this argument position for a matcher captured with
    /// [`MockContext::matcher_at`](crate::MockContext::matcher_at).
    pub fn slot() -> Value {
        Value(Repr::Slot)
    }

    /// Borrow the contained value, if it has concrete type `T`.
    pub fn get<T>(&self) -> Option<&T>
    where
        T: PartialEq + fmt::Debug + Send + Sync + 'static,
    {
        match &self.0 {
            Repr::Literal(v) => v.downcast_ref::<T>().ok(),
            _ => None,
        }
    }

    pub(crate) fn marker(id: MarkerId) -> Value {
        Value(Repr::Marker(id))
    }

    pub(crate) fn as_marker(&self) -> Option<MarkerId> {
        match self.0 {
            Repr::Marker(id) => Some(id),
            _ => None,
        }
    }

    pub(crate) fn is_slot(&self) -> bool {
        matches!(self.0, Repr::Slot)
    }

    pub(crate) fn type_id_of(&self) -> Option<TypeId> {
        match &self.0 {
            Repr::Literal(v) => Some(v.concrete_type_id()),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Literal(v) => fmt::Debug::fmt(v, f),
            Repr::Marker(_) => f.write_str("<matcher>"),
            Repr::Slot => f.write_str("<slot>"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (&self.0, &other.0) {
            (Repr::Literal(a), Repr::Literal(b)) => a.eq_value(b.as_ref()),
            (Repr::Marker(a), Repr::Marker(b)) => a == b,
            (Repr::Slot, Repr::Slot) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod t {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn equality_is_type_aware() {
        assert_eq!(Value::of(42u32), Value::of(42u32));
        assert_ne!(Value::of(42u32), Value::of(42i32));
        assert_ne!(Value::of(42u32), Value::of(43u32));
        assert_eq!(Value::of(String::from("a")), Value::of(String::from("a")));
    }

    #[test]
    fn debug_formats_the_contained_value() {
        assert_eq!(format!("{:?}", Value::of("x")), "\"x\"");
        assert_eq!(format!("{:?}", Value::of(5u8)), "5");
        assert_eq!(format!("{:?}", Value::slot()), "<slot>");
    }

    #[test]
    fn placeholders_never_equal_literals() {
        let marker = Value::marker(MarkerId(0));
        assert_ne!(marker, Value::of(0u64));
        assert_ne!(Value::slot(), Value::unit());
    }

    #[test]
    fn get_downcasts_only_to_the_stored_type() {
        let v = Value::of(7i64);
        assert_eq!(v.get::<i64>(), Some(&7));
        assert_eq!(v.get::<u64>(), None);
    }
}
