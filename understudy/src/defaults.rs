// vim: tw=80
//! The default-value fallback consulted when no defined behavior matches a
//! call.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;

use crate::invocation::ReturnSpec;
use crate::value::Value;

/// Produces a legal default value for a declared return type.
///
/// Resolution never fails merely because no behavior was defined; it asks
/// this policy for a zero equivalent first. The stock implementation is
/// [`TypeDefaults`]; an embedding shim may substitute a policy of its own,
/// for example one that manufactures a nested mock when the return type is
/// itself mockable.
pub trait DefaultValuePolicy: Send + Sync {
    /// A default for the given return type, or `None` if the policy cannot
    /// produce one (which fails the call with
    /// [`MockError::UnsupportedReturnType`](crate::MockError::UnsupportedReturnType)).
    fn default_for(&self, ret: &ReturnSpec) -> Option<Value>;
}

type Factory = Box<dyn Fn() -> Value + Send + Sync>;

/// `TypeId`-keyed default-value registry, seeded with the obvious zero
/// equivalents: unit, `bool`, the integer and float primitives, `char`,
/// `String`, and `&'static str`.
pub struct TypeDefaults {
    factories: HashMap<TypeId, Factory>,
}

impl TypeDefaults {
    pub fn new() -> TypeDefaults {
        let mut d = TypeDefaults {
            factories: HashMap::new(),
        };
        d.register::<()>();
        d.register::<bool>();
        d.register::<i8>();
        d.register::<i16>();
        d.register::<i32>();
        d.register::<i64>();
        d.register::<i128>();
        d.register::<isize>();
        d.register::<u8>();
        d.register::<u16>();
        d.register::<u32>();
        d.register::<u64>();
        d.register::<u128>();
        d.register::<usize>();
        d.register::<f32>();
        d.register::<f64>();
        d.register::<char>();
        d.register::<String>();
        d.register::<&'static str>();
        d
    }

    /// Register `T::default()` as the fallback for members returning `T`.
    pub fn register<T>(&mut self)
    where
        T: Default + PartialEq + fmt::Debug + Send + Sync + 'static,
    {
        self.factories
            .insert(TypeId::of::<T>(), Box::new(|| Value::of(T::default())));
    }
}

impl Default for TypeDefaults {
    fn default() -> Self {
        TypeDefaults::new()
    }
}

impl DefaultValuePolicy for TypeDefaults {
    fn default_for(&self, ret: &ReturnSpec) -> Option<Value> {
        self.factories.get(&ret.id).map(|f| f())
    }
}
