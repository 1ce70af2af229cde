//! Runtime values produced by service resolution
//!
//! Everything the container hands out is a [`Value`]: either a JSON literal
//! carried verbatim from a definition, or a live, type-erased instance. The
//! two worlds stay distinct so that a constructor can tell "the string
//! `\"transport\"`" apart from "the transport object".

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::Value as JsonValue;

/// A live, type-erased service instance
///
/// Instances are reference-counted so a shared service can be handed to any
/// number of consumers while keeping pointer identity.
pub type ServiceInstance = Arc<dyn Any + Send + Sync>;

/// A value flowing through the construction pipeline
#[derive(Clone)]
pub enum Value {
    /// A literal taken verbatim from a definition, falsy values included
    Literal(JsonValue),
    /// A constructed (or user-supplied) instance
    Instance(ServiceInstance),
}

impl Value {
    /// Wrap a literal value
    pub fn literal<V: Into<JsonValue>>(value: V) -> Self {
        Self::Literal(value.into())
    }

    /// Wrap a concrete object as a type-erased instance
    pub fn instance<T: Any + Send + Sync>(value: T) -> Self {
        Self::Instance(Arc::new(value))
    }

    /// Wrap an already reference-counted instance
    pub fn from_instance(instance: ServiceInstance) -> Self {
        Self::Instance(instance)
    }

    /// Whether this value is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Whether this value is a live instance
    pub fn is_instance(&self) -> bool {
        matches!(self, Self::Instance(_))
    }

    /// The literal payload, if this value is a literal
    pub fn as_literal(&self) -> Option<&JsonValue> {
        match self {
            Self::Literal(v) => Some(v),
            Self::Instance(_) => None,
        }
    }

    /// String view of a literal string value
    pub fn as_str(&self) -> Option<&str> {
        self.as_literal().and_then(JsonValue::as_str)
    }

    /// Integer view of a literal number value
    pub fn as_i64(&self) -> Option<i64> {
        self.as_literal().and_then(JsonValue::as_i64)
    }

    /// Boolean view of a literal boolean value
    pub fn as_bool(&self) -> Option<bool> {
        self.as_literal().and_then(JsonValue::as_bool)
    }

    /// Downcast an instance value to a concrete type
    ///
    /// Returns `None` for literals and for instances of a different type.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        match self {
            Self::Instance(instance) => Arc::clone(instance).downcast::<T>().ok(),
            Self::Literal(_) => None,
        }
    }

    /// Whether two values refer to the very same instance
    ///
    /// Literals never compare identical; identity is an instance property.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Instance(a), Self::Instance(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
            Self::Instance(_) => f.write_str("Instance(..)"),
        }
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        Self::Literal(value)
    }
}
