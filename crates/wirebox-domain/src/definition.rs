//! Declarative service definitions
//!
//! A service is registered under one of four definition kinds:
//!
//! | Kind | Meaning |
//! |------|---------|
//! | [`ServiceDefinition::ClassName`] | construct the named class, no wiring |
//! | [`ServiceDefinition::Factory`] | invoke a closure, container passed in |
//! | [`ServiceDefinition::Literal`] | an already-resolved value, passed through |
//! | [`ServiceDefinition::Structured`] | class name + constructor/setter/property wiring |
//!
//! The definition shape is decided once, at registration time. Raw
//! (configuration-sourced) shapes enter through the `from_json` parsers in
//! this module, which validate with explicit key-existence checks so that a
//! present-but-falsy field (`value = 0`, `value = ""`, `value = null`) is
//! never mistaken for a missing one.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value as JsonValue};

use crate::error::{Error, Result};
use crate::ports::ServiceLocator;
use crate::value::Value;

/// A factory closure producing a service instance
///
/// The container reaches the factory as an explicit first parameter; override
/// parameters (if any) arrive as the second.
pub type FactoryFn =
    Arc<dyn Fn(Option<&dyn ServiceLocator>, &[Value]) -> Result<Value> + Send + Sync>;

/// How to obtain one value during construction
///
/// The variant is discriminated by a `kind` field in raw definitions.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentSpec {
    /// Resolve another service by name through the container
    Service {
        /// Name of the referenced service
        name: String,
    },
    /// A literal value, returned verbatim (falsy values included)
    Parameter {
        /// The literal payload
        value: JsonValue,
    },
    /// Build a fresh instance of the named class through the container
    Instance {
        /// Class (or service) name to construct
        class_name: String,
        /// Constructor arguments; when present, resolution routes through
        /// the container's parameterized build path
        arguments: Option<Vec<ArgumentSpec>>,
    },
}

impl ArgumentSpec {
    /// A reference to another registered service
    pub fn service<S: Into<String>>(name: S) -> Self {
        Self::Service { name: name.into() }
    }

    /// A literal parameter value
    pub fn parameter<V: Into<JsonValue>>(value: V) -> Self {
        Self::Parameter {
            value: value.into(),
        }
    }

    /// A null literal parameter
    ///
    /// Used as the fill value when `set_parameter` extends an argument list
    /// past its current length.
    pub fn null_parameter() -> Self {
        Self::Parameter {
            value: JsonValue::Null,
        }
    }

    /// A fresh instance of the named class, default constructor arguments
    pub fn instance<S: Into<String>>(class_name: S) -> Self {
        Self::Instance {
            class_name: class_name.into(),
            arguments: None,
        }
    }

    /// A fresh instance of the named class with explicit arguments
    pub fn instance_with<S: Into<String>>(class_name: S, arguments: Vec<ArgumentSpec>) -> Self {
        Self::Instance {
            class_name: class_name.into(),
            arguments: Some(arguments),
        }
    }

    /// Parse a raw argument spec, validating its shape
    ///
    /// `position` is the argument's index within its surrounding list and is
    /// carried into every error message. Field presence is checked by key
    /// existence, never by truthiness: `{"kind": "parameter", "value": 0}`
    /// is a valid spec carrying the literal `0`.
    pub fn from_json(position: usize, raw: &JsonValue) -> Result<Self> {
        let map = raw
            .as_object()
            .ok_or_else(|| Error::argument_at(position, "argument spec must be an object"))?;

        let kind = map
            .get("kind")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| Error::argument_at(position, "argument spec must have a 'kind'"))?;

        match kind {
            "service" => {
                let name = require_string(map, "name").ok_or_else(|| {
                    Error::argument_at(position, "'name' is required for a service reference")
                })?;
                Ok(Self::Service { name })
            }
            "parameter" => {
                // Key existence, not truthiness: null is a present value.
                let value = map.get("value").ok_or_else(|| {
                    Error::argument_at(position, "'value' is required for a parameter")
                })?;
                Ok(Self::Parameter {
                    value: value.clone(),
                })
            }
            "instance" => {
                let class_name = require_string(map, "class_name").ok_or_else(|| {
                    Error::argument_at(position, "'class_name' is required for an instance")
                })?;
                let arguments = match map.get("arguments") {
                    None => None,
                    Some(raw_args) => Some(parse_argument_list(raw_args).map_err(|e| {
                        Error::argument_at(position, format!("invalid instance arguments: {e}"))
                    })?),
                };
                Ok(Self::Instance {
                    class_name,
                    arguments,
                })
            }
            other => Err(Error::argument_at(
                position,
                format!("unknown argument kind '{other}'"),
            )),
        }
    }
}

/// One setter invocation in a structured definition
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    /// Name of the method to invoke on the constructed instance
    pub method: String,
    /// Arguments resolved and passed to the method, in order
    pub arguments: Vec<ArgumentSpec>,
}

impl MethodCall {
    /// A setter call with arguments
    pub fn new<S: Into<String>>(method: S, arguments: Vec<ArgumentSpec>) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }

    fn from_json(position: usize, raw: &JsonValue) -> Result<Self> {
        let map = raw.as_object().ok_or_else(|| {
            Error::configuration(format!("method call at position {position} must be a table"))
        })?;
        let method = require_string(map, "method").ok_or_else(|| {
            Error::configuration(format!(
                "a method name is required for the call at position {position}"
            ))
        })?;
        let arguments = match map.get("arguments") {
            None => Vec::new(),
            Some(raw_args) => parse_argument_list(raw_args)?,
        };
        Ok(Self { method, arguments })
    }
}

/// One property assignment in a structured definition
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyAssignment {
    /// Name of the field to assign on the constructed instance
    pub name: String,
    /// Spec resolved to produce the assigned value
    pub value: ArgumentSpec,
}

impl PropertyAssignment {
    /// A property assignment
    pub fn new<S: Into<String>>(name: S, value: ArgumentSpec) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    fn from_json(position: usize, raw: &JsonValue) -> Result<Self> {
        let map = raw.as_object().ok_or_else(|| {
            Error::configuration(format!("property at position {position} must be a table"))
        })?;
        let name = require_string(map, "name").ok_or_else(|| {
            Error::configuration(format!(
                "a property name is required at position {position}"
            ))
        })?;
        let raw_value = map.get("value").ok_or_else(|| {
            Error::configuration(format!(
                "a property value is required at position {position}"
            ))
        })?;
        Ok(Self {
            name,
            value: ArgumentSpec::from_json(position, raw_value)?,
        })
    }
}

/// Class name plus constructor, setter and property wiring
///
/// Ordering is semantic: constructor arguments resolve first, then every
/// call in declared order, then every property in declared order.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredDefinition {
    /// Name of the class to construct
    pub class_name: String,
    /// Ordered constructor arguments
    pub arguments: Vec<ArgumentSpec>,
    /// Ordered setter invocations, applied after construction
    pub calls: Vec<MethodCall>,
    /// Ordered property assignments, applied after all calls
    pub properties: Vec<PropertyAssignment>,
}

impl StructuredDefinition {
    /// A definition for the named class with no wiring
    pub fn new<S: Into<String>>(class_name: S) -> Self {
        Self {
            class_name: class_name.into(),
            arguments: Vec::new(),
            calls: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Append a constructor argument
    pub fn with_argument(mut self, spec: ArgumentSpec) -> Self {
        self.arguments.push(spec);
        self
    }

    /// Append a setter call
    pub fn with_call(mut self, call: MethodCall) -> Self {
        self.calls.push(call);
        self
    }

    /// Append a property assignment
    pub fn with_property(mut self, property: PropertyAssignment) -> Self {
        self.properties.push(property);
        self
    }

    /// Parse a raw structured definition, validating its shape
    pub fn from_json(raw: &JsonValue) -> Result<Self> {
        let map = raw
            .as_object()
            .ok_or_else(|| Error::configuration("a structured definition must be a table"))?;

        let class_name = require_string(map, "class_name")
            .ok_or_else(|| Error::configuration("a service definition requires a 'class_name'"))?;

        let arguments = match map.get("arguments") {
            None => Vec::new(),
            Some(raw_args) => parse_argument_list(raw_args)?,
        };

        let calls = match map.get("calls") {
            None => Vec::new(),
            Some(raw_calls) => {
                let list = raw_calls
                    .as_array()
                    .ok_or_else(|| Error::configuration("'calls' must be an array of tables"))?;
                list.iter()
                    .enumerate()
                    .map(|(position, call)| MethodCall::from_json(position, call))
                    .collect::<Result<Vec<_>>>()?
            }
        };

        let properties = match map.get("properties") {
            None => Vec::new(),
            Some(raw_props) => {
                let list = raw_props.as_array().ok_or_else(|| {
                    Error::configuration("'properties' must be an array of tables")
                })?;
                list.iter()
                    .enumerate()
                    .map(|(position, prop)| PropertyAssignment::from_json(position, prop))
                    .collect::<Result<Vec<_>>>()?
            }
        };

        Ok(Self {
            class_name,
            arguments,
            calls,
            properties,
        })
    }
}

/// One of the four shapes a service definition can take
#[derive(Clone)]
pub enum ServiceDefinition {
    /// A class name, constructed through the container's class registry
    ClassName(String),
    /// A factory closure invoked with the container and override parameters
    Factory(FactoryFn),
    /// An already-resolved value, returned unchanged on every resolve
    Literal(Value),
    /// A full wiring definition handed to the instance builder
    Structured(StructuredDefinition),
}

impl ServiceDefinition {
    /// A bare class-name definition
    pub fn class_name<S: Into<String>>(name: S) -> Self {
        Self::ClassName(name.into())
    }

    /// A factory definition
    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn(Option<&dyn ServiceLocator>, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self::Factory(Arc::new(factory))
    }

    /// A literal (already resolved) definition
    pub fn literal(value: Value) -> Self {
        Self::Literal(value)
    }

    /// Parse a raw definition: a bare string is a class name, a table is a
    /// structured definition
    pub fn from_json(raw: &JsonValue) -> Result<Self> {
        match raw {
            JsonValue::String(class) => Ok(Self::ClassName(class.clone())),
            JsonValue::Object(_) => Ok(Self::Structured(StructuredDefinition::from_json(raw)?)),
            other => Err(Error::configuration(format!(
                "a service definition must be a class-name string or a table, got {other}"
            ))),
        }
    }
}

impl From<StructuredDefinition> for ServiceDefinition {
    fn from(definition: StructuredDefinition) -> Self {
        Self::Structured(definition)
    }
}

impl From<&str> for ServiceDefinition {
    fn from(class_name: &str) -> Self {
        Self::ClassName(class_name.to_string())
    }
}

impl fmt::Debug for ServiceDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClassName(name) => f.debug_tuple("ClassName").field(name).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Structured(def) => f.debug_tuple("Structured").field(def).finish(),
        }
    }
}

fn require_string(map: &Map<String, JsonValue>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(JsonValue::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_argument_list(raw: &JsonValue) -> Result<Vec<ArgumentSpec>> {
    let list = raw
        .as_array()
        .ok_or_else(|| Error::configuration("'arguments' must be an array of argument specs"))?;
    list.iter()
        .enumerate()
        .map(|(position, spec)| ArgumentSpec::from_json(position, spec))
        .collect()
}
