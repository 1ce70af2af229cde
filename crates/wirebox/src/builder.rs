//! Instance builder - structured definitions to wired instances
//!
//! Consumes a [`StructuredDefinition`] and produces a fully wired instance:
//! constructor arguments first, then every setter call in declared order,
//! then every property assignment in declared order. "Construct, then
//! configure" - a call may hand the instance objects that are never exposed
//! as properties.
//!
//! A failure anywhere discards the partially configured instance and
//! propagates; nothing half-built is ever returned or cached.

use tracing::debug;
use wirebox_domain::{Error, Result, StructuredDefinition, Value};

use crate::arguments::ArgumentResolver;
use crate::container::Container;

/// Builds instances from structured definitions
pub struct InstanceBuilder<'a> {
    container: Option<&'a Container>,
}

impl<'a> InstanceBuilder<'a> {
    /// Create a builder backed by an optional container
    pub fn new(container: Option<&'a Container>) -> Self {
        Self { container }
    }

    /// Build a wired instance from a structured definition
    ///
    /// When `override_parameters` is given it wins outright: the definition's
    /// declared constructor arguments are ignored entirely. Setter calls and
    /// property assignments always apply.
    pub fn build(
        &self,
        definition: &StructuredDefinition,
        override_parameters: Option<&[Value]>,
    ) -> Result<Value> {
        if definition.class_name.is_empty() {
            return Err(Error::configuration(
                "a service definition requires a 'class_name'",
            ));
        }

        let container = self.container.ok_or_else(|| {
            Error::configuration(format!(
                "a container is required to construct class '{}'",
                definition.class_name
            ))
        })?;
        let resolver = ArgumentResolver::new(Some(container));

        let entry = container.classes().get(&definition.class_name).ok_or_else(|| {
            Error::service_resolution(&definition.class_name, "class is not in the class registry")
        })?;

        let constructor_arguments = match override_parameters {
            Some(parameters) => parameters.to_vec(),
            None => resolver.resolve_all(&definition.arguments)?,
        };

        debug!(
            class = %definition.class_name,
            arguments = constructor_arguments.len(),
            calls = definition.calls.len(),
            properties = definition.properties.len(),
            "building instance"
        );

        let instance = entry.construct(&constructor_arguments)?;

        if !definition.calls.is_empty() {
            require_object(&instance, &definition.class_name, "setter injection")?;
            for (position, call) in definition.calls.iter().enumerate() {
                if call.method.is_empty() {
                    return Err(Error::configuration(format!(
                        "a method name is required for the call at position {position}"
                    )));
                }
                let arguments = resolver.resolve_all(&call.arguments)?;
                entry.call(&instance, &call.method, &arguments)?;
            }
        }

        if !definition.properties.is_empty() {
            require_object(&instance, &definition.class_name, "property injection")?;
            for (position, property) in definition.properties.iter().enumerate() {
                if property.name.is_empty() {
                    return Err(Error::configuration(format!(
                        "a property name is required at position {position}"
                    )));
                }
                let value = resolver.resolve(position, &property.value)?;
                entry.set_property(&instance, &property.name, value)?;
            }
        }

        Ok(instance)
    }
}

fn require_object(instance: &Value, class_name: &str, what: &str) -> Result<()> {
    if instance.is_instance() {
        Ok(())
    } else {
        Err(Error::configuration(format!(
            "the definition of '{class_name}' has {what} but the constructor did not \
             produce an object instance"
        )))
    }
}
