//! Service descriptor - one named service and its lifecycle
//!
//! A descriptor holds a service's definition, its shared (singleton) flag
//! and, once a shared resolve has succeeded, the cached instance. The cache
//! is populated if and only if the descriptor is shared and resolved; any
//! reconfiguration (new definition, sharedness change) clears it.

use tracing::debug;
use wirebox_domain::{
    ArgumentSpec, Error, Result, ServiceDefinition, ServiceLocator, Value,
};

use crate::builder::InstanceBuilder;
use crate::container::Container;

/// One named service: definition, shared flag, cached instance
#[derive(Debug)]
pub struct ServiceDescriptor {
    name: String,
    definition: ServiceDefinition,
    shared: bool,
    resolved: bool,
    shared_instance: Option<Value>,
}

impl ServiceDescriptor {
    /// Create a descriptor
    pub fn new<S: Into<String>>(name: S, definition: ServiceDefinition, shared: bool) -> Self {
        Self {
            name: name.into(),
            definition,
            shared,
            resolved: false,
            shared_instance: None,
        }
    }

    /// The service's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the service is shared (singleton)
    pub fn is_shared(&self) -> bool {
        self.shared
    }

    /// Change the shared flag
    ///
    /// Reconfiguring sharedness resets the resolution state: the cached
    /// instance (if any) is dropped and the descriptor reports unresolved.
    pub fn set_shared(&mut self, shared: bool) {
        self.shared = shared;
        self.shared_instance = None;
        self.resolved = false;
    }

    /// Seed the shared instance directly
    ///
    /// Marks the descriptor shared and resolved; subsequent resolves return
    /// this value until the descriptor is reconfigured.
    pub fn set_shared_instance(&mut self, instance: Value) {
        self.shared = true;
        self.resolved = true;
        self.shared_instance = Some(instance);
    }

    /// The service definition
    pub fn definition(&self) -> &ServiceDefinition {
        &self.definition
    }

    /// Replace the definition, dropping any cached instance
    pub fn set_definition(&mut self, definition: ServiceDefinition) {
        self.definition = definition;
        self.shared_instance = None;
        self.resolved = false;
    }

    /// Whether the service has been resolved at least once
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Resolve the service to an instance
    ///
    /// A shared descriptor with a cached instance returns it immediately,
    /// even when override parameters are passed. Otherwise resolution
    /// dispatches on the definition kind:
    ///
    /// - `ClassName`: constructed through the container's class registry,
    ///   with `parameters` as positional constructor arguments when
    ///   non-empty.
    /// - `Factory`: the closure is invoked with the container (as a
    ///   [`ServiceLocator`]) and `parameters`.
    /// - `Literal`: returned unchanged.
    /// - `Structured`: handed to the instance builder; `parameters`, when
    ///   given, replace the declared constructor arguments outright.
    ///
    /// Constructing from a class name requires a container (its class
    /// registry is the only way to turn a name into a constructor).
    pub fn resolve(
        &mut self,
        parameters: Option<&[Value]>,
        container: Option<&Container>,
    ) -> Result<Value> {
        if self.shared {
            if let Some(instance) = &self.shared_instance {
                debug!(service = %self.name, "returning cached shared instance");
                return Ok(instance.clone());
            }
        }

        debug!(service = %self.name, shared = self.shared, "resolving service");

        let instance = match &self.definition {
            ServiceDefinition::ClassName(class_name) => {
                let container = container.ok_or_else(|| {
                    Error::configuration(format!(
                        "a container is required to construct class '{class_name}'"
                    ))
                })?;
                let entry = container.classes().get(class_name).ok_or_else(|| {
                    Error::service_resolution(
                        &self.name,
                        format!("class '{class_name}' is not in the class registry"),
                    )
                })?;
                match parameters {
                    Some(values) if !values.is_empty() => entry.construct(values)?,
                    _ => entry.construct(&[])?,
                }
            }
            ServiceDefinition::Factory(factory) => {
                let locator = container.map(|c| c as &dyn ServiceLocator);
                factory(locator, parameters.unwrap_or(&[]))?
            }
            ServiceDefinition::Literal(value) => value.clone(),
            ServiceDefinition::Structured(definition) => {
                InstanceBuilder::new(container).build(definition, parameters)?
            }
        };

        if self.shared {
            self.shared_instance = Some(instance.clone());
        }
        self.resolved = true;

        Ok(instance)
    }

    /// Replace one positional constructor argument without resolving
    ///
    /// Only structured definitions carry constructor arguments. A position
    /// past the end auto-extends the list, filling intermediate slots with
    /// null parameters (`Parameter { value: null }`).
    pub fn set_parameter(&mut self, position: usize, spec: ArgumentSpec) -> Result<&mut Self> {
        let ServiceDefinition::Structured(definition) = &mut self.definition else {
            return Err(Error::configuration(
                "the definition must be structured to update its parameters",
            ));
        };

        if position < definition.arguments.len() {
            definition.arguments[position] = spec;
        } else {
            while definition.arguments.len() < position {
                definition.arguments.push(ArgumentSpec::null_parameter());
            }
            definition.arguments.push(spec);
        }

        Ok(self)
    }

    /// The constructor argument at a position, if present
    ///
    /// `None` means "no argument at that position" - distinct from a null
    /// parameter, which is a present spec carrying a null literal.
    pub fn get_parameter(&self, position: usize) -> Result<Option<&ArgumentSpec>> {
        let ServiceDefinition::Structured(definition) = &self.definition else {
            return Err(Error::configuration(
                "the definition must be structured to obtain its parameters",
            ));
        };
        Ok(definition.arguments.get(position))
    }
}
