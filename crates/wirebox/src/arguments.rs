//! Argument resolution - one spec to one value
//!
//! The resolver turns a single [`ArgumentSpec`] into a concrete [`Value`],
//! consulting the service locator when the spec references another service
//! or a nested instance. Positions are threaded through purely for error
//! reporting.

use tracing::trace;
use wirebox_domain::{ArgumentSpec, Error, Result, ServiceLocator, Value};

/// Resolves argument specs against an optional service locator
pub struct ArgumentResolver<'a> {
    locator: Option<&'a dyn ServiceLocator>,
}

impl<'a> ArgumentResolver<'a> {
    /// Create a resolver; `None` can only resolve literal parameters
    pub fn new(locator: Option<&'a dyn ServiceLocator>) -> Self {
        Self { locator }
    }

    /// Resolve one spec to a value
    ///
    /// Literal parameters are returned verbatim, falsy payloads included.
    /// Service references and nested instances require a locator; resolving
    /// them without one is a configuration error.
    pub fn resolve(&self, position: usize, spec: &ArgumentSpec) -> Result<Value> {
        match spec {
            ArgumentSpec::Parameter { value } => Ok(Value::Literal(value.clone())),
            ArgumentSpec::Service { name } => {
                trace!(service = %name, position, "resolving service reference");
                self.locator(position)?.get(name)
            }
            ArgumentSpec::Instance {
                class_name,
                arguments,
            } => {
                trace!(class = %class_name, position, "resolving nested instance");
                let locator = self.locator(position)?;
                match arguments {
                    Some(specs) => {
                        let resolved = self.resolve_all(specs)?;
                        locator.get_with(class_name, &resolved)
                    }
                    None => locator.get(class_name),
                }
            }
        }
    }

    /// Resolve an ordered spec list into an ordered value list
    pub fn resolve_all(&self, specs: &[ArgumentSpec]) -> Result<Vec<Value>> {
        specs
            .iter()
            .enumerate()
            .map(|(position, spec)| self.resolve(position, spec))
            .collect()
    }

    fn locator(&self, position: usize) -> Result<&'a dyn ServiceLocator> {
        self.locator.ok_or_else(|| {
            Error::configuration(format!(
                "a container is required to resolve the reference at position {position}"
            ))
        })
    }
}
