//! Container configuration
//!
//! Service definitions are declarable in TOML and applied to a live
//! container. Sources are merged in this order (later overrides earlier):
//!
//! 1. Default values (`ContainerConfig::default()` - no services)
//! 2. TOML configuration file (if specified)
//! 3. Environment variables prefixed `WIREBOX_` (nested keys split on `__`)
//!
//! A declared definition is either a bare class-name string or a structured
//! table; raw shapes funnel through the position-checked parsers in
//! `wirebox_domain::definition`.
//!
//! ```toml
//! [services.logger]
//! shared = true
//! definition = "Logger"
//!
//! [services.mailer.definition]
//! class_name = "Mailer"
//! arguments = [{ kind = "service", name = "transport" }]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tracing::info;
use wirebox_domain::{Error, Result, ServiceDefinition};

use crate::container::Container;
use crate::descriptor::ServiceDescriptor;

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "WIREBOX";

/// Declarative configuration for a container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Declared services, keyed by name
    #[serde(default)]
    pub services: BTreeMap<String, ServiceConfig>,
}

/// One declared service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Whether the service is shared (singleton)
    #[serde(default)]
    pub shared: bool,
    /// The raw definition: a class-name string or a structured table
    pub definition: serde_json::Value,
}

/// Configuration loader service
#[derive(Clone, Debug, Default)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: Option<String>,
}

impl ConfigLoader {
    /// Create a loader with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Load configuration from all sources
    pub fn load(&self) -> Result<ContainerConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(ContainerConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
            }
        }

        let prefix = self.env_prefix.as_deref().unwrap_or(ENV_PREFIX);
        figment = figment.merge(Env::prefixed(&format!("{prefix}_")).split("__"));

        figment
            .extract()
            .map_err(|e| Error::configuration(format!("failed to extract configuration: {e}")))
    }
}

impl Container {
    /// Register every service declared in a configuration
    ///
    /// Raw definition shapes are validated here; the first malformed
    /// definition aborts with an error naming the offending service. The
    /// parser's error kind is kept: a bad argument spec stays an argument
    /// error, everything else surfaces as a configuration error.
    pub fn configure(&self, config: &ContainerConfig) -> Result<()> {
        for (name, service) in &config.services {
            let definition =
                ServiceDefinition::from_json(&service.definition).map_err(|e| match e {
                    Error::Argument { message } => {
                        Error::argument(format!("service '{name}': {message}"))
                    }
                    other => Error::configuration(format!(
                        "service '{name}' has an invalid definition: {other}"
                    )),
                })?;
            self.register(ServiceDescriptor::new(name, definition, service.shared));
        }
        info!(services = config.services.len(), "configured container");
        Ok(())
    }
}
