//! wirebox - a declarative service container
//!
//! Turns declarative service definitions into live, fully wired instances:
//! constructor arguments, setter calls and property assignments, with
//! singleton ("shared") semantics per service.
//!
//! ## Architecture
//!
//! ```text
//! Container::get(name)
//!         │
//!         ▼
//! ServiceDescriptor::resolve()          shared? return cached instance
//!         │
//!         ▼ (structured definitions)
//! InstanceBuilder::build()              constructor → calls → properties
//!         │
//!         ▼ (every sub-value)
//! ArgumentResolver::resolve()           literal | service ref | nested instance
//!         │
//!         └──► Container::get(other)    recursion, cycle-checked
//! ```
//!
//! Rust cannot instantiate a type from a runtime string, so every
//! constructible class is registered up front in a [`ClassRegistry`]
//! (constructor closure plus named setter and property closures).
//!
//! ## Usage
//!
//! ```ignore
//! let registry = ClassRegistry::new();
//! registry.register(
//!     ClassEntry::builder("Mailer")
//!         .constructor(|args| Ok(Value::instance(Mailer::new(&args[0]))))
//!         .build()?,
//! );
//!
//! let container = Container::new(registry);
//! container.set_shared(
//!     "mailer",
//!     StructuredDefinition::new("Mailer")
//!         .with_argument(ArgumentSpec::service("transport"))
//!         .into(),
//! );
//!
//! let mailer = container.get("mailer")?.downcast::<Mailer>().unwrap();
//! ```

pub mod arguments;
pub mod builder;
pub mod config;
pub mod container;
pub mod descriptor;
pub mod logging;
pub mod registry;

pub use arguments::ArgumentResolver;
pub use builder::InstanceBuilder;
pub use config::{ConfigLoader, ContainerConfig, ServiceConfig};
pub use container::{Container, ServiceRef};
pub use descriptor::ServiceDescriptor;
pub use registry::{ClassEntry, ClassEntryBuilder, ClassRegistry};

// Re-export the domain layer under a stable path
pub use wirebox_domain as domain;
pub use wirebox_domain::{
    ArgumentSpec, Error, MethodCall, PropertyAssignment, Result, ServiceDefinition,
    ServiceInstance, ServiceLocator, StructuredDefinition, Value,
};
