//! Domain layer for the wirebox service container
//!
//! Pure types shared by the container runtime and by embedders: the error
//! model, the runtime [`Value`] currency, the declarative service definition
//! shapes, and the [`ServiceLocator`] port through which factories and
//! argument specs reach back into a container.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error enum and `Result` alias |
//! | [`value`] | Runtime values: JSON literals and type-erased instances |
//! | [`definition`] | Service definitions, argument specs, wiring entries |
//! | [`ports`] | `ServiceLocator` trait consumed by factories and resolvers |

pub mod definition;
pub mod error;
pub mod ports;
pub mod value;

pub use definition::{
    ArgumentSpec, FactoryFn, MethodCall, PropertyAssignment, ServiceDefinition,
    StructuredDefinition,
};
pub use error::{Error, Result};
pub use ports::ServiceLocator;
pub use value::{ServiceInstance, Value};
