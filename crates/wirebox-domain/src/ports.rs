//! Ports consumed by definitions and resolvers
//!
//! The container itself lives in the runtime crate; everything in the domain
//! reaches it through the [`ServiceLocator`] trait. Factories receive the
//! locator as an explicit parameter rather than through any implicit
//! execution context, so a factory body can ask for collaborators without
//! knowing the concrete container type.

use crate::error::Result;
use crate::value::Value;

/// Name-based lookup into a service container
///
/// Implemented by the runtime `Container`; consumed by factory closures and
/// by the argument resolver when a spec references another service or a
/// nested instance.
pub trait ServiceLocator: Send + Sync {
    /// Resolve the named service to an instance
    fn get(&self, name: &str) -> Result<Value>;

    /// Resolve the named service, overriding its constructor parameters
    fn get_with(&self, name: &str, parameters: &[Value]) -> Result<Value>;
}
