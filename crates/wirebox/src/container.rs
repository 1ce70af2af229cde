//! Service container - name → descriptor registry
//!
//! The container maps service names to [`ServiceDescriptor`]s and drives
//! resolution, calling back into itself for service references and nested
//! instances. Resolution is call-stack-bound and synchronous; a per-thread
//! in-flight name stack turns definition cycles into a reported error
//! instead of unbounded recursion.
//!
//! A name that is not registered as a service but is known to the class
//! registry resolves to a fresh, directly constructed instance - classes do
//! not need a service registration to be constructible by name.

use std::sync::Arc;
use std::thread::{self, ThreadId};

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::debug;
use wirebox_domain::{Error, Result, ServiceDefinition, ServiceLocator, Value};

use crate::descriptor::ServiceDescriptor;
use crate::registry::ClassRegistry;

/// Shared handle to a registered service descriptor
pub type ServiceRef = Arc<Mutex<ServiceDescriptor>>;

/// Name-keyed service registry and resolution driver
pub struct Container {
    classes: Arc<ClassRegistry>,
    services: DashMap<String, ServiceRef>,
    shared_instances: DashMap<String, Value>,
    resolving: Mutex<Vec<(ThreadId, String)>>,
}

impl Container {
    /// Create a container backed by the given class registry
    pub fn new(classes: ClassRegistry) -> Self {
        Self {
            classes: Arc::new(classes),
            services: DashMap::new(),
            shared_instances: DashMap::new(),
            resolving: Mutex::new(Vec::new()),
        }
    }

    /// The construction registry supplied at creation
    pub fn classes(&self) -> &ClassRegistry {
        &self.classes
    }

    /// Register a non-shared service
    pub fn set<S, D>(&self, name: S, definition: D) -> ServiceRef
    where
        S: Into<String>,
        D: Into<ServiceDefinition>,
    {
        let name = name.into();
        self.register(ServiceDescriptor::new(name, definition.into(), false))
    }

    /// Register a shared (singleton) service
    pub fn set_shared<S, D>(&self, name: S, definition: D) -> ServiceRef
    where
        S: Into<String>,
        D: Into<ServiceDefinition>,
    {
        let name = name.into();
        self.register(ServiceDescriptor::new(name, definition.into(), true))
    }

    /// Register a prepared descriptor, replacing any previous registration
    pub fn register(&self, descriptor: ServiceDescriptor) -> ServiceRef {
        let name = descriptor.name().to_string();
        debug!(service = %name, shared = descriptor.is_shared(), "registering service");
        let service = Arc::new(Mutex::new(descriptor));
        // A replaced registration invalidates the container-level cache too.
        self.shared_instances.remove(&name);
        self.services.insert(name, Arc::clone(&service));
        service
    }

    /// Whether a service is registered under this name
    pub fn has(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }

    /// The descriptor handle for a registered service
    pub fn service(&self, name: &str) -> Option<ServiceRef> {
        self.services.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Names of all registered services
    pub fn service_names(&self) -> Vec<String> {
        self.services.iter().map(|e| e.key().clone()).collect()
    }

    /// Remove a service registration and any cached shared instance
    pub fn remove(&self, name: &str) -> bool {
        self.shared_instances.remove(name);
        self.services.remove(name).is_some()
    }

    /// Resolve a service with its declared construction parameters
    pub fn get(&self, name: &str) -> Result<Value> {
        self.resolve_service(name, None)
    }

    /// Resolve a service, overriding its constructor parameters
    pub fn get_with(&self, name: &str, parameters: &[Value]) -> Result<Value> {
        self.resolve_service(name, Some(parameters))
    }

    /// Resolve a service, caching the instance at the container level
    ///
    /// The first call resolves normally; every later call returns the same
    /// instance regardless of the descriptor's own shared flag. `remove`
    /// drops the cached instance along with the registration.
    pub fn get_shared(&self, name: &str) -> Result<Value> {
        if let Some(instance) = self.shared_instances.get(name) {
            return Ok(instance.clone());
        }
        let instance = self.get(name)?;
        self.shared_instances
            .insert(name.to_string(), instance.clone());
        Ok(instance)
    }

    fn resolve_service(&self, name: &str, parameters: Option<&[Value]>) -> Result<Value> {
        let Some(service) = self.service(name) else {
            // Not a registered service; a registry-known class still
            // constructs directly, always fresh.
            if self.classes.contains(name) {
                debug!(class = %name, "constructing unregistered class directly");
                return self.classes.construct(name, parameters.unwrap_or(&[]));
            }
            return Err(Error::service_resolution(name, "service is not registered"));
        };

        let _guard = self.enter(name)?;
        let mut descriptor = service.lock();
        descriptor.resolve(parameters, Some(self))
    }

    /// Push `name` onto the in-flight stack, failing on a cycle
    ///
    /// Frames are owned by the pushing thread; only the current thread's
    /// frames count toward a cycle, so two threads resolving the same
    /// service concurrently do not trip each other.
    fn enter(&self, name: &str) -> Result<ResolutionGuard<'_>> {
        let thread = thread::current().id();
        let mut resolving = self.resolving.lock();
        if resolving
            .iter()
            .any(|(owner, in_flight)| *owner == thread && in_flight == name)
        {
            let chain = resolving
                .iter()
                .filter(|(owner, _)| *owner == thread)
                .map(|(_, in_flight)| in_flight.as_str())
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(Error::service_resolution(
                name,
                format!("circular dependency detected: {chain} -> {name}"),
            ));
        }
        resolving.push((thread, name.to_string()));
        Ok(ResolutionGuard {
            container: self,
            thread,
        })
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("services", &self.services.len())
            .field("classes", &self.classes.len())
            .field("shared_instances", &self.shared_instances.len())
            .finish()
    }
}

impl ServiceLocator for Container {
    fn get(&self, name: &str) -> Result<Value> {
        Container::get(self, name)
    }

    fn get_with(&self, name: &str, parameters: &[Value]) -> Result<Value> {
        Container::get_with(self, name, parameters)
    }
}

/// Pops the owning thread's in-flight frame when a resolution ends
struct ResolutionGuard<'a> {
    container: &'a Container,
    thread: ThreadId,
}

impl Drop for ResolutionGuard<'_> {
    fn drop(&mut self) {
        let mut resolving = self.container.resolving.lock();
        // Per-thread frames nest like a call stack, so the last frame owned
        // by this thread is the one this guard pushed.
        if let Some(index) = resolving
            .iter()
            .rposition(|(owner, _)| *owner == self.thread)
        {
            resolving.remove(index);
        }
    }
}
