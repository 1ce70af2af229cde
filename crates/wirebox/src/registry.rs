//! Class registry - name-keyed construction table
//!
//! Rust has no runtime reflection, so "construct the class named by this
//! string" is backed by an explicit registry populated at startup: each
//! [`ClassEntry`] carries a constructor closure plus the named setter-method
//! and property-setter closures that structured definitions may reference.
//!
//! Registration goes through [`ClassEntry::builder`], which offers typed
//! sugar: method and property closures are written against the concrete
//! type and the builder wraps them with the downcast.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;
use wirebox_domain::{Error, Result, Value};

/// Constructor closure: positional arguments in, instance out
pub type ConstructorFn = Arc<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>;

/// Setter-method closure: instance plus positional arguments
pub type MethodFn = Arc<dyn Fn(&Value, &[Value]) -> Result<()> + Send + Sync>;

/// Property-setter closure: instance plus the resolved value
pub type PropertyFn = Arc<dyn Fn(&Value, Value) -> Result<()> + Send + Sync>;

/// Everything the container knows about one constructible class
pub struct ClassEntry {
    class_name: String,
    constructor: ConstructorFn,
    methods: HashMap<String, MethodFn>,
    properties: HashMap<String, PropertyFn>,
}

impl ClassEntry {
    /// Start building an entry for the named class
    pub fn builder<S: Into<String>>(class_name: S) -> ClassEntryBuilder {
        ClassEntryBuilder {
            class_name: class_name.into(),
            constructor: None,
            methods: HashMap::new(),
            properties: HashMap::new(),
        }
    }

    /// The registered class name
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Construct an instance with the given positional arguments
    pub fn construct(&self, arguments: &[Value]) -> Result<Value> {
        (self.constructor)(arguments)
    }

    /// Invoke a registered setter method on an instance
    pub fn call(&self, instance: &Value, method: &str, arguments: &[Value]) -> Result<()> {
        let method_fn = self.methods.get(method).ok_or_else(|| {
            Error::configuration(format!(
                "class '{}' has no registered method '{method}'",
                self.class_name
            ))
        })?;
        method_fn(instance, arguments)
    }

    /// Assign a registered property on an instance
    pub fn set_property(&self, instance: &Value, name: &str, value: Value) -> Result<()> {
        let property_fn = self.properties.get(name).ok_or_else(|| {
            Error::configuration(format!(
                "class '{}' has no registered property '{name}'",
                self.class_name
            ))
        })?;
        property_fn(instance, value)
    }
}

impl std::fmt::Debug for ClassEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassEntry")
            .field("class_name", &self.class_name)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("properties", &self.properties.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`ClassEntry`]
pub struct ClassEntryBuilder {
    class_name: String,
    constructor: Option<ConstructorFn>,
    methods: HashMap<String, MethodFn>,
    properties: HashMap<String, PropertyFn>,
}

impl ClassEntryBuilder {
    /// Set the constructor closure
    pub fn constructor<F>(mut self, constructor: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.constructor = Some(Arc::new(constructor));
        self
    }

    /// Register a setter method against the concrete instance type
    ///
    /// The closure receives the downcast instance; resolving a call against
    /// a value of any other type is a configuration error.
    pub fn method<T, F>(mut self, name: &str, method: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&T, &[Value]) -> Result<()> + Send + Sync + 'static,
    {
        let class_name = self.class_name.clone();
        let method_name = name.to_string();
        self.methods.insert(
            name.to_string(),
            Arc::new(move |instance: &Value, arguments: &[Value]| {
                let concrete = instance.downcast::<T>().ok_or_else(|| {
                    Error::configuration(format!(
                        "method '{method_name}' on class '{class_name}' was invoked on a value \
                         of the wrong type"
                    ))
                })?;
                method(&concrete, arguments)
            }),
        );
        self
    }

    /// Register a property setter against the concrete instance type
    pub fn property<T, F>(mut self, name: &str, setter: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&T, Value) -> Result<()> + Send + Sync + 'static,
    {
        let class_name = self.class_name.clone();
        let property_name = name.to_string();
        self.properties.insert(
            name.to_string(),
            Arc::new(move |instance: &Value, value: Value| {
                let concrete = instance.downcast::<T>().ok_or_else(|| {
                    Error::configuration(format!(
                        "property '{property_name}' on class '{class_name}' was assigned on a \
                         value of the wrong type"
                    ))
                })?;
                setter(&concrete, value)
            }),
        );
        self
    }

    /// Finish the entry; a constructor is mandatory
    pub fn build(self) -> Result<ClassEntry> {
        let constructor = self.constructor.ok_or_else(|| {
            Error::configuration(format!(
                "class '{}' was registered without a constructor",
                self.class_name
            ))
        })?;
        Ok(ClassEntry {
            class_name: self.class_name,
            constructor,
            methods: self.methods,
            properties: self.properties,
        })
    }
}

/// Name → [`ClassEntry`] lookup table, supplied to a `Container`
#[derive(Debug, Default)]
pub struct ClassRegistry {
    classes: DashMap<String, Arc<ClassEntry>>,
}

impl ClassRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class entry, replacing any previous entry of the same name
    pub fn register(&self, entry: ClassEntry) {
        debug!(class = entry.class_name(), "registering class");
        self.classes
            .insert(entry.class_name().to_string(), Arc::new(entry));
    }

    /// Whether the named class is registered
    pub fn contains(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }

    /// Look up the entry for a class
    pub fn get(&self, class_name: &str) -> Option<Arc<ClassEntry>> {
        self.classes
            .get(class_name)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Construct an instance of the named class
    pub fn construct(&self, class_name: &str, arguments: &[Value]) -> Result<Value> {
        let entry = self.get(class_name).ok_or_else(|| {
            Error::service_resolution(class_name, "class is not in the class registry")
        })?;
        entry.construct(arguments)
    }

    /// Names of all registered classes
    pub fn class_names(&self) -> Vec<String> {
        self.classes.iter().map(|e| e.key().clone()).collect()
    }

    /// Number of registered classes
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
