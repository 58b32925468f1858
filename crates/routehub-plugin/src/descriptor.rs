//! Plugin descriptors and their per-processor extension slots.
//!
//! A descriptor is the record of one loaded plugin. Category processors keep
//! their load-cycle bookkeeping in the descriptor's [`Extensions`], keyed by
//! [`ProcessorKey`], so the bookkeeping is dropped together with the
//! descriptor.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;

use routehub_core::types::{HandlerClass, PluginId};

/// Identity of a category processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessorKey(&'static str);

impl ProcessorKey {
    /// Create a processor key.
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Key name.
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ProcessorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Typed value slots, one per processor.
#[derive(Default)]
pub struct Extensions {
    slots: DashMap<ProcessorKey, Box<dyn Any + Send + Sync>>,
}

impl Extensions {
    /// Creates an empty slot map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set<T: Any + Send + Sync>(&self, key: ProcessorKey, value: T) {
        self.slots.insert(key, Box::new(value));
    }

    /// Clone the value under `key` if it has type `T`.
    pub fn get<T: Any + Clone>(&self, key: ProcessorKey) -> Option<T> {
        self.slots
            .get(&key)
            .and_then(|slot| slot.value().downcast_ref::<T>().cloned())
    }

    /// Remove and return the value under `key` if it has type `T`.
    ///
    /// A value of another type is left in place.
    pub fn take<T: Any>(&self, key: ProcessorKey) -> Option<T> {
        self.slots
            .remove_if(&key, |_, slot| slot.is::<T>())
            .and_then(|(_, slot)| slot.downcast::<T>().ok())
            .map(|boxed| *boxed)
    }

    /// Returns `true` if a value is stored under `key`.
    pub fn contains(&self, key: ProcessorKey) -> bool {
        self.slots.contains_key(&key)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl fmt::Debug for Extensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<ProcessorKey> = self.slots.iter().map(|slot| *slot.key()).collect();
        keys.sort();
        f.debug_struct("Extensions").field("keys", &keys).finish()
    }
}

/// Record of one plugin: identity, handler classes and extension slots.
#[derive(Debug)]
pub struct PluginDescriptor {
    /// Stable plugin id.
    id: PluginId,
    /// Plugin version string.
    version: String,
    /// Candidate handler classes for the route processor.
    handler_classes: Vec<Arc<HandlerClass>>,
    /// Per-processor bookkeeping.
    extensions: Extensions,
}

impl PluginDescriptor {
    /// Creates a descriptor with no handler classes.
    pub fn new(id: impl Into<PluginId>) -> Self {
        Self {
            id: id.into(),
            version: "0.0.0".to_string(),
            handler_classes: Vec::new(),
            extensions: Extensions::new(),
        }
    }

    /// Set the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Add a handler class.
    pub fn with_handler(mut self, class: HandlerClass) -> Self {
        self.handler_classes.push(Arc::new(class));
        self
    }

    /// Plugin id.
    pub fn id(&self) -> &PluginId {
        &self.id
    }

    /// Plugin version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Candidate handler classes in declaration order.
    pub fn handler_classes(&self) -> &[Arc<HandlerClass>] {
        &self.handler_classes
    }

    /// Per-processor extension slots.
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Store `value` in the slot of `processor`.
    pub fn set_extension<T: Any + Send + Sync>(&self, processor: ProcessorKey, value: T) {
        self.extensions.set(processor, value);
    }

    /// Clone the value in the slot of `processor`.
    pub fn get_extension<T: Any + Clone>(&self, processor: ProcessorKey) -> Option<T> {
        self.extensions.get(processor)
    }

    /// Take the value out of the slot of `processor`.
    pub fn take_extension<T: Any>(&self, processor: ProcessorKey) -> Option<T> {
        self.extensions.take(processor)
    }
}
