//! Per-plugin bookkeeping of exactly what a registration added.

use routehub_core::traits::container::HandlerHandle;
use routehub_core::types::{HandlerRef, PluginId};

use crate::descriptor::{PluginDescriptor, ProcessorKey};
use crate::routing::RouteKey;

/// What one plugin's registration added: route keys and handler handles,
/// in the order they were added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerPluginRecord {
    plugin_id: PluginId,
    keys: Vec<RouteKey>,
    handlers: Vec<HandlerHandle>,
}

impl PerPluginRecord {
    /// Plugin the record belongs to.
    pub fn plugin_id(&self) -> &PluginId {
        &self.plugin_id
    }

    /// Route keys added to the table.
    pub fn keys(&self) -> &[RouteKey] {
        &self.keys
    }

    /// Handler instances created in the container.
    pub fn handlers(&self) -> &[HandlerHandle] {
        &self.handlers
    }

    /// Returns `true` if nothing was added.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.handlers.is_empty()
    }
}

/// Handler instances of one plugin during a single registration, with the
/// keys added for them so far.
#[derive(Debug)]
pub struct PluginHandle {
    plugin_id: PluginId,
    handlers: Vec<(HandlerHandle, HandlerRef)>,
    keys: Vec<RouteKey>,
}

impl PluginHandle {
    /// Starts an empty handle for `plugin_id`.
    pub fn new(plugin_id: PluginId) -> Self {
        Self {
            plugin_id,
            handlers: Vec::new(),
            keys: Vec::new(),
        }
    }

    /// Record an instantiated handler.
    pub fn push_handler(&mut self, handle: HandlerHandle, instance: HandlerRef) {
        self.handlers.push((handle, instance));
    }

    /// Record a key that was added to the route table.
    pub fn push_key(&mut self, key: RouteKey) {
        self.keys.push(key);
    }

    /// Drop the instance references and keep only what unregistration needs.
    pub fn into_record(self) -> PerPluginRecord {
        PerPluginRecord {
            plugin_id: self.plugin_id,
            keys: self.keys,
            handlers: self.handlers.into_iter().map(|(handle, _)| handle).collect(),
        }
    }
}

/// Stores and fetches [`PerPluginRecord`]s in the extension slot of one
/// processor on each plugin descriptor.
#[derive(Debug, Clone, Copy)]
pub struct UnregistrationTracker {
    processor: ProcessorKey,
}

impl UnregistrationTracker {
    /// Creates a tracker writing to the slot of `processor`.
    pub fn new(processor: ProcessorKey) -> Self {
        Self { processor }
    }

    /// Store `record` on `descriptor`, replacing any earlier record.
    pub fn store(&self, descriptor: &PluginDescriptor, record: PerPluginRecord) {
        descriptor.set_extension(self.processor, record);
    }

    /// Take the record off `descriptor`. A second fetch returns `None`.
    pub fn fetch(&self, descriptor: &PluginDescriptor) -> Option<PerPluginRecord> {
        descriptor.take_extension(self.processor)
    }

    /// Clone the record without removing it.
    pub fn peek(&self, descriptor: &PluginDescriptor) -> Option<PerPluginRecord> {
        descriptor.get_extension(self.processor)
    }

    /// Returns `true` if `descriptor` holds a record for this processor.
    pub fn is_tracked(&self, descriptor: &PluginDescriptor) -> bool {
        descriptor.extensions().contains(self.processor)
    }
}
