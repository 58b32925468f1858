//! Plugin registry: stores loaded plugin descriptors.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;

use routehub_core::error::AppError;
use routehub_core::result::AppResult;
use routehub_core::types::PluginId;

use crate::descriptor::PluginDescriptor;

/// Listing view of a loaded plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Unique plugin identifier.
    pub id: PluginId,
    /// Plugin version string.
    pub version: String,
    /// Number of candidate handler classes.
    pub handler_classes: usize,
}

impl From<&PluginDescriptor> for PluginInfo {
    fn from(descriptor: &PluginDescriptor) -> Self {
        Self {
            id: descriptor.id().clone(),
            version: descriptor.version().to_string(),
            handler_classes: descriptor.handler_classes().len(),
        }
    }
}

/// Registry of all loaded plugins.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    /// Plugin ID → descriptor.
    plugins: RwLock<HashMap<PluginId, Arc<PluginDescriptor>>>,
}

impl PluginRegistry {
    /// Creates a new empty plugin registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plugin descriptor.
    pub fn register(&self, descriptor: Arc<PluginDescriptor>) -> AppResult<()> {
        let mut plugins = self.plugins.write();
        let id = descriptor.id().clone();

        if plugins.contains_key(&id) {
            return Err(AppError::conflict(format!("Plugin '{id}' is already registered")));
        }

        info!(plugin_id = %id, version = %descriptor.version(), "Registering plugin");
        plugins.insert(id, descriptor);
        Ok(())
    }

    /// Unregisters a plugin by ID, returning its descriptor.
    pub fn unregister(&self, plugin_id: &PluginId) -> AppResult<Arc<PluginDescriptor>> {
        let descriptor = self
            .plugins
            .write()
            .remove(plugin_id)
            .ok_or_else(|| AppError::not_found(format!("Plugin '{plugin_id}' not found")))?;

        info!(plugin_id = %plugin_id, "Plugin unregistered");
        Ok(descriptor)
    }

    /// Gets a plugin by ID.
    pub fn get(&self, plugin_id: &PluginId) -> Option<Arc<PluginDescriptor>> {
        self.plugins.read().get(plugin_id).cloned()
    }

    /// Checks whether a plugin is registered.
    pub fn contains(&self, plugin_id: &PluginId) -> bool {
        self.plugins.read().contains_key(plugin_id)
    }

    /// Returns plugin count.
    pub fn count(&self) -> usize {
        self.plugins.read().len()
    }

    /// Lists all registered plugins, sorted by id.
    pub fn list(&self) -> Vec<PluginInfo> {
        let mut infos: Vec<PluginInfo> = self
            .plugins
            .read()
            .values()
            .map(|descriptor| PluginInfo::from(descriptor.as_ref()))
            .collect();
        infos.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        infos
    }
}
