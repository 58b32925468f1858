//! Plugin manager: load cycle management for all plugins.

use std::slice;
use std::sync::Arc;

use tracing::{error, info, warn};

use routehub_core::error::AppError;
use routehub_core::result::AppResult;
use routehub_core::types::PluginId;

use crate::descriptor::PluginDescriptor;
use crate::processor::PluginProcessor;
use crate::registry::{PluginInfo, PluginRegistry};

/// Drives plugin load cycles: registers descriptors and runs every processor
/// over them, in order on load and in reverse order on unload.
#[derive(Debug)]
pub struct PluginManager {
    /// Plugin registry.
    plugin_registry: Arc<PluginRegistry>,
    /// Category processors in load order.
    processors: Vec<Arc<dyn PluginProcessor>>,
}

impl PluginManager {
    /// Creates a manager running `processors` in the given order.
    pub fn new(processors: Vec<Arc<dyn PluginProcessor>>) -> Self {
        Self {
            plugin_registry: Arc::new(PluginRegistry::new()),
            processors,
        }
    }

    /// Loads one plugin.
    ///
    /// If a processor fails, the descriptor stays registered only while some
    /// processor still holds contributions for it, so
    /// [`unload_plugin`](Self::unload_plugin) can reverse them. Otherwise it
    /// is dropped and the same id can be loaded again.
    pub fn load_plugin(&self, descriptor: Arc<PluginDescriptor>) -> AppResult<()> {
        self.load_batch(vec![descriptor])
    }

    /// Loads a batch of plugins, handing the whole batch to each processor.
    ///
    /// On failure every plugin of the batch that no processor holds is
    /// dropped from the registry.
    pub fn load_batch(&self, batch: Vec<Arc<PluginDescriptor>>) -> AppResult<()> {
        for (i, descriptor) in batch.iter().enumerate() {
            let id = descriptor.id();
            if self.plugin_registry.contains(id) || batch[..i].iter().any(|d| d.id() == id) {
                return Err(AppError::conflict(format!("Plugin '{id}' is already registered")));
            }
        }
        for descriptor in &batch {
            self.plugin_registry.register(descriptor.clone())?;
        }

        for processor in &self.processors {
            if let Err(e) = processor.register(&batch) {
                error!(
                    processor = %processor.key(),
                    plugins = batch.len(),
                    error = %e,
                    "Plugin batch load failed"
                );
                self.release_unheld(&batch);
                return Err(e);
            }
        }

        for descriptor in &batch {
            info!(
                plugin_id = %descriptor.id(),
                version = %descriptor.version(),
                handlers = descriptor.handler_classes().len(),
                "Plugin loaded"
            );
        }
        Ok(())
    }

    fn release_unheld(&self, batch: &[Arc<PluginDescriptor>]) {
        for descriptor in batch {
            if self.processors.iter().any(|p| p.holds(descriptor)) {
                warn!(plugin_id = %descriptor.id(), "Plugin partially loaded, kept for unload");
                continue;
            }
            if let Err(e) = self.plugin_registry.unregister(descriptor.id()) {
                warn!(plugin_id = %descriptor.id(), error = %e, "Error releasing plugin");
            }
        }
    }

    /// Unloads a plugin, running processors in reverse order.
    pub fn unload_plugin(&self, plugin_id: &PluginId) -> AppResult<()> {
        let descriptor = self
            .plugin_registry
            .get(plugin_id)
            .ok_or_else(|| AppError::not_found(format!("Plugin '{plugin_id}' not found")))?;

        for processor in self.processors.iter().rev() {
            processor.unregister(slice::from_ref(&descriptor));
        }
        self.plugin_registry.unregister(plugin_id)?;

        info!(plugin_id = %plugin_id, "Plugin unloaded");
        Ok(())
    }

    /// Unloads a plugin and loads the same descriptor again.
    pub fn reload_plugin(&self, plugin_id: &PluginId) -> AppResult<()> {
        let descriptor = self
            .plugin_registry
            .get(plugin_id)
            .ok_or_else(|| AppError::not_found(format!("Plugin '{plugin_id}' not found")))?;

        self.unload_plugin(plugin_id)?;
        self.load_plugin(descriptor)?;

        info!(plugin_id = %plugin_id, "Plugin reloaded");
        Ok(())
    }

    /// Unloads all plugins. Failures are logged and skipped.
    pub fn unload_all(&self) {
        for info in self.plugin_registry.list() {
            if let Err(e) = self.unload_plugin(&info.id) {
                warn!(plugin_id = %info.id, error = %e, "Error unloading plugin");
            }
        }
        info!("All plugins unloaded");
    }

    /// Returns the plugin registry.
    pub fn plugin_registry(&self) -> &Arc<PluginRegistry> {
        &self.plugin_registry
    }

    /// Lists all loaded plugins.
    pub fn list_plugins(&self) -> Vec<PluginInfo> {
        self.plugin_registry.list()
    }
}
