//! In-memory handler container built on handler-class factories.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use routehub_core::error::AppError;
use routehub_core::result::AppResult;
use routehub_core::traits::container::{HandlerContainer, HandlerHandle};
use routehub_core::types::{HandlerClass, HandlerId, HandlerRef, PluginId};

/// Default [`HandlerContainer`]: builds instances with the class factory and
/// keeps them until released.
#[derive(Debug, Default)]
pub struct FactoryContainer {
    /// Handler id → live instance.
    instances: DashMap<HandlerId, HandlerRef>,
}

impl FactoryContainer {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty container behind an `Arc`.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Number of live instances.
    pub fn live_count(&self) -> usize {
        self.instances.len()
    }
}

impl HandlerContainer for FactoryContainer {
    fn instantiate(&self, plugin_id: &PluginId, class: &HandlerClass) -> AppResult<HandlerHandle> {
        let instance = class.create_instance().map_err(|e| {
            AppError::instantiation(format!(
                "Failed to instantiate handler '{}' for plugin '{}': {}",
                class.name(),
                plugin_id,
                e
            ))
        })?;

        let handle = HandlerHandle::new(plugin_id, class);
        self.instances.insert(handle.id, instance);

        debug!(plugin_id = %plugin_id, handler = %handle, "Handler instantiated");
        Ok(handle)
    }

    fn resolve(&self, handle: &HandlerHandle) -> Option<HandlerRef> {
        self.instances.get(&handle.id).map(|instance| instance.clone())
    }

    fn release(&self, handle: &HandlerHandle) -> AppResult<()> {
        match self.instances.remove(&handle.id) {
            Some(_) => {
                debug!(handler = %handle, "Handler released");
                Ok(())
            }
            None => Err(AppError::not_found(format!("Handler '{handle}' is not live"))),
        }
    }
}
