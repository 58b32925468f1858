//! Handler container trait: the dependency-injection collaborator.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::result::AppResult;
use crate::types::{HandlerClass, HandlerId, HandlerRef, PluginId};

/// Container-issued identity of one instantiated handler.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandlerHandle {
    /// Unique instance id.
    pub id: HandlerId,
    /// Plugin that owns the instance.
    pub plugin_id: PluginId,
    /// Registration name inside the container.
    pub bean_name: String,
}

impl HandlerHandle {
    /// Create a handle with a fresh id and the conventional bean name.
    pub fn new(plugin_id: &PluginId, class: &HandlerClass) -> Self {
        Self {
            id: HandlerId::new(),
            plugin_id: plugin_id.clone(),
            bean_name: format!("{}@{}", plugin_id, class.name()),
        }
    }
}

impl fmt::Display for HandlerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.bean_name, self.id)
    }
}

/// Builds, resolves and releases plugin handler instances.
///
/// Implementations provide their own thread-safety.
pub trait HandlerContainer: Send + Sync + fmt::Debug {
    /// Build an instance of `class` owned by `plugin_id`.
    ///
    /// Fails with an `Instantiation` error when no instance can be produced.
    fn instantiate(&self, plugin_id: &PluginId, class: &HandlerClass) -> AppResult<HandlerHandle>;

    /// Look up a live instance.
    fn resolve(&self, handle: &HandlerHandle) -> Option<HandlerRef>;

    /// Drop an instance. Releasing an unknown handle is an error.
    fn release(&self, handle: &HandlerHandle) -> AppResult<()>;
}
