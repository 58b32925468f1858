//! Route keys and the entries stored under them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use routehub_core::types::{HandlerId, HandlerRef, MethodSelector, MethodSet, PluginId};

use super::path::normalize;

/// Identity of a dispatch-table entry: accepted methods + normalized path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawRouteKey")]
pub struct RouteKey {
    methods: MethodSet,
    path: String,
}

/// Wire form of a [`RouteKey`]; the path is normalized on conversion.
#[derive(Deserialize)]
struct RawRouteKey {
    methods: MethodSet,
    path: String,
}

impl From<RawRouteKey> for RouteKey {
    fn from(raw: RawRouteKey) -> Self {
        Self::new(raw.methods, &raw.path)
    }
}

impl RouteKey {
    /// Build a key, normalizing `path`.
    pub fn new(methods: MethodSet, path: &str) -> Self {
        Self {
            methods,
            path: normalize(path),
        }
    }

    /// Accepted methods.
    pub fn methods(&self) -> &MethodSet {
        &self.methods
    }

    /// Normalized path template.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.methods, self.path)
    }
}

/// A route key bound to the handler that answers it.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    /// Key the entry is stored under.
    pub key: RouteKey,
    /// Plugin that contributed the entry.
    pub plugin_id: PluginId,
    /// Type name of the handler class.
    pub handler_class: String,
    /// Function on the handler answering this key.
    pub selector: MethodSelector,
    /// Container id of the handler instance.
    pub handler_id: HandlerId,
    /// The handler instance.
    pub handler: HandlerRef,
    /// When the entry was added.
    pub registered_at: DateTime<Utc>,
}

impl RouteEntry {
    /// Returns a serializable description of this entry.
    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            methods: self.key.methods().to_string(),
            path: self.key.path().to_string(),
            plugin_id: self.plugin_id.clone(),
            handler_class: self.handler_class.clone(),
            selector: self.selector.clone(),
            registered_at: self.registered_at,
        }
    }
}

/// Serializable view of a [`RouteEntry`], used for route listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Accepted methods, `*` for any.
    pub methods: String,
    /// Normalized path template.
    pub path: String,
    /// Owning plugin.
    pub plugin_id: PluginId,
    /// Handler class name.
    pub handler_class: String,
    /// Handler function.
    pub selector: MethodSelector,
    /// Registration timestamp.
    pub registered_at: DateTime<Utc>,
}
