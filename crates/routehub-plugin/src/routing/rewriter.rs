//! Per-plugin path prefix rewriting.
//!
//! Every class-level template of a plugin handler is placed under an
//! effective prefix derived from the configured base prefix and, when
//! enabled, the plugin id. Rewriting is pure: it returns a new template set
//! and leaves the handler class's declared templates untouched.

use std::collections::BTreeSet;

use routehub_core::config::routing::RoutingConfig;
use routehub_core::error::AppError;
use routehub_core::result::AppResult;
use routehub_core::types::PluginId;

use super::path::join_paths;

/// Computes final class-level templates for plugin handler classes.
#[derive(Debug, Clone)]
pub struct PathPrefixRewriter {
    /// Configured base prefix (may be empty).
    base_prefix: String,
    /// Whether the plugin id is appended to the base prefix.
    plugin_id_prefix_enabled: bool,
}

impl PathPrefixRewriter {
    /// Creates a rewriter from the routing configuration.
    pub fn new(config: &RoutingConfig) -> Self {
        Self {
            base_prefix: config.base_prefix.clone(),
            plugin_id_prefix_enabled: config.plugin_id_prefix_enabled,
        }
    }

    /// The prefix applied to `plugin_id`, or `None` when rewriting is a no-op.
    pub fn effective_prefix(&self, plugin_id: &PluginId) -> Option<String> {
        if self.plugin_id_prefix_enabled {
            if self.base_prefix.is_empty() {
                Some(plugin_id.to_string())
            } else {
                Some(join_paths(&self.base_prefix, plugin_id.as_str()))
            }
        } else if self.base_prefix.is_empty() {
            None
        } else {
            Some(self.base_prefix.clone())
        }
    }

    /// Rewrite the declared class templates of one handler class.
    ///
    /// Templates that already contain the effective prefix are kept as-is.
    /// An empty declaration yields the prefix alone.
    pub fn rewrite(&self, plugin_id: &PluginId, declared: &[String]) -> BTreeSet<String> {
        let Some(prefix) = self.effective_prefix(plugin_id) else {
            return declared.iter().cloned().collect();
        };

        if declared.is_empty() {
            return BTreeSet::from([prefix]);
        }

        declared
            .iter()
            .map(|template| {
                if template.contains(prefix.as_str()) {
                    template.clone()
                } else {
                    join_paths(&prefix, template)
                }
            })
            .collect()
    }

    /// Reject plugin ids that cannot be used as a path segment.
    ///
    /// Only checked when plugin-id prefixing is enabled.
    pub fn validate_plugin_id(&self, plugin_id: &PluginId) -> AppResult<()> {
        if !self.plugin_id_prefix_enabled {
            return Ok(());
        }
        let id = plugin_id.as_str();
        if id.is_empty() {
            return Err(AppError::configuration(
                "Plugin id must not be empty when plugin id prefixing is enabled",
            ));
        }
        if id.chars().any(|c| c == '/' || c.is_whitespace()) {
            return Err(AppError::configuration(format!(
                "Plugin id '{id}' must not contain '/' or whitespace when used as a path prefix"
            )));
        }
        Ok(())
    }
}
