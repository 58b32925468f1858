//! Plugin route prefix configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// How a registration batch behaves when one handler fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationPolicy {
    /// Abort the batch on the first error. Routes added before the error stay
    /// in the table and remain recorded, so a later unregister removes them.
    #[default]
    FailFast,
    /// Abort the batch on the first error and revert everything the failing
    /// plugin added before returning.
    Rollback,
}

/// Route prefixing applied to every plugin handler class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Prefix prepended to every plugin route (may be empty).
    #[serde(default = "default_base_prefix")]
    pub base_prefix: String,
    /// Whether the plugin id is appended to the prefix.
    #[serde(default = "default_true")]
    pub plugin_id_prefix_enabled: bool,
    /// Failure handling for registration batches.
    #[serde(default)]
    pub registration_policy: RegistrationPolicy,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_prefix: default_base_prefix(),
            plugin_id_prefix_enabled: true,
            registration_policy: RegistrationPolicy::default(),
        }
    }
}

impl RoutingConfig {
    /// Reject prefixes that could never form a valid path template.
    pub fn validate(&self) -> AppResult<()> {
        let prefix = &self.base_prefix;
        if prefix.chars().any(|c| c.is_whitespace() || c == '?' || c == '#') {
            return Err(AppError::configuration(format!(
                "base_prefix '{prefix}' must not contain whitespace, '?' or '#'"
            )));
        }
        if prefix.split('/').any(|segment| segment == "..") {
            return Err(AppError::configuration(format!(
                "base_prefix '{prefix}' must not contain '..' segments"
            )));
        }
        Ok(())
    }
}

fn default_base_prefix() -> String {
    "/plugins".to_string()
}

fn default_true() -> bool {
    true
}
