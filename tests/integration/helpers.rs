//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use routehub::RouteHub;
use routehub_core::config::routing::{RegistrationPolicy, RoutingConfig};
use routehub_core::types::{HandlerClass, HttpMethod, MethodSet, RouteMethod};
use routehub_plugin::{PluginDescriptor, RouteKey};

/// Handler instance used by test plugins.
#[derive(Debug, Clone, Default)]
pub struct TestHandler;

/// Routing config with the given prefix settings.
pub fn routing(base_prefix: &str, enabled: bool, policy: RegistrationPolicy) -> RoutingConfig {
    RoutingConfig {
        base_prefix: base_prefix.to_string(),
        plugin_id_prefix_enabled: enabled,
        registration_policy: policy,
    }
}

/// A registry wired with `/api` + plugin id prefixing.
pub fn api_hub() -> RouteHub {
    RouteHub::new(&routing("/api", true, RegistrationPolicy::FailFast))
}

/// Handler class at `path` with `list` and `show` GET routes.
pub fn crud_class(name: &str, path: &str) -> HandlerClass {
    HandlerClass::builder(name)
        .path(path)
        .route(RouteMethod::get("list", ""))
        .route(RouteMethod::get("show", "{id}"))
        .instance(TestHandler)
        .build()
}

/// A plugin with a single `/users` handler class.
pub fn users_plugin(id: &str) -> Arc<PluginDescriptor> {
    Arc::new(PluginDescriptor::new(id).with_handler(crud_class("UserController", "/users")))
}

/// `GET` route key for `path`.
pub fn get(path: &str) -> RouteKey {
    RouteKey::new(MethodSet::single(HttpMethod::Get), path)
}
