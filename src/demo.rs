//! Compiled-in demo plugin.

use routehub_plugin::PluginDescriptor;
use routehub_plugin::handler_class;

/// Id of the demo plugin.
pub const DEMO_PLUGIN_ID: &str = "demo";

#[derive(Debug, Clone, Default)]
pub struct UserController;

#[derive(Debug, Clone, Default)]
pub struct HealthController;

/// Descriptor for the demo plugin: a user CRUD handler and a health check.
pub fn demo_plugin() -> PluginDescriptor {
    let users = handler_class!("UserController",
        paths: ["/users"],
        routes: [
            get "list" => "",
            get "show" => "{id}",
            post "create" => "",
            put "update" => "{id}",
            delete "remove" => "{id}",
        ],
        instance: UserController
    );
    let health = handler_class!("HealthController",
        routes: [any "ping" => "/ping"],
        instance: HealthController
    );

    PluginDescriptor::new(DEMO_PLUGIN_ID)
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_handler(users)
        .with_handler(health)
}
