//! Integration tests for plugin load, unload and reload cycles.

mod helpers;

use std::sync::Arc;

use routehub::RouteHub;
use routehub_core::config::AppConfig;
use routehub_core::config::routing::RegistrationPolicy;
use routehub_core::error::ErrorKind;
use routehub_core::types::{HttpMethod, PluginId};
use routehub_plugin::PluginDescriptor;

use helpers::{api_hub, crud_class, get, routing, users_plugin};

#[test]
fn test_prefixed_route_survives_reload() {
    let hub = api_hub();
    let p1 = PluginId::new("p1");
    hub.manager().load_plugin(users_plugin("p1")).unwrap();

    let entry = hub.table().lookup(&get("/api/p1/users")).unwrap();
    assert_eq!(entry.handler_class, "UserController");

    hub.manager().reload_plugin(&p1).unwrap();
    assert!(hub.table().lookup(&get("/api/p1/users")).is_some());
    assert!(hub.table().lookup(&get("/api/p1/users/{id}")).is_some());
    assert_eq!(hub.table().len(), 2);
    assert_eq!(hub.container().live_count(), 1);
}

#[test]
fn test_repeated_load_cycles_leave_nothing_behind() {
    let hub = api_hub();
    let p1 = PluginId::new("p1");

    for _ in 0..5 {
        hub.manager().load_plugin(users_plugin("p1")).unwrap();
        assert_eq!(hub.table().len(), 2);
        hub.manager().unload_plugin(&p1).unwrap();
        assert!(hub.table().is_empty());
        assert_eq!(hub.container().live_count(), 0);
    }
    assert!(hub.manager().list_plugins().is_empty());
}

#[test]
fn test_unload_touches_only_its_own_routes() {
    let hub = api_hub();
    hub.manager()
        .load_batch(vec![users_plugin("p1"), users_plugin("p2"), users_plugin("p3")])
        .unwrap();
    assert_eq!(hub.table().len(), 6);

    hub.manager().unload_plugin(&PluginId::new("p2")).unwrap();

    assert_eq!(hub.table().len(), 4);
    assert!(hub.table().lookup(&get("/api/p2/users")).is_none());
    assert!(hub.table().lookup(&get("/api/p1/users")).is_some());
    assert!(hub.table().lookup(&get("/api/p3/users/{id}")).is_some());
}

#[test]
fn test_conflicting_plugin_is_reversible() {
    let hub = RouteHub::new(&routing("/api", false, RegistrationPolicy::FailFast));
    hub.manager().load_plugin(users_plugin("p1")).unwrap();

    let p2 = Arc::new(
        PluginDescriptor::new("p2")
            .with_handler(crud_class("OrderController", "/orders"))
            .with_handler(crud_class("UserController", "/users")),
    );
    let err = hub.manager().load_plugin(p2).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    assert_eq!(hub.table().lookup(&get("/api/users")).unwrap().plugin_id.as_str(), "p1");
    assert!(hub.table().lookup(&get("/api/orders")).is_some());

    hub.manager().unload_plugin(&PluginId::new("p2")).unwrap();
    assert!(hub.table().lookup(&get("/api/orders")).is_none());
    assert_eq!(hub.table().len(), 2);
    assert_eq!(hub.container().live_count(), 1);
}

#[test]
fn test_rollback_policy_from_config() {
    let config = AppConfig::from_toml_str(
        r#"
        [routing]
        base_prefix = "/api"
        plugin_id_prefix_enabled = false
        registration_policy = "rollback"
        "#,
    )
    .unwrap();
    let hub = RouteHub::new(&config.routing);
    hub.manager().load_plugin(users_plugin("p1")).unwrap();

    let p2 = Arc::new(
        PluginDescriptor::new("p2")
            .with_handler(crud_class("OrderController", "/orders"))
            .with_handler(crud_class("UserController", "/users")),
    );
    assert!(hub.manager().load_plugin(p2).is_err());

    assert!(hub.table().lookup(&get("/api/orders")).is_none());
    assert_eq!(hub.table().len(), 2);
    assert_eq!(hub.container().live_count(), 1);
}

#[test]
fn test_rolled_back_plugin_can_be_loaded_again() {
    let hub = RouteHub::new(&routing("/api", false, RegistrationPolicy::Rollback));
    let p1 = PluginId::new("p1");
    let p2 = PluginId::new("p2");
    hub.manager().load_plugin(users_plugin("p1")).unwrap();

    let err = hub.manager().load_plugin(orders_and_users("p2")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert!(!hub.manager().plugin_registry().contains(&p2));
    assert_eq!(hub.manager().unload_plugin(&p2).unwrap_err().kind, ErrorKind::NotFound);

    hub.manager().unload_plugin(&p1).unwrap();
    hub.manager().load_plugin(orders_and_users("p2")).unwrap();
    assert_eq!(hub.table().lookup(&get("/api/users")).unwrap().plugin_id, p2);
    assert_eq!(hub.table().len(), 4);
    assert_eq!(hub.container().live_count(), 2);
}

#[test]
fn test_unprocessed_batch_tail_can_be_loaded_again() {
    let hub = RouteHub::new(&routing("/api", false, RegistrationPolicy::FailFast));
    hub.manager().load_plugin(users_plugin("p1")).unwrap();

    let p3 = Arc::new(PluginDescriptor::new("p3").with_handler(crud_class("ItemController", "/items")));
    let err = hub
        .manager()
        .load_batch(vec![orders_and_users("p2"), p3.clone()])
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    let ids: Vec<String> = hub.manager().list_plugins().into_iter().map(|i| i.id.to_string()).collect();
    assert_eq!(ids, ["p1", "p2"]);
    assert!(hub.table().lookup(&get("/api/items")).is_none());

    hub.manager().load_plugin(p3).unwrap();
    assert!(hub.table().lookup(&get("/api/items")).is_some());
    assert_eq!(hub.table().len(), 6);
}

#[test]
fn test_dispatch_lookup_by_method_and_path() {
    let hub = api_hub();
    hub.manager().load_plugin(users_plugin("p1")).unwrap();

    let snapshot = hub.table().snapshot();
    let hit = snapshot.find(HttpMethod::Get, "/api/p1/users/{id}").unwrap();
    assert_eq!(hit.selector.as_str(), "show");
    assert!(snapshot.find(HttpMethod::Post, "/api/p1/users").is_none());
}

/// Orders first, then a users class that collides with `users_plugin`.
fn orders_and_users(id: &str) -> Arc<PluginDescriptor> {
    Arc::new(
        PluginDescriptor::new(id)
            .with_handler(crud_class("OrderController", "/orders"))
            .with_handler(crud_class("UserController", "/users")),
    )
}
