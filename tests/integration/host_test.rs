//! Integration tests for the assembled host and the demo plugin.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use routehub::RouteHub;
use routehub::demo::{DEMO_PLUGIN_ID, demo_plugin};
use routehub_core::config::routing::RoutingConfig;
use routehub_core::types::{HttpMethod, PluginId};

use helpers::{get, users_plugin};

#[tokio::test]
async fn test_demo_plugin_routes_under_default_prefix() {
    let hub = RouteHub::new(&RoutingConfig::default());
    hub.manager().load_plugin(Arc::new(demo_plugin())).unwrap();

    assert_eq!(hub.table().len(), 6);
    assert!(hub.table().lookup(&get("/plugins/demo/users/{id}")).is_some());
    let update = hub.table().find(HttpMethod::Put, "/plugins/demo/users/{id}").unwrap();
    assert_eq!(update.selector.as_str(), "update");
    let ping = hub.table().find(HttpMethod::Patch, "/plugins/demo/ping").unwrap();
    assert_eq!(ping.handler_class, "HealthController");

    let listing: serde_json::Value = serde_json::from_str(&hub.routes_json().unwrap()).unwrap();
    let paths: Vec<&str> = listing
        .as_array()
        .unwrap()
        .iter()
        .map(|route| route["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths.first(), Some(&"/plugins/demo/ping"));
    assert!(paths.contains(&"/plugins/demo/users"));

    hub.manager().unload_all();
    assert!(hub.table().is_empty());
    assert!(hub.manager().plugin_registry().get(&PluginId::new(DEMO_PLUGIN_ID)).is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_async_readers_during_blocking_reload() {
    let hub = Arc::new(RouteHub::new(&RoutingConfig::default()));
    hub.manager().load_plugin(users_plugin("p1")).unwrap();

    let writer = {
        let hub = Arc::clone(&hub);
        tokio::task::spawn_blocking(move || {
            let p1 = PluginId::new("p1");
            for _ in 0..50 {
                hub.manager().reload_plugin(&p1).unwrap();
            }
        })
    };

    let reader = {
        let hub = Arc::clone(&hub);
        tokio::spawn(async move {
            let mut last = 0;
            for _ in 0..200 {
                let snapshot = hub.table().snapshot();
                assert!(snapshot.revision() >= last);
                last = snapshot.revision();
                tokio::time::sleep(Duration::from_micros(50)).await;
            }
        })
    };

    writer.await.unwrap();
    reader.await.unwrap();

    assert!(hub.table().lookup(&get("/plugins/p1/users")).is_some());
    assert_eq!(hub.table().len(), 2);
}
