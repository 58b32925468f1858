//! Application wiring.

use std::sync::Arc;

use tracing::info;

use routehub_core::config::routing::RoutingConfig;
use routehub_core::result::AppResult;
use routehub_plugin::processor::PluginProcessor;
use routehub_plugin::{
    DeclaredRouteExtractor, FactoryContainer, PluginManager, PluginRegistrationProcessor,
    RouteSummary, RouteTable,
};

/// The assembled registry: one shared route table and the manager that
/// mutates it.
#[derive(Debug)]
pub struct RouteHub {
    table: Arc<RouteTable>,
    container: Arc<FactoryContainer>,
    manager: PluginManager,
}

impl RouteHub {
    /// Wire the route table, container, extractor, processor and manager.
    pub fn new(config: &RoutingConfig) -> Self {
        let table = Arc::new(RouteTable::new());
        let container = FactoryContainer::shared();

        let route_processor: Arc<dyn PluginProcessor> = Arc::new(PluginRegistrationProcessor::new(
            Arc::clone(&table),
            container.clone(),
            Arc::new(DeclaredRouteExtractor::new()),
            config,
        ));
        let manager = PluginManager::new(vec![route_processor]);

        info!(
            base_prefix = %config.base_prefix,
            plugin_id_prefix = config.plugin_id_prefix_enabled,
            policy = ?config.registration_policy,
            "Route registry initialized"
        );

        Self {
            table,
            container,
            manager,
        }
    }

    /// The shared route table, as consulted by the dispatcher.
    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    /// The handler container.
    pub fn container(&self) -> &Arc<FactoryContainer> {
        &self.container
    }

    /// The plugin manager.
    pub fn manager(&self) -> &PluginManager {
        &self.manager
    }

    /// Current route listing.
    pub fn routes(&self) -> Vec<RouteSummary> {
        self.table.summaries()
    }

    /// Current route listing as pretty-printed JSON.
    pub fn routes_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(&self.routes())?)
    }
}
