//! Route registration processor.
//!
//! For each plugin of a batch the processor instantiates every handler class
//! through the container, places the class templates under the plugin's
//! prefix, turns every declared route into a [`RouteKey`] per class template
//! and adds it to the shared [`RouteTable`]. Everything it adds is recorded
//! in the plugin descriptor so unregistration removes exactly that.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use routehub_core::config::routing::{RegistrationPolicy, RoutingConfig};
use routehub_core::error::AppError;
use routehub_core::result::AppResult;
use routehub_core::traits::container::{HandlerContainer, HandlerHandle};
use routehub_core::traits::metadata::RouteMetadataExtractor;
use routehub_core::types::{HandlerClass, PluginId};

use super::PluginProcessor;
use super::tracker::{PerPluginRecord, PluginHandle, UnregistrationTracker};
use crate::descriptor::{PluginDescriptor, ProcessorKey};
use crate::routing::path::combine;
use crate::routing::{PathPrefixRewriter, RouteEntry, RouteKey, RouteTable};

/// Extension slot key of the route processor.
pub const ROUTE_PROCESSOR_KEY: ProcessorKey = ProcessorKey::new("route-registration");

/// Attaches plugin handler routes to the route table and detaches them.
#[derive(Debug)]
pub struct PluginRegistrationProcessor {
    table: Arc<RouteTable>,
    container: Arc<dyn HandlerContainer>,
    extractor: Arc<dyn RouteMetadataExtractor>,
    rewriter: PathPrefixRewriter,
    policy: RegistrationPolicy,
    tracker: UnregistrationTracker,
}

impl PluginRegistrationProcessor {
    /// Creates a processor writing to `table`.
    pub fn new(
        table: Arc<RouteTable>,
        container: Arc<dyn HandlerContainer>,
        extractor: Arc<dyn RouteMetadataExtractor>,
        config: &RoutingConfig,
    ) -> Self {
        Self {
            table,
            container,
            extractor,
            rewriter: PathPrefixRewriter::new(config),
            policy: config.registration_policy,
            tracker: UnregistrationTracker::new(ROUTE_PROCESSOR_KEY),
        }
    }

    /// The route table this processor mutates.
    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    /// The record currently held for `descriptor`, if any.
    pub fn record_of(&self, descriptor: &PluginDescriptor) -> Option<PerPluginRecord> {
        self.tracker.peek(descriptor)
    }

    fn register_plugin(&self, descriptor: &PluginDescriptor) -> AppResult<()> {
        let plugin_id = descriptor.id();

        if descriptor.handler_classes().is_empty() {
            debug!(plugin_id = %plugin_id, "Plugin has no handler classes, skipping");
            return Ok(());
        }
        if self.tracker.is_tracked(descriptor) {
            return Err(AppError::conflict(format!(
                "Plugin '{plugin_id}' already has registered routes; unregister it first"
            )));
        }
        self.rewriter.validate_plugin_id(plugin_id)?;

        let mut handle = PluginHandle::new(plugin_id.clone());
        let result = descriptor
            .handler_classes()
            .iter()
            .try_for_each(|class| self.register_class(plugin_id, class, &mut handle));

        match result {
            Ok(()) => {
                let record = handle.into_record();
                info!(
                    plugin_id = %plugin_id,
                    handlers = record.handlers().len(),
                    routes = record.keys().len(),
                    "Plugin routes registered"
                );
                self.tracker.store(descriptor, record);
                Ok(())
            }
            Err(e) => {
                let record = handle.into_record();
                error!(
                    plugin_id = %plugin_id,
                    error = %e,
                    added = record.keys().len(),
                    policy = ?self.policy,
                    "Plugin route registration failed"
                );
                match self.policy {
                    RegistrationPolicy::FailFast => {
                        if !record.is_empty() {
                            self.tracker.store(descriptor, record);
                        }
                    }
                    RegistrationPolicy::Rollback => self.reverse(&record),
                }
                Err(e)
            }
        }
    }

    fn register_class(
        &self,
        plugin_id: &PluginId,
        class: &HandlerClass,
        handle: &mut PluginHandle,
    ) -> AppResult<()> {
        let handler = self.container.instantiate(plugin_id, class)?;
        if handler.bean_name.trim().is_empty() {
            self.discard(&handler);
            return Err(AppError::instantiation(format!(
                "Container returned an empty bean name for handler '{}' of plugin '{}'",
                class.name(),
                plugin_id
            )));
        }
        let Some(instance) = self.container.resolve(&handler) else {
            self.discard(&handler);
            return Err(AppError::instantiation(format!(
                "Handler '{handler}' could not be resolved after instantiation"
            )));
        };
        handle.push_handler(handler.clone(), instance.clone());

        let mut class_paths: Vec<String> = self
            .rewriter
            .rewrite(plugin_id, class.declared_paths())
            .into_iter()
            .collect();
        if class_paths.is_empty() {
            class_paths.push(String::new());
        }

        let routes = self.extractor.extract(class)?;
        for route in &routes {
            for class_path in &class_paths {
                let key = RouteKey::new(route.methods.clone(), &combine(class_path, &route.path));
                let entry = RouteEntry {
                    key: key.clone(),
                    plugin_id: plugin_id.clone(),
                    handler_class: class.name().to_string(),
                    selector: route.selector.clone(),
                    handler_id: handler.id,
                    handler: instance.clone(),
                    registered_at: Utc::now(),
                };
                self.table.add(entry)?;
                debug!(plugin_id = %plugin_id, route = %key, selector = %route.selector, "Route registered");
                handle.push_key(key);
            }
        }
        Ok(())
    }

    /// Release an instance that never made it into a plugin handle.
    fn discard(&self, handler: &HandlerHandle) {
        if let Err(e) = self.container.release(handler) {
            warn!(handler = %handler, error = %e, "Failed to release discarded handler");
        }
    }

    /// Remove every recorded key and release every recorded handler.
    fn reverse(&self, record: &PerPluginRecord) {
        let plugin_id = record.plugin_id();
        for key in record.keys() {
            match self.table.remove(key) {
                Some(_) => debug!(plugin_id = %plugin_id, route = %key, "Route unregistered"),
                None => warn!(plugin_id = %plugin_id, route = %key, "Recorded route missing from table"),
            }
        }
        for handler in record.handlers() {
            if let Err(e) = self.container.release(handler) {
                warn!(plugin_id = %plugin_id, handler = %handler, error = %e, "Failed to release handler");
            }
        }
    }
}

impl PluginProcessor for PluginRegistrationProcessor {
    fn key(&self) -> ProcessorKey {
        ROUTE_PROCESSOR_KEY
    }

    fn register(&self, batch: &[Arc<PluginDescriptor>]) -> AppResult<()> {
        for descriptor in batch {
            self.register_plugin(descriptor)?;
        }
        Ok(())
    }

    fn unregister(&self, batch: &[Arc<PluginDescriptor>]) {
        for descriptor in batch {
            let Some(record) = self.tracker.fetch(descriptor) else {
                debug!(plugin_id = %descriptor.id(), "No routes recorded for plugin");
                continue;
            };
            self.reverse(&record);
            info!(
                plugin_id = %descriptor.id(),
                routes = record.keys().len(),
                "Plugin routes unregistered"
            );
        }
    }

    fn holds(&self, descriptor: &PluginDescriptor) -> bool {
        self.tracker.is_tracked(descriptor)
    }
}
