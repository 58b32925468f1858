//! # routehub-plugin
//!
//! Plugin route registry for RouteHub. Provides:
//!
//! - A concurrency-safe route table with lock-free snapshot reads
//! - Per-plugin path prefix rewriting
//! - The route registration processor with exact per-plugin reversal
//! - Plugin descriptors with per-processor extension slots
//! - Plugin registry and load/unload/reload lifecycle management

pub mod container;
pub mod descriptor;
pub mod extractor;
pub mod macros;
pub mod manager;
pub mod prelude;
pub mod processor;
pub mod registry;
pub mod routing;

pub use container::FactoryContainer;
pub use descriptor::{Extensions, PluginDescriptor, ProcessorKey};
pub use extractor::DeclaredRouteExtractor;
pub use manager::PluginManager;
pub use processor::{PluginProcessor, PluginRegistrationProcessor, ROUTE_PROCESSOR_KEY};
pub use registry::{PluginInfo, PluginRegistry};
pub use routing::{PathPrefixRewriter, RouteEntry, RouteKey, RouteSnapshot, RouteSummary, RouteTable};
