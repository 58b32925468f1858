//! Prelude for convenient imports.

pub use routehub_core::config::routing::{RegistrationPolicy, RoutingConfig};
pub use routehub_core::traits::container::{HandlerContainer, HandlerHandle};
pub use routehub_core::traits::metadata::RouteMetadataExtractor;
pub use routehub_core::types::{
    HandlerClass, HandlerRef, HttpMethod, MethodSelector, MethodSet, PluginId, RouteMethod,
};
pub use routehub_core::{AppError, AppResult, ErrorKind};

pub use crate::descriptor::{PluginDescriptor, ProcessorKey};
pub use crate::processor::PluginProcessor;
pub use crate::routing::{RouteEntry, RouteKey, RouteTable};

pub use crate::handler_class;
