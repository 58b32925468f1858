//! Core type definitions used across the RouteHub workspace.

pub mod handler;
pub mod id;
pub mod method;

pub use handler::{
    HandlerClass, HandlerClassBuilder, HandlerFactory, HandlerRef, MethodSelector, RouteMethod,
};
pub use id::{HandlerId, PluginId};
pub use method::{HttpMethod, MethodSet};
