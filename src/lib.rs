//! # routehub
//!
//! Host wiring for the RouteHub plugin route registry: builds the route
//! table, handler container, route processor and plugin manager from
//! configuration, and ships a compiled-in demo plugin.

pub mod app;
pub mod demo;

pub use app::RouteHub;
