//! Core traits defined in `routehub-core` and implemented by other crates.

pub mod container;
pub mod metadata;

pub use container::{HandlerContainer, HandlerHandle};
pub use metadata::RouteMetadataExtractor;
