//! Route metadata extraction trait.

use std::fmt;

use crate::result::AppResult;
use crate::types::{HandlerClass, RouteMethod};

/// Reads the route-bearing methods of a handler class.
pub trait RouteMetadataExtractor: Send + Sync + fmt::Debug {
    /// Return every `(selector, methods, path)` triple declared on `class`.
    ///
    /// Fails with a `MetadataExtraction` error on malformed metadata.
    fn extract(&self, class: &HandlerClass) -> AppResult<Vec<RouteMethod>>;
}
