//! Default route metadata extractor reading routes declared on the class.

use std::collections::HashSet;

use routehub_core::error::AppError;
use routehub_core::result::AppResult;
use routehub_core::traits::metadata::RouteMetadataExtractor;
use routehub_core::types::{HandlerClass, RouteMethod};

/// Returns the routes declared on a [`HandlerClass`] after validating them.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredRouteExtractor;

impl DeclaredRouteExtractor {
    /// Creates the extractor.
    pub fn new() -> Self {
        Self
    }
}

impl RouteMetadataExtractor for DeclaredRouteExtractor {
    fn extract(&self, class: &HandlerClass) -> AppResult<Vec<RouteMethod>> {
        let mut selectors = HashSet::new();

        for template in class.declared_paths() {
            check_template(class, template)?;
        }

        for route in class.declared_routes() {
            if route.selector.as_str().trim().is_empty() {
                return Err(AppError::metadata_extraction(format!(
                    "Handler '{}' declares a route with an empty selector",
                    class.name()
                )));
            }
            if !selectors.insert(route.selector.as_str()) {
                return Err(AppError::metadata_extraction(format!(
                    "Handler '{}' declares selector '{}' more than once",
                    class.name(),
                    route.selector
                )));
            }
            check_template(class, &route.path)?;
        }

        Ok(class.declared_routes().to_vec())
    }
}

fn check_template(class: &HandlerClass, template: &str) -> AppResult<()> {
    if template.chars().any(|c| c.is_whitespace() || c == '?' || c == '#') {
        return Err(AppError::metadata_extraction(format!(
            "Handler '{}' declares invalid path template '{}'",
            class.name(),
            template
        )));
    }
    Ok(())
}
