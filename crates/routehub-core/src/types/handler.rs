//! Handler classes and the route metadata declared on them.
//!
//! A [`HandlerClass`] is the unit a plugin contributes to the route
//! registry: a class-level set of path templates, the route-bearing methods
//! it exposes, and a factory the handler container uses to build instances.
//! The declared metadata is immutable once the class is built; prefixing
//! produces new path sets and never touches these values.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::method::{HttpMethod, MethodSet};

/// Opaque reference to an instantiated handler.
pub type HandlerRef = Arc<dyn Any + Send + Sync>;

/// Factory used by handler containers to build a handler instance.
pub type HandlerFactory = Arc<dyn Fn() -> Result<HandlerRef, String> + Send + Sync>;

/// Names the function on a handler that answers a route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodSelector(String);

impl MethodSelector {
    /// Create a selector from a handler function name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the selector as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MethodSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One route-bearing method declared on a handler class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMethod {
    /// Handler function answering the route.
    pub selector: MethodSelector,
    /// Accepted request methods (empty accepts any).
    pub methods: MethodSet,
    /// Method-level path template, relative to the class templates.
    pub path: String,
}

impl RouteMethod {
    /// Declare a route accepting the given methods.
    pub fn new(selector: impl Into<String>, methods: MethodSet, path: impl Into<String>) -> Self {
        Self {
            selector: MethodSelector::new(selector),
            methods,
            path: path.into(),
        }
    }

    /// Declare a `GET` route.
    pub fn get(selector: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(selector, MethodSet::single(HttpMethod::Get), path)
    }

    /// Declare a `POST` route.
    pub fn post(selector: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(selector, MethodSet::single(HttpMethod::Post), path)
    }

    /// Declare a `PUT` route.
    pub fn put(selector: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(selector, MethodSet::single(HttpMethod::Put), path)
    }

    /// Declare a `DELETE` route.
    pub fn delete(selector: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(selector, MethodSet::single(HttpMethod::Delete), path)
    }

    /// Declare a route accepting any method.
    pub fn any(selector: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(selector, MethodSet::any(), path)
    }
}

/// A plugin-supplied type exposing one or more route-bearing methods.
#[derive(Clone)]
pub struct HandlerClass {
    name: String,
    paths: Vec<String>,
    routes: Vec<RouteMethod>,
    factory: HandlerFactory,
}

impl HandlerClass {
    /// Start building a handler class with the given type name.
    pub fn builder(name: impl Into<String>) -> HandlerClassBuilder {
        HandlerClassBuilder {
            name: name.into(),
            paths: Vec::new(),
            routes: Vec::new(),
            factory: None,
        }
    }

    /// Type name of the handler class.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class-level path templates as declared (possibly empty).
    pub fn declared_paths(&self) -> &[String] {
        &self.paths
    }

    /// Route-bearing methods as declared.
    pub fn declared_routes(&self) -> &[RouteMethod] {
        &self.routes
    }

    /// Build a fresh handler instance.
    pub fn create_instance(&self) -> Result<HandlerRef, String> {
        (self.factory)()
    }
}

impl fmt::Debug for HandlerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerClass")
            .field("name", &self.name)
            .field("paths", &self.paths)
            .field("routes", &self.routes)
            .field("factory", &"<factory>")
            .finish()
    }
}

/// Builder for [`HandlerClass`].
pub struct HandlerClassBuilder {
    name: String,
    paths: Vec<String>,
    routes: Vec<RouteMethod>,
    factory: Option<HandlerFactory>,
}

impl HandlerClassBuilder {
    /// Add a class-level path template.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Add a route-bearing method.
    pub fn route(mut self, route: RouteMethod) -> Self {
        self.routes.push(route);
        self
    }

    /// Set the instance factory.
    pub fn factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Result<HandlerRef, String> + Send + Sync + 'static,
    {
        self.factory = Some(Arc::new(factory));
        self
    }

    /// Use a factory that clones `instance` into a fresh `Arc` on every call.
    pub fn instance<T>(self, instance: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.factory(move || Ok(Arc::new(instance.clone()) as HandlerRef))
    }

    /// Build the class. Without a factory, instantiation always fails.
    pub fn build(self) -> HandlerClass {
        let name = self.name.clone();
        let factory = self.factory.unwrap_or_else(|| {
            Arc::new(move || Err(format!("handler class '{name}' has no factory")))
        });
        HandlerClass {
            name: self.name,
            paths: self.paths,
            routes: self.routes,
            factory,
        }
    }
}
