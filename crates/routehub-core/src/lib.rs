//! # routehub-core
//!
//! Core crate for RouteHub. Contains the collaborator traits, configuration
//! schemas, identifiers, handler-class metadata and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other RouteHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
