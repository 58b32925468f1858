//! Category processors run by the plugin manager on every load cycle.

pub mod route;
pub mod tracker;

use std::fmt;
use std::sync::Arc;

use routehub_core::result::AppResult;

use crate::descriptor::{PluginDescriptor, ProcessorKey};

pub use route::{PluginRegistrationProcessor, ROUTE_PROCESSOR_KEY};
pub use tracker::{PerPluginRecord, PluginHandle, UnregistrationTracker};

/// A processor that attaches one category of plugin contributions to the
/// host and detaches them again.
pub trait PluginProcessor: Send + Sync + fmt::Debug {
    /// Identity used to scope this processor's extension slot.
    fn key(&self) -> ProcessorKey;

    /// Attach the contributions of every plugin in `batch`.
    fn register(&self, batch: &[Arc<PluginDescriptor>]) -> AppResult<()>;

    /// Detach what `register` attached. Never fails; problems are logged.
    fn unregister(&self, batch: &[Arc<PluginDescriptor>]);

    /// Returns `true` while `descriptor` still has contributions attached
    /// by this processor.
    fn holds(&self, descriptor: &PluginDescriptor) -> bool;
}
