//! Routing: path handling, route keys and the shared route table.

pub mod key;
pub mod path;
pub mod rewriter;
pub mod table;

pub use key::{RouteEntry, RouteKey, RouteSummary};
pub use rewriter::PathPrefixRewriter;
pub use table::{RouteSnapshot, RouteTable};
