//! Route table: the shared dispatch map consulted by the request dispatcher.
//!
//! The table is a copy-on-write snapshot held in an [`ArcSwap`]:
//!
//! - Readers load the current snapshot without taking any lock and keep a
//!   consistent view for as long as they hold it.
//! - Writers serialize on a short mutex, clone the current map, apply one
//!   mutation and publish the result with a single atomic store. A reader
//!   sees either the snapshot before a write or the one after it.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use tracing::debug;

use routehub_core::error::AppError;
use routehub_core::result::AppResult;
use routehub_core::types::{HttpMethod, PluginId};

use super::key::{RouteEntry, RouteKey, RouteSummary};
use super::path::normalize;

/// An immutable published state of the route table.
#[derive(Debug, Default)]
pub struct RouteSnapshot {
    /// Write counter at publication time.
    revision: u64,
    /// Route key → entry.
    entries: HashMap<RouteKey, Arc<RouteEntry>>,
}

impl RouteSnapshot {
    /// Write counter this snapshot was published with.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the snapshot holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact lookup by key.
    pub fn get(&self, key: &RouteKey) -> Option<&Arc<RouteEntry>> {
        self.entries.get(key)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &RouteKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Find the entry answering `method` on the exact template `path`.
    ///
    /// An entry naming the method explicitly wins over an accept-any entry
    /// on the same path. Among explicit entries the narrowest method set
    /// wins, ties broken by method order.
    pub fn find(&self, method: HttpMethod, path: &str) -> Option<&Arc<RouteEntry>> {
        let path = normalize(path);
        self.entries
            .iter()
            .filter(|(key, _)| key.path() == path && key.methods().accepts(method))
            .min_by(|(a, _), (b, _)| {
                let (a, b) = (a.methods(), b.methods());
                a.is_any()
                    .cmp(&b.is_any())
                    .then_with(|| a.iter().count().cmp(&b.iter().count()))
                    .then_with(|| a.cmp(b))
            })
            .map(|(_, entry)| entry)
    }

    /// Iterate over all entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&RouteKey, &Arc<RouteEntry>)> {
        self.entries.iter()
    }
}

/// Concurrency-safe dispatch map: route key → handler entry.
#[derive(Debug)]
pub struct RouteTable {
    /// Currently published snapshot.
    current: ArcSwap<RouteSnapshot>,
    /// Serializes writers.
    write_lock: Mutex<()>,
}

impl RouteTable {
    /// Creates an empty route table.
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(RouteSnapshot::default()),
            write_lock: Mutex::new(()),
        }
    }

    /// Insert `entry` under its key.
    ///
    /// Fails with a `Conflict` error, leaving the table untouched, if the
    /// key is already present.
    pub fn add(&self, entry: RouteEntry) -> AppResult<Arc<RouteEntry>> {
        let _guard = self.write_lock.lock();
        let current = self.current.load_full();

        if let Some(existing) = current.entries.get(&entry.key) {
            return Err(AppError::conflict(format!(
                "Route '{}' is already registered by plugin '{}' ({}::{})",
                entry.key, existing.plugin_id, existing.handler_class, existing.selector
            )));
        }

        let entry = Arc::new(entry);
        let mut entries = current.entries.clone();
        entries.insert(entry.key.clone(), entry.clone());
        self.publish(current.revision, entries);

        debug!(route = %entry.key, plugin_id = %entry.plugin_id, "Route added");
        Ok(entry)
    }

    /// Remove the entry under `key`, returning it. Absent keys are a no-op.
    pub fn remove(&self, key: &RouteKey) -> Option<Arc<RouteEntry>> {
        let _guard = self.write_lock.lock();
        let current = self.current.load_full();

        if !current.entries.contains_key(key) {
            return None;
        }

        let mut entries = current.entries.clone();
        let removed = entries.remove(key);
        self.publish(current.revision, entries);

        debug!(route = %key, "Route removed");
        removed
    }

    /// Exact lookup by key against the current snapshot.
    pub fn lookup(&self, key: &RouteKey) -> Option<Arc<RouteEntry>> {
        self.current.load().get(key).cloned()
    }

    /// Find the entry answering `method` on `path` in the current snapshot.
    pub fn find(&self, method: HttpMethod, path: &str) -> Option<Arc<RouteEntry>> {
        self.current.load().find(method, path).cloned()
    }

    /// The current snapshot. Holding it pins a consistent view.
    pub fn snapshot(&self) -> Arc<RouteSnapshot> {
        self.current.load_full()
    }

    /// Number of entries in the current snapshot.
    pub fn len(&self) -> usize {
        self.current.load().len()
    }

    /// Returns `true` when the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.current.load().is_empty()
    }

    /// Number of successful writes so far.
    pub fn revision(&self) -> u64 {
        self.current.load().revision
    }

    /// All entries contributed by `plugin_id`.
    pub fn entries_for_plugin(&self, plugin_id: &PluginId) -> Vec<Arc<RouteEntry>> {
        self.current
            .load()
            .entries
            .values()
            .filter(|entry| &entry.plugin_id == plugin_id)
            .cloned()
            .collect()
    }

    /// Route listing sorted by path, then methods.
    pub fn summaries(&self) -> Vec<RouteSummary> {
        let snapshot = self.current.load();
        let mut keys: Vec<&RouteKey> = snapshot.entries.keys().collect();
        keys.sort_by(|a, b| a.path().cmp(b.path()).then_with(|| a.methods().cmp(b.methods())));
        keys.into_iter()
            .filter_map(|key| snapshot.entries.get(key))
            .map(|entry| entry.summary())
            .collect()
    }

    fn publish(&self, previous_revision: u64, entries: HashMap<RouteKey, Arc<RouteEntry>>) {
        self.current.store(Arc::new(RouteSnapshot {
            revision: previous_revision + 1,
            entries,
        }));
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use routehub_core::error::ErrorKind;
    use routehub_core::types::{HandlerId, HandlerRef, MethodSelector, MethodSet};

    fn entry(plugin: &str, methods: MethodSet, path: &str) -> RouteEntry {
        RouteEntry {
            key: RouteKey::new(methods, path),
            plugin_id: PluginId::new(plugin),
            handler_class: "TestController".to_string(),
            selector: MethodSelector::new("handle"),
            handler_id: HandlerId::new(),
            handler: Arc::new(()) as HandlerRef,
            registered_at: Utc::now(),
        }
    }

    fn get() -> MethodSet {
        MethodSet::single(HttpMethod::Get)
    }

    #[test]
    fn test_add_and_lookup() {
        let table = RouteTable::new();
        table.add(entry("p1", get(), "/a")).unwrap();

        let key = RouteKey::new(MethodSet::single(HttpMethod::Get), "/a");
        let found = table.lookup(&key).expect("entry present");
        assert_eq!(found.plugin_id.as_str(), "p1");
        assert_eq!(table.len(), 1);
        assert_eq!(table.revision(), 1);
    }

    #[test]
    fn test_duplicate_key_conflicts_and_keeps_original() {
        let table = RouteTable::new();
        table.add(entry("p1", get(), "/a")).unwrap();

        let err = table.add(entry("p2", get(), "/a")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let key = RouteKey::new(MethodSet::single(HttpMethod::Get), "/a");
        assert_eq!(table.lookup(&key).unwrap().plugin_id.as_str(), "p1");
        assert_eq!(table.len(), 1);
        assert_eq!(table.revision(), 1);
    }

    #[test]
    fn test_same_path_different_methods_coexist() {
        let table = RouteTable::new();
        table.add(entry("p1", get(), "/a")).unwrap();
        table
            .add(entry("p1", MethodSet::single(HttpMethod::Post), "/a"))
            .unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let table = RouteTable::new();
        let key = RouteKey::new(MethodSet::any(), "/missing");
        assert!(table.remove(&key).is_none());
        assert_eq!(table.revision(), 0);
    }

    #[test]
    fn test_add_then_remove_restores_previous_contents() {
        let table = RouteTable::new();
        table.add(entry("p1", get(), "/a")).unwrap();
        table.add(entry("p2", get(), "/b")).unwrap();

        let keys_before: Vec<RouteKey> = {
            let mut keys: Vec<_> = table.snapshot().iter().map(|(k, _)| k.clone()).collect();
            keys.sort();
            keys
        };

        let added = table.add(entry("p3", get(), "/c")).unwrap();
        let removed = table.remove(&added.key).expect("removed");
        assert!(Arc::ptr_eq(&added, &removed));

        let mut keys_after: Vec<_> = table.snapshot().iter().map(|(k, _)| k.clone()).collect();
        keys_after.sort();
        assert_eq!(keys_before, keys_after);
    }

    #[test]
    fn test_snapshot_is_stable_across_writes() {
        let table = RouteTable::new();
        table.add(entry("p1", get(), "/a")).unwrap();

        let pinned = table.snapshot();
        table.add(entry("p1", get(), "/b")).unwrap();

        assert_eq!(pinned.len(), 1);
        assert_eq!(pinned.revision(), 1);
        assert_eq!(table.snapshot().len(), 2);
    }

    #[test]
    fn test_find_prefers_explicit_method() {
        let table = RouteTable::new();
        table.add(entry("p1", MethodSet::any(), "/a")).unwrap();
        table.add(entry("p1", get(), "/a")).unwrap();

        let hit = table.find(HttpMethod::Get, "a").unwrap();
        assert!(!hit.key.methods().is_any());

        let fallback = table.find(HttpMethod::Delete, "/a").unwrap();
        assert!(fallback.key.methods().is_any());

        assert!(table.find(HttpMethod::Get, "/b").is_none());
    }

    #[test]
    fn test_find_prefers_narrowest_method_set() {
        let table = RouteTable::new();
        let get_post: MethodSet = [HttpMethod::Get, HttpMethod::Post].into_iter().collect();
        let get_put: MethodSet = [HttpMethod::Get, HttpMethod::Put].into_iter().collect();
        table.add(entry("p1", get_post.clone(), "/a")).unwrap();
        table.add(entry("p1", get(), "/a")).unwrap();
        table.add(entry("p1", get_put, "/a")).unwrap();

        for _ in 0..10 {
            let hit = table.find(HttpMethod::Get, "/a").unwrap();
            assert_eq!(hit.key.methods(), &get());
        }
        let post = table.find(HttpMethod::Post, "/a").unwrap();
        assert_eq!(post.key.methods(), &get_post);
    }

    #[test]
    fn test_find_breaks_equal_width_ties_by_method_order() {
        let table = RouteTable::new();
        let get_put: MethodSet = [HttpMethod::Get, HttpMethod::Put].into_iter().collect();
        let get_post: MethodSet = [HttpMethod::Get, HttpMethod::Post].into_iter().collect();
        table.add(entry("p1", get_put, "/a")).unwrap();
        table.add(entry("p1", get_post.clone(), "/a")).unwrap();

        let hit = table.find(HttpMethod::Get, "/a").unwrap();
        assert_eq!(hit.key.methods(), &get_post);
    }

    #[test]
    fn test_entries_for_plugin_and_summaries() {
        let table = RouteTable::new();
        table.add(entry("p1", get(), "/b")).unwrap();
        table.add(entry("p2", get(), "/a")).unwrap();
        table.add(entry("p1", get(), "/c")).unwrap();

        assert_eq!(table.entries_for_plugin(&PluginId::new("p1")).len(), 2);

        let paths: Vec<String> = table.summaries().into_iter().map(|s| s.path).collect();
        assert_eq!(paths, ["/a", "/b", "/c"]);
    }
}
