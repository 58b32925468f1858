//! Integration tests for concurrent dispatch reads during plugin churn.

mod helpers;

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use routehub_core::types::PluginId;

use helpers::{api_hub, get, users_plugin};

const CYCLES: usize = 200;
const READERS: usize = 4;

#[test]
fn test_readers_never_see_half_applied_writes() {
    let hub = api_hub();
    hub.manager().load_plugin(users_plugin("stable")).unwrap();
    let stable = get("/api/stable/users");
    let done = AtomicBool::new(false);

    thread::scope(|s| {
        for _ in 0..READERS {
            s.spawn(|| {
                let mut last_revision = 0;
                let mut observed = 0usize;
                while !done.load(Ordering::Acquire) || observed == 0 {
                    let snapshot = hub.table().snapshot();

                    assert!(snapshot.revision() >= last_revision, "revision went backwards");
                    last_revision = snapshot.revision();

                    assert!(snapshot.contains_key(&stable), "untouched plugin lost a route");
                    let mut count = 0;
                    for (key, entry) in snapshot.iter() {
                        assert_eq!(key, &entry.key);
                        assert!(snapshot.get(key).is_some());
                        count += 1;
                    }
                    assert_eq!(count, snapshot.len());
                    observed += 1;
                }
            });
        }

        s.spawn(|| {
            let churn = PluginId::new("churn");
            for _ in 0..CYCLES {
                hub.manager().load_plugin(users_plugin("churn")).unwrap();
                hub.manager().unload_plugin(&churn).unwrap();
            }
            done.store(true, Ordering::Release);
        });
    });

    assert_eq!(hub.table().len(), 2);
    assert!(hub.table().lookup(&get("/api/churn/users")).is_none());
    assert_eq!(hub.table().revision(), 2 + (CYCLES as u64) * 4);
}

#[test]
fn test_pinned_snapshot_is_unaffected_by_later_writes() {
    let hub = api_hub();
    hub.manager().load_plugin(users_plugin("p1")).unwrap();
    let pinned = hub.table().snapshot();

    thread::scope(|s| {
        for i in 0..8 {
            let hub = &hub;
            s.spawn(move || {
                hub.manager()
                    .load_plugin(users_plugin(&format!("w{i}")))
                    .unwrap();
            });
        }
    });

    assert_eq!(pinned.len(), 2);
    assert_eq!(hub.table().len(), 18);
    assert_eq!(hub.manager().list_plugins().len(), 9);
}
