//! Decision counters.
//!
//! - Lock-free increments after the first registration of a key.
//! - Stable CSV snapshot: header + one row, keys sorted lexicographically.
//! - Only collaborator layers (routing, CLI) record; the gate itself stays pure.

use std::collections::BTreeMap;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, RwLock,
};

use once_cell::sync::Lazy;

pub static METRICS: Lazy<Metrics> = Lazy::new(Metrics::new);

/// Counter keys recorded by this workspace.
pub const VIEW_ALLOWED: &str = "view_allowed";
pub const VIEW_BYPASSED: &str = "view_bypassed";
pub const VIEW_DENIED: &str = "view_denied";
pub const VIEW_REDIRECTED: &str = "view_redirected";
pub const VIEW_HIDDEN: &str = "view_hidden";
pub const ITEMS_FILTERED: &str = "items_filtered";

pub const ALL_KEYS: &[&str] = &[
    VIEW_ALLOWED,
    VIEW_BYPASSED,
    VIEW_DENIED,
    VIEW_REDIRECTED,
    VIEW_HIDDEN,
    ITEMS_FILTERED,
];

#[derive(Default)]
pub struct Metrics {
    counters: RwLock<BTreeMap<&'static str, Arc<AtomicU64>>>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment a counter by `by` (created if missing).
    pub fn inc(&self, key: &'static str, by: u64) {
        // Read guard must be dropped before the write path.
        let existing = {
            let r = self.counters.read().unwrap_or_else(|e| e.into_inner());
            r.get(key).cloned()
        };
        let cell = match existing {
            Some(c) => c,
            None => {
                let mut w = self.counters.write().unwrap_or_else(|e| e.into_inner());
                w.entry(key).or_insert_with(|| Arc::new(AtomicU64::new(0))).clone()
            }
        };
        cell.fetch_add(by, Ordering::Relaxed);
    }

    pub fn get(&self, key: &str) -> u64 {
        let r = self.counters.read().unwrap_or_else(|e| e.into_inner());
        r.get(key).map_or(0, |c| c.load(Ordering::Relaxed))
    }

    /// Register every known key at zero so snapshots have a fixed schema.
    pub fn register_all(&self) {
        for k in ALL_KEYS {
            self.inc(k, 0);
        }
    }

    /// Zero all counters; keys stay registered.
    pub fn reset(&self) {
        let r = self.counters.read().unwrap_or_else(|e| e.into_inner());
        for c in r.values() {
            c.store(0, Ordering::Relaxed);
        }
    }

    /// `header\nrow`, columns sorted by key.
    pub fn snapshot_csv(&self) -> String {
        let r = self.counters.read().unwrap_or_else(|e| e.into_inner());
        let header: Vec<&str> = r.keys().copied().collect();
        let row: Vec<String> = r.values().map(|c| c.load(Ordering::Relaxed).to_string()).collect();
        format!("{}\n{}", header.join(","), row.join(","))
    }
}
