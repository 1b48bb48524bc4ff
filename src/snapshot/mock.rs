//! In-memory snapshot double for code that consumes runtime flags.

use std::collections::HashMap;

use crate::snapshot::{Entry, SnapshotView};

/// A [`SnapshotView`] whose feature flags are forced on or off per key.
///
/// Unlike a real [`Snapshot`](crate::snapshot::Snapshot), `feature_enabled`
/// ignores percentages entirely: keys marked with [`set_enabled`] are on,
/// everything else is off.
///
/// [`set_enabled`]: MockSnapshot::set_enabled
#[derive(Debug, Clone, Default)]
pub struct MockSnapshot {
    entries: HashMap<String, Entry>,
    enabled: HashMap<String, bool>,
}

impl MockSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_enabled(mut self, key: &str) -> Self {
        self.entries.insert(key.to_string(), Entry::new(key));
        self.enabled.insert(key.to_string(), true);
        self
    }

    pub fn set_disabled(mut self, key: &str) -> Self {
        self.entries.insert(key.to_string(), Entry::new(key));
        self.enabled.insert(key.to_string(), false);
        self
    }

    /// Store a raw value. It is kept as text only, so `get_integer` on this
    /// key returns the caller default even for numeric values, and the key's
    /// flag reads as disabled.
    pub fn set_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), Entry::text(value));
        self.enabled.insert(key.to_string(), false);
        self
    }
}

impl SnapshotView for MockSnapshot {
    fn get<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.entries
            .get(key)
            .map(Entry::raw_value)
            .unwrap_or(default)
    }

    fn get_integer(&self, key: &str, default: u64) -> u64 {
        self.entries
            .get(key)
            .and_then(Entry::integer_value)
            .unwrap_or(default)
    }

    fn keys(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    fn feature_enabled(&self, key: &str, _default_percent: u64) -> bool {
        self.enabled.get(key).copied().unwrap_or(false)
    }
}
