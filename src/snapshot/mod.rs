//! Immutable point-in-time views of runtime configuration.
//!
//! # Lifecycle
//! ```text
//! rebuild task: Snapshot::new() → set_entry(..)* → Arc<Snapshot>
//!     → published by the loader (read-only from here on)
//!     → readers: get / get_integer / keys / feature_enabled
//! ```
//!
//! `set_entry` takes `&mut self`, so once a snapshot is behind an `Arc` and
//! shared it can no longer change.

pub mod entry;
pub mod mock;
pub mod random;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub use entry::Entry;
pub use random::{FixedRandom, RandomSource, ThreadRandom};

/// Read side shared by [`Snapshot`] and test doubles such as
/// [`mock::MockSnapshot`].
pub trait SnapshotView {
    /// Raw value for `key`, or `default` if absent.
    fn get<'a>(&'a self, key: &str, default: &'a str) -> &'a str;

    /// Integer value for `key`, or `default` if absent or not an integer.
    fn get_integer(&self, key: &str, default: u64) -> u64;

    /// All keys in no particular order.
    fn keys(&self) -> Vec<&str>;

    /// Percentage-sampled feature decision. See [`Snapshot::feature_enabled`].
    fn feature_enabled(&self, key: &str, default_percent: u64) -> bool;
}

/// Mapping from dotted key to [`Entry`].
#[derive(Clone)]
pub struct Snapshot {
    entries: HashMap<String, Entry>,
    random: Arc<dyn RandomSource>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::with_random_source(Arc::new(ThreadRandom))
    }

    /// Empty snapshot whose feature flags draw from `random`.
    pub fn with_random_source(random: Arc<dyn RandomSource>) -> Self {
        Self {
            entries: HashMap::new(),
            random,
        }
    }

    /// Insert or replace the entry for `key`. Last write wins.
    pub fn set_entry(&mut self, key: impl Into<String>, entry: Entry) {
        self.entries.insert(key.into(), entry);
    }

    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn get<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.entries
            .get(key)
            .map(Entry::raw_value)
            .unwrap_or(default)
    }

    pub fn get_integer(&self, key: &str, default: u64) -> u64 {
        self.entries
            .get(key)
            .and_then(Entry::integer_value)
            .unwrap_or(default)
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Sample whether a feature is on for this call.
    ///
    /// The percentage is `get_integer(key, default_percent)` clamped to 100.
    /// Every call draws a fresh number in `[0, 100)` and returns whether it
    /// falls below the percentage, so repeated calls with the same key can
    /// disagree: this samples a fraction of events and consumes entropy on
    /// each call. `0` is always off and `100` always on, which lets callers
    /// hard-code kill switches and full rollouts with no entry present.
    pub fn feature_enabled(&self, key: &str, default_percent: u64) -> bool {
        let percent = self.get_integer(key, default_percent).min(100);
        self.random.next_percent() < percent
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl SnapshotView for Snapshot {
    fn get<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        Snapshot::get(self, key, default)
    }

    fn get_integer(&self, key: &str, default: u64) -> u64 {
        Snapshot::get_integer(self, key, default)
    }

    fn keys(&self) -> Vec<&str> {
        Snapshot::keys(self)
    }

    fn feature_enabled(&self, key: &str, default_percent: u64) -> bool {
        Snapshot::feature_enabled(self, key, default_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Snapshot {
        let mut snapshot = Snapshot::new();
        snapshot.set_entry("file1", Entry::new("hello"));
        snapshot.set_entry("dir2.file3", Entry::new("\n 34  "));
        snapshot.set_entry("flags.half", Entry::new("50"));
        snapshot
    }

    #[test]
    fn test_absent_keys_use_defaults() {
        let snapshot = sample();
        assert_eq!(snapshot.get("foo", ""), "");
        assert_eq!(snapshot.get("foo", "fallback"), "fallback");
        assert_eq!(snapshot.get_integer("foo", 5), 5);
        assert!(snapshot.entry("foo").is_none());
    }

    #[test]
    fn test_present_keys() {
        let snapshot = sample();
        assert_eq!(snapshot.get("file1", ""), "hello");
        assert_eq!(snapshot.get_integer("file1", 6), 6);
        assert_eq!(snapshot.get_integer("dir2.file3", 100), 34);
        assert_eq!(snapshot.get("dir2.file3", ""), "\n 34  ");
    }

    #[test]
    fn test_keys_unordered() {
        let snapshot = sample();
        let mut keys = snapshot.keys();
        keys.sort_unstable();
        assert_eq!(keys, vec!["dir2.file3", "file1", "flags.half"]);
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn test_set_entry_last_write_wins() {
        let mut snapshot = Snapshot::new();
        snapshot.set_entry("a.b", Entry::new("first"));
        snapshot.set_entry("a.b", Entry::new("second"));
        assert_eq!(snapshot.get("a.b", ""), "second");
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_feature_boundaries_without_entry() {
        let snapshot = Snapshot::new();
        for _ in 0..200 {
            assert!(snapshot.feature_enabled("missing", 100));
            assert!(!snapshot.feature_enabled("missing", 0));
        }
    }

    #[test]
    fn test_feature_entry_overrides_default() {
        let mut snapshot = Snapshot::new();
        snapshot.set_entry("on", Entry::new("100"));
        snapshot.set_entry("off", Entry::new("0"));
        snapshot.set_entry("junk", Entry::new("maybe"));
        for _ in 0..200 {
            assert!(snapshot.feature_enabled("on", 0));
            assert!(!snapshot.feature_enabled("off", 100));
            // Non-integer entries fall back to the default percentage.
            assert!(snapshot.feature_enabled("junk", 100));
        }
    }

    #[test]
    fn test_feature_percent_is_clamped() {
        let mut snapshot = Snapshot::with_random_source(Arc::new(FixedRandom(99)));
        snapshot.set_entry("huge", Entry::new("5000"));
        assert!(snapshot.feature_enabled("huge", 0));
        assert!(snapshot.feature_enabled("missing", 250));
    }

    #[test]
    fn test_feature_threshold_with_fixed_draw() {
        let mut snapshot = Snapshot::with_random_source(Arc::new(FixedRandom(49)));
        snapshot.set_entry("flags.half", Entry::new("50"));
        snapshot.set_entry("flags.low", Entry::new("49"));
        assert!(snapshot.feature_enabled("flags.half", 0));
        assert!(!snapshot.feature_enabled("flags.low", 100));
    }

    #[test]
    fn test_feature_samples_roughly_by_percent() {
        let snapshot = sample();
        let hits = (0..10_000)
            .filter(|_| snapshot.feature_enabled("flags.half", 0))
            .count();
        assert!((3_500..6_500).contains(&hits), "hits = {}", hits);
    }

    #[test]
    fn test_view_trait_dispatch() {
        let snapshot = sample();
        let view: &dyn SnapshotView = &snapshot;
        assert_eq!(view.get("file1", "x"), "hello");
        assert_eq!(view.get_integer("dir2.file3", 0), 34);
        assert_eq!(view.keys().len(), 3);
    }
}
