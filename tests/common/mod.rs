//! Shared utilities for loader integration tests.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use runtime_loader::stats::{Counter, Gauge, Scope};

/// Write `text` to `path`, creating parent directories.
pub fn make_file(path: impl AsRef<Path>, text: &str) {
    let path = path.as_ref();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

/// Populate `root/<name>/app` from `(relative path, contents)` pairs.
pub fn make_tree(root: &Path, name: &str, files: &[(&str, &str)]) -> PathBuf {
    let dir = root.join(name);
    for (relative, text) in files {
        make_file(dir.join("app").join(relative), text);
    }
    fs::create_dir_all(dir.join("app")).unwrap();
    dir
}

/// Point `root/current` at `target`, replacing any existing link atomically.
#[cfg(unix)]
pub fn retarget(root: &Path, target: &Path) {
    let staging = root.join("current_new");
    let _ = fs::remove_file(&staging);
    std::os::unix::fs::symlink(target, &staging).unwrap();
    fs::rename(&staging, root.join("current")).unwrap();
}

/// Stats scope that records the last value of every counter and gauge by
/// dotted name.
#[derive(Clone, Default)]
pub struct RecordingScope {
    prefix: String,
    values: Arc<Mutex<HashMap<String, u64>>>,
}

struct RecordedCounter {
    name: String,
    values: Arc<Mutex<HashMap<String, u64>>>,
}

struct RecordedGauge {
    name: String,
    values: Arc<Mutex<HashMap<String, u64>>>,
}

impl RecordingScope {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn value(&self, name: &str) -> u64 {
        self.values.lock().unwrap().get(name).copied().unwrap_or(0)
    }

    fn full_name(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.prefix, name)
        }
    }
}

impl Counter for RecordedCounter {
    fn inc(&self) {
        *self.values.lock().unwrap().entry(self.name.clone()).or_insert(0) += 1;
    }
}

impl Gauge for RecordedGauge {
    fn set(&self, value: u64) {
        self.values.lock().unwrap().insert(self.name.clone(), value);
    }
}

impl Scope for RecordingScope {
    fn scope(&self, name: &str) -> Box<dyn Scope> {
        Box::new(RecordingScope {
            prefix: self.full_name(name),
            values: Arc::clone(&self.values),
        })
    }

    fn counter(&self, name: &str) -> Box<dyn Counter> {
        Box::new(RecordedCounter {
            name: self.full_name(name),
            values: Arc::clone(&self.values),
        })
    }

    fn gauge(&self, name: &str) -> Box<dyn Gauge> {
        Box::new(RecordedGauge {
            name: self.full_name(name),
            values: Arc::clone(&self.values),
        })
    }
}

/// Install a test subscriber once per binary; later calls are no-ops.
pub fn init_logging() {
    runtime_loader::observability::try_init_logging("runtime_loader=debug");
}
