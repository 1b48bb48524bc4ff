//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Root configuration for a runtime loader.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Symlink whose atomic retarget triggers a rebuild (e.g. "/srv/runtime/current").
    pub watch_path: Option<PathBuf>,

    /// Directory beneath the symlink target that holds the key files.
    pub subdirectory: Option<String>,

    /// Stats scope the loader's counters and gauges are created under.
    pub stats_scope: String,

    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            watch_path: None,
            subdirectory: None,
            stats_scope: "runtime".to_string(),
            log_level: "runtime_loader=info".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Config for a symlink and subdirectory, other fields defaulted.
    pub fn new(watch_path: impl Into<PathBuf>, subdirectory: impl Into<String>) -> Self {
        Self {
            watch_path: Some(watch_path.into()),
            subdirectory: Some(subdirectory.into()),
            ..Self::default()
        }
    }

    /// Both the watch path and the subdirectory are present and non-empty.
    pub fn is_configured(&self) -> bool {
        let has_path = self
            .watch_path
            .as_deref()
            .is_some_and(|p| !p.as_os_str().is_empty());
        let has_subdir = self.subdirectory.as_deref().is_some_and(|s| !s.is_empty());
        has_path && has_subdir
    }

    /// Directory walked on every rebuild: `watch_path/subdirectory`.
    ///
    /// `None` when unconfigured or when the subdirectory is absolute or
    /// contains `..`, since joining it would leave the symlink target.
    pub fn target_dir(&self) -> Option<PathBuf> {
        if !self.is_configured() {
            return None;
        }
        let stays_inside = self.subdirectory.as_deref().is_some_and(|s| {
            Path::new(s)
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        });
        if !stays_inside {
            return None;
        }
        let path = self.watch_path.as_deref()?;
        let subdir = self.subdirectory.as_deref()?;
        Some(path.join(subdir))
    }

    /// Directory actually watched. Watch primitives cannot follow a retargeted
    /// symlink, so the parent is watched and events are filtered by name.
    pub fn watch_dir(&self) -> Option<PathBuf> {
        let path = self.watch_path.as_deref()?;
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => Some(parent.to_path_buf()),
            _ => Some(Path::new(".").to_path_buf()),
        }
    }
}
