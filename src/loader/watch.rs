//! Symlink retarget detection.
//!
//! Watch primitives follow a path's inode, not the name, so a symlink that is
//! atomically replaced (new link created under a temp name and renamed over
//! the old one) cannot be watched directly. Instead the parent directory is
//! watched non-recursively and events are filtered down to "something was
//! created or moved in under the symlink's name".

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use notify::event::{ModifyKind, RenameMode};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::error::{Result, RuntimeError};

/// Watches the parent of a symlink and emits `()` on every retarget.
pub struct SymlinkWatcher {
    dir: PathBuf,
    link_name: OsString,
    retarget_tx: mpsc::UnboundedSender<()>,
}

impl SymlinkWatcher {
    /// Create a watcher for `watch_dir/link_name`.
    ///
    /// Returns the watcher and a receiver yielding one `()` per retarget.
    pub fn new(watch_dir: &Path, link_name: &OsStr) -> (Self, mpsc::UnboundedReceiver<()>) {
        let (retarget_tx, retarget_rx) = mpsc::unbounded_channel();

        (
            Self {
                dir: watch_dir.to_path_buf(),
                link_name: link_name.to_os_string(),
                retarget_tx,
            },
            retarget_rx,
        )
    }

    /// Subscribe to the parent directory.
    ///
    /// The returned handle must be kept alive for events to keep flowing.
    /// Errors reported by the backend after this point are logged and
    /// otherwise ignored.
    pub fn run(self) -> Result<RecommendedWatcher> {
        let tx = self.retarget_tx;
        let link_name = self.link_name;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if is_retarget_event(&event, &link_name) {
                        tracing::debug!(paths = ?event.paths, "runtime symlink swap detected");
                        let _ = tx.send(());
                    }
                }
                Err(e) => tracing::warn!(error = %e, "runtime watch error"),
            },
            Config::default(),
        )
        .map_err(|source| RuntimeError::Watch {
            path: self.dir.clone(),
            source,
        })?;

        watcher
            .watch(&self.dir, RecursiveMode::NonRecursive)
            .map_err(|source| RuntimeError::Watch {
                path: self.dir.clone(),
                source,
            })?;

        tracing::info!(path = %self.dir.display(), "runtime watcher started");
        Ok(watcher)
    }
}

/// True for a create or moved-into event naming `link_name`.
///
/// Rename notifications that carry both endpoints (`RenameMode::Both`) are
/// skipped: backends that emit them also emit a separate `RenameMode::To`,
/// and reacting to both would rebuild twice per swap.
pub fn is_retarget_event(event: &Event, link_name: &OsStr) -> bool {
    let moved_in = matches!(
        event.kind,
        EventKind::Create(_)
            | EventKind::Modify(ModifyKind::Name(RenameMode::To))
            | EventKind::Modify(ModifyKind::Name(RenameMode::Any))
    );

    moved_in
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(link_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, RemoveKind};

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn test_moved_into_matches() {
        let name = OsStr::new("current");
        let moved = event(EventKind::Modify(ModifyKind::Name(RenameMode::To)), "/srv/current");
        assert!(is_retarget_event(&moved, name));

        let any = event(EventKind::Modify(ModifyKind::Name(RenameMode::Any)), "/srv/current");
        assert!(is_retarget_event(&any, name));

        let created = event(EventKind::Create(CreateKind::Any), "/srv/current");
        assert!(is_retarget_event(&created, name));
    }

    #[test]
    fn test_other_names_ignored() {
        let name = OsStr::new("current");
        let temp = event(EventKind::Create(CreateKind::Any), "/srv/current_new");
        assert!(!is_retarget_event(&temp, name));

        let moved = event(EventKind::Modify(ModifyKind::Name(RenameMode::To)), "/srv/testdir2");
        assert!(!is_retarget_event(&moved, name));
    }

    #[test]
    fn test_other_kinds_ignored() {
        let name = OsStr::new("current");
        for kind in [
            EventKind::Modify(ModifyKind::Name(RenameMode::From)),
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)),
            EventKind::Modify(ModifyKind::Data(DataChange::Content)),
            EventKind::Remove(RemoveKind::Any),
            EventKind::Access(notify::event::AccessKind::Any),
        ] {
            assert!(!is_retarget_event(&event(kind, "/srv/current"), name), "{:?}", kind);
        }
    }

    #[tokio::test]
    async fn test_run_fails_for_missing_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let (watcher, _rx) = SymlinkWatcher::new(&dir.path().join("missing"), OsStr::new("current"));
        assert!(matches!(watcher.run(), Err(RuntimeError::Watch { .. })));
    }
}
