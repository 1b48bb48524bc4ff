//! Runtime loaders.
//!
//! # Data Flow
//! ```text
//! new_loader(config)
//!     ├─ unconfigured → NullLoader (empty forever)
//!     └─ configured   → Loader
//!           watch.rs: rename/create of the symlink in its parent dir
//!             → walker.rs: walk symlink/subdirectory into a private Snapshot
//!             → atomic swap of the current Arc<Snapshot>
//!             → one () to every update sink, in registration order
//! ```

pub mod filesystem;
pub mod null;
pub mod walker;
pub mod watch;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use crate::config::RuntimeConfig;
use crate::error::Result;
use crate::snapshot::Snapshot;
use crate::stats::Scope;

pub use filesystem::Loader;
pub use null::NullLoader;
pub use walker::{DirectoryWalker, EntryError, WalkReport};

/// Channel woken with `()` after every successful rebuild.
///
/// Delivery awaits capacity: a bounded channel that is not drained stalls
/// notification for every sink registered after it, and the next rebuild.
pub type UpdateSink = mpsc::Sender<()>;

/// Source of runtime snapshots.
pub trait RuntimeLoader: Send + Sync {
    /// The current snapshot.
    ///
    /// The returned `Arc` stays valid forever but goes stale after the next
    /// rebuild; fetch a fresh one for each unit of work instead of storing it.
    fn snapshot(&self) -> Arc<Snapshot>;

    /// Register a sink to be signalled after each rebuild. There is no way to
    /// unregister.
    fn add_update_sink(&self, sink: UpdateSink);
}

/// Build the loader for `config`: a watching [`Loader`] when a watch path and
/// subdirectory are set, otherwise a [`NullLoader`].
pub fn new_loader(config: &RuntimeConfig, scope: &dyn Scope) -> Result<Box<dyn RuntimeLoader>> {
    if !config.is_configured() {
        warn!("no runtime configuration, using null loader");
        return Ok(Box::new(NullLoader::new()));
    }
    Ok(Box::new(Loader::new(config, scope)?))
}
