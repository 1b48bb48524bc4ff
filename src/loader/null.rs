//! Loader used when no runtime path is configured.

use std::sync::{Arc, Mutex, PoisonError};

use crate::loader::{RuntimeLoader, UpdateSink};
use crate::snapshot::Snapshot;

/// Always serves the same empty snapshot and never signals its sinks.
///
/// Sinks are held rather than dropped so their receivers stay open and
/// simply never fire, exactly like a source that never changes.
#[derive(Debug, Default)]
pub struct NullLoader {
    snapshot: Arc<Snapshot>,
    sinks: Mutex<Vec<UpdateSink>>,
}

impl NullLoader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RuntimeLoader for NullLoader {
    fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    fn add_update_sink(&self, sink: UpdateSink) {
        self.sinks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sink);
    }
}
