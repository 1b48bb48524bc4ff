//! Loader backed by a watched symlink.

use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use tokio::runtime::Handle;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use crate::config::{validate_config, RuntimeConfig};
use crate::error::{Result, RuntimeError};
use crate::lifecycle::Shutdown;
use crate::loader::walker::DirectoryWalker;
use crate::loader::watch::SymlinkWatcher;
use crate::loader::{RuntimeLoader, UpdateSink};
use crate::snapshot::{RandomSource, Snapshot, ThreadRandom};
use crate::stats::{Counter, Gauge, Scope};

struct LoaderStats {
    load_attempts: Box<dyn Counter>,
    load_failures: Box<dyn Counter>,
    num_values: Box<dyn Gauge>,
}

impl LoaderStats {
    fn new(scope: &dyn Scope) -> Self {
        Self {
            load_attempts: scope.counter("load_attempts"),
            load_failures: scope.counter("load_failures"),
            num_values: scope.gauge("num_values"),
        }
    }
}

/// State shared between the [`Loader`] handle and its watch task.
struct Shared {
    walker: DirectoryWalker,
    current: ArcSwap<Snapshot>,
    sinks: Mutex<Vec<UpdateSink>>,
    stats: LoaderStats,
    random: Arc<dyn RandomSource>,
}

impl Shared {
    /// Walk the target directory into a fresh, private snapshot.
    fn build_next(&self) -> Result<Snapshot> {
        debug!(path = %self.walker.root().display(), "runtime: loading new snapshot");

        let mut next = Snapshot::with_random_source(Arc::clone(&self.random));
        let walked = self.walker.walk_into(&mut next);
        self.stats.load_attempts.inc();

        match walked {
            Ok(report) => {
                for _ in &report.failures {
                    self.stats.load_failures.inc();
                }
                self.stats.num_values.set(next.len() as u64);
                debug!(
                    values = next.len(),
                    failures = report.failures.len(),
                    "runtime: snapshot built"
                );
                Ok(next)
            }
            Err(e) => {
                self.stats.load_failures.inc();
                Err(e)
            }
        }
    }

    fn publish(&self, next: Snapshot) {
        self.current.store(Arc::new(next));
    }

    fn sinks(&self) -> Vec<UpdateSink> {
        self.sinks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Signal every sink in registration order.
    ///
    /// Each send waits for room in the sink's channel, so one consumer that
    /// stops draining holds up every sink behind it and every later rebuild.
    async fn notify(&self) {
        for sink in self.sinks() {
            if sink.send(()).await.is_err() {
                debug!("runtime update sink closed, skipping");
            }
        }
    }
}

/// Build off the async threads, swap, then notify.
async fn rebuild(shared: &Arc<Shared>) -> Result<()> {
    let builder = Arc::clone(shared);
    let next = tokio::task::spawn_blocking(move || builder.build_next()).await??;
    shared.publish(next);
    shared.notify().await;
    Ok(())
}

/// Serves snapshots of the directory tree behind a symlink and rebuilds them
/// whenever the symlink is atomically retargeted.
///
/// Construction performs one synchronous load, so [`snapshot`] is populated
/// as soon as `new` returns. A background task then waits for retargets
/// until [`shutdown`] is called or the loader is dropped.
///
/// [`snapshot`]: RuntimeLoader::snapshot
/// [`shutdown`]: Loader::shutdown
pub struct Loader {
    shared: Arc<Shared>,
    shutdown: Shutdown,
}

impl Loader {
    /// Start watching `config.watch_path`. Must be called within a Tokio
    /// runtime.
    ///
    /// The configuration is validated first, so a subdirectory that would
    /// resolve outside the symlink target is rejected. The initial walk runs
    /// inline on the calling thread, so this blocks for as long as that walk
    /// takes; later rebuilds run on the blocking pool.
    pub fn new(config: &RuntimeConfig, scope: &dyn Scope) -> Result<Self> {
        Self::with_random_source(config, scope, Arc::new(ThreadRandom))
    }

    /// Like [`Loader::new`], with feature flags drawing from `random`.
    pub fn with_random_source(
        config: &RuntimeConfig,
        scope: &dyn Scope,
        random: Arc<dyn RandomSource>,
    ) -> Result<Self> {
        let handle = Handle::try_current().map_err(|_| RuntimeError::NoRuntime)?;
        validate_config(config).map_err(RuntimeError::InvalidConfig)?;
        let (Some(watch_path), Some(target_dir), Some(watch_dir)) =
            (config.watch_path.as_deref(), config.target_dir(), config.watch_dir())
        else {
            return Err(RuntimeError::NotConfigured);
        };
        let link_name = watch_path
            .file_name()
            .ok_or_else(|| RuntimeError::InvalidWatchPath(watch_path.to_path_buf()))?;

        let (watcher, retargets) = SymlinkWatcher::new(&watch_dir, link_name);
        let watcher = watcher.run()?;

        let stats_scope = scope.scope(&config.stats_scope);
        let shared = Arc::new(Shared {
            walker: DirectoryWalker::new(target_dir),
            current: ArcSwap::from_pointee(Snapshot::with_random_source(Arc::clone(&random))),
            sinks: Mutex::new(Vec::new()),
            stats: LoaderStats::new(stats_scope.as_ref()),
            random,
        });

        match shared.build_next() {
            Ok(initial) => shared.publish(initial),
            Err(e) => warn!(error = %e, "runtime: initial load failed, starting empty"),
        }

        let shutdown = Shutdown::new();
        handle.spawn(watch_loop(
            Arc::clone(&shared),
            retargets,
            shutdown.subscribe(),
            watcher,
        ));

        info!(
            path = %watch_path.display(),
            values = shared.current.load().len(),
            "runtime loader watching"
        );

        Ok(Self { shared, shutdown })
    }

    /// Rebuild and publish now, then notify sinks.
    ///
    /// If the target directory cannot be walked at all the current snapshot
    /// stays published, no sink is signalled, and the error is returned.
    pub async fn rebuild(&self) -> Result<()> {
        rebuild(&self.shared).await
    }

    /// Stop reacting to retargets. The last published snapshot stays readable.
    ///
    /// The signal is only observed between rebuilds. A rebuild already
    /// waiting on a full update sink keeps waiting until that sink is
    /// drained or its receiver is dropped.
    pub fn shutdown(&self) {
        self.shutdown.trigger();
    }
}

impl RuntimeLoader for Loader {
    fn snapshot(&self) -> Arc<Snapshot> {
        self.shared.current.load_full()
    }

    fn add_update_sink(&self, sink: UpdateSink) {
        self.shared
            .sinks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sink);
    }
}

async fn watch_loop(
    shared: Arc<Shared>,
    mut retargets: mpsc::UnboundedReceiver<()>,
    mut shutdown: broadcast::Receiver<()>,
    _watcher: notify::RecommendedWatcher,
) {
    loop {
        tokio::select! {
            retarget = retargets.recv() => {
                if retarget.is_none() {
                    break;
                }
                info!("runtime symlink swap, reloading");
                if let Err(e) = rebuild(&shared).await {
                    warn!(error = %e, "runtime reload failed, keeping previous snapshot");
                }
            }
            _ = shutdown.recv() => {
                debug!("runtime watch loop shutting down");
                break;
            }
        }
    }
}
