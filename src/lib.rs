//! Symlink-watched runtime configuration.
//!
//! # Architecture Overview
//!
//! ```text
//!   operator retargets symlink (rename over P)
//!        │
//!        ▼
//!   ┌──────────┐  moved-into P   ┌──────────┐   walk P/S   ┌──────────────┐
//!   │  notify  │────────────────▶│  Loader  │─────────────▶│ DirectoryWalker│
//!   └──────────┘                 └────┬─────┘              └──────┬───────┘
//!                                     │   atomic swap             │ next Snapshot
//!                                     │◀──────────────────────────┘
//!                                     ├──▶ stats (load_attempts, num_values)
//!                                     └──▶ update sinks (one () per rebuild)
//!
//!   readers: loader.snapshot() → Arc<Snapshot> → get / get_integer / feature_enabled
//! ```

// Core subsystems
pub mod config;
pub mod loader;
pub mod snapshot;

// Cross-cutting concerns
pub mod error;
pub mod lifecycle;
pub mod observability;
pub mod stats;

pub use config::RuntimeConfig;
pub use error::RuntimeError;
pub use loader::{new_loader, Loader, NullLoader, RuntimeLoader, UpdateSink};
pub use snapshot::{Entry, Snapshot, SnapshotView};
pub use stats::{MetricsScope, NullScope, Scope};
