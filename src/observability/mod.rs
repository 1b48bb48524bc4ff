//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! loader, walker, watcher
//!     → tracing events (structured fields: path, key, error)
//!     → stats Scope (load_attempts, load_failures, num_values)
//! ```

pub mod logging;

pub use logging::try_init_logging;
