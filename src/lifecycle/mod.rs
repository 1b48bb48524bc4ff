//! Lifecycle management for background tasks.
//!
//! # Data Flow
//! ```text
//! Loader::new → spawn watch loop (holds a Shutdown receiver)
//! Loader::shutdown / drop(Loader) → Shutdown::trigger / channel closed
//!     → watch loop exits → notify watcher dropped → watch removed
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
