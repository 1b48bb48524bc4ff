//! Error types for loader construction and rebuilds.
//!
//! Readers never see these: lookups fall back to caller defaults. Only
//! loader setup and whole-walk failures surface as errors.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ValidationError;

/// Result alias for loader operations.
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Errors raised while starting a loader or rebuilding a snapshot.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The watch on the symlink's parent directory could not be set up.
    #[error("unable to watch {path}: {source}")]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    /// A watching loader was constructed outside of a Tokio runtime.
    #[error("loader must be created inside a tokio runtime")]
    NoRuntime,

    /// A watching loader needs both a watch path and a subdirectory.
    #[error("runtime watch path and subdirectory are not configured")]
    NotConfigured,

    /// The watch path has no final component to match events against.
    #[error("invalid runtime watch path: {0}")]
    InvalidWatchPath(PathBuf),

    /// The configuration failed semantic validation.
    #[error("invalid runtime configuration: {}", join_errors(.0))]
    InvalidConfig(Vec<ValidationError>),

    /// The walk root itself could not be read; no entries were produced.
    #[error("unable to walk runtime directory {path}: {source}")]
    WalkRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The blocking rebuild task panicked or was cancelled.
    #[error("rebuild task failed: {0}")]
    Rebuild(#[from] tokio::task::JoinError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
