//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Keep the walked directory inside the symlink target
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - An unconfigured file is valid: it selects the null loader

use std::fmt;
use std::path::{Component, Path};

use crate::config::schema::RuntimeConfig;

/// A single semantic problem with a [`RuntimeConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `subdirectory` must be relative and must not climb out with `..`.
    SubdirectoryEscapes(String),
    /// `watch_path` has no final component to match rename events against.
    WatchPathWithoutName(String),
    /// `stats_scope` is empty.
    EmptyStatsScope,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::SubdirectoryEscapes(s) => {
                write!(f, "subdirectory '{}' must be a relative path without '..'", s)
            }
            ValidationError::WatchPathWithoutName(p) => {
                write!(f, "watch_path '{}' must name a symlink", p)
            }
            ValidationError::EmptyStatsScope => write!(f, "stats_scope must not be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &RuntimeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(subdir) = config.subdirectory.as_deref().filter(|s| !s.is_empty()) {
        let escapes = Path::new(subdir)
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            errors.push(ValidationError::SubdirectoryEscapes(subdir.to_string()));
        }
    }

    if let Some(path) = config.watch_path.as_deref().filter(|p| !p.as_os_str().is_empty()) {
        if path.file_name().is_none() {
            errors.push(ValidationError::WatchPathWithoutName(path.display().to_string()));
        }
    }

    if config.stats_scope.is_empty() {
        errors.push(ValidationError::EmptyStatsScope);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
