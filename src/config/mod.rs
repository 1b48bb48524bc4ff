//! Configuration management for the runtime loader.
//!
//! # Data Flow
//! ```text
//! runtime.toml
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → RuntimeConfig (validated, immutable)
//!     → new_loader() picks Loader or NullLoader
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so an empty file yields the null loader
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::RuntimeConfig;
pub use validation::{validate_config, ValidationError};
