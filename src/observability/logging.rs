//! Structured logging setup.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the host. [`try_init_logging`] is the stock setup: `RUST_LOG` wins,
//! otherwise the configured default directive applies.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a global fmt subscriber filtered by `RUST_LOG` or `default_directive`.
///
/// Returns `false` if a global subscriber is already set.
pub fn try_init_logging(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        try_init_logging("runtime_loader=debug");
        assert!(!try_init_logging("runtime_loader=debug"));
    }
}
