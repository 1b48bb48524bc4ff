//! Stats scope backed by the `metrics` crate facade.
//!
//! Whatever recorder the host installs (Prometheus exporter, statsd, ...)
//! receives the loader's stats. Without a recorder the calls are no-ops.

use super::{Counter, Gauge, Scope};

/// Dotted-prefix scope forwarding to `metrics::counter!` / `metrics::gauge!`.
#[derive(Debug, Clone, Default)]
pub struct MetricsScope {
    prefix: String,
}

impl MetricsScope {
    /// Root scope. An empty prefix emits bare names.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn full_name(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.prefix, name)
        }
    }
}

impl Counter for ::metrics::Counter {
    fn inc(&self) {
        self.increment(1);
    }
}

impl Gauge for ::metrics::Gauge {
    fn set(&self, value: u64) {
        ::metrics::Gauge::set(self, value as f64);
    }
}

impl Scope for MetricsScope {
    fn scope(&self, name: &str) -> Box<dyn Scope> {
        Box::new(MetricsScope::new(self.full_name(name)))
    }

    fn counter(&self, name: &str) -> Box<dyn Counter> {
        Box::new(::metrics::counter!(self.full_name(name)))
    }

    fn gauge(&self, name: &str) -> Box<dyn Gauge> {
        Box::new(::metrics::gauge!(self.full_name(name)))
    }
}
