//! Stats sink consumed by the loader.
//!
//! Only three operations are needed: increment a counter, set a gauge, and
//! derive a namespaced child scope. Any backend can be adapted by
//! implementing [`Scope`]; [`NullScope`] discards everything and
//! [`MetricsScope`] forwards to the `metrics` facade.

pub mod metrics;

pub use self::metrics::MetricsScope;

/// Monotonic counter.
pub trait Counter: Send + Sync {
    fn inc(&self);
}

/// Point-in-time value.
pub trait Gauge: Send + Sync {
    fn set(&self, value: u64);
}

/// Factory for named counters and gauges.
pub trait Scope: Send + Sync {
    /// Child scope whose names are nested under `name`.
    fn scope(&self, name: &str) -> Box<dyn Scope>;

    fn counter(&self, name: &str) -> Box<dyn Counter>;

    fn gauge(&self, name: &str) -> Box<dyn Gauge>;
}

/// Scope that drops every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullScope;

#[derive(Debug, Default, Clone, Copy)]
struct NullStat;

impl Counter for NullStat {
    fn inc(&self) {}
}

impl Gauge for NullStat {
    fn set(&self, _value: u64) {}
}

impl Scope for NullScope {
    fn scope(&self, _name: &str) -> Box<dyn Scope> {
        Box::new(NullScope)
    }

    fn counter(&self, _name: &str) -> Box<dyn Counter> {
        Box::new(NullStat)
    }

    fn gauge(&self, _name: &str) -> Box<dyn Gauge> {
        Box::new(NullStat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_scope_accepts_everything() {
        let scope = NullScope.scope("runtime");
        scope.counter("load_attempts").inc();
        scope.gauge("num_values").set(42);
        scope.scope("nested").counter("x").inc();
    }
}
