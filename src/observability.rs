use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::info;

/// Platform CLI usage metrics
///
/// Owned by the platform client; one instance per run.
#[derive(Debug, Default)]
pub struct PlatformCallMetrics {
    pub total_calls: AtomicU64,
    pub failed_calls: AtomicU64,
    pub mutations: AtomicU64,
}

impl PlatformCallMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_call(&self) {
        self.total_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failed_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_mutation(&self) {
        self.mutations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_stats(&self) -> PlatformCallStats {
        PlatformCallStats {
            total_calls: self.total_calls.load(Ordering::Relaxed),
            failed_calls: self.failed_calls.load(Ordering::Relaxed),
            mutations: self.mutations.load(Ordering::Relaxed),
        }
    }

    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            total_calls = stats.total_calls,
            failed_calls = stats.failed_calls,
            mutations = stats.mutations,
            "Platform CLI metrics"
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformCallStats {
    pub total_calls: u64,
    pub failed_calls: u64,
    pub mutations: u64,
}

/// Time an operation and log its duration on completion
pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn finish(self) {
        let duration = self.start.elapsed();
        info!(
            operation = %self.operation,
            duration_ms = duration.as_millis() as u64,
            "Operation completed"
        );
    }
}
