use std::time::Duration;

use crate::config::TimingConfig;

/// Every fixed delay and attempt budget of a run, threaded explicitly
/// through the run loop instead of living in module-level constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub poll_interval: Duration,
    pub status_max_attempts: u32,
    pub lock_max_attempts: u32,
    /// Pause between the primary and secondary transition of one instance
    pub settle_delay: Duration,
    /// Pause after each processed instance
    pub between_instances: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            status_max_attempts: 30,
            lock_max_attempts: 15,
            settle_delay: Duration::from_secs(5),
            between_instances: Duration::from_secs(3),
        }
    }
}

impl From<&TimingConfig> for Timing {
    fn from(config: &TimingConfig) -> Self {
        Self {
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            status_max_attempts: config.status_max_attempts,
            lock_max_attempts: config.lock_max_attempts,
            settle_delay: Duration::from_secs(config.settle_delay_secs),
            between_instances: Duration::from_secs(config.between_instances_secs),
        }
    }
}
