// Convergence waiting - bounded fixed-interval polling of one instance attribute

use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use super::timing::Timing;
use crate::external::{read_lock_flag, ComputePlatform, Field};
use crate::inventory::{InstanceId, InstanceStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl PollPolicy {
    /// Wall-clock budget as reported in warnings
    pub fn budget_secs(&self) -> u64 {
        self.interval.as_secs() * u64::from(self.max_attempts)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome<T> {
    Converged { attempts: u32 },
    /// `last_observed` is `None` when the final query itself failed
    Exhausted { attempts: u32, last_observed: Option<T> },
}

impl<T> PollOutcome<T> {
    pub fn is_converged(&self) -> bool {
        matches!(self, PollOutcome::Converged { .. })
    }
}

/// Poll `query` until `accept` holds or `max_attempts` queries have run.
///
/// A query yielding `None` counts as "not yet met". There is no sleep after
/// the last attempt, and no query after the accepting one.
pub async fn poll_until<T, F, Fut, P>(policy: PollPolicy, mut query: F, mut accept: P) -> PollOutcome<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Option<T>>,
    P: FnMut(&T) -> bool,
{
    let mut last_observed = None;
    for attempt in 1..=policy.max_attempts {
        last_observed = query(attempt).await;
        if last_observed.as_ref().is_some_and(&mut accept) {
            return PollOutcome::Converged { attempts: attempt };
        }
        if attempt < policy.max_attempts {
            tokio::time::sleep(policy.interval).await;
        }
    }
    PollOutcome::Exhausted {
        attempts: policy.max_attempts,
        last_observed,
    }
}

/// Target value of one convergence wait
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    Status(InstanceStatus),
    Locked(bool),
}

impl Expectation {
    pub fn policy(&self, timing: &Timing) -> PollPolicy {
        let max_attempts = match self {
            Expectation::Status(_) => timing.status_max_attempts,
            Expectation::Locked(_) => timing.lock_max_attempts,
        };
        PollPolicy {
            max_attempts,
            interval: timing.poll_interval,
        }
    }
}

/// Progress line for an unmet status poll; a failed query shows as `unknown`
pub fn status_progress_line(name: &str, observed: Option<&InstanceStatus>, expected: &InstanceStatus) -> String {
    let observed = observed.map_or("unknown", InstanceStatus::as_str);
    format!("⏳ {name} status = {observed} (waiting for {expected})...")
}

fn lock_label(locked: bool) -> &'static str {
    if locked {
        "LOCKED"
    } else {
        "UNLOCKED"
    }
}

/// Wait for `expectation` on one instance. Never fails the caller: a timeout
/// is reported as a warning and `false` is returned.
pub async fn wait_for(
    platform: &dyn ComputePlatform,
    id: &InstanceId,
    name: &str,
    expectation: &Expectation,
    timing: &Timing,
) -> bool {
    let policy = expectation.policy(timing);
    match expectation {
        Expectation::Status(expected) => wait_for_status(platform, id, name, expected, policy).await,
        Expectation::Locked(expected) => wait_for_lock(platform, id, name, *expected, policy).await,
    }
}

pub async fn wait_for_status(
    platform: &dyn ComputePlatform,
    id: &InstanceId,
    name: &str,
    expected: &InstanceStatus,
    policy: PollPolicy,
) -> bool {
    let outcome = poll_until(
        policy,
        |attempt| async move {
            debug!(instance.id = %id, attempt, "Polling status");
            let status = platform
                .show_field(id, Field::Status)
                .await
                .ok()
                .map(|raw| InstanceStatus::from(raw.as_str()));
            if status.is_none() {
                println!("{}", status_progress_line(name, None, expected));
            }
            status
        },
        |status| {
            let matched = status == expected;
            if !matched {
                println!("{}", status_progress_line(name, Some(status), expected));
            }
            matched
        },
    )
    .await;

    match outcome {
        PollOutcome::Converged { .. } => {
            println!("✅ {name} is {expected} now.");
            true
        }
        PollOutcome::Exhausted { attempts, last_observed } => {
            let last = last_observed.map_or_else(|| "unknown".to_string(), |s| s.to_string());
            println!(
                "⚠️ WARNING: {name} did not reach {expected} after {} seconds (last status: {last}).",
                policy.budget_secs()
            );
            warn!(
                instance.id = %id,
                expected = %expected,
                last_status = %last,
                attempts,
                "Status did not converge"
            );
            false
        }
    }
}

pub async fn wait_for_lock(
    platform: &dyn ComputePlatform,
    id: &InstanceId,
    name: &str,
    expected: bool,
    policy: PollPolicy,
) -> bool {
    let outcome = poll_until(
        policy,
        |attempt| async move {
            debug!(instance.id = %id, attempt, "Polling lock flag");
            read_lock_flag(platform, id).await.ok()
        },
        |locked| *locked == expected,
    )
    .await;

    match outcome {
        PollOutcome::Converged { .. } => {
            if expected {
                println!("{name} is LOCKED.");
            } else {
                println!("{name} is unlocked.");
            }
            true
        }
        PollOutcome::Exhausted { attempts, last_observed } => {
            let last = last_observed.map_or("unknown", lock_label);
            println!(
                "⚠️ WARNING: {name} is still {} after {} seconds (last observed: {last}).",
                lock_label(!expected),
                policy.budget_secs()
            );
            warn!(
                instance.id = %id,
                expected = lock_label(expected),
                last_observed = last,
                attempts,
                "Lock flag did not converge"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::{MockComputePlatform, PlatformError};
    use crate::external::CommandError;
    use std::cell::Cell;

    fn policy(max_attempts: u32) -> PollPolicy {
        PollPolicy {
            max_attempts,
            interval: Duration::from_secs(2),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_stops_on_first_match() {
        let polls = Cell::new(0u32);
        let outcome = poll_until(
            policy(10),
            |attempt| {
                polls.set(polls.get() + 1);
                async move { Some(attempt) }
            },
            |value| *value == 4,
        )
        .await;

        assert_eq!(outcome, PollOutcome::Converged { attempts: 4 });
        assert_eq!(polls.get(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_exhausts_after_exact_attempts() {
        let polls = Cell::new(0u32);
        let start = tokio::time::Instant::now();
        let outcome = poll_until(
            policy(5),
            |_| {
                polls.set(polls.get() + 1);
                async { Some("BUILD") }
            },
            |value| *value == "ACTIVE",
        )
        .await;

        assert_eq!(
            outcome,
            PollOutcome::Exhausted {
                attempts: 5,
                last_observed: Some("BUILD"),
            }
        );
        assert_eq!(polls.get(), 5);
        // four gaps between five attempts
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(8) && elapsed < Duration::from_secs(10));
    }

    #[test]
    fn test_status_progress_line_reports_unknown_on_failed_query() {
        assert_eq!(
            status_progress_line("web-1", None, &InstanceStatus::Paused),
            "⏳ web-1 status = unknown (waiting for PAUSED)..."
        );
        assert_eq!(
            status_progress_line("web-1", Some(&InstanceStatus::Active), &InstanceStatus::Paused),
            "⏳ web-1 status = ACTIVE (waiting for PAUSED)..."
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_queries_count_as_not_met() {
        let outcome = poll_until(policy(3), |attempt| async move { (attempt == 3).then_some(true) }, |v| *v).await;
        assert_eq!(outcome, PollOutcome::Converged { attempts: 3 });

        let outcome: PollOutcome<bool> = poll_until(policy(2), |_| async { None }, |v| *v).await;
        assert!(!outcome.is_converged());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_status_polls_exactly_budget_on_timeout() {
        let mut platform = MockComputePlatform::new();
        platform
            .expect_show_field()
            .times(30)
            .returning(|_, _| Ok("ACTIVE".to_string()));

        let converged = wait_for(
            &platform,
            &InstanceId::new("i-1"),
            "web-1",
            &Expectation::Status(InstanceStatus::Paused),
            &Timing::default(),
        )
        .await;

        assert!(!converged);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_status_matches_case_insensitively() {
        let mut platform = MockComputePlatform::new();
        let mut responses = vec!["ACTIVE", "paused"].into_iter();
        platform
            .expect_show_field()
            .times(2)
            .returning(move |_, _| Ok(responses.next().unwrap_or("PAUSED").to_string()));

        let converged = wait_for_status(
            &platform,
            &InstanceId::new("i-1"),
            "web-1",
            &InstanceStatus::Paused,
            policy(30),
        )
        .await;

        assert!(converged);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_lock_tolerates_command_failures() {
        let mut platform = MockComputePlatform::new();
        let mut calls = 0;
        platform
            .expect_show_field()
            .withf(|_, field| *field == Field::Locked)
            .times(3)
            .returning(move |_, _| {
                calls += 1;
                match calls {
                    1 => Err(PlatformError::CommandError {
                        source: CommandError::Io {
                            message: "connection reset".to_string(),
                        },
                    }),
                    2 => Ok("False".to_string()),
                    _ => Ok("True".to_string()),
                }
            });

        let converged = wait_for(
            &platform,
            &InstanceId::new("i-1"),
            "web-1",
            &Expectation::Locked(true),
            &Timing::default(),
        )
        .await;

        assert!(converged);
    }

    #[tokio::test(start_paused = true)]
    async fn test_lock_wait_uses_lock_budget() {
        let mut platform = MockComputePlatform::new();
        platform
            .expect_show_field()
            .times(15)
            .returning(|_, _| Ok("True".to_string()));

        let converged = wait_for(
            &platform,
            &InstanceId::new("i-1"),
            "web-1",
            &Expectation::Locked(false),
            &Timing::default(),
        )
        .await;

        assert!(!converged);
    }
}
