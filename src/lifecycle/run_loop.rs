// Run loop: scan, process newly matching instances, re-scan until none remain

use tracing::{info, warn};

use super::direction::Direction;
use super::orchestrator::{process_instance, InstanceOutcome};
use super::processed::ProcessedSet;
use super::timing::Timing;
use crate::external::ComputePlatform;
use crate::inventory::{filter_by_status, InstanceId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of inventory scans, including the final empty one
    pub scan_rounds: u32,
    pub outcomes: Vec<InstanceOutcome>,
}

impl RunSummary {
    pub fn processed_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Instances where at least one wait ran out of attempts
    pub fn convergence_timeouts(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.fully_converged()).count()
    }
}

/// IDs currently in the trigger state that this run has not handled yet, in
/// discovery order. A failed listing counts as an empty one.
pub async fn scan_pending(
    platform: &dyn ComputePlatform,
    direction: Direction,
    processed: &ProcessedSet,
) -> Vec<InstanceId> {
    let instances = match platform.list_instances().await {
        Ok(instances) => instances,
        Err(e) => {
            warn!(error = %e, "Inventory scan failed, treating as empty");
            return Vec::new();
        }
    };

    let trigger = direction.trigger();
    let mut pending: Vec<InstanceId> = Vec::new();
    for instance in filter_by_status(&instances, &trigger) {
        if !processed.contains(&instance.id) && !pending.contains(&instance.id) {
            pending.push(instance.id.clone());
        }
    }
    pending
}

fn format_ids(ids: &[InstanceId]) -> String {
    let quoted: Vec<String> = ids.iter().map(|id| format!("'{id}'")).collect();
    format!("[{}]", quoted.join(", "))
}

/// Process every instance that is, or comes to be, in the trigger state.
///
/// Terminates only once a scan finds nothing new; instances entering the
/// trigger state during the run are picked up by the next scan.
pub async fn run(
    platform: &dyn ComputePlatform,
    direction: Direction,
    timing: &Timing,
    processed: &mut ProcessedSet,
) -> RunSummary {
    let mut summary = RunSummary::default();

    loop {
        let pending = scan_pending(platform, direction, processed).await;
        summary.scan_rounds += 1;

        if pending.is_empty() {
            break;
        }

        println!(
            "\n>>> Found {} {} instances to process: {}",
            pending.len(),
            direction.trigger_adjective(),
            format_ids(&pending)
        );
        info!(round = summary.scan_rounds, pending = pending.len(), "Processing scan round");

        for id in &pending {
            let outcome = process_instance(platform, direction, id, timing, processed).await;
            summary.outcomes.push(outcome);
            tokio::time::sleep(timing.between_instances).await;
        }

        println!("\n>>> Re-checking {} instances...", direction.trigger_adjective());
    }

    summary
}
