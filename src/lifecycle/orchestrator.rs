// Per-instance orchestration: primary transition, settle, secondary transition

use tracing::{info, info_span, Instrument};

use super::direction::{Direction, Step};
use super::processed::ProcessedSet;
use super::timing::Timing;
use super::waiter::wait_for;
use crate::external::{ComputePlatform, Field};
use crate::inventory::InstanceId;

/// What happened to one instance during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceOutcome {
    pub id: InstanceId,
    pub name: String,
    pub primary_converged: bool,
    pub secondary_converged: bool,
}

impl InstanceOutcome {
    pub fn fully_converged(&self) -> bool {
        self.primary_converged && self.secondary_converged
    }
}

/// Display name of an instance, falling back to its ID when the lookup fails
pub async fn resolve_name(platform: &dyn ComputePlatform, id: &InstanceId) -> String {
    match platform.show_field(id, Field::Name).await {
        Ok(name) if !name.is_empty() => name,
        _ => id.to_string(),
    }
}

async fn run_step(
    platform: &dyn ComputePlatform,
    id: &InstanceId,
    name: &str,
    step: &Step,
    timing: &Timing,
) -> bool {
    println!("{} {name}...", step.action.progressive());
    // Fire and forget; the wait below decides whether it took effect
    let _ = platform.apply(id, step.action).await;
    wait_for(platform, id, name, &step.expect, timing).await
}

/// Drive one instance through both steps of `direction`, then mark it
/// processed. Convergence failures never stop the sequence.
pub async fn process_instance(
    platform: &dyn ComputePlatform,
    direction: Direction,
    id: &InstanceId,
    timing: &Timing,
    processed: &mut ProcessedSet,
) -> InstanceOutcome {
    let span = info_span!("instance", instance.id = %id, direction = %direction);

    let outcome = async {
        let name = resolve_name(platform, id).await;
        println!("\n--- Processing instance: {name} ({id}) ---");

        let [primary, secondary] = direction.steps();
        let primary_converged = run_step(platform, id, &name, &primary, timing).await;

        tokio::time::sleep(timing.settle_delay).await;

        let secondary_converged = run_step(platform, id, &name, &secondary, timing).await;

        println!("Done with {name}.");
        info!(primary_converged, secondary_converged, "Instance processed");

        InstanceOutcome {
            id: id.clone(),
            name,
            primary_converged,
            secondary_converged,
        }
    }
    .instrument(span)
    .await;

    processed.insert(id.clone());
    outcome
}
