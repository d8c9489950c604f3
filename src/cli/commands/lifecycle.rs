use anyhow::Result;
use std::io::{self, BufRead};
use tracing::{info, Instrument};

use super::list::render_inventory;
use crate::confirm::confirm;
use crate::external::ComputePlatform;
use crate::inventory::InstanceId;
use crate::lifecycle::{run, scan_pending, Direction, ProcessedSet, RunSummary, Timing};
use crate::observability::OperationTimer;
use crate::report::{generate_report, FinalReport};
use crate::telemetry::{create_run_span, generate_correlation_id};

/// How a lifecycle command ended
#[derive(Debug)]
pub enum LifecycleRun {
    /// Operator declined; nothing was mutated
    Aborted,
    /// `--dry-run`: the instances a real run would start with
    DryRun { pending: Vec<InstanceId> },
    Completed { summary: RunSummary, report: FinalReport },
}

pub struct LifecycleCommand {
    pub direction: Direction,
    pub yes: bool,
    pub dry_run: bool,
    pub timing: Timing,
}

impl LifecycleCommand {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            yes: false,
            dry_run: false,
            timing: Timing::default(),
        }
    }

    pub fn with_yes(mut self, yes: bool) -> Self {
        self.yes = yes;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub async fn execute(&self, platform: &dyn ComputePlatform) -> Result<LifecycleRun> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        self.execute_with_input(platform, &mut input).await
    }

    /// Same as [`execute`](Self::execute) with the confirmation answer read from `input`
    pub async fn execute_with_input<R: BufRead>(
        &self,
        platform: &dyn ComputePlatform,
        input: &mut R,
    ) -> Result<LifecycleRun> {
        let correlation_id = generate_correlation_id();
        let span = create_run_span(self.direction, &correlation_id, self.dry_run);

        println!("Fetching the full list of instances...");
        match platform.list_instances().await {
            Ok(instances) => print!("{}", render_inventory(&instances)),
            Err(e) => println!("⚠️ Could not list instances: {e}"),
        }

        if self.dry_run {
            let pending = scan_pending(platform, self.direction, &ProcessedSet::new()).await;
            println!(
                "\n[dry-run] {} {} instances would be processed: {}",
                pending.len(),
                self.direction.trigger_adjective(),
                pending.iter().map(InstanceId::to_string).collect::<Vec<_>>().join(", ")
            );
            return Ok(LifecycleRun::DryRun { pending });
        }

        if !self.yes {
            let mut stdout = io::stdout();
            if !confirm(self.direction.confirmation_prompt(), input, &mut stdout)? {
                println!("Operation aborted.");
                return Ok(LifecycleRun::Aborted);
            }
        }

        async {
            info!("Starting lifecycle run");
            let timer = OperationTimer::new(&format!("{} run", self.direction));

            let mut processed = ProcessedSet::new();
            let summary = run(platform, self.direction, &self.timing, &mut processed).await;
            timer.finish();

            println!(
                "\nProcessed {} instances in {} scan rounds ({} with convergence warnings).",
                summary.processed_count(),
                summary.scan_rounds,
                summary.convergence_timeouts()
            );

            println!();
            let report = generate_report(platform).await;
            print!("{report}");
            println!("\n🎉 {}", self.direction.completion_message());

            Ok::<_, anyhow::Error>(LifecycleRun::Completed { summary, report })
        }
        .instrument(span)
        .await
    }
}
