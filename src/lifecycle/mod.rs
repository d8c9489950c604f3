// Lifecycle Module - the fleet transition workflow
//
// Scan for instances in the trigger state, drive each one through the two
// steps of the chosen direction, re-scan until nothing new turns up.

pub mod direction;
pub mod orchestrator;
pub mod processed;
pub mod run_loop;
pub mod timing;
pub mod waiter;

pub use direction::{Direction, Step};
pub use orchestrator::{process_instance, resolve_name, InstanceOutcome};
pub use processed::ProcessedSet;
pub use run_loop::{run, scan_pending, RunSummary};
pub use timing::Timing;
pub use waiter::{poll_until, wait_for, Expectation, PollOutcome, PollPolicy};
