// fleet-lifecycle - bulk pause/lock and unlock/unpause of cloud instances
// This exposes the core components for testing and integration

pub mod cli;
pub mod config;
pub mod confirm;
pub mod external;
pub mod inventory;
pub mod lifecycle;
pub mod observability;
pub mod report;
pub mod telemetry;

// Re-export key types for easy access
pub use cli::commands::{LifecycleCommand, LifecycleRun, ListCommand, ReportCommand};
pub use config::FleetConfig;
pub use external::{Action, ComputePlatform, Field, OpenStackCli, PlatformError, ProcessCommandExecutor};
pub use inventory::{Instance, InstanceId, InstanceStatus};
pub use lifecycle::{Direction, ProcessedSet, RunSummary, Timing};
pub use observability::PlatformCallMetrics;
pub use report::{generate_report, FinalReport, ReportEntry};
pub use telemetry::init_telemetry;
