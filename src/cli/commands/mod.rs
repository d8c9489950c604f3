pub mod lifecycle;
pub mod list;
pub mod report;

pub use lifecycle::{LifecycleCommand, LifecycleRun};
pub use list::{render_inventory, ListCommand};
pub use report::ReportCommand;
