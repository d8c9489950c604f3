//! External tool abstractions
//!
//! Trait-based abstractions over the cloud CLI, so the lifecycle workflow can
//! be exercised against fakes in tests.

pub mod command;
pub mod openstack;

pub use command::{CommandError, CommandExecutor, CommandOutput, ProcessCommandExecutor};
pub use openstack::{read_lock_flag, Action, ComputePlatform, Field, OpenStackCli, PlatformError};

#[cfg(any(test, feature = "testing"))]
pub use openstack::MockComputePlatform;
