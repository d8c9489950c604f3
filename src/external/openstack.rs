//! OpenStack CLI abstractions
//!
//! Wraps the `openstack` command behind the [`ComputePlatform`] trait so the
//! lifecycle workflow never touches process spawning directly.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use super::command::{CommandError, CommandExecutor};
use crate::inventory::{parse_lock_flag, parse_server_table, Instance, InstanceId, ParseValueError};
use crate::observability::PlatformCallMetrics;

/// State-changing verbs understood by `openstack server`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Pause,
    Unpause,
    Lock,
    Unlock,
}

impl Action {
    pub fn verb(&self) -> &'static str {
        match self {
            Action::Pause => "pause",
            Action::Unpause => "unpause",
            Action::Lock => "lock",
            Action::Unlock => "unlock",
        }
    }

    /// Progressive form used in console output ("Pausing web-1...")
    pub fn progressive(&self) -> &'static str {
        match self {
            Action::Pause => "Pausing",
            Action::Unpause => "Unpausing",
            Action::Lock => "Locking",
            Action::Unlock => "Unlocking",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Fields readable through `server show -f value -c <field>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Status,
    Locked,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Status => "status",
            Field::Locked => "locked",
        }
    }
}

#[derive(Debug, Error, Clone)]
pub enum PlatformError {
    #[error("`{command}` exited with status {status_code}: {stderr}")]
    CommandFailed {
        command: String,
        status_code: i32,
        stderr: String,
    },
    #[error("Command execution error: {source}")]
    CommandError {
        #[from]
        source: CommandError,
    },
    #[error("Invalid response from platform CLI: {source}")]
    InvalidResponse {
        #[from]
        source: ParseValueError,
    },
}

/// The three capabilities the lifecycle workflow needs from the cloud
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ComputePlatform: Send + Sync {
    /// List every instance with its current status
    async fn list_instances(&self) -> Result<Vec<Instance>, PlatformError>;

    /// Read a single field of one instance as raw text
    async fn show_field(&self, id: &InstanceId, field: Field) -> Result<String, PlatformError>;

    /// Request a state change; success of the request says nothing about convergence
    async fn apply(&self, id: &InstanceId, action: Action) -> Result<(), PlatformError>;
}

/// Real implementation driving the `openstack` CLI
pub struct OpenStackCli {
    executor: Arc<dyn CommandExecutor>,
    program: String,
    global_args: Vec<String>,
    metrics: Arc<PlatformCallMetrics>,
}

impl OpenStackCli {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self {
            executor,
            program: "openstack".to_string(),
            global_args: Vec::new(),
            metrics: Arc::new(PlatformCallMetrics::new()),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_global_args(mut self, args: Vec<String>) -> Self {
        self.global_args = args;
        self
    }

    pub fn metrics(&self) -> Arc<PlatformCallMetrics> {
        Arc::clone(&self.metrics)
    }

    async fn execute_openstack_command(&self, args: &[&str]) -> Result<String, PlatformError> {
        let mut full_args: Vec<&str> = self.global_args.iter().map(String::as_str).collect();
        full_args.extend_from_slice(args);
        let command_line = format!("{} {}", self.program, full_args.join(" "));

        self.metrics.record_call();
        debug!(command = %command_line, "Running platform command");

        let output = match self.executor.execute(&self.program, &full_args).await {
            Ok(output) => output,
            Err(e) => {
                self.metrics.record_failure();
                warn!(command = %command_line, error = %e, "Error running command");
                return Err(e.into());
            }
        };

        if !output.success() {
            self.metrics.record_failure();
            warn!(
                command = %command_line,
                status_code = output.status_code,
                stderr = %output.stderr.trim(),
                "Error running command"
            );
            return Err(PlatformError::CommandFailed {
                command: command_line,
                status_code: output.status_code,
                stderr: output.stderr.trim().to_string(),
            });
        }

        Ok(output.stdout.trim().to_string())
    }
}

#[async_trait]
impl ComputePlatform for OpenStackCli {
    async fn list_instances(&self) -> Result<Vec<Instance>, PlatformError> {
        let output = self.execute_openstack_command(&["server", "list", "--long"]).await?;
        Ok(parse_server_table(&output))
    }

    async fn show_field(&self, id: &InstanceId, field: Field) -> Result<String, PlatformError> {
        self.execute_openstack_command(&[
            "server",
            "show",
            id.as_str(),
            "-f",
            "value",
            "-c",
            field.as_str(),
        ])
        .await
    }

    async fn apply(&self, id: &InstanceId, action: Action) -> Result<(), PlatformError> {
        self.metrics.record_mutation();
        self.execute_openstack_command(&["server", action.verb(), id.as_str()])
            .await?;
        Ok(())
    }
}

/// Read the lock flag of one instance as a typed value
pub async fn read_lock_flag(
    platform: &dyn ComputePlatform,
    id: &InstanceId,
) -> Result<bool, PlatformError> {
    let raw = platform.show_field(id, Field::Locked).await?;
    Ok(parse_lock_flag(&raw)?)
}
