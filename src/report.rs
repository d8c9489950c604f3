// Final report: unfiltered re-listing with a fresh lock flag per instance

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use tracing::warn;

use crate::external::{read_lock_flag, ComputePlatform};
use crate::inventory::{InstanceId, InstanceStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub id: InstanceId,
    pub name: String,
    pub status: InstanceStatus,
    /// `None` when the lock flag could not be read
    pub locked: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinalReport {
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<ReportEntry>,
}

impl FinalReport {
    pub fn find(&self, id: &str) -> Option<&ReportEntry> {
        self.entries.iter().find(|entry| entry.id.as_str() == id)
    }
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let locked = match self.locked {
            Some(true) => "True",
            Some(false) => "False",
            None => "unknown",
        };
        write!(
            f,
            "- {} ({}): status={}, locked={}",
            self.name, self.id, self.status, locked
        )
    }
}

impl fmt::Display for FinalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== FINAL REPORT =====")?;
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

/// Observe the end state of every instance. Never mutates anything.
pub async fn generate_report(platform: &dyn ComputePlatform) -> FinalReport {
    let instances = platform.list_instances().await.unwrap_or_else(|e| {
        warn!(error = %e, "Could not list instances for the report");
        Vec::new()
    });

    let mut entries = Vec::with_capacity(instances.len());
    for instance in instances {
        let locked = read_lock_flag(platform, &instance.id).await.ok();
        entries.push(ReportEntry {
            id: instance.id,
            name: instance.name,
            status: instance.status,
            locked,
        });
    }

    FinalReport {
        generated_at: Utc::now(),
        entries,
    }
}
