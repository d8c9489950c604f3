use anyhow::Result;
use tracing::warn;

use crate::external::ComputePlatform;
use crate::inventory::Instance;

pub struct ListCommand;

impl ListCommand {
    pub fn new() -> Self {
        Self
    }

    /// A failed listing is shown as an empty inventory, like the report does
    pub async fn execute(&self, platform: &dyn ComputePlatform) -> Result<Vec<Instance>> {
        let instances = platform.list_instances().await.unwrap_or_else(|e| {
            warn!(error = %e, "Could not list instances");
            Vec::new()
        });
        print!("{}", render_inventory(&instances));
        Ok(instances)
    }
}

impl Default for ListCommand {
    fn default() -> Self {
        Self::new()
    }
}

/// Render instances as an aligned ID / Name / Status table
pub fn render_inventory(instances: &[Instance]) -> String {
    if instances.is_empty() {
        return "(no instances)\n".to_string();
    }

    let id_width = instances.iter().map(|i| i.id.as_str().len()).max().unwrap_or(0).max(2);
    let name_width = instances.iter().map(|i| i.name.len()).max().unwrap_or(0).max(4);

    let mut out = format!("{:<id_width$}  {:<name_width$}  STATUS\n", "ID", "NAME");
    for instance in instances {
        out.push_str(&format!(
            "{:<id_width$}  {:<name_width$}  {}\n",
            instance.id.as_str(),
            instance.name,
            instance.status
        ));
    }
    out
}
