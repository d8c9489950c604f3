use anyhow::Result;

use crate::external::ComputePlatform;
use crate::report::{generate_report, FinalReport};

pub struct ReportCommand {
    pub json: bool,
}

impl ReportCommand {
    pub fn new() -> Self {
        Self { json: false }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub async fn execute(&self, platform: &dyn ComputePlatform) -> Result<FinalReport> {
        let report = generate_report(platform).await;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{report}");
        }
        Ok(report)
    }
}

impl Default for ReportCommand {
    fn default() -> Self {
        Self::new()
    }
}
