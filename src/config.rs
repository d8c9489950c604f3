use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for fleet-lifecycle
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FleetConfig {
    /// Platform CLI settings
    pub platform: PlatformConfig,
    /// Polling and pacing settings
    pub timing: TimingConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlatformConfig {
    /// Program invoked for every platform call
    pub program: String,
    /// Arguments placed before every subcommand, e.g. `["--os-cloud", "prod"]`
    pub global_args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TimingConfig {
    /// Delay between convergence polls
    pub poll_interval_secs: u64,
    /// Poll budget when waiting for a status value
    pub status_max_attempts: u32,
    /// Poll budget when waiting for the lock flag
    pub lock_max_attempts: u32,
    /// Delay between the two transitions of one instance
    pub settle_delay_secs: u64,
    /// Delay after each processed instance
    pub between_instances_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable ones
    pub json_logs: bool,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            program: "openstack".to_string(),
            global_args: Vec::new(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 2,
            status_max_attempts: 30,
            lock_max_attempts: 15,
            settle_delay_secs: 5,
            between_instances_secs: 3,
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json_logs: false,
        }
    }
}

pub const CONFIG_FILE_STEM: &str = "fleet-lifecycle";
pub const ENV_PREFIX: &str = "FLEET_LIFECYCLE";

impl FleetConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. fleet-lifecycle.toml in the working directory
    /// 3. The explicit `--config` file, if any
    /// 4. Environment variables (FLEET_LIFECYCLE__TIMING__POLL_INTERVAL_SECS=1)
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&FleetConfig::default())?);

        if Path::new(&format!("{CONFIG_FILE_STEM}.toml")).exists() {
            builder = builder.add_source(File::with_name(CONFIG_FILE_STEM));
        }

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .list_separator(" ")
                .with_list_parse_key("platform.global_args")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
        }
        Ok(())
    }

    /// Forward `--os-cloud <name>` to every platform call
    pub fn with_os_cloud(mut self, cloud: Option<&str>) -> Self {
        if let Some(cloud) = cloud {
            self.platform.global_args.push("--os-cloud".to_string());
            self.platform.global_args.push(cloud.to_string());
        }
        self
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Path of the default config file, for messages
pub fn default_config_path() -> PathBuf {
    PathBuf::from(format!("{CONFIG_FILE_STEM}.toml"))
}
