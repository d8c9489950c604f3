use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use fleet_lifecycle::cli::{Cli, Commands};
use fleet_lifecycle::config::default_config_path;
use fleet_lifecycle::{
    init_telemetry, Direction, FleetConfig, LifecycleCommand, ListCommand, OpenStackCli,
    ProcessCommandExecutor, ReportCommand, Timing,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    FleetConfig::load_env_file()?;
    let config = FleetConfig::load(cli.config.as_deref())?.with_os_cloud(cli.os_cloud.as_deref());
    init_telemetry(&config.observability)?;

    let platform = OpenStackCli::new(Arc::new(ProcessCommandExecutor))
        .with_program(config.platform.program.clone())
        .with_global_args(config.platform.global_args.clone());
    let timing = Timing::from(&config.timing);

    match cli.command {
        Commands::PauseLock { yes, dry_run } => {
            tokio::runtime::Runtime::new()?.block_on(async {
                LifecycleCommand::new(Direction::PauseLock)
                    .with_yes(yes)
                    .with_dry_run(dry_run)
                    .with_timing(timing)
                    .execute(&platform)
                    .await
            })?;
        }
        Commands::UnlockUnpause { yes, dry_run } => {
            tokio::runtime::Runtime::new()?.block_on(async {
                LifecycleCommand::new(Direction::UnlockUnpause)
                    .with_yes(yes)
                    .with_dry_run(dry_run)
                    .with_timing(timing)
                    .execute(&platform)
                    .await
            })?;
        }
        Commands::Report { json } => {
            tokio::runtime::Runtime::new()?.block_on(async {
                ReportCommand::new().with_json(json).execute(&platform).await
            })?;
        }
        Commands::List => {
            tokio::runtime::Runtime::new()?.block_on(async { ListCommand::new().execute(&platform).await })?;
        }
        Commands::Config => {
            println!("# defaults < {} < --config < FLEET_LIFECYCLE__* env", default_config_path().display());
            print!("{}", config.to_toml()?);
        }
    }

    platform.metrics().log_stats();
    Ok(())
}
