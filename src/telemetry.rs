use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::ObservabilityConfig;
use crate::lifecycle::Direction;

/// Initialize structured logging on stderr.
///
/// `RUST_LOG` wins over the configured level; stdout stays reserved for the
/// progress lines and the report.
pub fn init_telemetry(config: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;

    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    }

    tracing::debug!("fleet-lifecycle telemetry initialized");
    Ok(())
}

/// Generate a correlation ID for linking everything logged during one run
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Root span of one lifecycle run
pub fn create_run_span(direction: Direction, correlation_id: &str, dry_run: bool) -> tracing::Span {
    tracing::info_span!(
        "fleet_run",
        direction = %direction,
        correlation.id = correlation_id,
        dry_run
    )
}
