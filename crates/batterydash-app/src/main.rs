use std::path::PathBuf;

use anyhow::Context;
use batterydash_core::config::DashboardConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    let config = DashboardConfig::load_or_default(config_path.as_deref())
        .context("loading dashboard configuration")?;

    batterydash_app::logging::init(&config.log_path())?;
    info!(
        build = batterydash_app::BUILD_ID,
        endpoint = %config.endpoint,
        demo = config.demo_mode,
        interval_ms = config.poll_interval_ms,
        "starting BatteryDash"
    );

    batterydash_app::app::run(config).await
}
