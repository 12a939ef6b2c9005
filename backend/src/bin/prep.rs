//! NWT Climate Explorer - data preparation
//!
//! Reduces wide annual model output to the decadal long-form CSV served by
//! `nwt-climate-server`. Takes an optional config file path argument.

use nwt_climate_server::services::prep::{PrepConfig, PrepService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nwt_climate_server=info,nwt_climate_prep=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let path = std::env::args().nth(1);
    let config = PrepConfig::load(path.as_deref())?;

    tracing::info!("Preparing {} input files", config.inputs.len());
    let report = PrepService::new(config).run()?;
    tracing::info!(
        "Done: {} inputs, {} annual rows, {} decadal rows",
        report.inputs,
        report.annual_rows,
        report.decadal_rows
    );

    Ok(())
}
