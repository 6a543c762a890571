use crate::components::hours_grid::{self, GridDay};
use crate::components::schedule::models::AggregateResult;
use crate::components::ScheduleHandle;
use crate::config::Config;
use crate::error::Error;
use crate::shutdown;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The combined feed handed to presentation code
#[derive(Debug, Serialize)]
pub struct WidgetFeed {
    pub schedule: AggregateResult,
    pub week: Vec<GridDay>,
}

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub fn load_config() -> miette::Result<Arc<Config>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(config)),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Run one feed pass and print the result as JSON on stdout.
///
/// The schedule pipeline and the weekly grid run concurrently. A token
/// exchange failure aborts the run; a grid failure only empties the `week`
/// field of the feed.
pub async fn run(config: Arc<Config>) -> miette::Result<()> {
    let cancel = CancellationToken::new();

    // Wire termination signals to pipeline cancellation
    tokio::spawn(shutdown::handle_signals(cancel.clone()));

    let schedule_handle = ScheduleHandle::new(Arc::clone(&config), cancel.clone());

    let deadline = Duration::from_secs(config.request_timeout_secs);
    let grid_future = crate::components::schedule::pipeline::guarded(
        hours_grid::fetch_week(&config),
        deadline,
        &cancel,
        "weekly grid",
    );

    let (schedule_result, week_result) =
        tokio::join!(schedule_handle.get_schedule(), grid_future);

    let schedule = schedule_result.map_err(|e| {
        error!("Schedule pipeline failed: {:?}", e);
        e
    })?;

    let week = match week_result {
        Ok(week) => week,
        Err(e) => {
            warn!("Weekly grid unavailable: {}", e);
            Vec::new()
        }
    };

    let feed = WidgetFeed { schedule, week };
    println!(
        "{}",
        serde_json::to_string_pretty(&feed).map_err(Error::from)?
    );

    schedule_handle.shutdown().await?;
    info!("Feed pass complete");

    Ok(())
}
