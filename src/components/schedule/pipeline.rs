use crate::config::Config;
use crate::error::{Error, WidgetResult};
use futures::future::join_all;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::api::ScheduleApi;
use super::models::{AggregateResult, Event, EventsByLocation, HoursWindow};

/// Run one full pipeline pass: token exchange, then the event fan-out and the
/// hours fetch concurrently, then aggregation.
///
/// Only the token exchange is fatal. Per-location failures, timeouts included,
/// are collected as typed outcomes and resolved by [`aggregate`]; one slow or
/// failing location never blocks or fails the others.
pub async fn run(
    api: &dyn ScheduleApi,
    config: &Config,
    cancel: &CancellationToken,
) -> WidgetResult<AggregateResult> {
    let deadline = Duration::from_secs(config.request_timeout_secs);

    let token = guarded(api.fetch_token(), deadline, cancel, "token exchange").await?;
    debug!("Token exchange succeeded");

    let token = &token;
    let event_futures = config.calendars.iter().map(|query| async move {
        let what = format!("events for {}", query.location);
        let outcome = guarded(
            api.fetch_location_events(token, query),
            deadline,
            cancel,
            &what,
        )
        .await;
        (query.location.clone(), outcome)
    });

    let hours_future = guarded(
        api.fetch_hours(token, config.hours_location_id),
        deadline,
        cancel,
        "operating hours",
    );

    let (event_outcomes, hours_outcome) = tokio::join!(join_all(event_futures), hours_future);

    Ok(aggregate(event_outcomes, hours_outcome))
}

/// Package per-task outcomes into the final result.
///
/// Display policy lives here: a failed location is logged and omitted from
/// the map, and a failed hours fetch becomes `Unknown` rather than `Closed`.
pub fn aggregate(
    event_outcomes: Vec<(String, WidgetResult<Vec<Event>>)>,
    hours_outcome: WidgetResult<HoursWindow>,
) -> AggregateResult {
    let mut events = EventsByLocation::new();
    for (location, outcome) in event_outcomes {
        match outcome {
            Ok(list) => {
                events.insert(location, list);
            }
            Err(e) => warn!("Dropping location '{}' from the feed: {}", location, e),
        }
    }

    let hours = match hours_outcome {
        Ok(window) => window,
        Err(e) => {
            warn!("Operating hours unavailable: {}", e);
            HoursWindow::Unknown
        }
    };

    AggregateResult { events, hours }
}

/// Wrap a fetch with the per-request deadline and the pipeline cancellation
/// token, so a hung request cannot stall the aggregate.
pub(crate) async fn guarded<T>(
    fut: impl Future<Output = WidgetResult<T>>,
    deadline: Duration,
    cancel: &CancellationToken,
    what: &str,
) -> WidgetResult<T> {
    tokio::select! {
        _ = cancel.cancelled() => Err(Error::Cancelled(what.to_string())),
        result = tokio::time::timeout(deadline, fut) => match result {
            Ok(inner) => inner,
            Err(_) => Err(Error::Timeout(what.to_string())),
        }
    }
}
