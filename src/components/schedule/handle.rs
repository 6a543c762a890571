use crate::config::Config;
use crate::error::WidgetResult;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::actor::{ScheduleActor, ScheduleActorHandle};
use super::api::ScheduleApi;
use super::client::LibCalClient;
use super::models::AggregateResult;

/// Handle for interacting with the schedule actor
#[derive(Clone)]
pub struct ScheduleHandle {
    actor_handle: ScheduleActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl ScheduleHandle {
    /// Create a new ScheduleHandle backed by the live LibCal client
    pub fn new(config: Arc<Config>, cancel: CancellationToken) -> Self {
        let api: Arc<dyn ScheduleApi> = Arc::new(LibCalClient::new(Arc::clone(&config)));
        Self::with_api(config, api, cancel)
    }

    /// Create a handle over any API implementation and spawn the actor
    pub fn with_api(
        config: Arc<Config>,
        api: Arc<dyn ScheduleApi>,
        cancel: CancellationToken,
    ) -> Self {
        let (mut actor, handle) = ScheduleActor::new(config, api, cancel);

        // Spawn a task to run the actor
        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Run one pipeline pass and return the aggregated schedule
    pub async fn get_schedule(&self) -> WidgetResult<AggregateResult> {
        self.actor_handle.get_schedule().await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> WidgetResult<()> {
        self.actor_handle.shutdown().await
    }
}
