use crate::config::Config;
use crate::error::{fetch_error, WidgetResult};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::api::ScheduleApi;
use super::models::AggregateResult;
use super::pipeline;

/// The schedule actor that processes messages
pub struct ScheduleActor {
    config: Arc<Config>,
    api: Arc<dyn ScheduleApi>,
    cancel: CancellationToken,
    command_rx: mpsc::Receiver<ScheduleCommand>,
}

/// Commands that can be sent to the schedule actor
pub enum ScheduleCommand {
    GetSchedule(mpsc::Sender<WidgetResult<AggregateResult>>),
    Shutdown,
}

/// Handle for communicating with the schedule actor
#[derive(Clone)]
pub struct ScheduleActorHandle {
    command_tx: mpsc::Sender<ScheduleCommand>,
}

impl ScheduleActorHandle {
    /// Run one pipeline pass and return the aggregated schedule
    pub async fn get_schedule(&self) -> WidgetResult<AggregateResult> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(ScheduleCommand::GetSchedule(response_tx))
            .await
            .map_err(|e| fetch_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| fetch_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> WidgetResult<()> {
        let _ = self.command_tx.send(ScheduleCommand::Shutdown).await;
        Ok(())
    }
}

impl ScheduleActor {
    /// Create a new actor and return its handle
    pub fn new(
        config: Arc<Config>,
        api: Arc<dyn ScheduleApi>,
        cancel: CancellationToken,
    ) -> (Self, ScheduleActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            config,
            api,
            cancel,
            command_rx,
        };

        let handle = ScheduleActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Schedule actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                ScheduleCommand::GetSchedule(response_tx) => {
                    let result =
                        pipeline::run(self.api.as_ref(), &self.config, &self.cancel).await;
                    let _ = response_tx.send(result).await;
                }
                ScheduleCommand::Shutdown => {
                    info!("Schedule actor shutting down");
                    break;
                }
            }
        }

        info!("Schedule actor shut down");
    }
}
