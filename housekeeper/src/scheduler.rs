//! Daily duty rotation
//!
//! The scheduler owns the tick loop: wait for the next scheduled instant,
//! rotate every stored duty configuration, repeat until told to stop. A
//! failure to save one room's configuration is logged and reported but
//! never blocks the other rooms.

use std::sync::Arc;

use chrono::Utc;
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use shared::{Component, DutyConfig, RoomId, component_debug, component_error, component_info, logging};

use crate::config::TickSchedule;
use crate::core::rotate_duty_cycle;
use crate::error::HouseResult;
use crate::traits::DutyStore;

/// Outcome of one rotation tick
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Rooms whose assignments advanced
    pub rotated: Vec<RoomId>,
    /// Rooms with no duties or no members
    pub unchanged: Vec<RoomId>,
    /// Rooms whose rotated configuration could not be saved
    pub failed: Vec<RoomId>,
}

impl TickReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

enum RoomOutcome {
    Rotated(RoomId),
    Unchanged(RoomId),
    Failed(RoomId),
}

/// Periodic driver for [`rotate_duty_cycle`]
pub struct DutyScheduler<D: DutyStore + 'static> {
    duties: Arc<D>,
    schedule: TickSchedule,
    shutdown_tx: mpsc::Sender<()>,
    shutdown_rx: mpsc::Receiver<()>,
}

impl<D: DutyStore + 'static> DutyScheduler<D> {
    pub fn new(duties: Arc<D>, schedule: TickSchedule) -> Self {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        Self {
            duties,
            schedule,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Sender that stops [`run`](Self::run) when signalled
    pub fn get_shutdown_sender(&self) -> mpsc::Sender<()> {
        self.shutdown_tx.clone()
    }

    /// Rotate every stored configuration once
    ///
    /// Saves run concurrently. Only a failure to list the configurations
    /// fails the tick as a whole.
    pub async fn tick(&self) -> HouseResult<TickReport> {
        let configs = self.duties.list_duty_configs().await?;
        component_debug!(Component::Scheduler, "Rotating {} duty configurations", configs.len());

        let outcomes = join_all(configs.into_iter().map(|config| self.rotate_room(config))).await;

        let mut report = TickReport::default();
        for outcome in outcomes {
            match outcome {
                RoomOutcome::Rotated(room) => report.rotated.push(room),
                RoomOutcome::Unchanged(room) => report.unchanged.push(room),
                RoomOutcome::Failed(room) => report.failed.push(room),
            }
        }

        component_info!(
            Component::Scheduler,
            "🔄 Duty tick: {} rotated, {} unchanged, {} failed",
            report.rotated.len(),
            report.unchanged.len(),
            report.failed.len()
        );
        Ok(report)
    }

    async fn rotate_room(&self, config: DutyConfig) -> RoomOutcome {
        let room = config.room_id;
        if !config.is_active() {
            return RoomOutcome::Unchanged(room);
        }

        let rotated = rotate_duty_cycle(&config);
        match self.duties.save_duty_config(rotated).await {
            Ok(()) => RoomOutcome::Rotated(room),
            Err(e) => {
                component_error!(Component::Scheduler, room = %room, error = %e, "Failed to save rotated duties");
                RoomOutcome::Failed(room)
            }
        }
    }

    /// Tick on schedule until a shutdown signal arrives
    pub async fn run(&mut self) -> HouseResult<()> {
        logging::log_startup(Component::Scheduler, "duty rotation loop");

        loop {
            let delay = self.schedule.delay_until_next(Utc::now());
            component_debug!(Component::Scheduler, "Next duty tick in {}s", delay.as_secs());

            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    if let Err(e) = self.tick().await {
                        logging::log_error(Component::Scheduler, "Duty tick", &e);
                    }
                }
                Some(_) = self.shutdown_rx.recv() => {
                    logging::log_shutdown(Component::Scheduler, "shutdown requested");
                    break;
                }
            }
        }

        Ok(())
    }
}
