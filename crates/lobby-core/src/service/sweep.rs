//! Periodic eviction of stale participants.
//!
//! `SweepScheduler` owns a background task that calls
//! [`PresenceService::sweep`] once per period until its cancellation token
//! fires. A failed pass is logged and the loop keeps going.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::presence::PresenceService;
use crate::repository::message::MessageRepository;
use crate::repository::participant::ParticipantRepository;

/// Drives the presence sweep on a fixed period.
pub struct SweepScheduler<P: ParticipantRepository, M: MessageRepository> {
    presence: Arc<PresenceService<P, M>>,
    period: Duration,
}

impl<P, M> SweepScheduler<P, M>
where
    P: ParticipantRepository + 'static,
    M: MessageRepository + 'static,
{
    pub fn new(presence: Arc<PresenceService<P, M>>, period: Duration) -> Self {
        Self { presence, period }
    }

    /// Start the sweep loop. The first pass runs one period after the call.
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(cancel).await })
    }

    async fn run(self, cancel: CancellationToken) {
        let Some(start) = Instant::now().checked_add(self.period) else {
            tracing::error!(period = ?self.period, "sweep period out of range, sweep disabled");
            return;
        };
        let mut ticker = tokio::time::interval_at(start, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(period_secs = self.period.as_secs_f64(), "presence sweep started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => self.tick().await,
            }
        }

        tracing::info!("presence sweep stopped");
    }

    async fn tick(&self) {
        match self.presence.sweep(Utc::now()).await {
            Ok(report) if report.evicted.is_empty() => {
                tracing::debug!(scanned = report.scanned, "sweep pass: nothing stale");
            }
            Ok(report) => {
                tracing::info!(
                    scanned = report.scanned,
                    evicted = report.evicted.len(),
                    names = ?report.evicted,
                    "sweep pass evicted participants"
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "sweep pass failed, retrying next period");
            }
        }
    }
}
