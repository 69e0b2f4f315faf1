//! Periodic inactivity sweep.

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};

use crate::usecase::SweepInactiveUseCase;

/// Spawns the cleanup timer. It stops when `shutdown` flips to true or its sender is dropped.
pub fn spawn_sweeper(
    usecase: Arc<SweepInactiveUseCase>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick completes immediately
        ticker.tick().await;

        tracing::info!("Cleanup sweeper started (every {:?})", period);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = usecase.execute().await;
                    tracing::debug!("Sweep tick finished, removed {}", removed.len());
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        tracing::info!("Cleanup sweeper stopped");
    })
}
