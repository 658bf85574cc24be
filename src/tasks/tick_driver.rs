//! Tick driver background task

use std::{sync::Arc, time::Instant};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::{state::AppState, tick::TickSource};

/// Background task delivering a tick to every window at the configured cadence.
/// Wall time comes from the same clock that stamps host operations.
pub async fn tick_driver_task(state: Arc<AppState>) {
    let cadence = state.config.tick_interval();
    info!("Starting tick driver every {:?}", cadence);

    let mut interval = interval(cadence);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately
    interval.tick().await;

    let mut source = TickSource::new(Arc::clone(&state.clock), Instant::now());

    loop {
        interval.tick().await;

        let tick = source.next(Instant::now());
        if tick.delta > cadence * 2 {
            warn!(
                "Tick gap of {:?} (expected {:?}), host was likely suspended",
                tick.delta, cadence
            );
        }

        match state.deliver_tick(&tick) {
            Ok(produced) => {
                for notification in produced {
                    info!("Tick produced {}", notification.name());
                }
            }
            Err(e) => error!("Failed to deliver tick: {}", e),
        }
    }
}
