//! Periodic snapshot broadcaster.
//!
//! On a fixed schedule: build one process-instrument snapshot, serialize it
//! once, and hand it to the registry for fan-out. Delivery failures are the
//! registry's concern (eviction); a serialization failure aborts that tick
//! only. The next tick always proceeds with fresh data.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{interval, MissedTickBehavior};

use crate::config::Config;
use crate::generator;
use crate::registry::Registry;

pub async fn run(config: Config, registry: Arc<Registry>, mut shutdown: broadcast::Receiver<()>) {
    let mut push_interval = interval(Duration::from_secs(config.push_interval_secs));
    // Ticks must not overlap; if one runs long, the next fires after a full
    // period rather than immediately.
    push_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    log::info!(
        "Broadcaster started, pushing snapshots every {}s",
        config.push_interval_secs
    );

    loop {
        tokio::select! {
            _ = shutdown.recv() => {
                log::info!("Broadcaster received shutdown signal.");
                break;
            }
            _ = push_interval.tick() => {
                tick(&registry);
            }
        }
    }
}

/// One broadcast cycle: generate, serialize once, fan out.
fn tick(registry: &Registry) {
    let snapshot = generator::process_snapshot();
    match serde_json::to_string(&snapshot) {
        Ok(json) => registry.broadcast(Arc::from(json)),
        Err(e) => {
            // No partial payload is ever sent; the schedule itself is the
            // retry mechanism.
            log::error!("Snapshot serialization failed, skipping tick: {}", e);
        }
    }
}
