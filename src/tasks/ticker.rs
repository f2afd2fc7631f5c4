//! Once-per-second tick driving the session counters

use std::{sync::Arc, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::state::SessionTracker;

/// Background task that advances the tracker once per second
pub async fn ticker_task(tracker: Arc<SessionTracker>) {
    info!("Starting ticker task for {}", tracker.user_id());

    let mut interval = interval(Duration::from_secs(1));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // The first tick completes immediately
    interval.tick().await;

    loop {
        interval.tick().await;
        tracker.tick();
        debug!("Tick: {:?}", tracker.view());
    }
}

/// Owner of a running ticker; the task stops when the handle is dropped
#[derive(Debug)]
pub struct TickerHandle {
    handle: JoinHandle<()>,
}

impl TickerHandle {
    pub fn stop(self) {
        drop(self);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawn the ticker for `tracker` on the current runtime
pub fn spawn_ticker(tracker: Arc<SessionTracker>) -> TickerHandle {
    TickerHandle {
        handle: tokio::spawn(ticker_task(tracker)),
    }
}
