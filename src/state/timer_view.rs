//! Read-only timer projection and the facade handed to presentation code

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::{Break, BreakType, SessionTracker, TrackerState, TrackerStatus, WorkSession};
use crate::error::TrackerResult;

/// What a timer display needs, nothing more
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerView {
    pub status: TrackerStatus,
    pub seconds: u64,
    pub break_seconds: u64,
    pub current_break_type: Option<BreakType>,
}

impl TimerView {
    pub fn idle() -> Self {
        Self {
            status: TrackerStatus::Idle,
            seconds: 0,
            break_seconds: 0,
            current_break_type: None,
        }
    }
}

impl From<&TrackerState> for TimerView {
    fn from(state: &TrackerState) -> Self {
        Self {
            status: state.status,
            seconds: state.seconds,
            break_seconds: state.break_seconds,
            current_break_type: state.current_break.as_ref().map(|b| b.break_type),
        }
    }
}

/// Narrow handle over a shared tracker
#[derive(Debug, Clone)]
pub struct Timer {
    tracker: Arc<SessionTracker>,
}

impl Timer {
    pub fn new(tracker: Arc<SessionTracker>) -> Self {
        Self { tracker }
    }

    pub fn tracker(&self) -> &Arc<SessionTracker> {
        &self.tracker
    }

    pub fn view(&self) -> TimerView {
        self.tracker.view()
    }

    pub fn subscribe(&self) -> watch::Receiver<TimerView> {
        self.tracker.subscribe()
    }

    pub async fn start_session(&self) -> TrackerResult<WorkSession> {
        self.tracker.start_session().await
    }

    pub async fn stop_session(&self) -> TrackerResult<WorkSession> {
        self.tracker.stop_session().await
    }

    pub async fn start_break(&self, break_type: BreakType) -> TrackerResult<Break> {
        self.tracker.start_break(break_type).await
    }

    pub async fn end_break(&self) -> TrackerResult<Break> {
        self.tracker.end_break().await
    }

    pub async fn pause(&self) -> TrackerResult<WorkSession> {
        self.tracker.pause().await
    }

    pub async fn resume(&self) -> TrackerResult<WorkSession> {
        self.tracker.resume().await
    }

    /// Adopt the open session the record store holds for this user
    pub async fn restore(&self) -> TrackerResult<Option<WorkSession>> {
        self.tracker.restore().await
    }
}
