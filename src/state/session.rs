//! Work session record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TrackerError;
use crate::utils::{compute_elapsed_seconds, compute_net_work_minutes};

/// Lifecycle status of a stored work session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Paused,
    Break,
    Completed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Paused => "paused",
            SessionStatus::Break => "break",
            SessionStatus::Completed => "completed",
        }
    }

    /// Anything but `completed` counts as the user's active session
    pub fn is_open(&self) -> bool {
        !matches!(self, SessionStatus::Completed)
    }
}

/// One work period for a user, bounded by start and stop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkSession {
    pub id: Uuid,
    pub user_id: String,
    pub start_time: DateTime<Utc>,
    /// `None` while the session is running
    pub end_time: Option<DateTime<Utc>>,
    pub total_break_minutes: i64,
    /// Only set once the session is closed
    pub net_work_minutes: Option<i64>,
    /// Seconds spent paused in finished pause intervals
    #[serde(default)]
    pub total_pause_seconds: i64,
    /// Start of the pause in progress
    #[serde(default)]
    pub paused_at: Option<DateTime<Utc>>,
    pub status: SessionStatus,
}

impl WorkSession {
    /// Create a fresh active session starting at `start_time`
    pub fn start(user_id: impl Into<String>, start_time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            start_time,
            end_time: None,
            total_break_minutes: 0,
            net_work_minutes: None,
            total_pause_seconds: 0,
            paused_at: None,
            status: SessionStatus::Active,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.end_time.is_some()
    }

    /// Wall-clock seconds between start and end (0 while open)
    pub fn elapsed_seconds(&self) -> i64 {
        compute_elapsed_seconds(self.start_time, self.end_time)
    }

    /// Paused seconds up to `now`, including a pause still in progress
    pub fn paused_seconds_at(&self, now: DateTime<Utc>) -> i64 {
        let running = self
            .paused_at
            .map(|since| compute_elapsed_seconds(since, Some(now)).max(0))
            .unwrap_or(0);
        self.total_pause_seconds + running
    }

    /// Begin a pause at `now`; a pause already in progress is kept
    pub fn pause(&mut self, now: DateTime<Utc>) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
        self.status = SessionStatus::Paused;
    }

    /// End the pause in progress, adding its length to the pause total
    pub fn resume(&mut self, now: DateTime<Utc>) {
        self.settle_pause(now);
        self.status = SessionStatus::Active;
    }

    fn settle_pause(&mut self, now: DateTime<Utc>) {
        self.total_pause_seconds = self.paused_seconds_at(now);
        self.paused_at = None;
    }

    /// Close the session at `end_time` and compute its net work minutes.
    ///
    /// Paused time is not work time. An end time is never overwritten.
    pub fn close(&mut self, end_time: DateTime<Utc>) -> Result<(), TrackerError> {
        if self.is_closed() {
            return Err(TrackerError::AlreadyClosed(self.id));
        }

        self.settle_pause(end_time);
        self.end_time = Some(end_time);
        self.net_work_minutes = Some(compute_net_work_minutes(
            self.elapsed_seconds() - self.total_pause_seconds,
            self.total_break_minutes,
        ));
        self.status = SessionStatus::Completed;
        Ok(())
    }
}
