//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{Break, BreakType, SyncState, TimerView, WorkSession};

/// API response structure for transition endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<WorkSession>,
    #[serde(rename = "break", skip_serializing_if = "Option::is_none")]
    pub break_record: Option<Break>,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: &str, message: String, timer: TimerView) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            timer,
            session: None,
            break_record: None,
        }
    }

    /// Create a success response
    pub fn ok(message: String, timer: TimerView) -> Self {
        Self::new("ok", message, timer)
    }

    /// Create an error response
    pub fn error(message: String, timer: TimerView) -> Self {
        Self::new("error", message, timer)
    }

    pub fn with_session(mut self, session: WorkSession) -> Self {
        self.session = Some(session);
        self
    }

    pub fn with_break(mut self, record: Break) -> Self {
        self.break_record = Some(record);
        self
    }
}

/// Request body for POST /break/start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartBreakRequest {
    pub break_type: BreakType,
}

/// Status response with timer and session information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub user: String,
    pub timer: TimerView,
    /// Worked time as `HH:MM:SS`
    pub elapsed: String,
    pub break_elapsed: String,
    pub current_session: Option<WorkSession>,
    pub current_break: Option<Break>,
    pub last_completed: Option<WorkSession>,
    pub sync: SyncState,
    pub expected_daily_minutes: i64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Session lookup response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session: WorkSession,
    pub breaks: Vec<Break>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
