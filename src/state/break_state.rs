//! Break record and category

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TrackerError;
use crate::utils::{break_minutes_from_seconds, compute_elapsed_seconds};

/// Break category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakType {
    Lunch,
    Short,
    Personal,
}

impl BreakType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BreakType::Lunch => "lunch",
            BreakType::Short => "short",
            BreakType::Personal => "personal",
        }
    }
}

impl fmt::Display for BreakType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BreakType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lunch" => Ok(BreakType::Lunch),
            "short" => Ok(BreakType::Short),
            "personal" => Ok(BreakType::Personal),
            other => Err(format!("unknown break type: {}", other)),
        }
    }
}

/// A sub-period of a work session during which work is paused
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Break {
    pub id: Uuid,
    pub session_id: Uuid,
    pub break_type: BreakType,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// Whole minutes, floored; set on close
    pub duration_minutes: Option<i64>,
}

impl Break {
    pub fn start(session_id: Uuid, break_type: BreakType, start_time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            break_type,
            start_time,
            end_time: None,
            duration_minutes: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// Seconds spent on this break as of `now` (or its end, once closed)
    pub fn elapsed_seconds_at(&self, now: DateTime<Utc>) -> i64 {
        compute_elapsed_seconds(self.start_time, Some(self.end_time.unwrap_or(now)))
    }

    /// Close the break at `end_time`, returning its duration in minutes
    pub fn close(&mut self, end_time: DateTime<Utc>) -> Result<i64, TrackerError> {
        if !self.is_open() {
            return Err(TrackerError::AlreadyClosed(self.id));
        }

        self.end_time = Some(end_time);
        let minutes = break_minutes_from_seconds(compute_elapsed_seconds(
            self.start_time,
            self.end_time,
        ));
        self.duration_minutes = Some(minutes);
        Ok(minutes)
    }
}
