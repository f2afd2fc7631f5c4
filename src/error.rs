//! Error types for session tracking and persistence

use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

use crate::state::TrackerStatus;

/// Failure reported by a record store
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Uuid },

    #[error("record store unavailable: {0}")]
    Unavailable(String),

    #[error("record store call timed out after {0:?}")]
    Timeout(Duration),

    #[error("record rejected: {0}")]
    Rejected(String),
}

/// Failure of a tracker transition
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackerError {
    #[error("a work session is already active")]
    SessionAlreadyActive,

    #[error("no work session is active")]
    NoActiveSession,

    #[error("a break is already in progress")]
    BreakAlreadyOpen,

    #[error("no break is in progress")]
    NoOpenBreak,

    #[error("cannot {action} while {from}")]
    InvalidTransition {
        from: TrackerStatus,
        action: &'static str,
    },

    #[error("record {0} is already closed")]
    AlreadyClosed(Uuid),

    #[error("persistence failed: {0}")]
    Persistence(#[from] StoreError),
}

impl TrackerError {
    /// Rejected before any state was touched
    pub fn is_precondition(&self) -> bool {
        !matches!(self, TrackerError::Persistence(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
pub type TrackerResult<T> = Result<T, TrackerError>;
