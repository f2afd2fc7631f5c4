//! Punch Clock - A state-managed HTTP server for tracking work sessions
//!
//! This library provides the work session and break state machine, the
//! duration arithmetic behind it, and an HTTP surface over a single tracker.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{StoreError, TrackerError};
pub use services::{InMemoryStore, RecordStore, RetryPolicy};
pub use state::{AppState, SessionTracker, Timer, TimerView};
pub use utils::signals::shutdown_signal;
