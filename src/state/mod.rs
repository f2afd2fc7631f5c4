//! State management module
//!
//! Session and break records, the session tracker state machine, the timer
//! projection and the shared application state.

pub mod app_state;
pub mod break_state;
pub mod session;
pub mod timer_view;
pub mod tracker;

// Re-export main types
pub use app_state::AppState;
pub use break_state::{Break, BreakType};
pub use session::{SessionStatus, WorkSession};
pub use timer_view::{Timer, TimerView};
pub use tracker::{SessionTracker, SyncState, TrackerState, TrackerStatus};
