//! Utility functions module
//!
//! Duration arithmetic, the clock abstraction and signal handling.

pub mod clock;
pub mod duration;
pub mod signals;

// Re-export main functions
pub use clock::{Clock, ManualClock, SystemClock};
pub use duration::{
    break_minutes_from_seconds, compute_elapsed_seconds, compute_net_work_minutes, format_clock,
};
pub use signals::shutdown_signal;
