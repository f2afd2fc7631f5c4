//! Duration arithmetic for closed intervals
//!
//! These helpers only look at timestamps and never at the live counters,
//! which are advanced by the ticker task instead.

use chrono::{DateTime, Utc};

/// Whole seconds between `start` and `end`, truncated toward zero.
///
/// An open interval (`end == None`) yields 0. No clamping is applied, so an
/// `end` before `start` produces a negative value and callers pick the policy.
pub fn compute_elapsed_seconds(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> i64 {
    match end {
        Some(end) => (end - start).num_seconds(),
        None => 0,
    }
}

/// Net work minutes: whole elapsed minutes minus break minutes, never negative
pub fn compute_net_work_minutes(total_elapsed_seconds: i64, break_minutes: i64) -> i64 {
    let worked_minutes = total_elapsed_seconds.div_euclid(60);
    (worked_minutes - break_minutes).max(0)
}

/// Convert the elapsed seconds of a break to whole minutes (floored)
pub fn break_minutes_from_seconds(seconds: i64) -> i64 {
    seconds.max(0) / 60
}

/// Format a second counter as `HH:MM:SS` for display
pub fn format_clock(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}
