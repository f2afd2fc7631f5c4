//! Session tracker: the work session / break state machine
//!
//! Transitions follow a two-phase update. The local state is changed first
//! (marked `pending`), the change is then written to the record store, and
//! the result is reconciled: `commit` on success, `rollback` to the
//! pre-transition snapshot on failure.

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::{Break, BreakType, SessionStatus, TimerView, WorkSession};
use crate::error::{StoreError, TrackerError, TrackerResult};
use crate::services::{persist_with_retry, RecordStore, RetryPolicy};
use crate::utils::{compute_elapsed_seconds, Clock, SystemClock};

/// Status of the tracker as seen by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerStatus {
    Idle,
    Running,
    Paused,
    Break,
    Completed,
}

impl TrackerStatus {
    /// A session is in progress (running, paused or on a break)
    pub fn has_open_session(&self) -> bool {
        matches!(
            self,
            TrackerStatus::Running | TrackerStatus::Paused | TrackerStatus::Break
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackerStatus::Idle => "idle",
            TrackerStatus::Running => "running",
            TrackerStatus::Paused => "paused",
            TrackerStatus::Break => "break",
            TrackerStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TrackerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reconciliation state between local state and the record store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SyncState {
    Synced,
    Pending { action: String },
    Failed { action: String, error: String },
}

/// Everything the tracker knows locally
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerState {
    pub status: TrackerStatus,
    pub current_session: Option<WorkSession>,
    pub current_break: Option<Break>,
    /// Seconds worked in the current session, advanced by ticks
    pub seconds: u64,
    /// Seconds spent in the current break, advanced by ticks
    pub break_seconds: u64,
    pub sync: SyncState,
    /// The most recently stopped session
    pub last_completed: Option<WorkSession>,
    /// Ticks received while a transition waits on the record store
    #[serde(skip)]
    ticks_while_pending: u64,
}

impl TrackerState {
    pub fn new() -> Self {
        Self {
            status: TrackerStatus::Idle,
            current_session: None,
            current_break: None,
            seconds: 0,
            break_seconds: 0,
            sync: SyncState::Synced,
            last_completed: None,
            ticks_while_pending: 0,
        }
    }

    /// Advance the counter that matches the status; returns whether one moved
    pub fn tick(&mut self) -> bool {
        if matches!(self.sync, SyncState::Pending { .. }) {
            self.ticks_while_pending += 1;
        }
        self.advance(1)
    }

    fn advance(&mut self, seconds: u64) -> bool {
        match self.status {
            TrackerStatus::Running => {
                self.seconds += seconds;
                true
            }
            TrackerStatus::Break => {
                self.break_seconds += seconds;
                true
            }
            TrackerStatus::Idle | TrackerStatus::Paused | TrackerStatus::Completed => false,
        }
    }

    fn open_session(&self) -> TrackerResult<WorkSession> {
        if !self.status.has_open_session() {
            return Err(TrackerError::NoActiveSession);
        }
        self.current_session
            .clone()
            .ok_or(TrackerError::NoActiveSession)
    }
}

impl Default for TrackerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns the session state for one user and drives every transition
pub struct SessionTracker {
    user_id: String,
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
    retry: RetryPolicy,
    state: Mutex<TrackerState>,
    /// Serializes transitions across their persistence awaits
    transitions: tokio::sync::Mutex<()>,
    view_tx: watch::Sender<TimerView>,
    /// Keep the receiver alive to prevent channel closure
    _view_rx: watch::Receiver<TimerView>,
}

impl fmt::Debug for SessionTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTracker")
            .field("user_id", &self.user_id)
            .field("retry", &self.retry)
            .field("state", &self.snapshot())
            .finish()
    }
}

impl SessionTracker {
    /// Create an idle tracker using the system clock and the default retry policy
    pub fn new(user_id: impl Into<String>, store: Arc<dyn RecordStore>) -> Self {
        let (view_tx, view_rx) = watch::channel(TimerView::idle());

        Self {
            user_id: user_id.into(),
            store,
            clock: Arc::new(SystemClock),
            retry: RetryPolicy::default(),
            state: Mutex::new(TrackerState::new()),
            transitions: tokio::sync::Mutex::new(()),
            view_tx,
            _view_rx: view_rx,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Copy of the current local state
    pub fn snapshot(&self) -> TrackerState {
        self.lock_state().clone()
    }

    pub fn view(&self) -> TimerView {
        TimerView::from(&*self.lock_state())
    }

    /// Receive a new view on every tick and transition
    pub fn subscribe(&self) -> watch::Receiver<TimerView> {
        self.view_tx.subscribe()
    }

    /// Advance the active counter by one second
    pub fn tick(&self) {
        let mut state = self.lock_state();
        if state.tick() {
            let view = TimerView::from(&*state);
            drop(state);
            self.publish(view);
        }
    }

    /// Start a new work session
    pub async fn start_session(&self) -> TrackerResult<WorkSession> {
        let _gate = self.transitions.lock().await;
        let action = "start session";

        let already_open = self.lock_state().status.has_open_session();
        if already_open {
            warn!("Rejected {}: a session is already running", action);
            return Err(TrackerError::SessionAlreadyActive);
        }

        let existing = persist_with_retry(&self.retry, "active session lookup", || {
            self.store.active_session_for(&self.user_id)
        })
        .await?;
        if let Some(existing) = existing {
            warn!(
                "Rejected {}: session {} is still open in the record store, restore it first",
                action, existing.id
            );
            return Err(TrackerError::SessionAlreadyActive);
        }

        let now = self.clock.now();
        let user_id = self.user_id.clone();
        let (snapshot, session) = self.apply(action, |state| {
            if state.status.has_open_session() {
                return Err(TrackerError::SessionAlreadyActive);
            }
            let session = WorkSession::start(user_id, now);
            state.status = TrackerStatus::Running;
            state.current_session = Some(session.clone());
            state.current_break = None;
            state.seconds = 0;
            state.break_seconds = 0;
            Ok(session)
        })?;

        let result =
            persist_with_retry(&self.retry, action, || self.store.insert_session(&session)).await;
        match result {
            Ok(stored) => {
                self.commit(action);
                info!("Session {} started for {}", stored.id, self.user_id);
                Ok(stored)
            }
            Err(e) => {
                self.rollback(snapshot, action, &e);
                Err(e.into())
            }
        }
    }

    /// Stop the current session
    ///
    /// An open break is closed at the same instant and its minutes are
    /// counted before the net work minutes are computed.
    pub async fn stop_session(&self) -> TrackerResult<WorkSession> {
        let _gate = self.transitions.lock().await;
        let action = "stop session";
        let now = self.clock.now();

        let (snapshot, (session, closed_break)) = self.apply(action, |state| {
            let mut session = state.open_session()?;

            let mut closed_break = None;
            if let Some(mut open) = state.current_break.take() {
                let minutes = open.close(now)?;
                session.total_break_minutes += minutes;
                debug!("Closed break {} ({} min) while stopping", open.id, minutes);
                closed_break = Some(open);
            }

            session.close(now)?;
            state.status = TrackerStatus::Completed;
            state.current_session = None;
            state.last_completed = Some(session.clone());
            Ok((session, closed_break))
        })?;

        if let Some(closed) = &closed_break {
            if let Err(e) =
                persist_with_retry(&self.retry, "close break", || self.store.update_break(closed))
                    .await
            {
                self.rollback(snapshot, action, &e);
                return Err(e.into());
            }
        }

        let result =
            persist_with_retry(&self.retry, action, || self.store.update_session(&session)).await;
        match result {
            Ok(stored) => {
                self.commit(action);
                info!(
                    "Session {} stopped: {} net minutes, {} break minutes",
                    stored.id,
                    stored.net_work_minutes.unwrap_or(0),
                    stored.total_break_minutes
                );
                Ok(stored)
            }
            Err(e) => {
                if closed_break.is_some() {
                    error!(
                        "Session {} not closed remotely but its break was; record store diverges",
                        session.id
                    );
                }
                self.rollback(snapshot, action, &e);
                Err(e.into())
            }
        }
    }

    /// Start a break of the given category
    pub async fn start_break(&self, break_type: BreakType) -> TrackerResult<Break> {
        let _gate = self.transitions.lock().await;
        let action = "start break";
        let now = self.clock.now();

        let (snapshot, (session, opened)) = self.apply(action, |state| {
            match state.status {
                TrackerStatus::Running => {}
                TrackerStatus::Break => return Err(TrackerError::BreakAlreadyOpen),
                TrackerStatus::Paused => {
                    return Err(TrackerError::InvalidTransition {
                        from: state.status,
                        action: "start a break",
                    })
                }
                TrackerStatus::Idle | TrackerStatus::Completed => {
                    return Err(TrackerError::NoActiveSession)
                }
            }
            if state.current_break.is_some() {
                return Err(TrackerError::BreakAlreadyOpen);
            }

            let mut session = state.open_session()?;
            let opened = Break::start(session.id, break_type, now);
            session.status = SessionStatus::Break;

            state.status = TrackerStatus::Break;
            state.current_session = Some(session.clone());
            state.current_break = Some(opened.clone());
            state.break_seconds = 0;
            Ok((session, opened))
        })?;

        self.persist_break_and_session(action, snapshot, &opened, &session, true)
            .await?;
        info!("Break {} ({}) started in session {}", opened.id, break_type, session.id);
        Ok(opened)
    }

    /// End the break in progress, returning the closed break
    pub async fn end_break(&self) -> TrackerResult<Break> {
        let _gate = self.transitions.lock().await;
        let action = "end break";
        let now = self.clock.now();

        let (snapshot, (session, closed)) = self.apply(action, |state| {
            if state.status != TrackerStatus::Break {
                return Err(TrackerError::NoOpenBreak);
            }
            let mut closed = state.current_break.clone().ok_or(TrackerError::NoOpenBreak)?;
            let mut session = state.open_session()?;

            let minutes = closed.close(now)?;
            session.total_break_minutes += minutes;
            session.status = SessionStatus::Active;

            state.status = TrackerStatus::Running;
            state.current_session = Some(session.clone());
            state.current_break = None;
            Ok((session, closed))
        })?;

        self.persist_break_and_session(action, snapshot, &closed, &session, false)
            .await?;
        info!(
            "Break {} ended after {} min, session total {} min",
            closed.id,
            closed.duration_minutes.unwrap_or(0),
            session.total_break_minutes
        );
        Ok(closed)
    }

    /// Pause a running session; no counter advances while paused
    pub async fn pause(&self) -> TrackerResult<WorkSession> {
        self.set_paused(true).await
    }

    /// Resume a paused session
    pub async fn resume(&self) -> TrackerResult<WorkSession> {
        self.set_paused(false).await
    }

    async fn set_paused(&self, paused: bool) -> TrackerResult<WorkSession> {
        let _gate = self.transitions.lock().await;
        let (action, from, to) = if paused {
            ("pause", TrackerStatus::Running, TrackerStatus::Paused)
        } else {
            ("resume", TrackerStatus::Paused, TrackerStatus::Running)
        };
        let now = self.clock.now();

        let (snapshot, session) = self.apply(action, |state| {
            let mut session = state.open_session()?;
            if state.status != from {
                return Err(TrackerError::InvalidTransition {
                    from: state.status,
                    action,
                });
            }
            if paused {
                session.pause(now);
            } else {
                session.resume(now);
            }
            state.status = to;
            state.current_session = Some(session.clone());
            Ok(session)
        })?;

        let result =
            persist_with_retry(&self.retry, action, || self.store.update_session(&session)).await;
        match result {
            Ok(stored) => {
                self.commit(action);
                info!("Session {} is now {}", stored.id, to);
                Ok(stored)
            }
            Err(e) => {
                self.rollback(snapshot, action, &e);
                Err(e.into())
            }
        }
    }

    /// Rebuild local state from the user's open session in the record store
    ///
    /// Used when the tracker is mounted, and to adopt a session the record
    /// store holds but the tracker lost. Worked seconds are derived from
    /// wall-clock time minus recorded break and pause time, clamped at zero.
    pub async fn restore(&self) -> TrackerResult<Option<WorkSession>> {
        let _gate = self.transitions.lock().await;

        {
            let state = self.lock_state();
            if state.status.has_open_session() {
                debug!("Tracker already holds an open session, skipping restore");
                return Ok(state.current_session.clone());
            }
        }

        let found = persist_with_retry(&self.retry, "active session lookup", || {
            self.store.active_session_for(&self.user_id)
        })
        .await?;
        let Some(session) = found else {
            debug!("No open session to restore for {}", self.user_id);
            return Ok(None);
        };

        let breaks = persist_with_retry(&self.retry, "break lookup", || {
            self.store.breaks_for_session(session.id)
        })
        .await?;
        let open_break = breaks.into_iter().find(|b| b.is_open());

        let now = self.clock.now();
        let elapsed = compute_elapsed_seconds(session.start_time, Some(now));
        let open_break_seconds = open_break
            .as_ref()
            .map(|b| b.elapsed_seconds_at(now).max(0))
            .unwrap_or(0);
        let worked = (elapsed
            - session.total_break_minutes * 60
            - open_break_seconds
            - session.paused_seconds_at(now))
        .max(0);

        let status = match (&open_break, session.status) {
            (Some(_), _) => TrackerStatus::Break,
            (None, SessionStatus::Paused) => TrackerStatus::Paused,
            (None, SessionStatus::Break) => {
                warn!("Session {} is marked on break but has no open break", session.id);
                TrackerStatus::Running
            }
            (None, _) => TrackerStatus::Running,
        };

        let view = {
            let mut state = self.lock_state();
            state.status = status;
            state.current_session = Some(session.clone());
            state.current_break = open_break;
            state.seconds = worked as u64;
            state.break_seconds = open_break_seconds as u64;
            state.sync = SyncState::Synced;
            TimerView::from(&*state)
        };
        self.publish(view);

        info!("Restored session {} as {} ({}s worked)", session.id, status, worked);
        Ok(Some(session))
    }

    /// Point lookup of a session with its breaks
    pub async fn session_with_breaks(
        &self,
        id: Uuid,
    ) -> TrackerResult<Option<(WorkSession, Vec<Break>)>> {
        let session =
            persist_with_retry(&self.retry, "session lookup", || self.store.get_session(id))
                .await?;
        let Some(session) = session else {
            return Ok(None);
        };
        let breaks = persist_with_retry(&self.retry, "break lookup", || {
            self.store.breaks_for_session(id)
        })
        .await?;
        Ok(Some((session, breaks)))
    }

    /// Write a break and its session; the break goes first
    async fn persist_break_and_session(
        &self,
        action: &str,
        snapshot: TrackerState,
        record: &Break,
        session: &WorkSession,
        insert: bool,
    ) -> TrackerResult<()> {
        let break_result = if insert {
            persist_with_retry(&self.retry, action, || self.store.insert_break(record)).await
        } else {
            persist_with_retry(&self.retry, action, || self.store.update_break(record)).await
        };
        if let Err(e) = break_result {
            self.rollback(snapshot, action, &e);
            return Err(e.into());
        }

        let result =
            persist_with_retry(&self.retry, action, || self.store.update_session(session)).await;
        match result {
            Ok(_) => {
                self.commit(action);
                Ok(())
            }
            Err(e) => {
                error!(
                    "Break {} written but session {} was not; record store diverges",
                    record.id, session.id
                );
                self.rollback(snapshot, action, &e);
                Err(e.into())
            }
        }
    }

    /// Apply a transition to a draft and swap it in only if it succeeds.
    ///
    /// Returns the state as it was before, for rollback.
    fn apply<R>(
        &self,
        action: &str,
        transition: impl FnOnce(&mut TrackerState) -> TrackerResult<R>,
    ) -> TrackerResult<(TrackerState, R)> {
        let mut state = self.lock_state();
        let mut draft = state.clone();
        let output = match transition(&mut draft) {
            Ok(output) => output,
            Err(e) => {
                warn!("Rejected {} while {}: {}", action, state.status, e);
                return Err(e);
            }
        };
        draft.sync = SyncState::Pending {
            action: action.to_string(),
        };
        draft.ticks_while_pending = 0;
        let snapshot = std::mem::replace(&mut *state, draft);
        let view = TimerView::from(&*state);
        drop(state);

        self.publish(view);
        Ok((snapshot, output))
    }

    /// Mark the pending transition as confirmed by the record store
    fn commit(&self, action: &str) {
        let mut state = self.lock_state();
        state.sync = SyncState::Synced;
        state.ticks_while_pending = 0;
        debug!("Committed {}", action);
    }

    /// Restore the pre-transition state after a failed write
    ///
    /// Seconds that ticked by while the write was retried are credited to
    /// the counter of the restored status.
    fn rollback(&self, snapshot: TrackerState, action: &str, cause: &StoreError) {
        warn!("Rolling back {}: {}", action, cause);
        let view = {
            let mut state = self.lock_state();
            let missed = state.ticks_while_pending;
            *state = snapshot;
            state.ticks_while_pending = 0;
            if missed > 0 && state.advance(missed) {
                debug!("Credited {}s elapsed during {} to {}", missed, action, state.status);
            }
            state.sync = SyncState::Failed {
                action: action.to_string(),
                error: cause.to_string(),
            };
            TimerView::from(&*state)
        };
        self.publish(view);
    }

    fn publish(&self, view: TimerView) {
        if let Err(e) = self.view_tx.send(view) {
            warn!("Failed to send timer update: {}", e);
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::InMemoryStore;
    use crate::utils::ManualClock;
    use chrono::{TimeZone, Utc};

    fn tracker() -> (SessionTracker, Arc<InMemoryStore>, Arc<ManualClock>) {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap(),
        ));
        let tracker = SessionTracker::new("dana", store.clone())
            .with_clock(clock.clone())
            .with_retry(RetryPolicy::no_retry());
        (tracker, store, clock)
    }

    #[test]
    fn tick_advances_one_counter_at_a_time() {
        let mut state = TrackerState::new();
        assert!(!state.tick());

        state.status = TrackerStatus::Running;
        state.tick();
        assert_eq!((state.seconds, state.break_seconds), (1, 0));

        state.status = TrackerStatus::Break;
        state.tick();
        assert_eq!((state.seconds, state.break_seconds), (1, 1));

        state.status = TrackerStatus::Paused;
        assert!(!state.tick());
        assert_eq!((state.seconds, state.break_seconds), (1, 1));
    }

    #[tokio::test]
    async fn start_marks_synced_after_commit() {
        let (tracker, store, _) = tracker();
        let session = tracker.start_session().await.unwrap();

        let state = tracker.snapshot();
        assert_eq!(state.status, TrackerStatus::Running);
        assert_eq!(state.sync, SyncState::Synced);
        assert_eq!(store.get_session(session.id).await.unwrap(), Some(session));
    }

    #[tokio::test]
    async fn rejected_transition_leaves_state_untouched() {
        let (tracker, _, _) = tracker();
        let before = tracker.snapshot();

        assert_eq!(tracker.end_break().await, Err(TrackerError::NoOpenBreak));
        assert_eq!(tracker.stop_session().await, Err(TrackerError::NoActiveSession));
        assert_eq!(
            tracker.start_break(BreakType::Short).await,
            Err(TrackerError::NoActiveSession)
        );
        assert_eq!(tracker.snapshot(), before);
    }

    #[tokio::test]
    async fn failed_break_insert_rolls_back() {
        let (tracker, store, _) = tracker();
        tracker.start_session().await.unwrap();
        for _ in 0..5 {
            tracker.tick();
        }

        store.fail_next(1);
        let err = tracker.start_break(BreakType::Lunch).await.unwrap_err();
        assert!(matches!(err, TrackerError::Persistence(_)));
        assert!(!err.is_precondition());

        let state = tracker.snapshot();
        assert_eq!(state.status, TrackerStatus::Running);
        assert_eq!(state.current_break, None);
        assert_eq!(state.seconds, 5);
        assert!(matches!(
            state.sync,
            SyncState::Failed { ref action, .. } if action == "start break"
        ));
        assert_eq!(
            state.current_session.map(|s| s.status),
            Some(SessionStatus::Active)
        );
    }

    #[tokio::test]
    async fn pause_and_resume() {
        let (tracker, _, _) = tracker();
        tracker.start_session().await.unwrap();
        tracker.tick();

        let paused = tracker.pause().await.unwrap();
        assert_eq!(paused.status, SessionStatus::Paused);
        tracker.tick();
        tracker.tick();
        assert_eq!(tracker.snapshot().seconds, 1);

        assert_eq!(
            tracker.pause().await,
            Err(TrackerError::InvalidTransition {
                from: TrackerStatus::Paused,
                action: "pause",
            })
        );
        assert!(matches!(
            tracker.start_break(BreakType::Short).await,
            Err(TrackerError::InvalidTransition { .. })
        ));

        tracker.resume().await.unwrap();
        tracker.tick();
        assert_eq!(tracker.snapshot().seconds, 2);
        assert_eq!(tracker.snapshot().status, TrackerStatus::Running);
    }

    #[tokio::test]
    async fn rollback_keeps_ticks_received_while_pending() {
        let (tracker, _, _) = tracker();
        tracker.start_session().await.unwrap();
        for _ in 0..10 {
            tracker.tick();
        }

        let (snapshot, _) = tracker
            .apply("stop session", |state| {
                state.status = TrackerStatus::Completed;
                Ok(())
            })
            .unwrap();
        for _ in 0..4 {
            tracker.tick();
        }
        assert_eq!(tracker.snapshot().seconds, 10);

        let cause = StoreError::Unavailable("offline".to_string());
        tracker.rollback(snapshot, "stop session", &cause);

        let state = tracker.snapshot();
        assert_eq!(state.status, TrackerStatus::Running);
        assert_eq!(state.seconds, 14);
        assert_eq!(state.break_seconds, 0);
    }

    #[tokio::test]
    async fn rolled_back_break_credits_work_seconds() {
        let (tracker, _, _) = tracker();
        tracker.start_session().await.unwrap();
        tracker.tick();

        let (snapshot, _) = tracker
            .apply("start break", |state| {
                state.status = TrackerStatus::Break;
                state.break_seconds = 0;
                Ok(())
            })
            .unwrap();
        tracker.tick();
        tracker.tick();
        let cause = StoreError::Timeout(std::time::Duration::from_secs(5));
        tracker.rollback(snapshot, "start break", &cause);

        let state = tracker.snapshot();
        assert_eq!((state.seconds, state.break_seconds), (3, 0));
        assert_eq!(state.status, TrackerStatus::Running);
    }

    #[tokio::test]
    async fn pause_time_is_recorded_on_the_session() {
        let (tracker, store, clock) = tracker();
        let session = tracker.start_session().await.unwrap();
        clock.advance_secs(600);
        tracker.pause().await.unwrap();
        clock.advance_secs(7200);
        let resumed = tracker.resume().await.unwrap();
        assert_eq!(resumed.total_pause_seconds, 7200);
        assert_eq!(resumed.paused_at, None);

        let stopped = tracker.stop_session().await.unwrap();
        assert_eq!(stopped.net_work_minutes, Some(10));
        let stored = store.get_session(session.id).await.unwrap().unwrap();
        assert_eq!(stored.total_pause_seconds, 7200);
    }

    #[tokio::test]
    async fn subscribers_see_ticks() {
        let (tracker, _, _) = tracker();
        let mut rx = tracker.subscribe();
        tracker.start_session().await.unwrap();
        tracker.tick();

        assert!(rx.has_changed().unwrap());
        let view = rx.borrow_and_update().clone();
        assert_eq!(view.status, TrackerStatus::Running);
        assert_eq!(view.seconds, 1);
    }
}
