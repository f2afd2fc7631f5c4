//! In-process record store

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::store::RecordStore;
use crate::error::{StoreError, StoreResult};
use crate::state::{Break, WorkSession};

/// Record store kept in memory
///
/// Supports fault injection so callers can exercise the failure paths:
/// `fail_next(n)` fails the next `n` calls, `fail_next_of(op, n)` the next
/// `n` calls of one operation, and `set_offline(true)` fails every call
/// until switched back.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    sessions: RwLock<HashMap<Uuid, WorkSession>>,
    breaks: RwLock<HashMap<Uuid, Break>>,
    failures_pending: AtomicUsize,
    op_failures: Mutex<HashMap<&'static str, usize>>,
    offline: AtomicBool,
    calls: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `count` calls with `StoreError::Unavailable`
    pub fn fail_next(&self, count: usize) {
        self.failures_pending.store(count, Ordering::SeqCst);
    }

    /// Fail the next `count` calls of operation `op` (e.g. `"insert_session"`)
    pub fn fail_next_of(&self, op: &'static str, count: usize) {
        if let Ok(mut failures) = self.op_failures.lock() {
            failures.insert(op, count);
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of calls received so far, failed ones included
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check_available(&self, op: &str) -> StoreResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("{}: store offline", op)));
        }

        let injected = self
            .failures_pending
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if injected {
            return Err(StoreError::Unavailable(format!("{}: injected failure", op)));
        }

        if let Ok(mut failures) = self.op_failures.lock() {
            if let Some(remaining) = failures.get_mut(op).filter(|n| **n > 0) {
                *remaining -= 1;
                return Err(StoreError::Unavailable(format!("{}: injected failure", op)));
            }
        }

        debug!("record store call: {}", op);
        Ok(())
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn insert_session(&self, session: &WorkSession) -> StoreResult<WorkSession> {
        self.check_available("insert_session")?;
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            return Err(StoreError::Rejected(format!("session {} exists", session.id)));
        }
        sessions.insert(session.id, session.clone());
        Ok(session.clone())
    }

    async fn update_session(&self, session: &WorkSession) -> StoreResult<WorkSession> {
        self.check_available("update_session")?;
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&session.id) {
            Some(stored) => {
                *stored = session.clone();
                Ok(session.clone())
            }
            None => Err(StoreError::NotFound {
                kind: "session",
                id: session.id,
            }),
        }
    }

    async fn get_session(&self, id: Uuid) -> StoreResult<Option<WorkSession>> {
        self.check_available("get_session")?;
        Ok(self.sessions.read().await.get(&id).cloned())
    }

    async fn active_session_for(&self, user_id: &str) -> StoreResult<Option<WorkSession>> {
        self.check_available("active_session_for")?;
        let sessions = self.sessions.read().await;
        Ok(sessions
            .values()
            .filter(|s| s.user_id == user_id && s.status.is_open())
            .max_by_key(|s| s.start_time)
            .cloned())
    }

    async fn insert_break(&self, record: &Break) -> StoreResult<Break> {
        self.check_available("insert_break")?;
        let mut breaks = self.breaks.write().await;
        if breaks.contains_key(&record.id) {
            return Err(StoreError::Rejected(format!("break {} exists", record.id)));
        }
        breaks.insert(record.id, record.clone());
        Ok(record.clone())
    }

    async fn update_break(&self, record: &Break) -> StoreResult<Break> {
        self.check_available("update_break")?;
        let mut breaks = self.breaks.write().await;
        match breaks.get_mut(&record.id) {
            Some(stored) => {
                *stored = record.clone();
                Ok(record.clone())
            }
            None => Err(StoreError::NotFound {
                kind: "break",
                id: record.id,
            }),
        }
    }

    async fn get_break(&self, id: Uuid) -> StoreResult<Option<Break>> {
        self.check_available("get_break")?;
        Ok(self.breaks.read().await.get(&id).cloned())
    }

    async fn breaks_for_session(&self, session_id: Uuid) -> StoreResult<Vec<Break>> {
        self.check_available("breaks_for_session")?;
        let breaks = self.breaks.read().await;
        let mut found: Vec<Break> = breaks
            .values()
            .filter(|b| b.session_id == session_id)
            .cloned()
            .collect();
        found.sort_by_key(|b| b.start_time);
        Ok(found)
    }
}
