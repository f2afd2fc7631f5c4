//! Record store interface
//!
//! The backing store is opaque to the tracker: it only needs point CRUD over
//! work sessions and breaks.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::state::{Break, WorkSession};

/// Async CRUD over the two record kinds
///
/// Updates of an unknown id must fail with `StoreError::NotFound`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a new session, returning the stored record
    async fn insert_session(&self, session: &WorkSession) -> StoreResult<WorkSession>;

    /// Replace an existing session by id
    async fn update_session(&self, session: &WorkSession) -> StoreResult<WorkSession>;

    async fn get_session(&self, id: Uuid) -> StoreResult<Option<WorkSession>>;

    /// The user's session that is not yet completed, if any
    async fn active_session_for(&self, user_id: &str) -> StoreResult<Option<WorkSession>>;

    async fn insert_break(&self, record: &Break) -> StoreResult<Break>;

    async fn update_break(&self, record: &Break) -> StoreResult<Break>;

    async fn get_break(&self, id: Uuid) -> StoreResult<Option<Break>>;

    /// All breaks of a session ordered by start time
    async fn breaks_for_session(&self, session_id: Uuid) -> StoreResult<Vec<Break>>;
}
