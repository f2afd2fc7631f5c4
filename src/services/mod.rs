//! Record persistence module
//!
//! The record store interface, an in-memory implementation, and the retry
//! wrapper every store call goes through.

pub mod memory;
pub mod retry;
pub mod store;

// Re-export main types
pub use memory::InMemoryStore;
pub use retry::{persist_with_retry, RetryPolicy};
pub use store::RecordStore;
