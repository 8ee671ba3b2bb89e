//! Repository interface and its in-memory implementation.

pub mod record_repo;

pub use record_repo::{InMemoryRecordRepo, RecordRepository};
