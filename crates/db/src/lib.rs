//! Record storage for the requirement-tracking dashboard.
//!
//! The dashboard has no database; records live in memory behind the
//! [`RecordRepository`] interface, seeded from a bundled mock dataset or a
//! JSON file. The list-view engines in `reqtrack-core` never touch storage.

pub mod error;
pub mod models;
pub mod repositories;
pub mod seed;

pub use error::RepoError;
pub use repositories::{InMemoryRecordRepo, RecordRepository};
