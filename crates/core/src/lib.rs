//! Shared list-view logic for the requirement-tracking dashboard.
//!
//! This crate has no I/O and no internal dependencies. It provides:
//!
//! - [`review`]: reviewer assignments, decisions, and the aggregate review
//!   status badge.
//! - [`filter`]: free-text search and `column operator value` conditions.
//! - [`sort`]: single-column, type-aware, stable sorting.
//! - [`view`]: the immutable view state tying the three together.
//! - [`update`]: the generic inline field-update command.
//! - [`columns`]: per-page column tables that parameterize all of the above.

pub mod columns;
pub mod error;
pub mod filter;
pub mod projection;
pub mod record;
pub mod review;
pub mod sort;
pub mod types;
pub mod update;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;

pub use columns::{ColumnDef, ColumnKind, ColumnTable};
pub use error::CoreError;
pub use filter::{filter_records, matches, FilterCondition, FilterOperator};
pub use projection::Projectable;
pub use record::{Person, Priority, Record, RecordKind};
pub use review::{resolve, AggregateReviewStatus, ReviewLevel, ReviewStatus, ReviewerAssignment};
pub use sort::{sort_records, SortConfig, SortDirection};
pub use update::{apply_field_update, FieldUpdate};
pub use view::ViewState;
