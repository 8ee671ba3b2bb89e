//! Generic field-update command for inline edits (priority dropdown,
//! reviewer picker, close button, ...).
//!
//! [`apply_field_update`] never mutates its input. It validates the new
//! value and returns an updated copy, leaving storage to the caller.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::record::{Person, Priority, Record};
use crate::review::{submit_decision, ReviewLevel, ReviewStatus, ReviewerAssignment};
use crate::sort::is_version;
use crate::types::Timestamp;

/// Maximum length (in characters) for a record title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length (in characters) for a record description.
pub const MAX_DESCRIPTION_LENGTH: usize = 10_000;

/// Maximum number of entries in a project, platform or tag list.
pub const MAX_LIST_ENTRIES: usize = 20;

/// One inline edit: the field to change and its new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
#[ts(export)]
pub enum FieldUpdate {
    Title(String),
    Description(String),
    RecordType(String),
    Priority(Priority),
    Projects(Vec<String>),
    Platforms(Vec<String>),
    Tags(Vec<String>),
    Version(Option<String>),
    Level1Reviewer(Option<Person>),
    Level2Reviewer(Option<Person>),
    Level1Status(ReviewStatus),
    Level2Status(ReviewStatus),
    Closed(bool),
}

impl FieldUpdate {
    /// Field name, as used in logs and error messages.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Title(_) => "title",
            Self::Description(_) => "description",
            Self::RecordType(_) => "record_type",
            Self::Priority(_) => "priority",
            Self::Projects(_) => "projects",
            Self::Platforms(_) => "platforms",
            Self::Tags(_) => "tags",
            Self::Version(_) => "version",
            Self::Level1Reviewer(_) => "level1_reviewer",
            Self::Level2Reviewer(_) => "level2_reviewer",
            Self::Level1Status(_) => "level1_status",
            Self::Level2Status(_) => "level2_status",
            Self::Closed(_) => "closed",
        }
    }
}

/// Apply `update` to a copy of `record`.
///
/// `updated_at` is set to `now` only when the record actually changed.
pub fn apply_field_update(
    record: &Record,
    update: &FieldUpdate,
    now: Timestamp,
) -> Result<Record, CoreError> {
    let mut next = record.clone();

    match update {
        FieldUpdate::Title(title) => next.title = validate_title(title)?,
        FieldUpdate::Description(text) => {
            validate_max_chars("description", text, MAX_DESCRIPTION_LENGTH)?;
            next.description = text.clone();
        }
        FieldUpdate::RecordType(value) => next.record_type = value.trim().to_string(),
        FieldUpdate::Priority(priority) => next.priority = *priority,
        FieldUpdate::Projects(values) => next.projects = normalize_list("projects", values)?,
        FieldUpdate::Platforms(values) => next.platforms = normalize_list("platforms", values)?,
        FieldUpdate::Tags(values) => next.tags = normalize_list("tags", values)?,
        FieldUpdate::Version(version) => next.version = validate_version(version.as_deref())?,
        FieldUpdate::Level1Reviewer(reviewer) => {
            if reviewer.as_ref() != record.level1.reviewer.as_ref() {
                next.level1 = ReviewerAssignment::reassign(reviewer.clone());
            }
        }
        FieldUpdate::Level2Reviewer(reviewer) => {
            if reviewer.as_ref() != record.level2.reviewer.as_ref() {
                next.level2 = ReviewerAssignment::reassign(reviewer.clone());
            }
        }
        FieldUpdate::Level1Status(status) => {
            next.level1 =
                submit_decision(&record.level1, &record.level2, ReviewLevel::First, *status)?;
        }
        FieldUpdate::Level2Status(status) => {
            next.level2 =
                submit_decision(&record.level1, &record.level2, ReviewLevel::Second, *status)?;
        }
        FieldUpdate::Closed(closed) => next.closed = *closed,
    }

    if next != *record {
        next.updated_at = now;
    }
    Ok(next)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Trimmed, non-empty, bounded title.
pub fn validate_title(title: &str) -> Result<String, CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Title must not be empty".to_string()));
    }
    validate_max_chars("title", trimmed, MAX_TITLE_LENGTH)?;
    Ok(trimmed.to_string())
}

fn validate_max_chars(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {max} characters"
        )));
    }
    Ok(())
}

/// Empty input clears the version; anything else must look like `v1.2.3`.
fn validate_version(version: Option<&str>) -> Result<Option<String>, CoreError> {
    match version.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if is_version(v) => Ok(Some(v.to_string())),
        Some(v) => Err(CoreError::Validation(format!(
            "Invalid version '{v}'. Expected MAJOR[.MINOR[.PATCH]] with optional 'v' prefix"
        ))),
    }
}

/// Trim entries, drop blanks and duplicates, keep first-seen order.
fn normalize_list(field: &str, values: &[String]) -> Result<Vec<String>, CoreError> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let value = value.trim();
        if !value.is_empty() && !out.iter().any(|v| v == value) {
            out.push(value.to_string());
        }
    }
    if out.len() > MAX_LIST_ENTRIES {
        return Err(CoreError::Validation(format!(
            "{field} accepts at most {MAX_LIST_ENTRIES} entries"
        )));
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
