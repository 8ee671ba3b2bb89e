use crate::types::RecordId;

/// Errors raised by record commands. The list engines themselves never fail.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("No {entity} with id {id}")]
    NotFound { entity: &'static str, id: RecordId },

    /// Input rejected before anything changed (blank title, bad version,
    /// decision on an unassigned level, ...).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The request is well-formed but clashes with current state, such as a
    /// level-2 decision ahead of level-1 approval or a duplicate record id.
    #[error("Conflict: {0}")]
    Conflict(String),
}
