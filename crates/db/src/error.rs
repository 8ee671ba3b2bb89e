use reqtrack_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Invalid input: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    #[error("Malformed record data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read record data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Record store lock poisoned")]
    Poisoned,
}

impl RepoError {
    pub fn not_found(id: &str) -> Self {
        Self::Core(CoreError::NotFound {
            entity: "record",
            id: id.to_string(),
        })
    }
}
