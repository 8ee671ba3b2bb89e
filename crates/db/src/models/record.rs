//! Input DTOs for record storage.

use serde::Deserialize;
use validator::Validate;

use reqtrack_core::record::{Person, Priority, RecordKind};

/// DTO for creating a new record. The repository assigns the id and
/// timestamps; reviewers are assigned afterwards through field updates.
///
/// Length limits mirror `MAX_TITLE_LENGTH` and `MAX_DESCRIPTION_LENGTH` in
/// `reqtrack_core::update`. List sizes are checked after blanks and
/// duplicates are dropped, by the same normalization inline edits use.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRecord {
    pub kind: RecordKind,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 10000))]
    pub description: String,
    #[serde(default)]
    pub record_type: String,
    #[serde(default)]
    pub priority: Priority,
    #[validate(nested)]
    pub creator: Creator,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Creator reference as submitted by the form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Creator {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub name: String,
}

impl From<Creator> for Person {
    fn from(creator: Creator) -> Self {
        Person {
            id: creator.id,
            name: creator.name,
        }
    }
}

impl CreateRecord {
    pub fn new(kind: RecordKind, title: &str, creator: Creator) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description: String::new(),
            record_type: String::new(),
            priority: Priority::default(),
            creator,
            projects: vec![],
            platforms: vec![],
            tags: vec![],
            version: None,
        }
    }
}
