//! Record repository: `list`, `get_by_id`, `create`, `update`.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use validator::Validate;

use reqtrack_core::update::{apply_field_update, validate_title, FieldUpdate};
use reqtrack_core::{CoreError, Record, RecordKind, ReviewerAssignment};

use crate::error::RepoError;
use crate::models::record::CreateRecord;
use crate::seed::{ensure_unique_ids, load_seed};

/// Storage interface the dashboard pages talk to.
///
/// Records are never deleted; [`close`](Self::close) only flips the
/// `closed` flag.
pub trait RecordRepository {
    /// All records in insertion order.
    fn list(&self) -> Result<Vec<Record>, RepoError>;

    /// Records of one kind, in insertion order.
    fn list_by_kind(&self, kind: RecordKind) -> Result<Vec<Record>, RepoError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|r| r.kind == kind)
            .collect())
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Record>, RepoError>;

    fn create(&self, input: &CreateRecord) -> Result<Record, RepoError>;

    /// Apply one field update and return the stored result.
    fn update(&self, id: &str, update: &FieldUpdate) -> Result<Record, RepoError>;

    fn close(&self, id: &str) -> Result<Record, RepoError> {
        self.update(id, &FieldUpdate::Closed(true))
    }

    fn reopen(&self, id: &str) -> Result<Record, RepoError> {
        self.update(id, &FieldUpdate::Closed(false))
    }
}

/// Records held in process memory, safe to share across threads.
#[derive(Debug, Default)]
pub struct InMemoryRecordRepo {
    records: RwLock<Vec<Record>>,
}

impl InMemoryRecordRepo {
    /// Wrap an existing record set. Ids must be unique.
    pub fn new(records: Vec<Record>) -> Result<Self, RepoError> {
        ensure_unique_ids(&records)?;
        Ok(Self {
            records: RwLock::new(records),
        })
    }

    /// Repository pre-filled with the bundled mock dataset.
    pub fn seeded() -> Result<Self, RepoError> {
        let records = load_seed()?;
        tracing::debug!(count = records.len(), "Seeded in-memory record store");
        Self::new(records)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Record>>, RepoError> {
        self.records.read().map_err(|_| RepoError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Record>>, RepoError> {
        self.records.write().map_err(|_| RepoError::Poisoned)
    }
}

impl RecordRepository for InMemoryRecordRepo {
    fn list(&self) -> Result<Vec<Record>, RepoError> {
        Ok(self.read()?.clone())
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Record>, RepoError> {
        Ok(self.read()?.iter().find(|r| r.id == id).cloned())
    }

    fn create(&self, input: &CreateRecord) -> Result<Record, RepoError> {
        input.validate()?;

        let now = Utc::now();
        let mut records = self.write()?;
        let id = next_id(&records, input.kind)?;

        let mut record = Record {
            id,
            kind: input.kind,
            title: validate_title(&input.title)?,
            description: input.description.clone(),
            record_type: input.record_type.trim().to_string(),
            priority: input.priority,
            creator: input.creator.clone().into(),
            projects: vec![],
            platforms: vec![],
            tags: vec![],
            version: None,
            level1: ReviewerAssignment::default(),
            level2: ReviewerAssignment::default(),
            closed: false,
            created_at: now,
            updated_at: now,
        };

        // List and version inputs go through the same normalization as
        // inline edits.
        for update in [
            FieldUpdate::Projects(input.projects.clone()),
            FieldUpdate::Platforms(input.platforms.clone()),
            FieldUpdate::Tags(input.tags.clone()),
            FieldUpdate::Version(input.version.clone()),
        ] {
            record = apply_field_update(&record, &update, now)?;
        }

        records.push(record.clone());
        tracing::info!(record_id = %record.id, kind = record.kind.as_str(), "Record created");
        Ok(record)
    }

    fn update(&self, id: &str, update: &FieldUpdate) -> Result<Record, RepoError> {
        let mut records = self.write()?;
        let slot = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RepoError::not_found(id))?;

        let updated = apply_field_update(slot, update, Utc::now())?;
        if updated != *slot {
            tracing::info!(record_id = %id, field = update.field_name(), "Record updated");
        }
        *slot = updated.clone();
        Ok(updated)
    }
}

/// Next display id for `kind`: prefix plus one past the highest numeric
/// suffix in use, zero-padded to three digits.
fn next_id(records: &[Record], kind: RecordKind) -> Result<String, CoreError> {
    let prefix = kind.id_prefix();
    let highest = records
        .iter()
        .filter(|r| r.kind == kind)
        .filter_map(|r| r.id.strip_prefix(prefix)?.strip_prefix('-')?.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    let next = highest.checked_add(1).ok_or_else(|| {
        CoreError::Conflict(format!("No {prefix} ids left after {prefix}-{highest}"))
    })?;
    Ok(format!("{prefix}-{next:03}"))
}
