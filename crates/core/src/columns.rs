//! Column tables: which fields a list shows, how each column compares when
//! sorted, and which columns feed the free-text search.
//!
//! A table is configuration, not code. The defaults below cover the five
//! list pages; a client can load its own table from JSON.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::projection::Projectable;
use crate::record::RecordKind;

/// Maximum length for a column id.
pub const MAX_COLUMN_ID_LENGTH: usize = 64;

/// How values in a column compare when the list is sorted by it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ColumnKind {
    /// Human text, compared case-insensitively.
    #[default]
    Text,
    /// Keys and codes, compared as-is.
    Identifier,
    /// Priority labels, compared by rank.
    Priority,
    /// Timestamps, compared as instants.
    Date,
    /// `vMAJOR.MINOR.PATCH` strings, compared numerically.
    Version,
}

/// One column of a list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ColumnDef {
    pub id: String,
    pub label: String,
    /// Row field the column reads. Defaults to the column id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default)]
    pub kind: ColumnKind,
    /// Whether the free-text search looks at this column.
    #[serde(default)]
    pub searchable: bool,
    #[serde(default)]
    pub default_hidden: bool,
}

impl ColumnDef {
    pub fn new(id: &str, label: &str, kind: ColumnKind) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            field: None,
            kind,
            searchable: false,
            default_hidden: false,
        }
    }

    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.default_hidden = true;
        self
    }

    pub fn reading(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }

    pub fn field(&self) -> &str {
        self.field.as_deref().unwrap_or(&self.id)
    }
}

/// Ordered set of columns for one list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ColumnDef>", into = "Vec<ColumnDef>")]
pub struct ColumnTable {
    columns: Vec<ColumnDef>,
}

impl ColumnTable {
    /// Build a table, rejecting empty, over-long or duplicate column ids.
    pub fn new(columns: Vec<ColumnDef>) -> Result<Self, CoreError> {
        let mut seen = HashSet::new();
        for column in &columns {
            validate_column_id(&column.id)?;
            if !seen.insert(column.id.as_str()) {
                return Err(CoreError::Validation(format!(
                    "Duplicate column id '{}'",
                    column.id
                )));
            }
        }
        Ok(Self { columns })
    }

    /// Parse and validate a table from its JSON array form.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let columns: Vec<ColumnDef> = serde_json::from_str(json)
            .map_err(|e| CoreError::Validation(format!("Invalid column table: {e}")))?;
        Self::new(columns)
    }

    /// Default table for a record kind's list page.
    pub fn for_kind(kind: RecordKind) -> Self {
        Self {
            columns: default_columns(kind),
        }
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn get(&self, id: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn searchable(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|c| c.searchable)
    }

    /// Project `row` on column `id`.
    ///
    /// `None` means the column is unknown to this table or the row has no
    /// such field; callers treat both the same way.
    pub fn project<R: Projectable + ?Sized>(&self, row: &R, id: &str) -> Option<String> {
        self.get(id).and_then(|c| row.project(c.field()))
    }
}

impl TryFrom<Vec<ColumnDef>> for ColumnTable {
    type Error = CoreError;

    fn try_from(columns: Vec<ColumnDef>) -> Result<Self, Self::Error> {
        Self::new(columns)
    }
}

impl From<ColumnTable> for Vec<ColumnDef> {
    fn from(table: ColumnTable) -> Self {
        table.columns
    }
}

/// Validate a column id.
pub fn validate_column_id(id: &str) -> Result<(), CoreError> {
    if id.trim().is_empty() {
        return Err(CoreError::Validation(
            "Column id must not be empty".to_string(),
        ));
    }
    if id.len() > MAX_COLUMN_ID_LENGTH {
        return Err(CoreError::Validation(format!(
            "Column id '{id}' exceeds maximum length of {MAX_COLUMN_ID_LENGTH} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_columns(kind: RecordKind) -> Vec<ColumnDef> {
    use ColumnKind::*;

    let id = ColumnDef::new("id", "编号", Identifier);
    let title = ColumnDef::new("title", "标题", Text).searchable();
    let description = ColumnDef::new("description", "描述", Text)
        .searchable()
        .hidden();
    let priority = ColumnDef::new("priority", "优先级", Priority);
    let creator = ColumnDef::new("creator", "创建人", Text);
    let review = ColumnDef::new("review_status", "评审状态", Text);
    let created = ColumnDef::new("created_at", "创建时间", Date);
    let updated = ColumnDef::new("updated_at", "更新时间", Date);

    match kind {
        RecordKind::Requirement => vec![
            id,
            title,
            description,
            ColumnDef::new("record_type", "类型", Text),
            priority,
            creator,
            ColumnDef::new("projects", "项目", Text),
            ColumnDef::new("platforms", "平台", Text),
            ColumnDef::new("tags", "标签", Text).searchable(),
            review,
            ColumnDef::new("state", "状态", Text),
            created,
            updated.hidden(),
        ],
        RecordKind::Prd => vec![
            id,
            title,
            description,
            priority,
            creator,
            ColumnDef::new("projects", "项目", Text),
            ColumnDef::new("version", "版本", Version),
            ColumnDef::new("level1_reviewer", "一级评审人", Text),
            ColumnDef::new("level2_reviewer", "二级评审人", Text),
            review,
            created,
            updated,
        ],
        RecordKind::Design => vec![
            id,
            title,
            description,
            ColumnDef::new("record_type", "设计类型", Text),
            creator.searchable(),
            ColumnDef::new("platforms", "平台", Text),
            ColumnDef::new("tags", "标签", Text).searchable(),
            review,
            updated,
        ],
        RecordKind::Prototype => vec![
            id,
            title,
            description,
            creator,
            ColumnDef::new("projects", "项目", Text),
            review,
            created,
        ],
        RecordKind::VersionRequirement => vec![
            id,
            title,
            description,
            ColumnDef::new("version", "版本", Version),
            priority,
            ColumnDef::new("platforms", "平台", Text),
            creator,
            review,
            created,
        ],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Priority;
    use crate::test_support::sample_record;
    use assert_matches::assert_matches;

    #[test]
    fn defaults_are_valid_for_every_kind() {
        for kind in RecordKind::ALL {
            let table = ColumnTable::for_kind(kind);
            assert!(ColumnTable::new(table.columns().to_vec()).is_ok(), "{kind:?}");
            assert!(table.get("title").is_some());
            assert!(table.get("review_status").is_some());
            assert!(table.searchable().count() >= 1);
        }
    }

    #[test]
    fn searchable_set_varies_by_kind() {
        let design: Vec<_> = ColumnTable::for_kind(RecordKind::Design)
            .searchable()
            .map(|c| c.id.clone())
            .collect();
        let prd: Vec<_> = ColumnTable::for_kind(RecordKind::Prd)
            .searchable()
            .map(|c| c.id.clone())
            .collect();
        assert_eq!(design, vec!["title", "description", "creator", "tags"]);
        assert_eq!(prd, vec!["title", "description"]);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let result = ColumnTable::new(vec![
            ColumnDef::new("title", "A", ColumnKind::Text),
            ColumnDef::new("title", "B", ColumnKind::Text),
        ]);
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("Duplicate"));
    }

    #[test]
    fn empty_id_rejected() {
        assert!(validate_column_id("").is_err());
        assert!(validate_column_id("  ").is_err());
        assert!(validate_column_id(&"c".repeat(MAX_COLUMN_ID_LENGTH + 1)).is_err());
        assert!(validate_column_id("title").is_ok());
    }

    #[test]
    fn from_json_applies_defaults() {
        let table = ColumnTable::from_json(
            r#"[
                {"id": "name", "label": "名称", "field": "title", "searchable": true},
                {"id": "ver", "label": "版本", "field": "version", "kind": "version"}
            ]"#,
        )
        .unwrap();
        let name = table.get("name").unwrap();
        assert_eq!(name.kind, ColumnKind::Text);
        assert_eq!(name.field(), "title");
        assert!(!name.default_hidden);
        assert_eq!(table.get("ver").unwrap().kind, ColumnKind::Version);
    }

    #[test]
    fn from_json_reports_malformed_input() {
        assert_matches!(
            ColumnTable::from_json("{not json"),
            Err(CoreError::Validation(msg)) if msg.contains("Invalid column table")
        );
    }

    #[test]
    fn project_goes_through_field_mapping() {
        let table = ColumnTable::new(vec![
            ColumnDef::new("name", "名称", ColumnKind::Text).reading("title")
        ])
        .unwrap();
        let record = sample_record("REQ-001", "支付流程优化", Priority::High);
        assert_eq!(table.project(&record, "name").as_deref(), Some("支付流程优化"));
        assert_eq!(table.project(&record, "title"), None);
    }
}
