//! Tracked business records: requirements, PRDs, designs, prototypes and
//! version-scoped requirements.
//!
//! All kinds share one shape. Fields a kind does not use stay empty, and the
//! per-kind column tables in [`crate::columns`] decide what is shown.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::projection::Projectable;
use crate::review::{resolve_assignments, AggregateReviewStatus, ReviewerAssignment};
use crate::types::{RecordId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const PRIORITY_LOW: &str = "low";
pub const PRIORITY_MEDIUM: &str = "medium";
pub const PRIORITY_HIGH: &str = "high";
pub const PRIORITY_URGENT: &str = "urgent";

/// All valid priority keys, lowest first.
pub const VALID_PRIORITIES: &[&str] =
    &[PRIORITY_LOW, PRIORITY_MEDIUM, PRIORITY_HIGH, PRIORITY_URGENT];

/// Format a renderer uses to show a timestamp cell. Projection itself keeps
/// the full RFC 3339 instant so date columns sort and compare exactly.
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Separator for multi-valued fields (projects, platforms, tags).
pub const LIST_SEPARATOR: &str = ", ";

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which list a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RecordKind {
    Requirement,
    Prd,
    Design,
    Prototype,
    VersionRequirement,
}

impl RecordKind {
    pub const ALL: [RecordKind; 5] = [
        Self::Requirement,
        Self::Prd,
        Self::Design,
        Self::Prototype,
        Self::VersionRequirement,
    ];

    pub fn from_str_value(s: &str) -> Result<Self, String> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                format!(
                    "Invalid record kind '{s}'. Must be one of: {}",
                    valid.join(", ")
                )
            })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requirement => "requirement",
            Self::Prd => "prd",
            Self::Design => "design",
            Self::Prototype => "prototype",
            Self::VersionRequirement => "version_requirement",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Requirement => "需求",
            Self::Prd => "PRD",
            Self::Design => "设计稿",
            Self::Prototype => "原型",
            Self::VersionRequirement => "版本需求",
        }
    }

    /// Prefix used when generating display ids.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Requirement => "REQ",
            Self::Prd => "PRD",
            Self::Design => "DSN",
            Self::Prototype => "PROTO",
            Self::VersionRequirement => "VREQ",
        }
    }
}

/// Record priority. Ordered: `Low < Medium < High < Urgent`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Parse a priority key (`urgent`) or display label (`紧急`).
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s.trim() {
            PRIORITY_LOW | "低" => Ok(Self::Low),
            PRIORITY_MEDIUM | "中" => Ok(Self::Medium),
            PRIORITY_HIGH | "高" => Ok(Self::High),
            PRIORITY_URGENT | "紧急" => Ok(Self::Urgent),
            other => Err(format!(
                "Invalid priority '{other}'. Must be one of: {}",
                VALID_PRIORITIES.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => PRIORITY_LOW,
            Self::Medium => PRIORITY_MEDIUM,
            Self::High => PRIORITY_HIGH,
            Self::Urgent => PRIORITY_URGENT,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "低",
            Self::Medium => "中",
            Self::High => "高",
            Self::Urgent => "紧急",
        }
    }

    /// Position in the rank table used for sorting.
    pub fn rank(&self) -> u8 {
        *self as u8
    }
}

// ---------------------------------------------------------------------------
// Structs
// ---------------------------------------------------------------------------

/// A user reference (creator or reviewer).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Person {
    pub id: String,
    pub name: String,
}

/// A tracked business item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Record {
    pub id: RecordId,
    pub kind: RecordKind,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Free enumerated category, e.g. 功能 / 优化 / 缺陷.
    #[serde(default)]
    pub record_type: String,
    #[serde(default)]
    pub priority: Priority,
    pub creator: Person,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Scheduled version, e.g. `v2.3.0`.
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub level1: ReviewerAssignment,
    #[serde(default)]
    pub level2: ReviewerAssignment,
    /// Closing a record only flips this flag; records are never deleted.
    #[serde(default)]
    pub closed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Record {
    pub fn is_open(&self) -> bool {
        !self.closed
    }

    pub fn review_status(&self) -> AggregateReviewStatus {
        resolve_assignments(&self.level1, &self.level2)
    }

    /// Label for the open/closed column.
    pub fn state_label(&self) -> &'static str {
        if self.closed {
            "已关闭"
        } else {
            "进行中"
        }
    }
}

/// Field names a [`Record`] can be projected on.
pub const RECORD_FIELDS: &[&str] = &[
    "id",
    "kind",
    "title",
    "description",
    "record_type",
    "priority",
    "creator",
    "creator_id",
    "projects",
    "platforms",
    "tags",
    "version",
    "level1_reviewer",
    "level1_status",
    "level2_reviewer",
    "level2_status",
    "review_status",
    "state",
    "created_at",
    "updated_at",
];

impl Projectable for Record {
    fn project(&self, field: &str) -> Option<String> {
        let value = match field {
            "id" => self.id.clone(),
            "kind" => self.kind.label().to_string(),
            "title" => self.title.clone(),
            "description" => self.description.clone(),
            "record_type" => self.record_type.clone(),
            "priority" => self.priority.label().to_string(),
            "creator" => self.creator.name.clone(),
            "creator_id" => self.creator.id.clone(),
            "projects" => self.projects.join(LIST_SEPARATOR),
            "platforms" => self.platforms.join(LIST_SEPARATOR),
            "tags" => self.tags.join(LIST_SEPARATOR),
            "version" => self.version.clone().unwrap_or_default(),
            "level1_reviewer" => self.level1.reviewer_name().to_string(),
            "level1_status" => self.level1.status_label().to_string(),
            "level2_reviewer" => self.level2.reviewer_name().to_string(),
            "level2_status" => self.level2.status_label().to_string(),
            "review_status" => self.review_status().label().to_string(),
            "state" => self.state_label().to_string(),
            "created_at" => self.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            "updated_at" => self.updated_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            _ => return None,
        };
        Some(value)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
