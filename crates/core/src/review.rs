//! Two-level review: reviewer assignments, decisions, and the aggregate
//! review status shown on every list page.
//!
//! Everything here is pure. The aggregate status is a function of the two
//! assignments only; there is no stored "current review state".

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::record::Person;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Reviewer has not decided yet.
pub const REVIEW_PENDING: &str = "pending";

/// Reviewer approved the record.
pub const REVIEW_APPROVED: &str = "approved";

/// Reviewer rejected the record.
pub const REVIEW_REJECTED: &str = "rejected";

/// All valid reviewer status values.
pub const VALID_REVIEW_STATUSES: &[&str] = &[REVIEW_PENDING, REVIEW_APPROVED, REVIEW_REJECTED];

// ---------------------------------------------------------------------------
// Reviewer status
// ---------------------------------------------------------------------------

/// Decision state of a single reviewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    /// Parse a status key (`approved`) or its display label (`已通过`).
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s.trim() {
            REVIEW_PENDING | "待审核" => Ok(Self::Pending),
            REVIEW_APPROVED | "已通过" => Ok(Self::Approved),
            REVIEW_REJECTED | "已驳回" => Ok(Self::Rejected),
            other => Err(format!(
                "Invalid review status '{other}'. Must be one of: {}",
                VALID_REVIEW_STATUSES.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => REVIEW_PENDING,
            Self::Approved => REVIEW_APPROVED,
            Self::Rejected => REVIEW_REJECTED,
        }
    }

    /// Display label used by the reviewer badge.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "待审核",
            Self::Approved => "已通过",
            Self::Rejected => "已驳回",
        }
    }
}

// ---------------------------------------------------------------------------
// Reviewer assignment
// ---------------------------------------------------------------------------

/// Reviewer slot at one approval level.
///
/// The reviewer and the status are independent: a status without a reviewer
/// is carried along (mock data has plenty of those) but never displayed or
/// used for aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReviewerAssignment {
    #[serde(default)]
    pub reviewer: Option<Person>,
    #[serde(default)]
    pub status: Option<ReviewStatus>,
}

impl ReviewerAssignment {
    /// An assigned reviewer who has not decided yet.
    pub fn pending(reviewer: Person) -> Self {
        Self {
            reviewer: Some(reviewer),
            status: Some(ReviewStatus::Pending),
        }
    }

    pub fn with_status(reviewer: Person, status: ReviewStatus) -> Self {
        Self {
            reviewer: Some(reviewer),
            status: Some(status),
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.reviewer.is_some()
    }

    /// Status with the `pending` default substituted for a missing value.
    pub fn effective_status(&self) -> ReviewStatus {
        self.status.unwrap_or_default()
    }

    /// Status as shown in a reviewer column; empty when nobody is assigned.
    pub fn status_label(&self) -> &'static str {
        if self.is_assigned() {
            self.effective_status().label()
        } else {
            ""
        }
    }

    pub fn reviewer_name(&self) -> &str {
        self.reviewer.as_ref().map_or("", |p| p.name.as_str())
    }

    /// Replace the reviewer. Any previous decision belonged to the old
    /// reviewer, so the slot goes back to pending.
    pub fn reassign(reviewer: Option<Person>) -> Self {
        match reviewer {
            Some(person) => Self::pending(person),
            None => Self::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregate status
// ---------------------------------------------------------------------------

/// The single review badge derived from both reviewer levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AggregateReviewStatus {
    None,
    Pending,
    FirstReviewInProgress,
    SecondReviewInProgress,
    Approved,
    Rejected,
}

impl AggregateReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Pending => "pending",
            Self::FirstReviewInProgress => "first_review_in_progress",
            Self::SecondReviewInProgress => "second_review_in_progress",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Badge text. This is also the value the `review_status` column
    /// projects, so filter conditions compare against it.
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "未提交评审",
            Self::Pending => "待评审",
            Self::FirstReviewInProgress => "一级评审中",
            Self::SecondReviewInProgress => "二级评审中",
            Self::Approved => "评审通过",
            Self::Rejected => "评审驳回",
        }
    }
}

/// Derive the aggregate review status.
///
/// First matching rule wins:
///
/// 1. no reviewer at either level: `None`
/// 2. level 1 assigned and rejected: `Rejected`
/// 3. level 2 assigned and rejected: `Rejected`
/// 4. only level 1 assigned: approved → `Approved`, pending → `Pending`
/// 5. both assigned: both approved → `Approved`; level 1 approved with
///    level 2 pending → `SecondReviewInProgress`; level 1 pending →
///    `FirstReviewInProgress`; anything else → `Pending`
/// 6. only level 2 assigned: approved → `Approved`, otherwise `Pending`
///
/// A missing status counts as `pending`. A status on an unassigned level is
/// ignored.
pub fn resolve(
    level1_assigned: bool,
    level1_status: Option<ReviewStatus>,
    level2_assigned: bool,
    level2_status: Option<ReviewStatus>,
) -> AggregateReviewStatus {
    use AggregateReviewStatus as A;
    use ReviewStatus as S;

    let l1 = level1_status.unwrap_or_default();
    let l2 = level2_status.unwrap_or_default();

    if !level1_assigned && !level2_assigned {
        return A::None;
    }
    if level1_assigned && l1 == S::Rejected {
        return A::Rejected;
    }
    if level2_assigned && l2 == S::Rejected {
        return A::Rejected;
    }

    match (level1_assigned, level2_assigned) {
        (true, false) => match l1 {
            S::Approved => A::Approved,
            S::Pending => A::Pending,
            S::Rejected => A::Rejected,
        },
        (true, true) => match (l1, l2) {
            (S::Approved, S::Approved) => A::Approved,
            (S::Approved, S::Pending) => A::SecondReviewInProgress,
            (S::Pending, _) => A::FirstReviewInProgress,
            _ => A::Pending,
        },
        (false, true) => match l2 {
            S::Approved => A::Approved,
            _ => A::Pending,
        },
        (false, false) => A::None,
    }
}

/// [`resolve`] over two reviewer slots.
pub fn resolve_assignments(
    level1: &ReviewerAssignment,
    level2: &ReviewerAssignment,
) -> AggregateReviewStatus {
    resolve(
        level1.is_assigned(),
        level1.status,
        level2.is_assigned(),
        level2.status,
    )
}

// ---------------------------------------------------------------------------
// Decisions
// ---------------------------------------------------------------------------

/// Approval level a decision is recorded against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ReviewLevel {
    #[serde(rename = "level1")]
    First,
    #[serde(rename = "level2")]
    Second,
}

impl ReviewLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "level1",
            Self::Second => "level2",
        }
    }
}

/// Record a reviewer decision at `level`, returning the updated slot.
///
/// The level must have a reviewer, and a level-2 decision other than
/// resetting to pending requires level 1 to be approved.
pub fn submit_decision(
    level1: &ReviewerAssignment,
    level2: &ReviewerAssignment,
    level: ReviewLevel,
    decision: ReviewStatus,
) -> Result<ReviewerAssignment, CoreError> {
    let target = match level {
        ReviewLevel::First => level1,
        ReviewLevel::Second => level2,
    };

    if !target.is_assigned() {
        return Err(CoreError::Validation(format!(
            "No reviewer assigned at {}",
            level.as_str()
        )));
    }

    if level == ReviewLevel::Second
        && decision != ReviewStatus::Pending
        && !(level1.is_assigned() && level1.effective_status() == ReviewStatus::Approved)
    {
        return Err(CoreError::Conflict(
            "Level-2 review requires an approved level-1 review".to_string(),
        ));
    }

    Ok(ReviewerAssignment {
        reviewer: target.reviewer.clone(),
        status: Some(decision),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
