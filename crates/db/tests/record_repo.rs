//! Integration tests for the in-memory record repository.
//!
//! Exercises the repository through its public trait:
//! - Listing and lookup over the bundled seed
//! - Creation with validation and id assignment
//! - Field updates, including the two-level review flow
//! - Closing instead of deleting

use assert_matches::assert_matches;
use reqtrack_core::update::MAX_LIST_ENTRIES;
use reqtrack_core::{
    AggregateReviewStatus, CoreError, FieldUpdate, Person, Priority, RecordKind, ReviewStatus,
};
use reqtrack_db::models::record::{CreateRecord, Creator};
use reqtrack_db::{InMemoryRecordRepo, RecordRepository, RepoError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn repo() -> InMemoryRecordRepo {
    InMemoryRecordRepo::seeded().expect("bundled seed loads")
}

fn creator() -> Creator {
    Creator {
        id: "u-9".to_string(),
        name: "吴九".to_string(),
    }
}

fn reviewer(id: &str, name: &str) -> Person {
    Person {
        id: id.to_string(),
        name: name.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[test]
fn list_by_kind_filters_and_keeps_order() {
    let repo = repo();
    let prds = repo.list_by_kind(RecordKind::Prd).unwrap();
    let ids: Vec<&str> = prds.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["PRD-001", "PRD-002"]);
}

#[test]
fn get_by_id_returns_none_for_unknown() {
    let repo = repo();
    assert!(repo.get_by_id("REQ-001").unwrap().is_some());
    assert!(repo.get_by_id("REQ-999").unwrap().is_none());
}

#[test]
fn seed_review_states_resolve() {
    let repo = repo();
    let status = |id: &str| repo.get_by_id(id).unwrap().unwrap().review_status();
    assert_eq!(status("REQ-001"), AggregateReviewStatus::SecondReviewInProgress);
    assert_eq!(status("REQ-003"), AggregateReviewStatus::Rejected);
    assert_eq!(status("REQ-004"), AggregateReviewStatus::None);
    assert_eq!(status("PRD-001"), AggregateReviewStatus::Approved);
    assert_eq!(status("PRD-002"), AggregateReviewStatus::Rejected);
    assert_eq!(status("DSN-001"), AggregateReviewStatus::Pending);
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_assigns_next_id_and_normalizes() {
    let repo = repo();
    let mut input = CreateRecord::new(RecordKind::Requirement, "  消息中心 ", creator());
    input.priority = Priority::High;
    input.platforms = vec!["iOS".into(), " iOS".into(), "".into()];
    input.version = Some("v3.1".into());

    let created = repo.create(&input).unwrap();
    assert_eq!(created.id, "REQ-006");
    assert_eq!(created.title, "消息中心");
    assert_eq!(created.platforms, vec!["iOS"]);
    assert_eq!(created.version.as_deref(), Some("v3.1"));
    assert_eq!(created.review_status(), AggregateReviewStatus::None);
    assert!(created.is_open());

    let stored = repo.get_by_id("REQ-006").unwrap().unwrap();
    assert_eq!(stored, created);
}

#[test]
fn create_rejects_invalid_input() {
    let repo = repo();

    let empty_title = CreateRecord::new(RecordKind::Design, "", creator());
    assert_matches!(repo.create(&empty_title), Err(RepoError::Invalid(_)));

    let blank_creator = CreateRecord::new(
        RecordKind::Design,
        "图标规范",
        Creator {
            id: String::new(),
            name: "无名".into(),
        },
    );
    assert_matches!(repo.create(&blank_creator), Err(RepoError::Invalid(_)));

    let mut bad_version = CreateRecord::new(RecordKind::Prd, "搜索 PRD", creator());
    bad_version.version = Some("soon".into());
    assert_matches!(
        repo.create(&bad_version),
        Err(RepoError::Core(CoreError::Validation(_)))
    );

    assert_eq!(repo.list_by_kind(RecordKind::Prd).unwrap().len(), 2);
}

#[test]
fn create_limits_lists_after_normalization() {
    let repo = repo();

    let mut input = CreateRecord::new(RecordKind::Requirement, "标签整理", creator());
    input.tags = (0..MAX_LIST_ENTRIES).map(|i| format!("t{i}")).collect();
    input.tags.push(" t0 ".into());
    assert_eq!(input.tags.len(), MAX_LIST_ENTRIES + 1);

    let created = repo.create(&input).unwrap();
    assert_eq!(created.tags.len(), MAX_LIST_ENTRIES);

    input.tags.push("extra".into());
    assert_matches!(
        repo.create(&input),
        Err(RepoError::Core(CoreError::Validation(msg))) if msg.contains("tags")
    );
}

#[test]
fn create_accepts_form_json() {
    let input: CreateRecord = serde_json::from_str(
        r#"{
            "kind": "prototype",
            "title": "购物车原型",
            "priority": "urgent",
            "creator": {"id": "u-1", "name": "张三"},
            "projects": ["电商平台"]
        }"#,
    )
    .unwrap();
    let created = repo().create(&input).unwrap();
    assert_eq!(created.id, "PROTO-002");
    assert_eq!(created.priority, Priority::Urgent);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_unknown_record_is_not_found() {
    let result = repo().update("REQ-404", &FieldUpdate::Closed(true));
    assert_matches!(
        result,
        Err(RepoError::Core(CoreError::NotFound { entity: "record", id })) if id == "REQ-404"
    );
}

#[test]
fn update_persists_and_bumps_timestamp() {
    let repo = repo();
    let before = repo.get_by_id("REQ-002").unwrap().unwrap();
    let updated = repo
        .update("REQ-002", &FieldUpdate::Priority(Priority::Urgent))
        .unwrap();

    assert_eq!(updated.priority, Priority::Urgent);
    assert!(updated.updated_at > before.updated_at);
    assert_eq!(repo.get_by_id("REQ-002").unwrap().unwrap(), updated);
}

#[test]
fn failed_update_leaves_record_unchanged() {
    let repo = repo();
    let before = repo.get_by_id("REQ-002").unwrap().unwrap();
    assert!(repo.update("REQ-002", &FieldUpdate::Title(" ".into())).is_err());
    assert_eq!(repo.get_by_id("REQ-002").unwrap().unwrap(), before);
}

#[test]
fn two_level_review_flow() {
    let repo = repo();
    let id = "DSN-002";

    repo.update(id, &FieldUpdate::Level1Reviewer(Some(reviewer("u-2", "李四"))))
        .unwrap();
    let record = repo
        .update(id, &FieldUpdate::Level2Reviewer(Some(reviewer("u-3", "王五"))))
        .unwrap();
    assert_eq!(record.review_status(), AggregateReviewStatus::FirstReviewInProgress);

    assert_matches!(
        repo.update(id, &FieldUpdate::Level2Status(ReviewStatus::Approved)),
        Err(RepoError::Core(CoreError::Conflict(_)))
    );

    repo.update(id, &FieldUpdate::Level1Status(ReviewStatus::Approved))
        .unwrap();
    let record = repo
        .update(id, &FieldUpdate::Level2Status(ReviewStatus::Rejected))
        .unwrap();
    assert_eq!(record.review_status(), AggregateReviewStatus::Rejected);

    // Swapping the level-2 reviewer restarts that level.
    let record = repo
        .update(id, &FieldUpdate::Level2Reviewer(Some(reviewer("u-7", "郑十"))))
        .unwrap();
    assert_eq!(record.review_status(), AggregateReviewStatus::SecondReviewInProgress);
}

#[test]
fn close_and_reopen_keep_the_record() {
    let repo = repo();
    let total = repo.list().unwrap().len();

    let closed = repo.close("REQ-001").unwrap();
    assert!(!closed.is_open());
    assert_eq!(repo.list().unwrap().len(), total);

    let reopened = repo.reopen("REQ-001").unwrap();
    assert!(reopened.is_open());
}

#[test]
fn new_rejects_duplicate_ids() {
    let mut records = reqtrack_db::seed::load_seed().unwrap();
    let copy = records[0].clone();
    records.push(copy);
    assert_matches!(
        InMemoryRecordRepo::new(records),
        Err(RepoError::Core(CoreError::Conflict(_)))
    );
}
