//! Fixtures shared by the unit tests.

use chrono::{TimeZone, Utc};

use crate::record::{Person, Priority, Record, RecordKind};
use crate::review::{ReviewStatus, ReviewerAssignment};

pub fn person(name: &str) -> Person {
    Person {
        id: format!("u-{name}"),
        name: name.to_string(),
    }
}

/// An open requirement with no platforms, tags or reviewers.
pub fn sample_record(id: &str, title: &str, priority: Priority) -> Record {
    let created = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
    Record {
        id: id.to_string(),
        kind: RecordKind::Requirement,
        title: title.to_string(),
        description: String::new(),
        record_type: "功能".to_string(),
        priority,
        creator: person("张三"),
        projects: vec![],
        platforms: vec![],
        tags: vec![],
        version: None,
        level1: ReviewerAssignment::default(),
        level2: ReviewerAssignment::default(),
        closed: false,
        created_at: created,
        updated_at: created,
    }
}

/// A small requirement pool with distinct ids and creation times.
pub fn sample_records() -> Vec<Record> {
    let mut payment = sample_record("REQ-001", "支付流程优化", Priority::Urgent);
    payment.description = "缩短下单到支付的步骤".into();
    payment.platforms = vec!["iOS".into(), "Android".into()];
    payment.level1 = ReviewerAssignment::with_status(person("李四"), ReviewStatus::Approved);
    payment.level2 = ReviewerAssignment::pending(person("王五"));

    let mut login = sample_record("REQ-002", "登录页改版", Priority::High);
    login.platforms = vec!["Web".into()];
    login.tags = vec!["体验".into()];
    login.created_at = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();
    login.updated_at = login.created_at;

    let mut export = sample_record("REQ-003", "数据导出", Priority::Low);
    export.created_at = Utc.with_ymd_and_hms(2023, 11, 20, 14, 0, 0).unwrap();
    export.updated_at = export.created_at;
    export.level1 = ReviewerAssignment::with_status(person("李四"), ReviewStatus::Rejected);

    let mut billing = sample_record("REQ-004", "账单中心", Priority::Medium);
    billing.description = "自动对账与发票管理".into();
    billing.created_at = Utc.with_ymd_and_hms(2024, 3, 5, 16, 45, 0).unwrap();
    billing.updated_at = billing.created_at;
    billing.closed = true;

    let mut search = sample_record("REQ-005", "全局搜索", Priority::High);
    search.tags = vec!["增长".into()];
    search.created_at = Utc.with_ymd_and_hms(2024, 1, 2, 8, 15, 0).unwrap();
    search.updated_at = search.created_at;

    vec![payment, login, export, billing, search]
}
