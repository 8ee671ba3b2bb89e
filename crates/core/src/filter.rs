//! Free-text search and custom filter conditions for list views.
//!
//! Pure logic. A malformed condition never hides a row: unknown columns and
//! unknown operators are treated as satisfied so a filter that references a
//! removed column keeps the list usable.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::columns::ColumnTable;
use crate::projection::Projectable;

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

pub const OP_EQUALS: &str = "equals";
pub const OP_NOT_EQUALS: &str = "not_equals";
pub const OP_CONTAINS: &str = "contains";
pub const OP_NOT_CONTAINS: &str = "not_contains";
pub const OP_IS_EMPTY: &str = "is_empty";
pub const OP_IS_NOT_EMPTY: &str = "is_not_empty";

/// All operator keys a condition may use.
pub const VALID_OPERATORS: &[&str] = &[
    OP_EQUALS,
    OP_NOT_EQUALS,
    OP_CONTAINS,
    OP_NOT_CONTAINS,
    OP_IS_EMPTY,
    OP_IS_NOT_EMPTY,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FilterOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    IsEmpty,
    IsNotEmpty,
}

impl FilterOperator {
    /// Parse an operator key. Unknown keys yield `None`.
    pub fn from_str_value(s: &str) -> Option<Self> {
        match s {
            OP_EQUALS => Some(Self::Equals),
            OP_NOT_EQUALS => Some(Self::NotEquals),
            OP_CONTAINS => Some(Self::Contains),
            OP_NOT_CONTAINS => Some(Self::NotContains),
            OP_IS_EMPTY => Some(Self::IsEmpty),
            OP_IS_NOT_EMPTY => Some(Self::IsNotEmpty),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => OP_EQUALS,
            Self::NotEquals => OP_NOT_EQUALS,
            Self::Contains => OP_CONTAINS,
            Self::NotContains => OP_NOT_CONTAINS,
            Self::IsEmpty => OP_IS_EMPTY,
            Self::IsNotEmpty => OP_IS_NOT_EMPTY,
        }
    }

    /// Whether the operator reads the condition's `value`.
    pub fn takes_value(&self) -> bool {
        !matches!(self, Self::IsEmpty | Self::IsNotEmpty)
    }

    /// Apply the operator to a projected cell value.
    ///
    /// Comparisons are case-insensitive. The emptiness tests look at the raw
    /// cell and ignore `value`.
    pub fn evaluate(&self, cell: &str, value: &str) -> bool {
        match self {
            Self::IsEmpty => cell.is_empty(),
            Self::IsNotEmpty => !cell.is_empty(),
            Self::Equals => cell.to_lowercase() == value.to_lowercase(),
            Self::NotEquals => cell.to_lowercase() != value.to_lowercase(),
            Self::Contains => cell.to_lowercase().contains(&value.to_lowercase()),
            Self::NotContains => !cell.to_lowercase().contains(&value.to_lowercase()),
        }
    }
}

// ---------------------------------------------------------------------------
// Conditions
// ---------------------------------------------------------------------------

/// One user-defined `column operator value` predicate.
///
/// Column and operator are kept as the strings the client sent so that an
/// incomplete condition (still being edited) deserializes and simply passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FilterCondition {
    #[serde(default)]
    pub column: String,
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub value: String,
}

impl FilterCondition {
    pub fn new(column: &str, operator: FilterOperator, value: &str) -> Self {
        Self {
            column: column.to_string(),
            operator: operator.as_str().to_string(),
            value: value.to_string(),
        }
    }

    /// Whether the condition can actually exclude a row against `columns`.
    pub fn is_effective(&self, columns: &ColumnTable) -> bool {
        columns.get(&self.column).is_some()
            && FilterOperator::from_str_value(&self.operator).is_some()
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Case-insensitive substring search over the table's searchable columns.
///
/// An empty term matches everything.
pub fn matches_search<R: Projectable + ?Sized>(row: &R, term: &str, columns: &ColumnTable) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    columns.searchable().any(|column| {
        row.project(column.field())
            .is_some_and(|cell| cell.to_lowercase().contains(&needle))
    })
}

/// Evaluate a single condition. Unknown column or operator passes; a known
/// column the row has no value for reads as an empty cell.
pub fn evaluate_condition<R: Projectable + ?Sized>(
    row: &R,
    condition: &FilterCondition,
    columns: &ColumnTable,
) -> bool {
    let Some(operator) = FilterOperator::from_str_value(&condition.operator) else {
        return true;
    };
    let Some(column) = columns.get(&condition.column) else {
        return true;
    };
    let cell = row.project(column.field()).unwrap_or_default();
    operator.evaluate(&cell, &condition.value)
}

/// All conditions must hold.
pub fn matches_conditions<R: Projectable + ?Sized>(
    row: &R,
    conditions: &[FilterCondition],
    columns: &ColumnTable,
) -> bool {
    conditions
        .iter()
        .all(|condition| evaluate_condition(row, condition, columns))
}

/// Search and conditions combined.
pub fn matches<R: Projectable + ?Sized>(
    row: &R,
    term: &str,
    conditions: &[FilterCondition],
    columns: &ColumnTable,
) -> bool {
    matches_search(row, term, columns) && matches_conditions(row, conditions, columns)
}

/// Rows that match, in input order.
pub fn filter_records<'a, R, I>(
    rows: I,
    term: &str,
    conditions: &[FilterCondition],
    columns: &ColumnTable,
) -> Vec<&'a R>
where
    R: Projectable + 'a,
    I: IntoIterator<Item = &'a R>,
{
    rows.into_iter()
        .filter(|row| matches(*row, term, conditions, columns))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::{ColumnDef, ColumnKind};
    use crate::record::{Priority, Record, RecordKind};
    use crate::test_support::{sample_record, sample_records};

    fn requirement_columns() -> ColumnTable {
        ColumnTable::for_kind(RecordKind::Requirement)
    }

    fn payment() -> Record {
        sample_record("REQ-001", "支付流程优化", Priority::Urgent)
    }

    // -- operators -----------------------------------------------------------

    #[test]
    fn operator_keys_round_trip() {
        for key in VALID_OPERATORS {
            let op = FilterOperator::from_str_value(key).unwrap();
            assert_eq!(op.as_str(), *key);
        }
        assert_eq!(FilterOperator::from_str_value("starts_with"), None);
        assert_eq!(FilterOperator::from_str_value(""), None);
    }

    #[test]
    fn equality_is_case_insensitive() {
        assert!(FilterOperator::Equals.evaluate("iOS", "ios"));
        assert!(!FilterOperator::NotEquals.evaluate("iOS", "IOS"));
        assert!(FilterOperator::NotEquals.evaluate("iOS", "Android"));
    }

    #[test]
    fn containment_is_case_insensitive() {
        assert!(FilterOperator::Contains.evaluate("Web, iOS", "IOS"));
        assert!(FilterOperator::NotContains.evaluate("Web, iOS", "android"));
        assert!(!FilterOperator::NotContains.evaluate("Web, iOS", "web"));
    }

    #[test]
    fn emptiness_ignores_value() {
        assert!(FilterOperator::IsEmpty.evaluate("", "anything"));
        assert!(!FilterOperator::IsEmpty.evaluate(" ", ""));
        assert!(FilterOperator::IsNotEmpty.evaluate("x", ""));
        assert!(!FilterOperator::IsEmpty.takes_value());
        assert!(FilterOperator::Contains.takes_value());
    }

    // -- search --------------------------------------------------------------

    #[test]
    fn empty_search_and_no_conditions_match_everything() {
        let columns = requirement_columns();
        for record in sample_records() {
            assert!(matches(&record, "", &[], &columns));
        }
    }

    #[test]
    fn search_covers_searchable_columns_only() {
        let columns = requirement_columns();
        let mut record = payment();
        record.description = "Checkout latency".into();
        record.tags = vec!["Growth".into()];
        record.platforms = vec!["Harmony".into()];

        assert!(matches_search(&record, "支付", &columns));
        assert!(matches_search(&record, "LATENCY", &columns));
        assert!(matches_search(&record, "growth", &columns));
        // platforms is shown but not searchable on the requirement pool
        assert!(!matches_search(&record, "harmony", &columns));
    }

    // -- conditions ----------------------------------------------------------

    #[test]
    fn priority_equals_scenario() {
        let columns = requirement_columns();
        let record = payment();

        let eq = FilterCondition::new("priority", FilterOperator::Equals, "紧急");
        assert!(matches(&record, "", &[eq], &columns));

        let ne = FilterCondition::new("priority", FilterOperator::NotEquals, "紧急");
        assert!(!matches(&record, "", &[ne], &columns));
    }

    #[test]
    fn conditions_combine_with_and() {
        let columns = requirement_columns();
        let record = payment();
        let title = FilterCondition::new("title", FilterOperator::Contains, "支付");
        let low = FilterCondition::new("priority", FilterOperator::Equals, "低");

        assert!(matches_conditions(&record, &[title.clone()], &columns));
        assert!(!matches_conditions(&record, &[title, low], &columns));
    }

    #[test]
    fn unknown_column_passes() {
        let columns = requirement_columns();
        let condition = FilterCondition::new("removed_column", FilterOperator::Equals, "x");
        assert!(evaluate_condition(&payment(), &condition, &columns));
        assert!(!condition.is_effective(&columns));
    }

    #[test]
    fn unknown_or_missing_operator_passes() {
        let columns = requirement_columns();
        let bogus = FilterCondition {
            column: "title".into(),
            operator: "sounds_like".into(),
            value: "nothing".into(),
        };
        let blank = FilterCondition::default();
        assert!(evaluate_condition(&payment(), &bogus, &columns));
        assert!(evaluate_condition(&payment(), &blank, &columns));
    }

    #[test]
    fn empty_tests_use_raw_projection() {
        let columns = requirement_columns();
        let record = payment();
        let no_platform = FilterCondition::new("platforms", FilterOperator::IsEmpty, "ignored");
        assert!(evaluate_condition(&record, &no_platform, &columns));

        let has_reviewer = FilterCondition::new("review_status", FilterOperator::IsNotEmpty, "");
        assert!(evaluate_condition(&record, &has_reviewer, &columns));
    }

    #[test]
    fn custom_table_on_json_rows() {
        let columns = ColumnTable::new(vec![
            ColumnDef::new("name", "名称", ColumnKind::Text)
                .reading("title")
                .searchable(),
        ])
        .unwrap();
        let rows: Vec<serde_json::Map<String, serde_json::Value>> = vec![
            serde_json::from_str(r#"{"title": "登录页"}"#).unwrap(),
            serde_json::from_str(r#"{"title": "注册页"}"#).unwrap(),
        ];
        let hits = filter_records(&rows, "登录", &[], &columns);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].project("title").as_deref(), Some("登录页"));
    }

    #[test]
    fn known_column_missing_from_row_reads_as_empty() {
        let columns =
            ColumnTable::new(vec![ColumnDef::new("owner", "负责人", ColumnKind::Text)]).unwrap();
        let row: serde_json::Map<String, serde_json::Value> = serde_json::Map::new();

        let empty = FilterCondition::new("owner", FilterOperator::IsEmpty, "");
        let not_empty = FilterCondition::new("owner", FilterOperator::IsNotEmpty, "");
        let equals = FilterCondition::new("owner", FilterOperator::Equals, "alice");
        let not_equals = FilterCondition::new("owner", FilterOperator::NotEquals, "alice");

        assert!(evaluate_condition(&row, &empty, &columns));
        assert!(!evaluate_condition(&row, &not_empty, &columns));
        assert!(!evaluate_condition(&row, &equals, &columns));
        assert!(evaluate_condition(&row, &not_equals, &columns));

        let rows = vec![row, serde_json::from_str(r#"{"owner": "Alice"}"#).unwrap()];
        let hits = filter_records(&rows, "", &[equals], &columns);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].project("owner").as_deref(), Some("Alice"));
    }

    // -- filter_records ------------------------------------------------------

    #[test]
    fn filtering_preserves_order_and_is_idempotent() {
        let columns = requirement_columns();
        let records = sample_records();
        let conditions = vec![FilterCondition::new(
            "priority",
            FilterOperator::NotEquals,
            "低",
        )];

        let once = filter_records(&records, "", &conditions, &columns);
        let twice = filter_records(once.iter().copied(), "", &conditions, &columns);
        assert_eq!(once, twice);

        let ids: Vec<&str> = once.iter().map(|r| r.id.as_str()).collect();
        let expected: Vec<&str> = records
            .iter()
            .filter(|r| r.priority != Priority::Low)
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, expected);
    }
}
