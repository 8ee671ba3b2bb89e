//! Single-column, type-aware sorting for list views.
//!
//! Sorting never touches the caller's collection; it returns a new sequence
//! of references in presentation order. The sort is stable and descending
//! order only flips the comparator, so rows that tie keep their input order
//! in both directions.

use std::cmp::Ordering;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::columns::{ColumnKind, ColumnTable};
use crate::projection::Projectable;
use crate::record::Priority;

// ---------------------------------------------------------------------------
// Sort configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// The one active sort key of a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SortConfig {
    pub column: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn asc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            direction: SortDirection::Desc,
        }
    }

    /// Header click: a new column replaces the current sort ascending,
    /// clicking the active column flips its direction.
    pub fn toggle(current: Option<&SortConfig>, column: &str) -> SortConfig {
        match current {
            Some(active) if active.column == column => SortConfig {
                column: active.column.clone(),
                direction: active.direction.toggled(),
            },
            _ => SortConfig::asc(column),
        }
    }
}

// ---------------------------------------------------------------------------
// Value parsing
// ---------------------------------------------------------------------------

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[vV]?(\d+)(?:\.(\d+))?(?:\.(\d+))?$").expect("valid regex")
});

/// Collapse a `vMAJOR.MINOR.PATCH` string into one comparable integer,
/// `major * 10000 + minor * 100 + patch`. Missing parts count as zero,
/// anything unparseable is 0.
pub fn parse_version(value: &str) -> u64 {
    let Some(caps) = VERSION_RE.captures(value.trim()) else {
        return 0;
    };
    let part = |i: usize| -> u64 {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };
    part(1)
        .saturating_mul(10_000)
        .saturating_add(part(2).saturating_mul(100))
        .saturating_add(part(3))
}

/// Whether `value` is a well-formed version string.
pub fn is_version(value: &str) -> bool {
    VERSION_RE.is_match(value.trim())
}

/// Naive formats accepted besides RFC 3339. Read as UTC.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y/%m/%d %H:%M"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a timestamp to epoch milliseconds. Unparseable input is the epoch.
pub fn parse_timestamp_millis(value: &str) -> i64 {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.timestamp_millis();
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return dt.and_utc().timestamp_millis();
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                return dt.and_utc().timestamp_millis();
            }
        }
    }
    0
}

/// Rank of a priority key or label. Unknown values rank below `low`.
pub fn priority_rank(value: &str) -> Option<u8> {
    Priority::from_str_value(value).ok().map(|p| p.rank())
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Pre-computed comparison key. Every key in one sort pass has the same
/// variant, so the derived ordering only ever compares like with like.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Raw(String),
    Folded(String),
    Rank(Option<u8>),
    Instant(i64),
    Version(u64),
}

impl SortKey {
    fn new(kind: ColumnKind, cell: &str) -> Self {
        match kind {
            ColumnKind::Text => Self::Folded(cell.to_lowercase()),
            ColumnKind::Identifier => Self::Raw(cell.to_string()),
            ColumnKind::Priority => Self::Rank(priority_rank(cell)),
            ColumnKind::Date => Self::Instant(parse_timestamp_millis(cell)),
            ColumnKind::Version => Self::Version(parse_version(cell)),
        }
    }
}

/// Compare two cell values the way a column of `kind` sorts them.
pub fn compare_values(kind: ColumnKind, a: &str, b: &str) -> Ordering {
    SortKey::new(kind, a).cmp(&SortKey::new(kind, b))
}

/// Order rows by one column.
///
/// Rows missing the field sort as an empty cell. An unknown sort column
/// leaves the input order untouched.
pub fn sort_records<'a, R, I>(rows: I, config: &SortConfig, columns: &ColumnTable) -> Vec<&'a R>
where
    R: Projectable + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let Some(column) = columns.get(&config.column) else {
        return rows.into_iter().collect();
    };

    let mut keyed: Vec<(SortKey, &'a R)> = rows
        .into_iter()
        .map(|row| {
            let cell = row.project(column.field()).unwrap_or_default();
            (SortKey::new(column.kind, &cell), row)
        })
        .collect();

    // `sort_by` is stable.
    keyed.sort_by(|(a, _), (b, _)| config.direction.apply(a.cmp(b)));
    keyed.into_iter().map(|(_, row)| row).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
