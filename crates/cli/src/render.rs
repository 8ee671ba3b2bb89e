//! Text table rendering for a list view.

use chrono::{DateTime, Utc};
use comfy_table::{presets::ASCII_MARKDOWN, ContentArrangement, Table};
use reqtrack_core::record::DISPLAY_TIMESTAMP_FORMAT;
use reqtrack_core::{ColumnDef, ColumnKind, ColumnTable, Projectable};

/// Render rows as a markdown-style table with a header row.
///
/// Column widths follow terminal display width, so CJK labels line up.
pub fn render_table<R: Projectable>(
    rows: &[&R],
    visible: &[&ColumnDef],
    columns: &ColumnTable,
) -> String {
    let mut table = Table::new();
    table
        .load_preset(ASCII_MARKDOWN)
        .set_content_arrangement(ContentArrangement::Disabled);

    table.set_header(visible.iter().map(|c| c.label.clone()).collect::<Vec<_>>());

    for row in rows {
        table.add_row(
            visible
                .iter()
                .map(|c| display_cell(c, columns.project(*row, &c.id).unwrap_or_default()))
                .collect::<Vec<_>>(),
        );
    }

    let mut out = table.to_string();
    out.push('\n');
    out
}

/// Shorten RFC 3339 instants in date columns; other cells pass through.
fn display_cell(column: &ColumnDef, cell: String) -> String {
    if column.kind != ColumnKind::Date {
        return cell;
    }
    match DateTime::parse_from_rfc3339(&cell) {
        Ok(instant) => instant
            .with_timezone(&Utc)
            .format(DISPLAY_TIMESTAMP_FORMAT)
            .to_string(),
        Err(_) => cell,
    }
}
