//! Command-line list view over the requirement-tracking records.
//!
//! Loads records, a column table and a view state, runs the shared
//! filter/sort pipeline and renders the result as a text table.

pub mod config;
pub mod render;

use std::fs;

use anyhow::Context;
use reqtrack_core::{ColumnTable, ViewState};
use reqtrack_db::seed::{load_from_path, load_seed};
use reqtrack_db::{InMemoryRecordRepo, RecordRepository};

pub use config::{CliConfig, ConfigError, LogFormat};
pub use render::render_table;

/// Run one list view and return the rendered table.
pub fn run(config: &CliConfig) -> anyhow::Result<String> {
    let records = match &config.data_path {
        Some(path) => load_from_path(path)
            .with_context(|| format!("loading records from {}", path.display()))?,
        None => load_seed().context("loading bundled records")?,
    };
    let repo = InMemoryRecordRepo::new(records)?;
    let rows = repo.list_by_kind(config.kind)?;

    let columns = match &config.columns_path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading column table {}", path.display()))?;
            ColumnTable::from_json(&json)?
        }
        None => ColumnTable::for_kind(config.kind),
    };

    let view = match &config.view_path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading view state {}", path.display()))?;
            serde_json::from_str::<ViewState>(&json)
                .with_context(|| format!("parsing view state {}", path.display()))?
        }
        None => ViewState::for_columns(&columns),
    };

    let ignored = view.conditions.len() - view.active_condition_count(&columns);
    if ignored > 0 {
        tracing::warn!(ignored, "Filter conditions reference unknown columns or operators");
    }

    let visible = view.apply(&rows, &columns);
    tracing::info!(
        kind = config.kind.as_str(),
        total = rows.len(),
        shown = visible.len(),
        "Rendered list view"
    );

    Ok(render_table(&visible, &view.visible_columns(&columns), &columns))
}
