//! List view state: search term, filter conditions, sort key and hidden
//! columns, bundled into one value the engines take as input.
//!
//! Every update returns a new state; the engines never see a state change
//! underneath them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::columns::{ColumnDef, ColumnTable};
use crate::filter::{filter_records, FilterCondition};
use crate::projection::Projectable;
use crate::sort::{sort_records, SortConfig};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ViewState {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub conditions: Vec<FilterCondition>,
    #[serde(default)]
    pub sort: Option<SortConfig>,
    #[serde(default)]
    pub hidden_columns: BTreeSet<String>,
}

impl ViewState {
    /// Initial state for a page: nothing filtered, columns flagged
    /// `default_hidden` hidden.
    pub fn for_columns(columns: &ColumnTable) -> Self {
        Self {
            hidden_columns: columns
                .columns()
                .iter()
                .filter(|c| c.default_hidden)
                .map(|c| c.id.clone())
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_search(mut self, term: &str) -> Self {
        self.search = term.to_string();
        self
    }

    pub fn with_condition(mut self, condition: FilterCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Drop the condition at `index`; out-of-range indices are ignored.
    pub fn without_condition(mut self, index: usize) -> Self {
        if index < self.conditions.len() {
            self.conditions.remove(index);
        }
        self
    }

    pub fn clear_conditions(mut self) -> Self {
        self.conditions.clear();
        self
    }

    /// Header click on `column`, see [`SortConfig::toggle`].
    pub fn toggle_sort(mut self, column: &str) -> Self {
        self.sort = Some(SortConfig::toggle(self.sort.as_ref(), column));
        self
    }

    pub fn with_sort(mut self, sort: SortConfig) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn clear_sort(mut self) -> Self {
        self.sort = None;
        self
    }

    pub fn hide_column(mut self, id: &str) -> Self {
        self.hidden_columns.insert(id.to_string());
        self
    }

    pub fn show_column(mut self, id: &str) -> Self {
        self.hidden_columns.remove(id);
        self
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.hidden_columns.contains(id)
    }

    /// Columns to render, in table order.
    pub fn visible_columns<'c>(&self, columns: &'c ColumnTable) -> Vec<&'c ColumnDef> {
        columns
            .columns()
            .iter()
            .filter(|c| !self.is_hidden(&c.id))
            .collect()
    }

    /// Number of conditions that can actually exclude rows.
    pub fn active_condition_count(&self, columns: &ColumnTable) -> usize {
        self.conditions
            .iter()
            .filter(|c| c.is_effective(columns))
            .count()
    }

    /// Run the list pipeline: search and conditions, then sort.
    ///
    /// Hidden columns still take part in search and filtering; hiding only
    /// affects what is rendered.
    pub fn apply<'a, R, I>(&self, rows: I, columns: &ColumnTable) -> Vec<&'a R>
    where
        R: Projectable + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let visible = filter_records(rows, &self.search, &self.conditions, columns);
        match &self.sort {
            Some(sort) => sort_records(visible, sort, columns),
            None => visible,
        }
    }
}
