//! Projection of a row onto a named field as display text.
//!
//! The filter and sort engines only ever see rows through this trait, so
//! they work the same on typed [`Record`](crate::record::Record)s and on
//! loosely-typed JSON rows.

use serde_json::{Map, Value};

/// A row that can be read field-by-field as text.
pub trait Projectable {
    /// Text value of `field`, or `None` if the row has no such field.
    fn project(&self, field: &str) -> Option<String>;
}

impl<T: Projectable + ?Sized> Projectable for &T {
    fn project(&self, field: &str) -> Option<String> {
        (**self).project(field)
    }
}

impl Projectable for Map<String, Value> {
    fn project(&self, field: &str) -> Option<String> {
        self.get(field).map(value_to_text)
    }
}

/// Render a JSON value the way a table cell would show it.
///
/// Arrays are joined with `", "`, `null` is empty.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .collect::<Vec<_>>()
            .join(crate::record::LIST_SEPARATOR),
        Value::Object(_) => value.to_string(),
    }
}
