//! Result sets and their snapshot rendering

use tabled::{builder::Builder, settings::Style};

/// Placeholder for statements that describe no columns
pub const EMPTY_RESULT: &str = "<empty>";

/// Placeholder for SQL NULL
pub const NULL: &str = "NULL";

/// Columns and rows returned by a query
///
/// Values are kept in the database's text representation; `None` is NULL.
/// Column names are positional and may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { columns, rows }
    }

    /// Convenience constructor for non-null text rows
    pub fn from_text<C, R, V>(columns: C, rows: R) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        R: IntoIterator<Item = V>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|v| Some(v.into())).collect())
                .collect(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Render a result set as the snapshot text
///
/// ASCII borders, a header row, one line per row, NULL spelled `NULL`,
/// no trailing newline. Column and row order are kept as given.
pub fn render(result: &ResultSet) -> String {
    if result.columns.is_empty() {
        return EMPTY_RESULT.to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(result.columns.iter().cloned());

    for row in &result.rows {
        builder.push_record(row.iter().map(format_value));
    }

    let mut table = builder.build();
    table.with(Style::ascii());
    table.to_string()
}

fn format_value(value: &Option<String>) -> String {
    match value {
        Some(text) => text.clone(),
        None => NULL.to_string(),
    }
}
