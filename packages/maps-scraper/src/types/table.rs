//! Column-ordered tabular data shared by every export.

use serde::Serialize;

/// A rectangular table of string cells with a fixed header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given header.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Short rows are padded with empty cells and long rows are
    /// truncated so every row matches the header width.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    /// Header names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows in insertion order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Types that map onto a fixed set of table columns.
pub trait Tabular {
    /// Column names in field declaration order.
    const COLUMNS: &'static [&'static str];

    /// Cell values in the same order as [`Tabular::COLUMNS`].
    fn to_row(&self) -> Vec<String>;

    /// Build a table from a slice of values.
    fn to_table(items: &[Self]) -> Table
    where
        Self: Sized,
    {
        let mut table = Table::new(Self::COLUMNS.iter().copied());
        for item in items {
            table.push_row(item.to_row());
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_are_normalized_to_header_width() {
        let mut table = Table::new(["a", "b", "c"]);
        table.push_row(vec!["1".into()]);
        table.push_row(vec!["1".into(), "2".into(), "3".into(), "4".into()]);

        assert_eq!(table.rows()[0], vec!["1", "", ""]);
        assert_eq!(table.rows()[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn test_empty_table_keeps_header() {
        let table = Table::new(["x", "y"]);
        assert!(table.is_empty());
        assert_eq!(table.columns(), ["x", "y"]);
    }
}
