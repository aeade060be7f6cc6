//! Driver-neutral query results
//!
//! Backends convert their native rows into [`ResultSet`] so callers can
//! decode columns by name without depending on a particular driver.

/// A single column value
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// SQL NULL
    Null,
    /// Boolean
    Bool(bool),
    /// Any integer width
    Int(i64),
    /// Floating point
    Float(f64),
    /// Character data
    Text(String),
    /// One-dimensional text array; elements may be NULL
    TextArray(Vec<Option<String>>),
    /// A column type the backend does not convert, kept by type name
    Unsupported(String),
}

impl SqlValue {
    /// Short type label used in decode error messages
    pub fn kind(&self) -> &str {
        match self {
            SqlValue::Null => "null",
            SqlValue::Bool(_) => "bool",
            SqlValue::Int(_) => "integer",
            SqlValue::Float(_) => "float",
            SqlValue::Text(_) => "text",
            SqlValue::TextArray(_) => "text[]",
            SqlValue::Unsupported(type_name) => type_name,
        }
    }
}

/// One result row, borrowing its column names from the owning [`ResultSet`]
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    index: usize,
    columns: &'a [String],
    values: &'a [SqlValue],
}

impl<'a> Row<'a> {
    /// Zero-based position of this row in the result set
    pub fn index(&self) -> usize {
        self.index
    }

    /// Look up a value by column name (first match wins)
    pub fn get(&self, column: &str) -> Option<&'a SqlValue> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values.get(i))
    }
}

/// Column names plus all returned rows, in the order the server sent them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    columns: Vec<String>,
    rows: Vec<Vec<SqlValue>>,
}

impl ResultSet {
    /// Build a result set; every row must have one value per column
    pub fn new(columns: Vec<String>, rows: Vec<Vec<SqlValue>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    /// Column names
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no rows were returned
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate rows in server order
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().enumerate().map(|(index, values)| Row {
            index,
            columns: &self.columns,
            values,
        })
    }
}

#[cfg(test)]
#[path = "value_test.rs"]
mod tests;
