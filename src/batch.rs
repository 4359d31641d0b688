//! Row batch model shared between the source, anonymizer, and export writer.
//!
//! A batch is one page of a table: an ordered column schema plus up to
//! `page_size` rows. An empty batch signals end-of-table to the pipeline.

/// A single cell value.
///
/// Source values are narrowed to text, floating-point, or NULL at the
/// database boundary; integers, dates and everything else arrive here
/// already stringified.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Text(String),
    Float(f64),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for NULL and for float NaN, which SQL output treats alike.
    pub fn is_sql_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(f) => f.is_nan(),
            Value::Text(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// One page of rows with a fixed column schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowBatch {
    /// Column names in table order.
    pub columns: Vec<String>,
    /// Rows; each row has exactly `columns.len()` values.
    pub rows: Vec<Vec<Value>>,
}

impl RowBatch {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column in the schema, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn push_row(&mut self, row: Vec<Value>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }
}
