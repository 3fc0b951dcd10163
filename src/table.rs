// used to print out readable forms of a cell value
use std::fmt;

// row maps use a fast hashing algo, since their keys are short column names
use core::hash::BuildHasherDefault;
use seahash::SeaHasher;
use std::collections::HashMap;

pub type RowHasher = BuildHasherDefault<SeaHasher>;

// ------------- Value -------------
/// A scalar cell value. Absence of a value is not a variant here: an absent
/// cell is a missing key in its [`Row`], which is distinct from empty text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Value {
    /// The rendering used everywhere a cell is compared, displayed or
    /// exported. Numbers without a fractional part print without a decimal
    /// point, so a cell loaded as `42` renders as "42" rather than "42.0".
    pub fn stringify(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 9.0e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            Value::Bool(b) => b.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.stringify())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}
impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}
impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

// ------------- Row -------------
/// One row of a table: a mapping from column name to cell value.
/// Keys missing from the map are absent cells.
pub type Row = HashMap<String, Value, RowHasher>;

/// Convenience constructor used by loaders and tests.
pub fn row<I, K, V>(cells: I) -> Row
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    cells
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

// ------------- Table -------------
/// An in-memory table: insertion-ordered column names plus a sequence of
/// rows. The column order comes from the source header (or the first row of
/// a row-object source) and is preserved for display and export. A table is
/// replaced wholesale on each load and never mutated in place; filtering
/// produces a new row subsequence instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    // It's intentional to encapsulate the fields and only expose them
    // through getters, so a table stays immutable after creation.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell lookup by row index and column name. `None` for an absent cell
    /// or an out-of-range index.
    pub fn cell(&self, index: usize, column: &str) -> Option<&Value> {
        self.rows.get(index).and_then(|row| row.get(column))
    }

    /// A new table holding the given row subsequence, in the order the
    /// indices are yielded. Out-of-range indices are ignored. Column order
    /// carries over unchanged.
    pub fn subset<I>(&self, indices: I) -> Table
    where
        I: IntoIterator<Item = usize>,
    {
        let rows = indices
            .into_iter()
            .filter_map(|i| self.rows.get(i).cloned())
            .collect();
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }
}
