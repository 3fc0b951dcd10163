//! Loading and saving tables.
//!
//! Two source shapes are understood: CSV with a header line, and a JSON
//! array of row objects (what a sheet-to-JSON converter emits). Every cell
//! of a CSV source loads as text; JSON sources keep numbers and booleans.
//! Saving always emits CSV, preserving column order and the stringified
//! cell values. A source that cannot be decoded, or that decodes to zero
//! rows, is a load failure; the caller's previously held table stays as it
//! was.

use std::io::Cursor;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray};
use arrow::csv::{ReaderBuilder, WriterBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{Result, RowsiftError};
use crate::table::{Row, Table, Value};

const BATCH_SIZE: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    JsonRows,
}

/// Guess the source shape from its first non-whitespace byte.
pub fn sniff_format(bytes: &[u8]) -> SheetFormat {
    match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'[') | Some(b'{') => SheetFormat::JsonRows,
        _ => SheetFormat::Csv,
    }
}

pub fn load(bytes: &[u8], format: SheetFormat) -> Result<Table> {
    match format {
        SheetFormat::Csv => load_csv(bytes),
        SheetFormat::JsonRows => load_json_rows(bytes),
    }
}

// Trim whitespace + strip outer quotes if present.
fn clean_header(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}

/// Decode CSV bytes into a table. The header line names the columns, in
/// order; all cells load as text over an all-Utf8 schema.
pub fn load_csv(bytes: &[u8]) -> Result<Table> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| RowsiftError::Load("source is not valid UTF-8".into()))?;
    let header = text
        .lines()
        .next()
        .ok_or_else(|| RowsiftError::Load("source has no header line".into()))?;
    let columns: Vec<String> = header.split(',').map(clean_header).collect();
    if columns.iter().all(|c| c.is_empty()) {
        return Err(RowsiftError::Load("header line names no columns".into()));
    }

    let fields: Vec<Field> = columns
        .iter()
        .map(|name| Field::new(name, DataType::Utf8, true))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let reader = ReaderBuilder::new(schema)
        .with_header(true)
        .with_batch_size(BATCH_SIZE)
        .build(Cursor::new(bytes))?;

    let mut rows: Vec<Row> = Vec::new();
    for batch in reader {
        let batch = batch?;
        let arrays: Vec<&StringArray> = batch
            .columns()
            .iter()
            .map(|array| {
                array.as_any().downcast_ref::<StringArray>().ok_or_else(|| {
                    RowsiftError::Load("decoded column is not text".into())
                })
            })
            .collect::<Result<_>>()?;
        for r in 0..batch.num_rows() {
            let mut row = Row::default();
            for (c, name) in columns.iter().enumerate() {
                if !arrays[c].is_null(r) {
                    row.insert(name.clone(), Value::Text(arrays[c].value(r).to_string()));
                }
            }
            rows.push(row);
        }
    }

    if rows.is_empty() {
        return Err(RowsiftError::EmptySource(
            "source decodes to zero rows".into(),
        ));
    }
    debug!(rows = rows.len(), columns = columns.len(), "decoded csv");
    Ok(Table::new(columns, rows))
}

/// Decode a JSON array of row objects. Column order is the first object's
/// key order; `null` cells are absent; numbers and booleans keep their
/// type. Keys appearing only in later objects are loaded into their rows
/// but do not extend the column set.
pub fn load_json_rows(bytes: &[u8]) -> Result<Table> {
    let objects: Vec<serde_json::Map<String, JsonValue>> = serde_json::from_slice(bytes)
        .map_err(|e| RowsiftError::Load(format!("not an array of row objects: {e}")))?;
    let first = objects
        .first()
        .ok_or_else(|| RowsiftError::EmptySource("source decodes to zero rows".into()))?;
    let columns: Vec<String> = first.keys().cloned().collect();

    let rows = objects
        .iter()
        .map(|object| {
            let mut row = Row::default();
            for (key, value) in object {
                if let Some(cell) = json_cell(value) {
                    row.insert(key.clone(), cell);
                }
            }
            row
        })
        .collect();
    debug!(columns = columns.len(), "decoded json rows");
    Ok(Table::new(columns, rows))
}

fn json_cell(value: &JsonValue) -> Option<Value> {
    match value {
        JsonValue::Null => None,
        JsonValue::Bool(b) => Some(Value::Bool(*b)),
        JsonValue::Number(n) => Some(match n.as_f64() {
            Some(f) => Value::Number(f),
            None => Value::Text(n.to_string()),
        }),
        JsonValue::String(s) => Some(Value::Text(s.clone())),
        other => Some(Value::Text(other.to_string())),
    }
}

/// Serialize a table back to CSV bytes: header line in column order, one
/// line per row, cells stringified the way the evaluator sees them. Absent
/// cells become empty fields.
pub fn save_csv(table: &Table) -> Result<Vec<u8>> {
    let fields: Vec<Field> = table
        .columns()
        .iter()
        .map(|name| Field::new(name, DataType::Utf8, true))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let arrays: Vec<ArrayRef> = table
        .columns()
        .iter()
        .map(|name| {
            let cells: Vec<Option<String>> = table
                .rows()
                .iter()
                .map(|row| row.get(name).map(|v| v.stringify()))
                .collect();
            Arc::new(StringArray::from(cells)) as ArrayRef
        })
        .collect();

    let batch = RecordBatch::try_new(schema, arrays)
        .map_err(|e| RowsiftError::Save(e.to_string()))?;

    let mut out = Vec::new();
    let mut writer = WriterBuilder::new().with_header(true).build(&mut out);
    writer
        .write(&batch)
        .map_err(|e| RowsiftError::Save(e.to_string()))?;
    drop(writer);
    Ok(out)
}
