//! The stateful surface over the pure query core.
//!
//! A session holds what the presentation layer would otherwise keep as
//! global state: the current table, the current query text and the latest
//! result. The core stays pure; the session just wires loads, query runs
//! and exports together, with two rules worth naming: a failed load leaves
//! the previously held table untouched, and only the latest query result is
//! kept (rapid repeated queries supersede one another).

use tracing::info;

use crate::error::{Result, RowsiftError};
use crate::query::{Collected, Engine, RowSet};
use crate::sheet::{self, SheetFormat};
use crate::table::Table;

/// What a successful load tells the caller.
#[derive(Debug, Clone)]
pub struct LoadSummary {
    pub format: SheetFormat,
    pub row_count: usize,
    pub columns: Vec<String>,
}

#[derive(Default)]
pub struct Session {
    table: Option<Table>,
    query_text: Option<String>,
    result: Option<RowSet>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }
    pub fn query_text(&self) -> Option<&str> {
        self.query_text.as_deref()
    }
    pub fn result(&self) -> Option<&RowSet> {
        self.result.as_ref()
    }

    /// Decode bytes (format sniffed) and replace the held table wholesale.
    /// On failure the previous table, query and result stay exactly as they
    /// were; on success the query and result are reset.
    pub fn load(&mut self, bytes: &[u8]) -> Result<LoadSummary> {
        let format = sheet::sniff_format(bytes);
        let table = sheet::load(bytes, format)?;
        let summary = LoadSummary {
            format,
            row_count: table.row_count(),
            columns: table.columns().to_vec(),
        };
        info!(rows = summary.row_count, columns = summary.columns.len(), "table loaded");
        self.table = Some(table);
        self.query_text = None;
        self.result = None;
        Ok(summary)
    }

    /// Run a query phrase against the held table and keep its result as the
    /// current one. Blank text clears the filter. Fails only when nothing
    /// has been loaded yet.
    pub fn query(&mut self, text: &str, preview: Option<usize>) -> Result<Collected> {
        let table = self.table.as_ref().ok_or(RowsiftError::NoTable)?;
        let engine = Engine::new(table);
        let rows = engine.execute(text);
        let collected = engine.collect(&rows, preview);
        info!(matched = rows.len(), total = table.row_count(), "query evaluated");
        self.result = Some(rows);
        self.query_text = Some(text.trim().to_string());
        Ok(collected)
    }

    /// Serialize the current result (or the whole table when no query has
    /// run) to CSV bytes.
    pub fn export(&self) -> Result<Vec<u8>> {
        let table = self.table.as_ref().ok_or(RowsiftError::NoTable)?;
        match &self.result {
            Some(rows) => sheet::save_csv(&table.subset(rows.iter())),
            None => sheet::save_csv(table),
        }
    }
}
