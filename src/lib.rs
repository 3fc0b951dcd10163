//! Rowsift – filter spreadsheet rows with short free-text phrases.
//!
//! Instead of a query language, a phrase like "give me all designers in
//! remote locations" is scanned into typed predicate fragments and applied
//! to an in-memory table:
//! * A [`table::Table`] is an insertion-ordered set of column names plus a
//!   sequence of rows; each [`table::Row`] maps column names to scalar
//!   [`table::Value`]s (absent cells are missing keys).
//! * A [`query::Clause`] is one extracted filter dimension (location or
//!   role) carrying its lowercased match text and a fixed, priority-ordered
//!   list of candidate column names.
//! * A [`query::RowSet`] is the working set of row indices carried between
//!   successive clause applications; clauses AND together by intersection,
//!   while the columns within one clause OR together.
//!
//! ## Modules
//! * [`table`] – The tabular data model (columns, rows, cell values).
//! * [`query`] – Clause extraction from phrases and predicate evaluation.
//! * [`sheet`] – CSV / JSON-rows decoding and CSV encoding.
//! * [`session`] – Current table / query / result state over the pure core.
//! * [`server`] – The HTTP surface for upload, query and download.
//! * [`settings`] – File- and environment-based configuration.
//!
//! ## Leniency
//! The engine is total: any phrase yields a well-defined result. Text that
//! matches no pattern produces no clauses ("no restriction"), and a clause
//! whose candidate columns are absent from the table is skipped outright
//! (see [`query::SKIP_UNRESOLVED_CLAUSES`]). Only the load/save layer can
//! fail, and a failed load never disturbs the table already held.
//!
//! ## Quick Start
//! ```
//! use rowsift::query::Engine;
//! use rowsift::sheet;
//!
//! let csv = b"name,role,city\nA,Software Engineer,San Francisco\nB,Manager,New York\n";
//! let table = sheet::load_csv(csv).unwrap();
//! let engine = Engine::new(&table);
//! let rows = engine.execute("show managers in new york");
//! assert_eq!(rows.len(), 1);
//! ```

pub mod error;
pub mod query;
pub mod server;
pub mod session;
pub mod settings;
pub mod sheet;
pub mod table;
