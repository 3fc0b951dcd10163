//! Free-text filtering over a [`Table`].
//!
//! A query phrase like "give me all designers in remote locations" is
//! scanned by a fixed, ordered set of phrase patterns into typed [`Clause`]s
//! (location, role), and the clauses are then evaluated against the table by
//! successive intersection of row working sets. Every input string has a
//! well-defined output: text that matches no pattern simply produces no
//! clauses, and no clause restricts anything it cannot resolve.

use regex::Regex;
use lazy_static::lazy_static;

// used for internal working sets of row indices
use roaring::RoaringBitmap;

use crate::table::{Row, Table, Value};

/// Column-name synonyms a location clause is willing to search, in priority
/// order.
pub const LOCATION_COLUMNS: &[&str] = &["city", "location", "state", "country", "address"];

/// Column-name synonyms a role clause is willing to search, in priority
/// order.
pub const ROLE_COLUMNS: &[&str] = &["role", "title", "position", "job", "occupation"];

/// Policy: a clause whose candidate columns are all missing from the table
/// restricts nothing, rather than failing the query or zeroing the result.
pub const SKIP_UNRESOLVED_CLAUSES: bool = true;

// Phrasing verbs that patterns can capture along with the role text.
const FILLER_TOKENS: &[&str] = &["show", "give", "me", "all"];

// ------------- Clause -------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseKind {
    Location,
    Role,
}

/// One extracted filter dimension: the kind, the lowercased free text to
/// match, and the fixed candidate column list for the kind. Clauses are
/// produced per query run and discarded after evaluation.
#[derive(Debug, Clone)]
pub struct Clause {
    kind: ClauseKind,
    match_value: String,
    candidates: &'static [&'static str],
}

impl Clause {
    fn location(value: &str) -> Self {
        Self {
            kind: ClauseKind::Location,
            match_value: value.to_string(),
            candidates: LOCATION_COLUMNS,
        }
    }
    fn role(value: &str) -> Self {
        Self {
            kind: ClauseKind::Role,
            match_value: value.to_string(),
            candidates: ROLE_COLUMNS,
        }
    }
    pub fn kind(&self) -> ClauseKind {
        self.kind
    }
    pub fn match_value(&self) -> &str {
        &self.match_value
    }
    pub fn candidates(&self) -> &'static [&'static str] {
        self.candidates
    }

    /// The sub-list of this clause's candidate columns that actually exist
    /// in `columns` (case-insensitive exact name match), in candidate
    /// priority order rather than table order.
    pub fn resolve_columns<'a>(&self, columns: &'a [String]) -> Vec<&'a str> {
        self.candidates
            .iter()
            .filter_map(|candidate| {
                columns
                    .iter()
                    .find(|column| column.eq_ignore_ascii_case(candidate))
                    .map(|column| column.as_str())
            })
            .collect()
    }
}

lazy_static! {
    // A trailing "in <free text>" suffix names a location.
    static ref LOCATION_SUFFIX: Regex =
        Regex::new(r"(?i)in\s+([a-z0-9\s]+)$").unwrap();
    // Role patterns in fixed priority order; the first that matches wins.
    static ref ROLE_PATTERNS: [Regex; 4] = [
        Regex::new(r"(?i)all\s+([a-z0-9\s]+)\s+in").unwrap(),
        Regex::new(r"(?i)^([a-z0-9\s]+)\s+in").unwrap(),
        Regex::new(r"(?i)show\s+([a-z0-9\s]+)").unwrap(),
        Regex::new(r"(?i)give\s+me\s+([a-z0-9\s]+)").unwrap(),
    ];
}

// Leading phrasing verbs ("show managers") are not part of what the user
// wants to match against a role column. Only the leading run is dropped;
// interior text is kept verbatim.
fn strip_filler(mut value: &str) -> &str {
    'outer: loop {
        for token in FILLER_TOKENS {
            if let Some(rest) = value.strip_prefix(token) {
                if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                    value = rest.trim_start();
                    continue 'outer;
                }
            }
        }
        return value;
    }
}

/// Scan a query phrase into clauses. The text is lowercased here, so match
/// values come out lowercased and trimmed. Both patterns scan the original
/// string independently; a location match does not consume text the role
/// patterns look at. The output is ordered location first, then role,
/// regardless of where each appears in the phrase. Zero clauses is a valid
/// outcome meaning "no restriction", never an error.
pub fn extract_clauses(query: &str) -> Vec<Clause> {
    let query = query.to_lowercase();
    let mut clauses = Vec::new();

    if let Some(caps) = LOCATION_SUFFIX.captures(&query) {
        let value = caps[1].trim();
        if !value.is_empty() {
            clauses.push(Clause::location(value));
        }
    }

    for pattern in ROLE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(&query) {
            let value = strip_filler(caps[1].trim());
            if !value.is_empty() {
                clauses.push(Clause::role(value));
            }
            break;
        }
    }

    clauses
}

// ------------- RowSet -------------
/// An ordered set of row indices carried between successive clause
/// applications. Iteration yields ascending indices, so filtering through a
/// row set preserves the original row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    rows: RoaringBitmap,
}

impl RowSet {
    pub fn new() -> Self {
        Self::default()
    }
    /// The working set every evaluation starts from: all rows of a table
    /// with `len` rows.
    pub fn full(len: usize) -> Self {
        let mut rows = RoaringBitmap::new();
        rows.insert_range(0..len as u32);
        Self { rows }
    }
    pub fn insert(&mut self, index: usize) {
        self.rows.insert(index as u32);
    }
    pub fn contains(&self, index: usize) -> bool {
        self.rows.contains(index as u32)
    }
    pub fn intersect_with(&mut self, other: &RowSet) {
        self.rows &= &other.rows;
    }
    pub fn len(&self) -> usize {
        self.rows.len() as usize
    }
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().map(|index| index as usize)
    }
}

impl FromIterator<usize> for RowSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = RowSet::new();
        for index in iter {
            set.insert(index);
        }
        set
    }
}

// ------------- Evaluation -------------

// A cell matches when its non-empty rendering and the match value contain
// one another in either direction, case-insensitively. "manager" is kept
// for the phrase value "managers", and "new york city" for "new york".
// Empty renderings never match; they convey nothing and would otherwise be
// a trivial substring of every match value.
fn cell_matches(cell: &Value, needle: &str) -> bool {
    let rendered = cell.stringify().to_lowercase();
    !rendered.is_empty() && (rendered.contains(needle) || needle.contains(&rendered))
}

fn row_matches(row: &Row, resolved: &[&str], needle: &str) -> bool {
    resolved
        .iter()
        .any(|column| row.get(*column).is_some_and(|cell| cell_matches(cell, needle)))
}

/// Evaluate clauses against a table. Starting from the full row set, each
/// clause's own filter result is intersected into the working set, so
/// clauses compose as a logical AND while the columns within one clause
/// compose as OR. A clause that resolves no columns is skipped under
/// [`SKIP_UNRESOLVED_CLAUSES`]. A row whose value is absent in every
/// resolved column fails that clause. This path is total: no query or table
/// shape makes it return an error.
pub fn apply(clauses: &[Clause], table: &Table) -> RowSet {
    let mut working = RowSet::full(table.row_count());
    for clause in clauses {
        let resolved = clause.resolve_columns(table.columns());
        if resolved.is_empty() {
            if SKIP_UNRESOLVED_CLAUSES {
                continue;
            }
            working = RowSet::new();
            break;
        }
        let needle = clause.match_value();
        let matched: RowSet = table
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| row_matches(row, &resolved, needle))
            .map(|(index, _)| index)
            .collect();
        working.intersect_with(&matched);
    }
    working
}

// ------------- Engine -------------

/// Rows collected for presentation: stringified cells up to a preview
/// limit, plus the counts a caller needs to report what was truncated.
#[derive(Debug, Clone)]
pub struct Collected {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub row_count: usize,
    pub total_rows: usize,
    pub limited: bool,
}

/// Borrows a table and runs query phrases against it.
pub struct Engine<'a> {
    table: &'a Table,
}

impl<'a> Engine<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }

    /// Extract clauses from the phrase and evaluate them. Blank input means
    /// "no filter" and yields the full row set.
    pub fn execute(&self, query: &str) -> RowSet {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return RowSet::full(self.table.row_count());
        }
        let clauses = extract_clauses(trimmed);
        apply(&clauses, self.table)
    }

    /// Stringify a row set for presentation, keeping at most `preview`
    /// rows when a limit is given. Absent cells render as empty text.
    pub fn collect(&self, rows: &RowSet, preview: Option<usize>) -> Collected {
        let cap = preview.unwrap_or(usize::MAX);
        let mut collected = Vec::new();
        for index in rows.iter() {
            if collected.len() >= cap {
                break;
            }
            let row = &self.table.rows()[index];
            collected.push(
                self.table
                    .columns()
                    .iter()
                    .map(|column| {
                        row.get(column).map(|v| v.stringify()).unwrap_or_default()
                    })
                    .collect::<Vec<String>>(),
            );
        }
        Collected {
            columns: self.table.columns().to_vec(),
            limited: collected.len() < rows.len(),
            rows: collected,
            row_count: rows.len(),
            total_rows: self.table.row_count(),
        }
    }

    /// [`Engine::execute`] followed by [`Engine::collect`].
    pub fn execute_collect(&self, query: &str, preview: Option<usize>) -> Collected {
        let rows = self.execute(query);
        self.collect(&rows, preview)
    }
}
