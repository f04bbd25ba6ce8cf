//! DSV table parsing and validation.
//!
//! # Overview
//!
//! This module converts raw input bytes into a validated [`Table`] ready for
//! graph construction. Validation is an ordered, short-circuiting checklist;
//! the first failed check decides the error, so a given input always produces
//! the same [`ParseError`] regardless of how many later checks it would also
//! fail.
//!
//! ## Validation order
//!
//! 1. Decode as UTF-8 (lossy). Any replacement character in the decoded text
//!    rejects the input as binary.
//! 2. Parse records with standard DSV quoting. Reader-level record errors are
//!    collected and deduplicated into one syntax error; an I/O fault aborts;
//!    exceeding the configured record cap truncates.
//! 3. Fewer than two records (header plus at least one data row) is empty.
//! 4. Every cell is trimmed of surrounding whitespace.
//! 5. Header names must be unique.
//! 6. Every record, the header included, must have at least two fields.
//! 7. Every record must have exactly as many fields as the header.
//! 8. No cell may be empty.
//!
//! Checks 6–8 are whole-table passes run in that order, so the lowest
//! numbered violated rule always wins even when a later rule fails on an
//! earlier row.
//!
//! ## Quoting
//!
//! Standard double-quote handling applies: delimiters and line breaks inside
//! quoted cells are data, `""` escapes a quote. Blank lines between records
//! are skipped. No other dialect features (comments, escape characters) are
//! recognized.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashSet;
use std::io::Read;

use tracing::{debug, instrument};

// ---------------------------------------------------------------------------
// ParseError
// ---------------------------------------------------------------------------

/// Why an input failed validation.
///
/// Row numbers are 1-based and count the header as row 1, matching how a
/// user sees the file in an editor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The decoded text contained U+FFFD. Either the input is not UTF-8 or
    /// it legitimately contained a replacement character; both are rejected.
    #[error("input file appears to be binary")]
    BinaryInput,
    /// Reader-level record errors, deduplicated by category and joined in
    /// first-seen order.
    #[error("DSV parsing error: {0} (check that input is in DSV format)")]
    Syntax(String),
    /// The configured record cap was exceeded.
    #[error("DSV parsing error: result was truncated after {limit} records")]
    Truncated { limit: usize },
    /// The underlying reader failed mid-parse.
    #[error("DSV parsing error: input read was aborted: {0}")]
    Aborted(String),
    /// Zero records, or a header with no data rows.
    #[error("DSV is empty (contains zero or one rows)")]
    EmptyOrHeaderOnly,
    /// Two header cells held the same name after trimming. Carries the full
    /// header row for display.
    #[error("the header cannot contain duplicate values: {}", .0.join(", "))]
    DuplicateHeader(Vec<String>),
    /// A record with fewer than two fields cannot describe an edge.
    #[error("each row must have at least 2 fields, found {found} in row {row}")]
    RowTooShort { row: usize, found: usize },
    /// A record's field count differed from the header's.
    #[error("the number of fields in all rows must be equal (expected {expected}, found {found} in row {row})")]
    InconsistentRowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A cell was empty after trimming.
    #[error("there are empty fields in row {row}")]
    EmptyField { row: usize },
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// A validated, rectangular table of trimmed cells.
///
/// The header is stored separately from the data rows; every data row has
/// exactly `header().len()` fields, every field is non-empty, and header
/// names are unique. Constructing a [`Table`] by any other means than
/// [`TableParser::parse`] is not possible, so holders can rely on those
/// invariants without re-checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Column names, in file order.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Number of data rows (the header does not count).
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// All data rows, in file order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Rows `start..end` (0-based, end exclusive). Out-of-range bounds are
    /// clamped, so the result is truncated or empty rather than an error.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> &[Vec<String>] {
        let end = end.min(self.rows.len());
        let start = start.min(end);
        &self.rows[start..end]
    }

    /// Resolve a column name to its 0-based index.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|column| column == name)
    }
}

// ---------------------------------------------------------------------------
// TableParser
// ---------------------------------------------------------------------------

/// Configurable DSV parser.
///
/// The defaults (comma delimiter, no record cap) match the common case;
/// override them builder-style:
///
/// ```
/// use skein_core::table::TableParser;
///
/// let parser = TableParser::new().delimiter(b';').max_records(10_000);
/// let table = parser.parse(b"a;b\nx;y\n")?;
/// assert_eq!(table.row_count(), 1);
/// # Ok::<(), skein_core::table::ParseError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TableParser {
    delimiter: u8,
    max_records: Option<usize>,
}

impl Default for TableParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TableParser {
    /// Parser with the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: b',',
            max_records: None,
        }
    }

    /// Set the field delimiter (a single byte, `b','` by default).
    #[must_use]
    pub const fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Cap the number of records (header included) accepted before the parse
    /// fails with [`ParseError::Truncated`].
    #[must_use]
    pub const fn max_records(mut self, limit: usize) -> Self {
        self.max_records = Some(limit);
        self
    }

    /// Validate `input` and produce a [`Table`].
    ///
    /// # Errors
    ///
    /// Returns the [`ParseError`] for the first violated check in the
    /// module-level validation order.
    #[instrument(skip(self, input), fields(bytes = input.len()))]
    pub fn parse(&self, input: &[u8]) -> Result<Table, ParseError> {
        let decoded = String::from_utf8_lossy(input);
        if decoded.contains('\u{FFFD}') {
            return Err(ParseError::BinaryInput);
        }
        // Strip a UTF-8 BOM so it cannot leak into the first header cell.
        let text = decoded.strip_prefix('\u{FEFF}').unwrap_or(&decoded);

        let records = self.read_records(text)?;
        if records.len() < 2 {
            return Err(ParseError::EmptyOrHeaderOnly);
        }

        let has_duplicate = {
            let mut seen = HashSet::with_capacity(records[0].len());
            records[0].iter().any(|name| !seen.insert(name.as_str()))
        };
        if has_duplicate {
            let mut records = records;
            return Err(ParseError::DuplicateHeader(records.swap_remove(0)));
        }

        // Three whole-table passes in rule order; the header is a row too.
        for (index, record) in records.iter().enumerate() {
            if record.len() < 2 {
                return Err(ParseError::RowTooShort {
                    row: index + 1,
                    found: record.len(),
                });
            }
        }
        let expected = records[0].len();
        for (index, record) in records.iter().enumerate() {
            if record.len() != expected {
                return Err(ParseError::InconsistentRowWidth {
                    row: index + 1,
                    expected,
                    found: record.len(),
                });
            }
        }
        for (index, record) in records.iter().enumerate() {
            if record.iter().any(String::is_empty) {
                return Err(ParseError::EmptyField { row: index + 1 });
            }
        }

        let mut rows = records;
        let header = rows.remove(0);
        debug!(columns = header.len(), rows = rows.len(), "table validated");
        Ok(Table { header, rows })
    }

    /// Read everything from `reader`, then validate as [`Self::parse`] does.
    ///
    /// # Errors
    ///
    /// A reader fault maps to [`ParseError::Aborted`]; everything else
    /// behaves exactly like [`Self::parse`].
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> Result<Table, ParseError> {
        let mut input = Vec::new();
        reader
            .read_to_end(&mut input)
            .map_err(|err| ParseError::Aborted(err.to_string()))?;
        self.parse(&input)
    }

    /// Collect trimmed records, folding reader-level errors into the
    /// taxonomy. Trimming here means no later check ever observes an
    /// untrimmed cell.
    fn read_records(&self, text: &str) -> Result<Vec<Vec<String>>, ParseError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut records: Vec<Vec<String>> = Vec::new();
        let mut categories: Vec<&'static str> = Vec::new();
        for result in reader.records() {
            match result {
                Ok(record) => {
                    if let Some(limit) = self.max_records {
                        if records.len() == limit {
                            return Err(ParseError::Truncated { limit });
                        }
                    }
                    records.push(record.iter().map(|cell| cell.trim().to_owned()).collect());
                }
                Err(err) => match err.kind() {
                    csv::ErrorKind::Io(io_err) => {
                        return Err(ParseError::Aborted(io_err.to_string()));
                    }
                    kind => {
                        let category = error_category(kind);
                        if !categories.contains(&category) {
                            categories.push(category);
                        }
                    }
                },
            }
        }
        if categories.is_empty() {
            Ok(records)
        } else {
            Err(ParseError::Syntax(categories.join("; ")))
        }
    }
}

/// Stable display name for a reader-level error category.
fn error_category(kind: &csv::ErrorKind) -> &'static str {
    match kind {
        csv::ErrorKind::Utf8 { .. } => "invalid UTF-8 in record",
        csv::ErrorKind::UnequalLengths { .. } => "unequal record lengths",
        csv::ErrorKind::Seek => "seek on unseekable input",
        _ => "malformed record",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
