//! # fsdb
//!
//! A parser and typed in-memory table for the fsdb flat-file format.
//!
//! ## What is fsdb?
//!
//! fsdb is a self-describing, line-oriented tabular text format. A header line
//! names the columns, optionally types them, and picks the field separator;
//! every following line is a row:
//!
//! ```text
//! #fsdb -F t host rtt:d hops:l
//! example.org	12.5	7
//! example.net	31.0	11
//! ```
//!
//! ## Key Features
//!
//! - **Strict Headers**: Malformed headers are rejected and never half-applied
//! - **Lenient Rows**: Short rows are padded, long rows truncated, bad numbers become zero
//! - **Raw Text Kept**: Every cell keeps its original text next to its coerced value
//! - **Count-Only Mode**: Count data rows without storing them
//! - **Streaming**: Read rows one at a time with [`RowReader`]
//! - **Serde Integration**: Deserialize rows into your own types, serialize tables to JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use fsdb::{Table, Value};
//!
//! let mut table = Table::new();
//! table.parse_header("#fsdb -F t one two three:d").unwrap();
//! table.parse_row("a\tb\t3").unwrap();
//! table.parse_row("# a comment").unwrap();
//! table.parse_row("d\te\t4.5").unwrap();
//!
//! assert_eq!(table.row_count(), 2);
//! assert_eq!(table.column_index("three").unwrap(), 2);
//! assert_eq!(table.cell(0, 2).unwrap().value(), Value::Double(3.0));
//! assert_eq!(table.cell(1, 0).unwrap().raw(), "d");
//! ```
//!
//! ### Whole Documents
//!
//! ```rust
//! let table = fsdb::from_str("#fsdb -F s name age:l\nann 41\nbob 37\n").unwrap();
//! let ages: Vec<i64> = table
//!     .rows()
//!     .filter_map(|row| row.get(1).and_then(|cell| cell.as_i64()))
//!     .collect();
//! assert_eq!(ages, vec![41, 37]);
//! ```
//!
//! ### Typed Rows
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Person { name: String, age: u32 }
//!
//! let table = fsdb::from_str("#fsdb -F s name age:l\nann 41\n").unwrap();
//! let people: Vec<Person> = table.deserialize_rows().unwrap();
//! assert_eq!(people[0].age, 41);
//! ```
//!
//! ## Logging
//!
//! The crate reports through [`tracing`]: unknown column types are logged at
//! `warn`, header replacement and stream summaries at `debug`. Install any
//! subscriber to see them.
//!
//! ## Format Specification
//!
//! See the [`format`] module for the header grammar, separator and type
//! codes, and the coercion rules.
//!
//! ## Examples
//!
//! Runnable examples, started with `cargo run --example <name>`:
//!
//! - **`simple`** - Parsing a document and reading cells
//! - **`typed_rows`** - Deserializing rows into structs
//! - **`streaming`** - Counting and streaming large inputs

pub mod de;
pub mod error;
pub mod format;
pub mod header;
pub mod options;
pub mod reader;
pub mod table;
pub mod tokenizer;
pub mod types;
pub mod value;

pub use error::{Error, Result};
pub use header::{Column, Header};
pub use options::{Separator, TableOptions};
pub use reader::RowReader;
pub use table::{RowView, Table};
pub use types::ColumnType;
pub use value::{Cell, Value};

use std::io;

/// Parses an fsdb document held in a string.
///
/// # Examples
///
/// ```rust
/// let table = fsdb::from_str("#fsdb -F t a b\n1\t2\n").unwrap();
/// assert_eq!(table.row_count(), 1);
/// ```
///
/// # Errors
///
/// Returns an error if the input has no header line or the header is malformed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<Table> {
    from_slice(s.as_bytes())
}

/// Parses an fsdb document from bytes. Invalid UTF-8 is replaced.
///
/// # Errors
///
/// Returns an error if the input has no header line or the header is malformed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Table> {
    let mut table = Table::new();
    table.parse_reader(v)?;
    Ok(table)
}

/// Parses an fsdb document from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
///
/// let cursor = Cursor::new(b"#fsdb -F t a\nx\ny\n");
/// let table = fsdb::from_reader(cursor).unwrap();
/// assert_eq!(table.row_count(), 2);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input has no header line,
/// or the header is malformed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(reader: R) -> Result<Table>
where
    R: io::Read,
{
    from_reader_with_options(reader, TableOptions::default())
}

/// Parses an fsdb document from an I/O stream with custom table options.
///
/// # Examples
///
/// ```rust
/// use fsdb::TableOptions;
///
/// let input = "#fsdb -F t a\nx\ny\n".as_bytes();
/// let table = fsdb::from_reader_with_options(input, TableOptions::count_only()).unwrap();
/// assert_eq!(table.row_count(), 2);
/// assert_eq!(table.stored_rows(), 0);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input has no header line,
/// or the header is malformed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader_with_options<R>(reader: R, options: TableOptions) -> Result<Table>
where
    R: io::Read,
{
    let mut table = Table::with_options(options);
    table.parse_reader(io::BufReader::new(reader))?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_document() {
        let table = from_str("#fsdb -F t one two three\na\tb\t3\n\n#comment\nd\te\t3\n").unwrap();
        assert_eq!(table.columns_len(), 3);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.row(0).unwrap().raw_fields(), ["a", "b", "3"]);
        assert_eq!(table.row(1).unwrap().raw_fields(), ["d", "e", "3"]);
    }

    #[test]
    fn test_coercion_examples() {
        let table = from_str("#fsdb -F t d:d f:f l:l i:i\n3\t3\t4\tx\n").unwrap();
        let row = table.row(0).unwrap();
        assert_eq!(row.get(0).unwrap().value(), Value::Double(3.0));
        assert_eq!(row.get(1).unwrap().value(), Value::Double(3.0));
        assert_eq!(row.get(2).unwrap().value(), Value::Long(4));
        assert_eq!(row.get(3).unwrap().value(), Value::Long(0));
        assert_eq!(row.get(3).unwrap().raw(), "x");
    }

    #[test]
    fn test_from_reader_with_options() {
        let input = "#fsdb -F s a\n1\n2\n3\n";
        let table =
            from_reader_with_options(input.as_bytes(), TableOptions::count_only()).unwrap();
        assert_eq!(table.row_count(), 3);
        assert!(table.is_empty());
    }

    #[test]
    fn test_no_header() {
        assert!(matches!(from_str(""), Err(Error::InvalidFile(_))));
        assert!(matches!(from_slice(b"\n"), Err(Error::InvalidHeader { .. })));
    }
}
