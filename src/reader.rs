//! Reading fsdb data from a line source.
//!
//! Two ways to consume a stream:
//!
//! - [`Table::parse_reader`] reads the header and every data line into a table.
//! - [`RowReader`] reads the header up front, then yields one row at a time.
//!   Its cells borrow an internal line buffer and are only valid until the
//!   next call, so memory stays flat regardless of input size.
//!
//! Lines are split on `\n`. A trailing `\n` (and a `\r` before it) is removed
//! only if present, so a final line without a newline keeps every character.
//! Invalid UTF-8 is replaced rather than rejected.
//!
//! ```rust
//! use fsdb::RowReader;
//!
//! let input = "#fsdb -F t name n:l\nalpha\t1\n# comment\nbeta\t2";
//! let mut reader = RowReader::new(input.as_bytes()).unwrap();
//! let mut total = 0;
//! while let Some(row) = reader.next_row().unwrap() {
//!     total += row[1].as_i64().unwrap();
//! }
//! assert_eq!(total, 3);
//! assert_eq!(reader.row_count(), 2);
//! ```

use crate::tokenizer::is_skippable;
use crate::{Cell, Error, Header, Result, Table};
use std::io::BufRead;

/// Removes one trailing `\n` and a `\r` directly before it, if present.
///
/// # Examples
///
/// ```rust
/// use fsdb::reader::strip_newline;
///
/// assert_eq!(strip_newline(b"a\tb\n"), b"a\tb");
/// assert_eq!(strip_newline(b"a\tb\r\n"), b"a\tb");
/// assert_eq!(strip_newline(b"a\tb"), b"a\tb");
/// ```
#[must_use]
pub fn strip_newline(line: &[u8]) -> &[u8] {
    match line.strip_suffix(b"\n") {
        Some(line) => line.strip_suffix(b"\r").unwrap_or(line),
        None => line,
    }
}

/// Reads the next line into `line`, returning `false` at end of input.
fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>, line: &mut String) -> Result<bool> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(false);
    }
    line.clear();
    line.push_str(&String::from_utf8_lossy(strip_newline(buf)));
    Ok(true)
}

fn read_header<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>, line: &mut String) -> Result<()> {
    if read_line(reader, buf, line)? {
        Ok(())
    } else {
        Err(Error::invalid_file("input has no header line"))
    }
}

impl Table {
    /// Parses a whole stream: the first line as header, every other line as a row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFile`] for empty input, [`Error::InvalidHeader`]
    /// for a malformed first line, and [`Error::Io`] if reading fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fsdb::{Table, TableOptions};
    ///
    /// let mut table = Table::with_options(TableOptions::count_only());
    /// table.parse_reader("#fsdb a\n1\n2\n\n3".as_bytes()).unwrap();
    /// assert_eq!(table.row_count(), 3);
    /// ```
    pub fn parse_reader<R: BufRead>(&mut self, mut reader: R) -> Result<()> {
        let mut buf = Vec::new();
        let mut line = String::new();

        read_header(&mut reader, &mut buf, &mut line)?;
        self.parse_header(&line)?;

        while read_line(&mut reader, &mut buf, &mut line)? {
            self.parse_row(&line)?;
        }
        tracing::debug!(
            rows = self.row_count(),
            stored = self.stored_rows(),
            "finished reading fsdb stream"
        );
        Ok(())
    }

    /// Parses an in-memory document; same as [`Table::parse_reader`].
    ///
    /// # Errors
    ///
    /// See [`Table::parse_reader`].
    pub fn parse_str(&mut self, input: &str) -> Result<()> {
        self.parse_reader(input.as_bytes())
    }
}

/// Streams rows from a line source without storing them.
pub struct RowReader<R> {
    reader: R,
    header: Header,
    buf: Vec<u8>,
    line: String,
    row_count: usize,
}

impl<R: BufRead> RowReader<R> {
    /// Reads and parses the header line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFile`] for empty input, [`Error::InvalidHeader`]
    /// for a malformed first line, and [`Error::Io`] if reading fails.
    pub fn new(mut reader: R) -> Result<Self> {
        let mut buf = Vec::new();
        let mut line = String::new();
        read_header(&mut reader, &mut buf, &mut line)?;
        let header = Header::parse(&line)?;

        Ok(RowReader {
            reader,
            header,
            buf,
            line,
            row_count: 0,
        })
    }

    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Data rows yielded so far.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.row_count
    }

    /// Reads the next data row, skipping blank and comment lines.
    ///
    /// The returned cells borrow the reader's line buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading fails.
    pub fn next_row(&mut self) -> Result<Option<Vec<Cell<'_>>>> {
        loop {
            if !read_line(&mut self.reader, &mut self.buf, &mut self.line)? {
                return Ok(None);
            }
            if !is_skippable(&self.line) {
                break;
            }
        }
        self.row_count += 1;
        Ok(Some(self.header.tokenize(&self.line)))
    }

    /// The text of the line most recently returned by [`RowReader::next_row`].
    #[must_use]
    pub fn current_line(&self) -> &str {
        &self.line
    }

    /// Consumes the reader, returning the underlying line source.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Read};

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn test_last_line_keeps_final_character() {
        let mut table = Table::new();
        table.parse_str("#fsdb -F t a b\nx\tyz").unwrap();
        assert_eq!(table.cell(0, 1).unwrap().raw(), "yz");
    }

    #[test]
    fn test_crlf_lines() {
        let mut table = Table::new();
        table.parse_str("#fsdb -F t a b:l\r\nx\t5\r\n").unwrap();
        assert_eq!(table.header().unwrap().line(), "#fsdb -F t a b:l");
        assert_eq!(table.cell(0, 1).unwrap().as_i64(), Some(5));
    }

    #[test]
    fn test_empty_input_is_invalid_file() {
        let mut table = Table::new();
        assert!(matches!(table.parse_str(""), Err(Error::InvalidFile(_))));
        assert!(matches!(
            RowReader::new(io::empty()),
            Err(Error::InvalidFile(_))
        ));
    }

    #[test]
    fn test_bad_header_line() {
        let mut table = Table::new();
        assert!(matches!(
            table.parse_str("a\tb\n1\t2\n"),
            Err(Error::InvalidHeader { .. })
        ));
        assert!(table.header().is_none());
    }

    #[test]
    fn test_io_failure() {
        let mut table = Table::new();
        let result = table.parse_reader(io::BufReader::new(FailingReader));
        assert!(matches!(result, Err(Error::Io(ref msg)) if msg.contains("disk on fire")));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut table = Table::new();
        table
            .parse_reader(&b"#fsdb -F t a b\n\xff\tok\n"[..])
            .unwrap();
        assert_eq!(table.cell(0, 0).unwrap().raw(), "\u{fffd}");
        assert_eq!(table.cell(0, 1).unwrap().raw(), "ok");
    }

    #[test]
    fn test_row_reader_streams() {
        let input = "#fsdb -F S a b:d\n1  2.5\n\n#c\n3  x\n";
        let mut reader = RowReader::new(input.as_bytes()).unwrap();
        assert_eq!(reader.header().len(), 2);

        let first = reader.next_row().unwrap().unwrap();
        assert_eq!(first[0].raw(), "1");
        assert_eq!(first[1].as_f64(), Some(2.5));
        assert_eq!(reader.current_line(), "1  2.5");

        let second = reader.next_row().unwrap().unwrap();
        assert_eq!(second[1].as_f64(), Some(0.0));
        assert_eq!(second[1].raw(), "x");

        assert!(reader.next_row().unwrap().is_none());
        assert_eq!(reader.row_count(), 2);
    }
}
