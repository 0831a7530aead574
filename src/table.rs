//! The in-memory fsdb table.
//!
//! A [`Table`] owns the parsed [`Header`] and every stored row. Each stored
//! row keeps a private copy of its line; cells are spans into that copy plus
//! their coerced [`Value`], laid out row-major so cell `(row, column)` lives
//! at `row * columns_len + column`.
//!
//! ```rust
//! use fsdb::Table;
//!
//! let mut table = Table::new();
//! table.parse_header("#fsdb -F t one two three").unwrap();
//! for line in ["a\tb\t3", "", "#comment", "d\te\t3"] {
//!     table.parse_row(line).unwrap();
//! }
//!
//! assert_eq!(table.columns_len(), 3);
//! assert_eq!(table.row_count(), 2);
//! assert_eq!(table.cell(1, 0).unwrap().raw(), "d");
//! ```

use crate::de::RowDeserializer;
use crate::options::MAX_INITIAL_ROW_CAPACITY;
use crate::tokenizer::{self, is_skippable};
use crate::{Cell, Column, Error, Header, Result, Separator, TableOptions, Value};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use std::ops::Range;

#[derive(Clone, Debug)]
struct StoredCell {
    span: Range<usize>,
    value: Value,
}

/// Row-major cell storage with explicit doubling growth.
#[derive(Clone, Debug, Default)]
struct RowStore {
    lines: Vec<String>,
    cells: Vec<StoredCell>,
    allocated: usize,
}

impl RowStore {
    fn len(&self) -> usize {
        self.lines.len()
    }

    fn push(&mut self, line: &str, header: &Header, initial_capacity: usize) {
        if self.lines.len() == self.allocated {
            self.grow(header.len(), initial_capacity);
        }
        self.cells.extend(
            tokenizer::row_spans(line, header).map(|(span, value)| StoredCell { span, value }),
        );
        self.lines.push(line.to_owned());
    }

    /// Failed reservations are logged; pushes then fall back to `Vec`'s own growth.
    fn grow(&mut self, columns_len: usize, initial_capacity: usize) {
        let target = if self.allocated == 0 {
            initial_capacity.clamp(1, MAX_INITIAL_ROW_CAPACITY)
        } else {
            self.allocated.saturating_mul(2)
        };
        let lines = self.lines.try_reserve_exact(target - self.lines.len());
        let cells = self
            .cells
            .try_reserve_exact(target.saturating_mul(columns_len) - self.cells.len());
        if let Err(err) = lines.and(cells) {
            tracing::warn!(
                rows = target,
                columns = columns_len,
                %err,
                "could not reserve row storage"
            );
        }
        tracing::trace!(from = self.allocated, to = target, "grew row storage");
        self.allocated = target;
    }
}

/// A parsed fsdb table: header, stored rows, and the data row count.
///
/// Tables are created empty. [`Table::parse_header`] installs a header and
/// discards anything parsed before it; [`Table::parse_row`] then stores or
/// counts one line at a time. Dropping the table releases everything it owns.
#[derive(Clone, Debug, Default)]
pub struct Table {
    options: TableOptions,
    header: Option<Header>,
    store: RowStore,
    row_count: usize,
}

impl Table {
    /// Creates an empty table with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with the given options.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fsdb::{Table, TableOptions};
    ///
    /// let table = Table::with_options(TableOptions::count_only());
    /// assert!(!table.options().save_rows);
    /// ```
    #[must_use]
    pub fn with_options(options: TableOptions) -> Self {
        Table {
            options,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Parses `line` as the table's header.
    ///
    /// On success the previous header and all rows are discarded. On failure
    /// the table is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHeader`] for any header grammar violation.
    pub fn parse_header(&mut self, line: &str) -> Result<()> {
        let header = Header::parse(line)?;
        self.set_header(header);
        Ok(())
    }

    /// Installs an already-built header, discarding all rows.
    pub fn set_header(&mut self, header: Header) {
        if self.header.is_some() {
            tracing::debug!(
                discarded_rows = self.row_count,
                "replacing fsdb header"
            );
        }
        self.store = RowStore::default();
        self.row_count = 0;
        self.header = Some(header);
    }

    /// Parses one data line.
    ///
    /// Blank lines and lines starting with `#` are skipped without being
    /// counted. Any other line increments the row count and, when rows are
    /// saved, is tokenized and stored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoHeaderInformation`] if a data line arrives before
    /// any header was parsed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fsdb::{Table, Value};
    ///
    /// let mut table = Table::new();
    /// table.parse_header("#fsdb -F s host rtt:d").unwrap();
    /// table.parse_row("example.org 12.5").unwrap();
    /// assert_eq!(table.cell(0, 1).unwrap().value(), Value::Double(12.5));
    /// ```
    pub fn parse_row(&mut self, line: &str) -> Result<()> {
        if is_skippable(line) {
            return Ok(());
        }
        let header = self.header.as_ref().ok_or(Error::NoHeaderInformation)?;
        self.row_count += 1;
        if self.options.save_rows {
            self.store
                .push(line, header, self.options.initial_row_capacity);
        }
        Ok(())
    }

    #[must_use]
    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    #[must_use]
    pub fn separator(&self) -> Option<Separator> {
        self.header.as_ref().map(Header::separator)
    }

    /// Declared columns, empty before a header is parsed.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        match &self.header {
            Some(header) => header.columns(),
            None => &[],
        }
    }

    #[must_use]
    pub fn columns_len(&self) -> usize {
        self.columns().len()
    }

    /// Number of data lines parsed since the last header, stored or not.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of rows available through [`Table::row`] and [`Table::cell`].
    #[must_use]
    pub fn stored_rows(&self) -> usize {
        self.store.len()
    }

    /// Rows the current storage can hold before it grows again.
    #[must_use]
    pub const fn row_capacity(&self) -> usize {
        self.store.allocated
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.len() == 0
    }

    /// Returns the index of the first column named `name`.
    ///
    /// # Errors
    ///
    /// [`Error::NoHeaderInformation`] if no columns are known yet,
    /// [`Error::NoSuchColumn`] if no column carries the name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fsdb::{Error, Table};
    ///
    /// let mut table = Table::new();
    /// assert_eq!(table.column_index("a"), Err(Error::NoHeaderInformation));
    ///
    /// table.parse_header("#fsdb -F t a b").unwrap();
    /// assert_eq!(table.column_index("b"), Ok(1));
    /// assert!(matches!(table.column_index("c"), Err(Error::NoSuchColumn(_))));
    /// ```
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.header
            .as_ref()
            .ok_or(Error::NoHeaderInformation)?
            .column_index(name)
    }

    /// Returns the cell at `(row, column)`, or `None` when out of range.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<Cell<'_>> {
        self.row(row)?.get(column)
    }

    /// Returns a view of stored row `index`.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<RowView<'_>> {
        let header = self.header.as_ref()?;
        let line = self.store.lines.get(index)?;
        let width = header.len();
        let start = index * width;
        Some(RowView {
            header,
            index,
            line,
            cells: &self.store.cells[start..start + width],
        })
    }

    /// Iterates over stored rows in input order.
    pub fn rows(&self) -> impl Iterator<Item = RowView<'_>> + '_ {
        (0..self.store.len()).filter_map(move |index| self.row(index))
    }

    /// The stored copy of row `index`'s line.
    #[must_use]
    pub fn raw_line(&self, index: usize) -> Option<&str> {
        self.store.lines.get(index).map(String::as_str)
    }

    /// Deserializes every stored row into `T`, keyed by column name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Custom`] if a row does not fit `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fsdb::Table;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize, Debug, PartialEq)]
    /// struct Ping { host: String, rtt: f64 }
    ///
    /// let table = fsdb::from_str("#fsdb -F t host rtt:d\na\t1.5\nb\t2\n").unwrap();
    /// let pings: Vec<Ping> = table.deserialize_rows().unwrap();
    /// assert_eq!(pings[1], Ping { host: "b".to_string(), rtt: 2.0 });
    /// ```
    pub fn deserialize_rows<'a, T>(&'a self) -> Result<Vec<T>>
    where
        T: Deserialize<'a>,
    {
        self.rows().map(|row| row.deserialize()).collect()
    }

    /// Releases the header and all rows, leaving an empty table.
    pub fn clear(&mut self) {
        self.header = None;
        self.store = RowStore::default();
        self.row_count = 0;
    }
}

/// A borrowed view of one stored row.
#[derive(Clone, Copy, Debug)]
pub struct RowView<'a> {
    header: &'a Header,
    index: usize,
    line: &'a str,
    cells: &'a [StoredCell],
}

impl<'a> RowView<'a> {
    /// Zero-based position of the row among stored rows.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of cells, always the header's column count.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn header(&self) -> &'a Header {
        self.header
    }

    /// The full line this row was parsed from.
    #[must_use]
    pub fn raw_line(&self) -> &'a str {
        self.line
    }

    /// Returns the cell in `column`.
    #[must_use]
    pub fn get(&self, column: usize) -> Option<Cell<'a>> {
        let line = self.line;
        self.cells
            .get(column)
            .map(|stored| Cell::from_parts(&line[stored.span.clone()], stored.value))
    }

    /// Returns the cell in the first column named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchColumn`] if no column carries the name.
    pub fn get_by_name(&self, name: &str) -> Result<Cell<'a>> {
        let column = self.header.column_index(name)?;
        self.get(column).ok_or_else(|| Error::no_such_column(name))
    }

    /// Iterates over the row's cells in column order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Cell<'a>> + 'a {
        let line = self.line;
        let cells = self.cells;
        cells
            .iter()
            .map(move |stored| Cell::from_parts(&line[stored.span.clone()], stored.value))
    }

    /// Raw text of every cell, in column order.
    #[must_use]
    pub fn raw_fields(&self) -> Vec<&'a str> {
        self.iter().map(|cell| cell.raw()).collect()
    }

    /// Deserializes the row into `T`, keyed by column name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Custom`] if the row does not fit `T`.
    pub fn deserialize<T>(&self) -> Result<T>
    where
        T: Deserialize<'a>,
    {
        T::deserialize(RowDeserializer::new(*self))
    }
}

impl Serialize for RowView<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, cell) in self.header.names().zip(self.iter()) {
            map.serialize_entry(name, &cell)?;
        }
        map.end()
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.stored_rows()))?;
        for row in self.rows() {
            seq.serialize_element(&row)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColumnType;

    fn example_table() -> Table {
        let mut table = Table::new();
        table.parse_header("#fsdb -F t one two three").unwrap();
        for line in ["a\tb\t3", "", "#comment", "d\te\t3"] {
            table.parse_row(line).unwrap();
        }
        table
    }

    #[test]
    fn test_example_scenario() {
        let table = example_table();
        assert_eq!(table.columns_len(), 3);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.row(0).unwrap().raw_fields(), ["a", "b", "3"]);
        assert_eq!(table.row(1).unwrap().raw_fields(), ["d", "e", "3"]);
        assert!(table.row(2).is_none());
    }

    #[test]
    fn test_row_major_access() {
        let table = example_table();
        assert_eq!(table.cell(0, 2).unwrap().raw(), "3");
        assert_eq!(table.cell(1, 1).unwrap().raw(), "e");
        assert!(table.cell(0, 3).is_none());
        assert!(table.cell(5, 0).is_none());
    }

    #[test]
    fn test_count_only_mode() {
        let mut table = Table::with_options(TableOptions::count_only());
        table.parse_header("#fsdb -F t a b").unwrap();
        for line in ["1\t2", "#", "", "3\t4", "5"] {
            table.parse_row(line).unwrap();
        }
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.stored_rows(), 0);
        assert_eq!(table.row_capacity(), 0);
        assert!(table.row(0).is_none());
    }

    #[test]
    fn test_row_before_header() {
        let mut table = Table::new();
        assert_eq!(table.parse_row("a b"), Err(Error::NoHeaderInformation));
        assert_eq!(table.parse_row("# just a comment"), Ok(()));
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_reparse_header_discards_rows() {
        let mut table = example_table();
        table.parse_header("#fsdb -F s x:l").unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.stored_rows(), 0);
        assert_eq!(table.columns_len(), 1);
        assert_eq!(table.separator(), Some(Separator::Space));
        table.parse_row("7 ignored").unwrap();
        assert_eq!(table.cell(0, 0).unwrap().as_i64(), Some(7));
    }

    #[test]
    fn test_failed_header_keeps_state() {
        let mut table = example_table();
        assert!(table.parse_header("#fsdb -F q a").is_err());
        assert!(table.parse_header("garbage").is_err());
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns_len(), 3);
        assert_eq!(table.separator(), Some(Separator::Tab));
        assert_eq!(table.header().unwrap().line(), "#fsdb -F t one two three");
    }

    #[test]
    fn test_growth_doubles() {
        let options = TableOptions::new().with_initial_row_capacity(2);
        let mut table = Table::with_options(options);
        table.parse_header("#fsdb -F t n:l").unwrap();
        table.parse_row("0").unwrap();
        assert_eq!(table.row_capacity(), 2);
        for i in 1..5 {
            table.parse_row(&i.to_string()).unwrap();
        }
        assert_eq!(table.row_capacity(), 8);
        let values: Vec<_> = table
            .rows()
            .map(|row| row.get(0).unwrap().as_i64().unwrap())
            .collect();
        assert_eq!(values, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_oversized_initial_capacity_is_bounded() {
        let options = TableOptions {
            initial_row_capacity: usize::MAX,
            ..TableOptions::new()
        };
        let mut table = Table::with_options(options);
        table.parse_header("#fsdb a").unwrap();
        table.parse_row("x").unwrap();
        assert_eq!(table.row_capacity(), MAX_INITIAL_ROW_CAPACITY);
        assert_eq!(table.cell(0, 0).unwrap().raw(), "x");

        let mut table =
            Table::with_options(TableOptions::new().with_initial_row_capacity(usize::MAX));
        table.parse_header("#fsdb -F t a b c").unwrap();
        table.parse_row("1\t2\t3").unwrap();
        assert_eq!(table.cell(0, 2).unwrap().raw(), "3");
    }

    #[test]
    fn test_default_initial_capacity() {
        let mut table = Table::new();
        table.parse_header("#fsdb a").unwrap();
        table.parse_row("x").unwrap();
        assert_eq!(table.row_capacity(), 4096);
    }

    #[test]
    fn test_row_view_lookups() {
        let mut table = Table::new();
        table.parse_header("#fsdb -F t name age:l").unwrap();
        table.parse_row("ann\t41\textra").unwrap();
        let row = table.row(0).unwrap();
        assert_eq!(row.raw_line(), "ann\t41\textra");
        assert_eq!(row.get_by_name("age").unwrap().as_i64(), Some(41));
        assert!(matches!(
            row.get_by_name("height"),
            Err(Error::NoSuchColumn(_))
        ));
        assert_eq!(table.raw_line(0), Some("ann\t41\textra"));
    }

    #[test]
    fn test_programmatic_header() {
        let header = Header::new(
            Separator::Tab,
            [("small", ColumnType::Integer), ("big", ColumnType::UnsignedLong)],
        )
        .unwrap();
        let mut table = Table::new();
        table.set_header(header);
        table.parse_row("-3\t18446744073709551615").unwrap();
        assert_eq!(table.cell(0, 0).unwrap().value(), Value::Integer(-3));
        assert_eq!(table.cell(0, 1).unwrap().as_u64(), Some(u64::MAX));
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut table = example_table();
        table.clear();
        assert!(table.header().is_none());
        assert_eq!(table.columns_len(), 0);
        assert_eq!(table.row_count(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_serialize_table() {
        let mut table = Table::new();
        table.parse_header("#fsdb -F t name n:l x:d").unwrap();
        table.parse_row("a\t1\t0.5").unwrap();
        table.parse_row("b").unwrap();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(
            json,
            r#"[{"name":"a","n":1,"x":0.5},{"name":"b","n":0,"x":0.0}]"#
        );
    }
}
