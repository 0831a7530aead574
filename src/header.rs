//! Header line parsing.
//!
//! The first line of every fsdb file declares the field separator and the
//! columns of every following row:
//!
//! ```text
//! #fsdb -F t name count:l price:d
//! ```
//!
//! [`Header::parse`] validates the line and builds the ordered column list.
//! Grammar violations are [`Error::InvalidHeader`]; an unknown type code is
//! the one recoverable case and only logs a warning.
//!
//! ```rust
//! use fsdb::{ColumnType, Header, Separator};
//!
//! let header = Header::parse("#fsdb -F t name count:l price:d").unwrap();
//! assert_eq!(header.separator(), Separator::Tab);
//! assert_eq!(header.len(), 3);
//! assert_eq!(header.columns()[2].column_type(), ColumnType::Double);
//! assert_eq!(header.column_index("count").unwrap(), 1);
//! ```

use crate::tokenizer;
use crate::{Cell, ColumnType, Error, Result, Separator};
use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

/// Leading token of every header line.
pub const MAGIC: &str = "#fsdb";

/// Letter of the field separator flag (`-F`).
const SEPARATOR_FLAG: char = 'F';

/// A named, typed, positionally fixed field of every row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    name: String,
    index: usize,
    column_type: ColumnType,
}

impl Column {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Zero-based position of the column in every row.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn column_type(&self) -> ColumnType {
        self.column_type
    }
}

impl Serialize for Column {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Column", 3)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("index", &self.index)?;
        state.serialize_field("type", &self.column_type)?;
        state.end()
    }
}

/// A parsed header: raw line, separator, and ordered columns.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    line: String,
    separator: Separator,
    columns: Vec<Column>,
    lookup: IndexMap<String, usize>,
}

impl Header {
    /// Parses a header line (without its trailing newline).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHeader`] if the line does not start with
    /// `#fsdb `, carries a flag other than `-F`, gives `-F` a missing or
    /// unknown separator code, declares the separator twice, or declares a
    /// column with an empty name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fsdb::{Error, Header};
    ///
    /// assert!(Header::parse("#fsdb -F s a b").is_ok());
    /// assert!(matches!(Header::parse("fsdb a b"), Err(Error::InvalidHeader { .. })));
    /// assert!(matches!(Header::parse("#fsdb -F x a"), Err(Error::InvalidHeader { .. })));
    /// ```
    pub fn parse(line: &str) -> Result<Self> {
        let prefix_ok = line
            .strip_prefix(MAGIC)
            .is_some_and(|rest| rest.starts_with(' '));
        if !prefix_ok {
            let shown = line.get(..MAGIC.len() + 1).unwrap_or(line);
            return Err(Error::invalid_header(
                "header must start with `#fsdb `",
                shown,
            ));
        }

        let mut tokens = line.split(' ').filter(|token| !token.is_empty());
        match tokens.next() {
            Some(MAGIC) => {}
            other => {
                return Err(Error::invalid_header(
                    "magic token must be exactly `#fsdb`",
                    other.unwrap_or_default(),
                ))
            }
        }

        let mut separator = None;
        let mut columns = Vec::new();

        while let Some(token) = tokens.next() {
            if let Some(flag) = token.strip_prefix('-') {
                if single_char(flag) != Some(SEPARATOR_FLAG) {
                    return Err(Error::invalid_header(
                        "only the `-F` flag is supported",
                        token,
                    ));
                }
                let code = tokens.next().ok_or_else(|| {
                    Error::invalid_header("missing separator code after flag", token)
                })?;
                let sep = single_char(code)
                    .and_then(Separator::from_code)
                    .ok_or_else(|| {
                        Error::invalid_header("separator code must be one of t, s, S", code)
                    })?;
                if separator.replace(sep).is_some() {
                    return Err(Error::invalid_header(
                        "field separator declared more than once",
                        token,
                    ));
                }
            } else {
                let column = parse_column(token, columns.len())?;
                columns.push(column);
            }
        }

        let header = Header {
            line: line.to_string(),
            separator: separator.unwrap_or_default(),
            lookup: build_lookup(&columns),
            columns,
        };
        tracing::debug!(
            columns = header.len(),
            separator = %header.separator.code(),
            "parsed fsdb header"
        );
        Ok(header)
    }

    /// Builds a header from a separator and `(name, type)` pairs.
    ///
    /// The header line is rendered in canonical form. It parses back to the
    /// same names and separator, with each type replaced by
    /// [`ColumnType::widened`]: `Integer` and `UnsignedInteger` share the
    /// `i`/`I` codes and read back as `Long` and `UnsignedLong`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHeader`] if a name is empty, starts with `-`,
    /// or contains a space or `:`; such names cannot be written to a header.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fsdb::{ColumnType, Header, Separator};
    ///
    /// let header = Header::new(
    ///     Separator::Tab,
    ///     [("host", ColumnType::String), ("rtt", ColumnType::Double)],
    /// )
    /// .unwrap();
    /// assert_eq!(header.line(), "#fsdb -F t host rtt:d");
    /// ```
    pub fn new<I, S>(separator: Separator, columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, ColumnType)>,
        S: Into<String>,
    {
        let mut line = format!("{} -{} {}", MAGIC, SEPARATOR_FLAG, separator.code());
        let mut built = Vec::new();

        for (index, (name, column_type)) in columns.into_iter().enumerate() {
            let name: String = name.into();
            if name.is_empty() || name.starts_with('-') || name.contains(|c: char| c == ' ' || c == ':') {
                return Err(Error::invalid_header(
                    "column name cannot be written to a header",
                    &name,
                ));
            }
            line.push(' ');
            line.push_str(&name);
            if column_type != ColumnType::String {
                line.push(':');
                line.push(column_type.code());
            }
            built.push(Column {
                name,
                index,
                column_type,
            });
        }

        Ok(Header {
            line,
            separator,
            lookup: build_lookup(&built),
            columns: built,
        })
    }

    /// The full header line as it was parsed or rendered.
    #[must_use]
    pub fn line(&self) -> &str {
        &self.line
    }

    #[must_use]
    pub const fn separator(&self) -> Separator {
        self.separator
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of declared columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(Column::name)
    }

    /// Returns the first column named `name`.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.lookup.get(name).map(|&index| &self.columns[index])
    }

    /// Returns the index of the first column named `name`.
    ///
    /// # Errors
    ///
    /// [`Error::NoHeaderInformation`] if the header declares no columns,
    /// [`Error::NoSuchColumn`] if no column carries the name.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        if self.columns.is_empty() {
            return Err(Error::NoHeaderInformation);
        }
        self.lookup
            .get(name)
            .copied()
            .ok_or_else(|| Error::no_such_column(name))
    }

    /// Splits `line` into one cell per column without storing anything.
    ///
    /// The cells borrow from `line`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fsdb::Header;
    ///
    /// let header = Header::parse("#fsdb -F t a b:l").unwrap();
    /// let cells = header.tokenize("x\t42");
    /// assert_eq!(cells[0].raw(), "x");
    /// assert_eq!(cells[1].as_i64(), Some(42));
    /// ```
    #[must_use]
    pub fn tokenize<'a>(&self, line: &'a str) -> Vec<Cell<'a>> {
        tokenizer::tokenize(line, self)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

impl Serialize for Header {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Header", 3)?;
        state.serialize_field("line", &self.line)?;
        state.serialize_field("separator", self.separator.as_str())?;
        state.serialize_field("columns", &self.columns)?;
        state.end()
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn parse_column(token: &str, index: usize) -> Result<Column> {
    let (name, column_type) = match token.split_once(':') {
        Some((name, code)) => {
            let column_type = match code.chars().next() {
                Some(c) => ColumnType::resolve(c, name),
                None => {
                    tracing::warn!(column = name, "empty column type, treating column as string");
                    ColumnType::String
                }
            };
            (name, column_type)
        }
        None => (token, ColumnType::String),
    };

    if name.is_empty() {
        return Err(Error::invalid_header("column name is empty", token));
    }

    Ok(Column {
        name: name.to_string(),
        index,
        column_type,
    })
}

fn build_lookup(columns: &[Column]) -> IndexMap<String, usize> {
    let mut lookup = IndexMap::with_capacity(columns.len());
    for column in columns {
        if lookup.contains_key(column.name()) {
            tracing::debug!(column = column.name(), "duplicate column name, lookups use the first");
            continue;
        }
        lookup.insert(column.name.clone(), column.index);
    }
    lookup
}
