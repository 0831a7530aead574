//! Error types for fsdb parsing.
//!
//! ## Error Categories
//!
//! - **Header Errors**: the magic token, a flag, or a separator code is malformed
//! - **File Errors**: no header line could be read from the input
//! - **Lookup Errors**: a column was requested before any header was parsed,
//!   or no column carries the requested name
//! - **I/O Errors**: the underlying line source failed
//!
//! Malformed numbers inside data rows are *not* errors: coercion falls back to
//! the type's zero value and the raw text stays available on the cell.
//!
//! ## Examples
//!
//! ```rust
//! use fsdb::{Error, Table};
//!
//! let mut table = Table::new();
//! let err = table.parse_header("#fsdb -X t a b").unwrap_err();
//! assert!(matches!(err, Error::InvalidHeader { .. }));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced while parsing or querying an fsdb table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The header line violates the fsdb header grammar.
    #[error("Invalid header: {msg} (at `{token}`)")]
    InvalidHeader { msg: String, token: String },

    /// No header line could be read from the input.
    #[error("Invalid file: {0}")]
    InvalidFile(String),

    /// A header-dependent operation ran before any header was parsed.
    #[error("No header information: parse a header line first")]
    NoHeaderInformation,

    /// No column carries the requested name.
    #[error("No such column: {0}")]
    NoSuchColumn(String),

    /// IO error while reading lines
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a header grammar error naming the offending token.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fsdb::Error;
    ///
    /// let err = Error::invalid_header("unknown flag", "-X");
    /// assert!(err.to_string().contains("-X"));
    /// ```
    pub fn invalid_header(msg: &str, token: &str) -> Self {
        Error::InvalidHeader {
            msg: msg.to_string(),
            token: token.to_string(),
        }
    }

    /// Creates an invalid file error for inputs without a usable header line.
    pub fn invalid_file(msg: &str) -> Self {
        Error::InvalidFile(msg.to_string())
    }

    /// Creates a lookup miss for `name`.
    pub fn no_such_column(name: &str) -> Self {
        Error::NoSuchColumn(name.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fsdb::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for line-source read failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(&err.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
