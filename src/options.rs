//! Field separators and table configuration.
//!
//! - [`Separator`]: the literal placed between fields, selected by the header's `-F` flag
//! - [`TableOptions`]: how a [`Table`](crate::Table) stores what it parses
//!
//! ## Examples
//!
//! ```rust
//! use fsdb::{Separator, Table, TableOptions};
//!
//! // Only count data rows, keep nothing
//! let mut table = Table::with_options(TableOptions::count_only());
//! table.parse_header("#fsdb -F S a b").unwrap();
//! table.parse_row("1  2").unwrap();
//! assert_eq!(table.row_count(), 1);
//! assert_eq!(table.separator(), Some(Separator::DoubleSpace));
//! ```

/// Number of rows allocated the first time a table stores a row.
pub const DEFAULT_ROW_CAPACITY: usize = 4096;

/// Upper bound on the first allocation; larger requests are clamped.
pub const MAX_INITIAL_ROW_CAPACITY: usize = 1 << 16;

/// Field separator declared by the `-F <code>` header flag.
///
/// | Code | Separator | Literal |
/// |------|-----------|---------|
/// | `t` | Tab | `"\t"` |
/// | `s` | Space | `" "` |
/// | `S` | DoubleSpace | `"  "` |
///
/// # Examples
///
/// ```rust
/// use fsdb::Separator;
///
/// assert_eq!(Separator::from_code('t'), Some(Separator::Tab));
/// assert_eq!(Separator::DoubleSpace.as_str(), "  ");
/// assert_eq!(Separator::from_code('x'), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Separator {
    Tab,
    #[default]
    Space,
    DoubleSpace,
}

impl Separator {
    /// Maps a one-character separator code to its separator.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            't' => Some(Separator::Tab),
            's' => Some(Separator::Space),
            'S' => Some(Separator::DoubleSpace),
            _ => None,
        }
    }

    /// Returns the code used for this separator in a header's `-F` flag.
    #[must_use]
    pub const fn code(&self) -> char {
        match self {
            Separator::Tab => 't',
            Separator::Space => 's',
            Separator::DoubleSpace => 'S',
        }
    }

    /// Returns the string representation of this separator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Separator::Tab => "\t",
            Separator::Space => " ",
            Separator::DoubleSpace => "  ",
        }
    }
}

/// Configuration options for a [`Table`](crate::Table).
///
/// # Examples
///
/// ```rust
/// use fsdb::TableOptions;
///
/// let options = TableOptions::new();
/// assert!(options.save_rows);
/// assert_eq!(options.initial_row_capacity, 4096);
///
/// let options = TableOptions::new().with_initial_row_capacity(16);
/// assert_eq!(options.initial_row_capacity, 16);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableOptions {
    /// Store parsed rows. When `false` data lines are only counted.
    pub save_rows: bool,
    /// Rows allocated on the first store; growth doubles from there.
    pub initial_row_capacity: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            save_rows: true,
            initial_row_capacity: DEFAULT_ROW_CAPACITY,
        }
    }
}

impl TableOptions {
    /// Creates default options (rows stored, 4096-row first allocation).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that count data rows without storing them.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fsdb::TableOptions;
    ///
    /// assert!(!TableOptions::count_only().save_rows);
    /// ```
    #[must_use]
    pub fn count_only() -> Self {
        TableOptions {
            save_rows: false,
            ..Default::default()
        }
    }

    /// Sets whether parsed rows are stored.
    #[must_use]
    pub fn with_save_rows(mut self, save_rows: bool) -> Self {
        self.save_rows = save_rows;
        self
    }

    /// Sets the number of rows allocated on the first store.
    ///
    /// The value is clamped to `1..=MAX_INITIAL_ROW_CAPACITY`.
    #[must_use]
    pub fn with_initial_row_capacity(mut self, capacity: usize) -> Self {
        self.initial_row_capacity = capacity.clamp(1, MAX_INITIAL_ROW_CAPACITY);
        self
    }
}
