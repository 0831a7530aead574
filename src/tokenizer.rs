//! Row tokenizing.
//!
//! A data line is split on exact matches of the separator literal, so the
//! double-space separator only splits on two contiguous spaces. Splitting
//! never touches the line itself; fields are returned as byte spans or
//! borrowed slices.
//!
//! At most one field per column is produced. Text after the last column's
//! field is ignored and missing trailing fields take their type's default.

use crate::{Cell, Header, Separator, Value};
use std::ops::Range;

/// Returns `true` for lines that carry no data: blank lines and `#` comments.
///
/// # Examples
///
/// ```rust
/// use fsdb::tokenizer::is_skippable;
///
/// assert!(is_skippable(""));
/// assert!(is_skippable("# | command history"));
/// assert!(!is_skippable("a\tb"));
/// ```
#[inline]
#[must_use]
pub fn is_skippable(line: &str) -> bool {
    line.is_empty() || line.starts_with('#')
}

/// Iterator over the byte spans of the fields of one line.
#[derive(Clone, Debug)]
pub struct FieldSpans<'a> {
    line: &'a str,
    separator: &'static str,
    position: usize,
    finished: bool,
}

impl<'a> FieldSpans<'a> {
    #[must_use]
    pub fn new(line: &'a str, separator: Separator) -> Self {
        FieldSpans {
            line,
            separator: separator.as_str(),
            position: 0,
            finished: false,
        }
    }
}

impl Iterator for FieldSpans<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        if self.finished {
            return None;
        }
        let start = self.position;
        match self.line[start..].find(self.separator) {
            Some(offset) => {
                let end = start + offset;
                self.position = end + self.separator.len();
                Some(start..end)
            }
            None => {
                self.finished = true;
                Some(start..self.line.len())
            }
        }
    }
}

impl std::iter::FusedIterator for FieldSpans<'_> {}

/// Splits `line` on every occurrence of `separator`.
///
/// # Examples
///
/// ```rust
/// use fsdb::tokenizer::split_fields;
/// use fsdb::Separator;
///
/// let fields: Vec<_> = split_fields("a  b c", Separator::DoubleSpace).collect();
/// assert_eq!(fields, ["a", "b c"]);
/// ```
pub fn split_fields(line: &str, separator: Separator) -> impl Iterator<Item = &str> + '_ {
    FieldSpans::new(line, separator).map(move |span| &line[span])
}

/// Yields one `(span, value)` pair per column of `header`.
///
/// Columns without a field get an empty span and their type's default value.
pub(crate) fn row_spans<'a>(
    line: &'a str,
    header: &'a Header,
) -> impl Iterator<Item = (Range<usize>, Value)> + 'a {
    let mut spans = FieldSpans::new(line, header.separator());
    header.columns().iter().map(move |column| {
        let column_type = column.column_type();
        match spans.next() {
            Some(span) => {
                let value = Value::coerce(&line[span.clone()], column_type);
                (span, value)
            }
            None => (0..0, Value::default_for(column_type)),
        }
    })
}

/// Splits `line` into one borrowed cell per column of `header`.
pub(crate) fn tokenize<'a>(line: &'a str, header: &Header) -> Vec<Cell<'a>> {
    let mut cells = Vec::with_capacity(header.len());
    cells.extend(
        row_spans(line, header).map(|(span, value)| Cell::from_parts(&line[span], value)),
    );
    cells
}
