//! Typed cell values.
//!
//! Every field of a data row becomes a [`Cell`]: the raw text exactly as it
//! appeared between separators, plus a [`Value`] coerced according to the
//! column's declared [`ColumnType`].
//!
//! Coercion is lenient. Numbers are read from the leading part of the text
//! and anything unparsable becomes zero; the row is never rejected.
//!
//! ```rust
//! use fsdb::{Cell, ColumnType, Value};
//!
//! let cell = Cell::new("42abc", ColumnType::Long);
//! assert_eq!(cell.value(), Value::Long(42));
//! assert_eq!(cell.raw(), "42abc");
//!
//! let cell = Cell::new("x", ColumnType::Long);
//! assert_eq!(cell.value(), Value::Long(0));
//! ```

use crate::ColumnType;
use serde::{Serialize, Serializer};
use std::fmt;

/// A coerced cell value, tagged by the column type that produced it.
///
/// String-typed cells carry no payload here: their value *is* the raw text,
/// available through [`Cell::raw`].
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    String,
    Integer(i32),
    UnsignedInteger(u32),
    Long(i64),
    UnsignedLong(u64),
    Double(f64),
}

impl Value {
    /// Coerces `raw` into a value of type `ty`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fsdb::{ColumnType, Value};
    ///
    /// assert_eq!(Value::coerce("3", ColumnType::Double), Value::Double(3.0));
    /// assert_eq!(Value::coerce("-7", ColumnType::UnsignedLong), Value::UnsignedLong(0));
    /// assert_eq!(Value::coerce("1.5e2kg", ColumnType::Double), Value::Double(150.0));
    /// ```
    #[must_use]
    pub fn coerce(raw: &str, ty: ColumnType) -> Self {
        match ty {
            ColumnType::String => Value::String,
            ColumnType::Integer => {
                let wide = parse_leading_i64(raw);
                Value::Integer(wide.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
            }
            ColumnType::UnsignedInteger => {
                let wide = parse_leading_u64(raw);
                Value::UnsignedInteger(wide.min(u64::from(u32::MAX)) as u32)
            }
            ColumnType::Long => Value::Long(parse_leading_i64(raw)),
            ColumnType::UnsignedLong => Value::UnsignedLong(parse_leading_u64(raw)),
            ColumnType::Double => Value::Double(parse_leading_f64(raw)),
        }
    }

    /// Returns the value an absent field takes in a column of type `ty`.
    #[must_use]
    pub const fn default_for(ty: ColumnType) -> Self {
        match ty {
            ColumnType::String => Value::String,
            ColumnType::Integer => Value::Integer(0),
            ColumnType::UnsignedInteger => Value::UnsignedInteger(0),
            ColumnType::Long => Value::Long(0),
            ColumnType::UnsignedLong => Value::UnsignedLong(0),
            ColumnType::Double => Value::Double(0.0),
        }
    }

    /// Returns the column type this value was coerced to.
    #[must_use]
    pub const fn column_type(&self) -> ColumnType {
        match self {
            Value::String => ColumnType::String,
            Value::Integer(_) => ColumnType::Integer,
            Value::UnsignedInteger(_) => ColumnType::UnsignedInteger,
            Value::Long(_) => ColumnType::Long,
            Value::UnsignedLong(_) => ColumnType::UnsignedLong,
            Value::Double(_) => ColumnType::Double,
        }
    }

    /// Returns `true` if the value is string-typed.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String)
    }

    /// Returns the value as an `i64` if it is integral and fits.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Integer(i) => Some(i64::from(i)),
            Value::UnsignedInteger(u) => Some(i64::from(u)),
            Value::Long(l) => Some(l),
            Value::UnsignedLong(u) => i64::try_from(u).ok(),
            Value::String | Value::Double(_) => None,
        }
    }

    /// Returns the value as a `u64` if it is integral and non-negative.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::Integer(i) => u64::try_from(i).ok(),
            Value::UnsignedInteger(u) => Some(u64::from(u)),
            Value::Long(l) => u64::try_from(l).ok(),
            Value::UnsignedLong(u) => Some(u),
            Value::String | Value::Double(_) => None,
        }
    }

    /// Returns the value as an `f64` for any numeric variant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fsdb::Value;
    ///
    /// assert_eq!(Value::Long(4).as_f64(), Some(4.0));
    /// assert_eq!(Value::String.as_f64(), None);
    /// ```
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Integer(i) => Some(f64::from(i)),
            Value::UnsignedInteger(u) => Some(f64::from(u)),
            Value::Long(l) => Some(l as f64),
            Value::UnsignedLong(u) => Some(u as f64),
            Value::Double(d) => Some(d),
            Value::String => None,
        }
    }
}

/// One field of a row: raw text plus its coerced value.
///
/// The raw text borrows from whatever owns the line: the [`Table`](crate::Table)
/// for stored rows, or the reader's line buffer for streamed rows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell<'a> {
    raw: &'a str,
    value: Value,
}

impl<'a> Cell<'a> {
    /// Builds a cell from raw text, coercing it to `ty`.
    #[must_use]
    pub fn new(raw: &'a str, ty: ColumnType) -> Self {
        Cell {
            raw,
            value: Value::coerce(raw, ty),
        }
    }

    /// An empty cell for a field the row did not supply.
    #[must_use]
    pub const fn absent(ty: ColumnType) -> Self {
        Cell {
            raw: "",
            value: Value::default_for(ty),
        }
    }

    pub(crate) const fn from_parts(raw: &'a str, value: Value) -> Self {
        Cell { raw, value }
    }

    /// The unmodified field text.
    #[inline]
    #[must_use]
    pub const fn raw(&self) -> &'a str {
        self.raw
    }

    /// The unmodified field text; same as [`Cell::raw`].
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.raw
    }

    /// The coerced value.
    #[inline]
    #[must_use]
    pub const fn value(&self) -> Value {
        self.value
    }

    /// Returns `true` if the field text is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.value.as_i64()
    }

    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        self.value.as_u64()
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.value.as_f64()
    }
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.raw)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match *self {
            Value::String => serializer.serialize_unit(),
            Value::Integer(i) => serializer.serialize_i32(i),
            Value::UnsignedInteger(u) => serializer.serialize_u32(u),
            Value::Long(l) => serializer.serialize_i64(l),
            Value::UnsignedLong(u) => serializer.serialize_u64(u),
            Value::Double(d) => serializer.serialize_f64(d),
        }
    }
}

impl Serialize for Cell<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.value {
            Value::String => serializer.serialize_str(self.raw),
            value => value.serialize(serializer),
        }
    }
}

/// Splits an optional sign off the start of `s`, after skipping whitespace.
fn split_sign(s: &str) -> (bool, &str) {
    let s = s.trim_start();
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else {
        (false, s.strip_prefix('+').unwrap_or(s))
    }
}

fn leading_digits(s: &str) -> &str {
    let len = s.bytes().take_while(u8::is_ascii_digit).count();
    &s[..len]
}

/// Reads the leading base-10 integer of `s`, saturating on overflow.
pub(crate) fn parse_leading_i64(s: &str) -> i64 {
    let (negative, rest) = split_sign(s);
    leading_digits(rest).bytes().fold(0i64, |acc, b| {
        let digit = i64::from(b - b'0');
        if negative {
            acc.saturating_mul(10).saturating_sub(digit)
        } else {
            acc.saturating_mul(10).saturating_add(digit)
        }
    })
}

/// Reads the leading unsigned base-10 integer of `s`; negative input is 0.
pub(crate) fn parse_leading_u64(s: &str) -> u64 {
    let (negative, rest) = split_sign(s);
    if negative {
        return 0;
    }
    leading_digits(rest).bytes().fold(0u64, |acc, b| {
        acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
    })
}

/// Reads the longest floating literal at the start of `s`, or 0.0.
pub(crate) fn parse_leading_f64(s: &str) -> f64 {
    let (negative, rest) = split_sign(s);
    let sign = if negative { -1.0 } else { 1.0 };

    let starts_with_word =
        |word: &str| rest.get(..word.len()).is_some_and(|p| p.eq_ignore_ascii_case(word));
    if starts_with_word("inf") {
        return sign * f64::INFINITY;
    }
    if starts_with_word("nan") {
        return f64::NAN;
    }

    let bytes = rest.as_bytes();
    let int_len = leading_digits(rest).len();
    let mut end = int_len;
    let mut frac_len = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_len = leading_digits(&rest[end + 1..]).len();
        if int_len > 0 || frac_len > 0 {
            end += 1 + frac_len;
        }
    }
    if int_len == 0 && frac_len == 0 {
        return 0.0;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = leading_digits(&rest[exp_end..]).len();
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    rest[..end].parse::<f64>().map_or(0.0, |v| sign * v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_coercion() {
        assert_eq!(parse_leading_i64("4"), 4);
        assert_eq!(parse_leading_i64("  -12 apples"), -12);
        assert_eq!(parse_leading_i64("+9"), 9);
        assert_eq!(parse_leading_i64("x"), 0);
        assert_eq!(parse_leading_i64(""), 0);
        assert_eq!(parse_leading_i64("-"), 0);
        assert_eq!(parse_leading_i64("99999999999999999999"), i64::MAX);
        assert_eq!(parse_leading_i64("-99999999999999999999"), i64::MIN);
    }

    #[test]
    fn test_unsigned_coercion() {
        assert_eq!(parse_leading_u64("18446744073709551615"), u64::MAX);
        assert_eq!(parse_leading_u64("18446744073709551616"), u64::MAX);
        assert_eq!(parse_leading_u64("-1"), 0);
        assert_eq!(parse_leading_u64("12.9"), 12);
    }

    #[test]
    fn test_double_coercion() {
        assert_eq!(parse_leading_f64("3"), 3.0);
        assert_eq!(parse_leading_f64("-2.5"), -2.5);
        assert_eq!(parse_leading_f64(".5"), 0.5);
        assert_eq!(parse_leading_f64("5."), 5.0);
        assert_eq!(parse_leading_f64("1e3"), 1000.0);
        assert_eq!(parse_leading_f64("1e"), 1.0);
        assert_eq!(parse_leading_f64("2E-1x"), 0.2);
        assert_eq!(parse_leading_f64("."), 0.0);
        assert_eq!(parse_leading_f64("abc"), 0.0);
        assert_eq!(parse_leading_f64("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_leading_f64("NaN").is_nan());
    }

    #[test]
    fn test_narrow_types_saturate() {
        assert_eq!(
            Value::coerce("3000000000", ColumnType::Integer),
            Value::Integer(i32::MAX)
        );
        assert_eq!(
            Value::coerce("5000000000", ColumnType::UnsignedInteger),
            Value::UnsignedInteger(u32::MAX)
        );
        assert_eq!(
            Value::coerce("-5", ColumnType::Integer),
            Value::Integer(-5)
        );
    }

    #[test]
    fn test_string_keeps_raw() {
        let cell = Cell::new("hello world", ColumnType::String);
        assert!(cell.value().is_string());
        assert_eq!(cell.as_str(), "hello world");
        assert_eq!(cell.to_string(), "hello world");
    }

    #[test]
    fn test_absent_cells_default() {
        assert_eq!(Cell::absent(ColumnType::Double).value(), Value::Double(0.0));
        assert_eq!(Cell::absent(ColumnType::Long).as_i64(), Some(0));
        assert!(Cell::absent(ColumnType::String).is_empty());
    }

    #[test]
    fn test_cell_serializes_by_type() {
        let text = Cell::new("abc", ColumnType::String);
        let num = Cell::new("7", ColumnType::Long);
        let real = Cell::new("0.25", ColumnType::Double);
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"abc\"");
        assert_eq!(serde_json::to_string(&num).unwrap(), "7");
        assert_eq!(serde_json::to_string(&real).unwrap(), "0.25");
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::UnsignedLong(u64::MAX).as_i64(), None);
        assert_eq!(Value::Long(-1).as_u64(), None);
        assert_eq!(Value::Double(1.5).as_i64(), None);
        assert_eq!(Value::Integer(3).column_type(), ColumnType::Integer);
    }
}
