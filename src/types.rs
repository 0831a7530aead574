//! Column type registry.
//!
//! A column declaration may carry a one-character type suffix (`name:d`).
//! The suffix is looked up once, while the header is parsed; data is never
//! re-examined to infer a type.
//!
//! | Code | Type |
//! |------|------|
//! | `f`, `d` | [`ColumnType::Double`] |
//! | `l`, `i` | [`ColumnType::Long`] |
//! | `L`, `I` | [`ColumnType::UnsignedLong`] |
//! | `s` | [`ColumnType::String`] |
//!
//! Any other code falls back to [`ColumnType::String`] with a warning.

use serde::{Serialize, Serializer};
use std::fmt;

/// Semantic type of a column's values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ColumnType {
    #[default]
    String,
    Integer,
    UnsignedInteger,
    Long,
    UnsignedLong,
    Double,
}

impl ColumnType {
    /// Maps a type code to its column type, or `None` if the code is unknown.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fsdb::ColumnType;
    ///
    /// assert_eq!(ColumnType::from_code('d'), Some(ColumnType::Double));
    /// assert_eq!(ColumnType::from_code('i'), Some(ColumnType::Long));
    /// assert_eq!(ColumnType::from_code('I'), Some(ColumnType::UnsignedLong));
    /// assert_eq!(ColumnType::from_code('q'), None);
    /// ```
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'f' | 'd' => Some(ColumnType::Double),
            'l' | 'i' => Some(ColumnType::Long),
            'L' | 'I' => Some(ColumnType::UnsignedLong),
            's' => Some(ColumnType::String),
            _ => None,
        }
    }

    /// Resolves the type code of column `column`, defaulting unknown codes to
    /// [`ColumnType::String`].
    pub(crate) fn resolve(code: char, column: &str) -> Self {
        Self::from_code(code).unwrap_or_else(|| {
            tracing::warn!(
                column,
                code = %code,
                "unknown column type, treating column as string"
            );
            ColumnType::String
        })
    }

    /// Returns the code written after `:` for this type in a header.
    ///
    /// The 32-bit types share the codes of their 64-bit counterparts, so they
    /// read back as [`ColumnType::Long`] and [`ColumnType::UnsignedLong`].
    #[must_use]
    pub const fn code(&self) -> char {
        match self {
            ColumnType::String => 's',
            ColumnType::Integer => 'i',
            ColumnType::UnsignedInteger => 'I',
            ColumnType::Long => 'l',
            ColumnType::UnsignedLong => 'L',
            ColumnType::Double => 'd',
        }
    }

    /// The type this one reads back as after a header round trip.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fsdb::ColumnType;
    ///
    /// assert_eq!(ColumnType::Integer.widened(), ColumnType::Long);
    /// assert_eq!(ColumnType::UnsignedInteger.widened(), ColumnType::UnsignedLong);
    /// assert_eq!(ColumnType::Double.widened(), ColumnType::Double);
    /// ```
    #[must_use]
    pub const fn widened(&self) -> Self {
        match self {
            ColumnType::Integer => ColumnType::Long,
            ColumnType::UnsignedInteger => ColumnType::UnsignedLong,
            other => *other,
        }
    }

    /// Returns `true` for every type except [`ColumnType::String`].
    #[inline]
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        !matches!(self, ColumnType::String)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::String => "string",
            ColumnType::Integer => "integer",
            ColumnType::UnsignedInteger => "unsigned integer",
            ColumnType::Long => "long",
            ColumnType::UnsignedLong => "unsigned long",
            ColumnType::Double => "double",
        };
        f.write_str(name)
    }
}

impl Serialize for ColumnType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_char(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_registered_code() {
        let table = [
            ('f', ColumnType::Double),
            ('d', ColumnType::Double),
            ('l', ColumnType::Long),
            ('i', ColumnType::Long),
            ('L', ColumnType::UnsignedLong),
            ('I', ColumnType::UnsignedLong),
            ('s', ColumnType::String),
        ];
        for (code, expected) in table {
            assert_eq!(ColumnType::from_code(code), Some(expected), "code {code}");
        }
    }

    #[test]
    fn test_unknown_code_resolves_to_string() {
        assert_eq!(ColumnType::resolve('z', "col"), ColumnType::String);
        assert_eq!(ColumnType::resolve('D', "col"), ColumnType::String);
    }

    #[test]
    fn test_codes_reparse() {
        for ty in [
            ColumnType::String,
            ColumnType::Long,
            ColumnType::UnsignedLong,
            ColumnType::Double,
        ] {
            assert_eq!(ColumnType::from_code(ty.code()), Some(ty));
        }
        assert_eq!(
            ColumnType::from_code(ColumnType::Integer.code()),
            Some(ColumnType::Long)
        );
    }
}
