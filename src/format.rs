//! fsdb File Format
//!
//! This module documents the fsdb flat-file format as implemented by this
//! library.
//!
//! # Overview
//!
//! An fsdb file is plain text. The first line is a header that names every
//! column and declares the field separator; every following line is either a
//! data row, a comment, or blank.
//!
//! ```text
//! #fsdb -F t host rtt:d hops:l
//! example.org	12.5	7
//! # measured from the lab network
//! example.net	31.0	11
//! ```
//!
//! # Header Line
//!
//! ```text
//! HeaderLine   ::= "#fsdb" " " Token (" " Token)*
//! Token        ::= Flag | ColumnDecl
//! Flag         ::= "-F" " " SepCode
//! ColumnDecl   ::= Name [":" TypeChar]
//! ```
//!
//! **Rules**:
//! - The line must begin with exactly `#fsdb ` (five characters and a space)
//! - Tokens are separated by spaces; runs of spaces are treated as one
//! - `-F` is the only flag. Its argument is a single separator code
//! - The separator may be declared once. Without `-F` it defaults to a single space
//! - Flags and column declarations may appear in any order
//! - A column name is everything before the first `:`; it may not be empty
//! - Column names are not required to be unique. Lookups return the first match
//!
//! ## Separator Codes
//!
//! | Code | Separator | Literal |
//! |------|-----------|---------|
//! | `t` | tab | `"\t"` |
//! | `s` | single space | `" "` |
//! | `S` | double space | `"  "` |
//!
//! ## Type Codes
//!
//! | Code | Type | Coerced to |
//! |------|------|------------|
//! | *(none)*, `s` | string | raw text |
//! | `d`, `f` | double | `f64` |
//! | `l`, `i` | long | `i64` |
//! | `L`, `I` | unsigned long | `u64` |
//!
//! An unknown type code is not an error: the column is treated as a string
//! and a warning is logged.
//!
//! # Data Lines
//!
//! ```text
//! DataLine     ::= "" | "#" AnyText | Field (Sep Field)*
//! ```
//!
//! - Blank lines and lines starting with `#` are skipped and not counted
//! - Fields are split on exact matches of the separator literal; the double
//!   space separator needs both spaces to split
//! - Empty fields are preserved (`a\t\tc` has three fields)
//! - Fields beyond the declared columns are ignored (historical files often
//!   carry a trailing comment field)
//! - Missing trailing fields are empty and take their type's zero value
//!
//! # Coercion
//!
//! Typed fields are coerced leniently. Integers read an optional sign and the
//! leading decimal digits (`"42kg"` is 42, `"x"` is 0) and saturate on
//! overflow; unsigned columns read negative input as 0. Doubles read the
//! longest leading floating literal, including `inf` and `nan`.
//!
//! The raw text of every field is kept, so a field that coerced to zero can
//! still be told apart from a literal `0`.
//!
//! # Limitations
//!
//! - No quoting or escaping: a field can never contain the separator
//! - Only the `-F` header flag is understood
//! - Trailer comments (`# | command`) are skipped like any other comment

// This module contains only documentation; no implementation code
