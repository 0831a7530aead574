//! Typed row extraction.
//!
//! [`RowDeserializer`] presents a stored row to serde as a map from column
//! name to cell, so any `#[derive(Deserialize)]` struct whose fields are
//! named after columns can be read straight out of a [`Table`](crate::Table).
//! Tuples and sequences receive the cells positionally.
//!
//! Cells are handed over by their coerced value. String cells that hold a
//! number still deserialize into numeric fields, and numeric cells still
//! deserialize into `String`/`&str` fields through their raw text.
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Hop<'a> { host: &'a str, ttl: u8, rtt: Option<f64> }
//!
//! let table = fsdb::from_str("#fsdb -F t host ttl rtt:d\nrouter\t3\t\n").unwrap();
//! let hop: Hop = table.row(0).unwrap().deserialize().unwrap();
//! assert_eq!(hop, Hop { host: "router", ttl: 3, rtt: None });
//! ```

use crate::table::RowView;
use crate::{Cell, Error, Result, Value};
use serde::de::value::{MapDeserializer, SeqDeserializer, StrDeserializer};
use serde::de::{self, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;

/// Deserializes one stored row.
pub struct RowDeserializer<'de> {
    row: RowView<'de>,
}

impl<'de> RowDeserializer<'de> {
    #[must_use]
    pub fn new(row: RowView<'de>) -> Self {
        RowDeserializer { row }
    }

    fn visit_cells<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let mut seq: SeqDeserializer<_, Error> = SeqDeserializer::new(self.row.iter());
        let value = visitor.visit_seq(&mut seq)?;
        seq.end()?;
        Ok(value)
    }
}

impl<'de> de::Deserializer<'de> for RowDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let header = self.row.header();
        let mut map: MapDeserializer<'de, _, Error> =
            MapDeserializer::new(header.names().zip(self.row.iter()));
        let value = visitor.visit_map(&mut map)?;
        map.end()?;
        Ok(value)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.visit_cells(visitor)
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.visit_cells(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.visit_cells(visitor)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct map struct enum
        identifier ignored_any
    }
}

/// Deserializes a single cell.
pub struct CellDeserializer<'de> {
    cell: Cell<'de>,
}

impl<'de> IntoDeserializer<'de, Error> for Cell<'de> {
    type Deserializer = CellDeserializer<'de>;

    fn into_deserializer(self) -> CellDeserializer<'de> {
        CellDeserializer { cell: self }
    }
}

macro_rules! deserialize_number {
    ($($method:ident => $ty:ty, $visit:ident;)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: Visitor<'de>,
            {
                if self.cell.value().is_string() {
                    if let Ok(parsed) = self.cell.raw().trim().parse::<$ty>() {
                        return visitor.$visit(parsed);
                    }
                }
                self.deserialize_any(visitor)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for CellDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.cell.value() {
            Value::String => visitor.visit_borrowed_str(self.cell.raw()),
            Value::Integer(i) => visitor.visit_i32(i),
            Value::UnsignedInteger(u) => visitor.visit_u32(u),
            Value::Long(l) => visitor.visit_i64(l),
            Value::UnsignedLong(u) => visitor.visit_u64(u),
            Value::Double(d) => visitor.visit_f64(d),
        }
    }

    deserialize_number! {
        deserialize_bool => bool, visit_bool;
        deserialize_i8 => i8, visit_i8;
        deserialize_i16 => i16, visit_i16;
        deserialize_i32 => i32, visit_i32;
        deserialize_i64 => i64, visit_i64;
        deserialize_u8 => u8, visit_u8;
        deserialize_u16 => u16, visit_u16;
        deserialize_u32 => u32, visit_u32;
        deserialize_u64 => u64, visit_u64;
        deserialize_f32 => f32, visit_f32;
        deserialize_f64 => f64, visit_f64;
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.cell.raw())
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.cell.raw())
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if self.cell.is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let variant: StrDeserializer<'_, Error> = self.cell.raw().into_deserializer();
        visitor.visit_enum(variant)
    }

    forward_to_deserialize_any! {
        i128 u128 char bytes byte_buf unit unit_struct seq tuple tuple_struct
        map struct identifier ignored_any
    }
}
