//! Materialization of typed objects from [`Value`]s.
//!
//! This module provides the other half of the serde bridge: [`from_value`]
//! deserializes a dynamic [`Value`] into any `T: Deserialize`. This is the
//! constructor invocation of the toolkit — a computed attribute map fed into
//! the target type. Field mismatches surface unmodified as [`Error::Build`]:
//! the toolkit performs no validation of template shapes against target
//! types, so a mismatch is a template-authoring defect reported directly to
//! the caller.
//!
//! ## Usage
//!
//! ```rust
//! use serde::Deserialize;
//! use specimen::{attrs, from_value, Value};
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Point { x: i32, y: i32 }
//!
//! let value = Value::Object(attrs! { "x": 1, "y": 2 });
//! let point: Point = from_value(value).unwrap();
//! assert_eq!(point, Point { x: 1, y: 2 });
//! ```

use crate::{Error, Number, Result, Value};
use serde::de::{self, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;

/// Deserializes a [`Value`] into any `T: Deserialize`.
///
/// # Errors
///
/// Returns [`Error::Build`] when the value's shape does not match `T`
/// (missing fields, wrong kinds), and an error for any
/// [`Value::Ref`] left in the tree — a bare type reference has no typed
/// representation.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: de::DeserializeOwned,
{
    T::deserialize(value)
}

impl<'de> de::Deserializer<'de> for Value {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(Number::Int(i)) => visitor.visit_i64(i),
            Value::Number(Number::Float(f)) => visitor.visit_f64(f),
            Value::String(s) => visitor.visit_string(s),
            Value::Array(arr) => visitor.visit_seq(de::value::SeqDeserializer::new(arr.into_iter())),
            Value::Object(map) => {
                visitor.visit_map(de::value::MapDeserializer::new(map.into_iter()))
            }
            // chrono's types deserialize from their ISO text forms
            Value::Date(d) => visitor.visit_string(d.format("%Y-%m-%d").to_string()),
            Value::Time(t) => visitor.visit_string(t.format("%H:%M:%S").to_string()),
            Value::Ref(tag) => Err(Error::custom(format!(
                "cannot materialize bare type reference {}",
                tag
            ))),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Null => visitor.visit_none(),
            other => visitor.visit_some(other),
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
        match self {
            Value::String(s) => visitor.visit_enum(s.into_deserializer()),
            other => Err(Error::custom(format!(
                "expected a variant name string, found {:?}",
                other
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self::Deserializer {
        self
    }
}
