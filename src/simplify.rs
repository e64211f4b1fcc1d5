//! Flattening instances into attribute maps.
//!
//! A [`Simplify`] implementation turns an instance of some source family —
//! plain aggregate, mapping, ORM row — into the flat name/value mapping a
//! template needs. [`ValueSimplifier`] is the generic implementation for
//! anything serde can see into; families with their own field-enumeration
//! rules (e.g. rows that must exclude bookkeeping columns) supply their own
//! implementation.
//!
//! ## Examples
//!
//! ```rust
//! use serde::Serialize;
//! use specimen::{attrs, Simplify, ValueSimplifier};
//!
//! #[derive(Serialize)]
//! struct Sample { value: i64 }
//!
//! let simplifier = ValueSimplifier;
//! let attrs = simplifier.one(&Sample { value: 1 }).unwrap();
//! assert_eq!(attrs, attrs! { "value": 1 });
//! ```

use crate::{to_value, AttrMap, Error, Result, Value};
use serde::Serialize;

/// Extracts flat attribute mappings from instances of `T`.
pub trait Simplify<T> {
    /// Flattens one instance into an attribute map.
    fn one(&self, obj: &T) -> Result<AttrMap>;

    /// Flattens each instance in turn.
    fn many(&self, objs: &[T]) -> Result<Vec<AttrMap>> {
        objs.iter().map(|obj| self.one(obj)).collect()
    }
}

/// The generic simplifier: any `T: Serialize` whose serialized form is
/// map-like flattens to its fields; mapping types flatten to a fresh copy of
/// their entries.
///
/// Instances with nothing to extract — primitives, sequences — fail with
/// [`Error::CannotSimplify`] naming the offending type and value.
#[derive(Clone, Copy, Debug, Default)]
pub struct ValueSimplifier;

impl<T: Serialize> Simplify<T> for ValueSimplifier {
    fn one(&self, obj: &T) -> Result<AttrMap> {
        match to_value(obj)? {
            Value::Object(map) => Ok(map),
            other => Err(Error::cannot_simplify(std::any::type_name::<T>(), &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct MyStruct {
        value: i64,
    }

    #[test]
    fn test_struct() {
        let actual = ValueSimplifier.one(&MyStruct { value: 1 }).unwrap();
        assert_eq!(actual, attrs! { "value": 1 });
    }

    #[test]
    fn test_many() {
        let actual = ValueSimplifier
            .many(&[MyStruct { value: 1 }, MyStruct { value: 2 }])
            .unwrap();
        assert_eq!(actual, vec![attrs! { "value": 1 }, attrs! { "value": 2 }]);
    }

    #[test]
    fn test_mapping_copies_entries() {
        let map: BTreeMap<String, i64> = [("x".to_string(), 1)].into_iter().collect();
        let actual = ValueSimplifier.one(&map).unwrap();
        assert_eq!(actual, attrs! { "x": 1 });
    }

    #[test]
    fn test_int_cannot_simplify() {
        let err = ValueSimplifier.one(&1i64).unwrap_err();
        assert_eq!(err.to_string(), "cannot simplify i64: 1");
    }

    #[test]
    fn test_list_cannot_simplify() {
        let err = ValueSimplifier.one(&vec![1i64]).unwrap_err();
        assert!(err.to_string().starts_with("cannot simplify"));
        assert!(err.to_string().contains("[1]"));
    }
}
