//! Ordered attribute map.
//!
//! This module provides [`AttrMap`], a wrapper around [`IndexMap`] that
//! maintains insertion order for attribute names. Order preservation matters
//! throughout the toolkit: template defaults overlay in a stable order, and
//! the tabular formats derive column order from the first record's keys.
//!
//! ## Examples
//!
//! ```rust
//! use specimen::{AttrMap, Value};
//!
//! let mut map = AttrMap::new();
//! map.insert("name".to_string(), Value::from("Alice"));
//! map.insert("age".to_string(), Value::from(30));
//!
//! assert_eq!(map.len(), 2);
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["name", "age"]);
//! ```

use crate::Value;
use indexmap::IndexMap;

/// An insertion-ordered map of attribute names to values.
///
/// # Examples
///
/// ```rust
/// use specimen::{attrs, AttrMap, Value};
///
/// let defaults = attrs! { "x": 1, "y": 2 };
/// let merged = defaults.overlaid(&attrs! { "y": 3 });
///
/// assert_eq!(merged, attrs! { "x": 1, "y": 3 });
/// // the original is untouched
/// assert_eq!(defaults.get("y"), Some(&Value::from(2)));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttrMap(IndexMap<String, Value>);

impl AttrMap {
    /// Creates an empty `AttrMap`.
    #[must_use]
    pub fn new() -> Self {
        AttrMap(IndexMap::new())
    }

    /// Creates an empty `AttrMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        AttrMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts an attribute, returning the previous value if the name was
    /// already present. An existing name keeps its position.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Returns `true` if the map contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes `key`, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Returns the number of attributes in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the attribute names, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the entries, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Returns a mutable iterator over the entries, in insertion order.
    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, Value> {
        self.0.iter_mut()
    }

    /// Returns a copy of this map with `overrides` overlaid on top.
    ///
    /// Neither input is mutated. Overridden names keep their original
    /// position; new names append in the overrides' order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use specimen::attrs;
    ///
    /// let base = attrs! { "x": 1, "y": 2 };
    /// assert_eq!(
    ///     base.overlaid(&attrs! { "y": 3, "z": 4 }),
    ///     attrs! { "x": 1, "y": 3, "z": 4 },
    /// );
    /// ```
    #[must_use]
    pub fn overlaid(&self, overrides: &AttrMap) -> AttrMap {
        let mut merged = self.clone();
        for (key, value) in overrides.iter() {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }
}

impl Extend<(String, Value)> for AttrMap {
    fn extend<I: IntoIterator<Item = (String, Value)>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl From<IndexMap<String, Value>> for AttrMap {
    fn from(map: IndexMap<String, Value>) -> Self {
        AttrMap(map)
    }
}

impl From<AttrMap> for IndexMap<String, Value> {
    fn from(map: AttrMap) -> Self {
        map.0
    }
}

impl IntoIterator for AttrMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AttrMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for AttrMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        AttrMap(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;

    #[test]
    fn test_insertion_order() {
        let map = attrs! { "b": 1, "a": 2 };
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_overlaid_does_not_mutate_inputs() {
        let base = attrs! { "x": 1, "y": 2 };
        let overrides = attrs! { "y": 3 };
        let merged = base.overlaid(&overrides);

        assert_eq!(merged, attrs! { "x": 1, "y": 3 });
        assert_eq!(base, attrs! { "x": 1, "y": 2 });
        assert_eq!(overrides, attrs! { "y": 3 });
    }

    #[test]
    fn test_overlaid_keeps_position_of_overridden_keys() {
        let base = attrs! { "x": 1, "y": 2 };
        let merged = base.overlaid(&attrs! { "x": 9, "z": 3 });
        let keys: Vec<_> = merged.keys().cloned().collect();
        assert_eq!(keys, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_equality_ignores_order() {
        assert_eq!(attrs! { "a": 1, "b": 2 }, attrs! { "b": 2, "a": 1 });
    }
}
