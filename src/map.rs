//! Ordered map type for HJSON objects.
//!
//! This module provides [`HjsonMap`], a wrapper around [`IndexMap`] whose
//! iteration order is the textual order in which keys first appeared. Key
//! order is a first-class observable property of the HJSON data model: it
//! survives a parse → emit round trip, so a hand-edited configuration file
//! keeps its shape.
//!
//! ## Examples
//!
//! ```rust
//! use hjson::{HjsonMap, Value};
//!
//! let mut map = HjsonMap::new();
//! map.insert("name".to_string(), Value::from("Alice"));
//! map.insert("age".to_string(), Value::from(30.0));
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["name", "age"]);
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

/// An insertion-ordered map of string keys to HJSON values.
///
/// A thin wrapper around [`IndexMap`]. The parser relies on
/// [`contains_key`](HjsonMap::contains_key) to reject duplicate keys and on
/// the insertion order to preserve the textual order of first appearance.
///
/// # Examples
///
/// ```rust
/// use hjson::{HjsonMap, Value};
///
/// let mut map = HjsonMap::new();
/// map.insert("first".to_string(), Value::from(1.0));
/// map.insert("second".to_string(), Value::from(2.0));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HjsonMap(IndexMap<String, crate::Value>);

impl HjsonMap {
    /// Creates an empty `HjsonMap`.
    #[must_use]
    pub fn new() -> Self {
        HjsonMap(IndexMap::new())
    }

    /// Creates an empty `HjsonMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        HjsonMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, keeping the key's original position if it
    /// was already present. Returns the previous value for that key.
    pub fn insert(&mut self, key: String, value: crate::Value) -> Option<crate::Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hjson::{HjsonMap, Value};
    ///
    /// let mut map = HjsonMap::new();
    /// map.insert("key".to_string(), Value::from(42.0));
    /// assert_eq!(map.get("key").and_then(|v| v.as_f64()), Some(42.0));
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::Value> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value for `key`.
    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut crate::Value> {
        self.0.get_mut(key)
    }

    /// Returns `true` if the map contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes `key`, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<crate::Value> {
        self.0.shift_remove(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.0.keys()
    }

    /// Iterates over the values in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::Value> {
        self.0.values()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }
}

impl From<HashMap<String, crate::Value>> for HjsonMap {
    fn from(map: HashMap<String, crate::Value>) -> Self {
        HjsonMap(map.into_iter().collect())
    }
}

impl From<HjsonMap> for HashMap<String, crate::Value> {
    fn from(map: HjsonMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for HjsonMap {
    type Item = (String, crate::Value);
    type IntoIter = indexmap::map::IntoIter<String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a HjsonMap {
    type Item = (&'a String, &'a crate::Value);
    type IntoIter = indexmap::map::Iter<'a, String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, crate::Value)> for HjsonMap {
    fn from_iter<T: IntoIterator<Item = (String, crate::Value)>>(iter: T) -> Self {
        HjsonMap(IndexMap::from_iter(iter))
    }
}

impl Extend<(String, crate::Value)> for HjsonMap {
    fn extend<T: IntoIterator<Item = (String, crate::Value)>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}
