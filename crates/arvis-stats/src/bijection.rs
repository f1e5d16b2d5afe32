//! Dense value/ID mappings for categorical attributes
//!
//! An [`IdMap`] assigns each distinct value a dense index in `[0, len)` in the order
//! the values are given, and answers both directions in constant time. For nominal
//! attributes the order is first-seen order, for ordinal attributes it is the order of
//! the ordering dictionary; either way it fixes the axis tick order.

use std::{borrow::Borrow, collections::HashMap, hash::Hash};

use serde::{Serialize, Serializer};

/// Bijection between values and dense indices.
///
/// # Invariants
///
/// Every index in `[0, len)` maps to exactly one value and every value maps back to
/// its index; there are no gaps.
///
/// # Examples
///
/// ```
/// # use arvis_stats::bijection::IdMap;
/// let ids = IdMap::from_ordered(["A", "B", "A", "C"]);
/// assert_eq!(ids.len(), 3);
/// assert_eq!(ids.id_of("C"), Some(2));
/// assert_eq!(ids.value_of(1), Some(&"B"));
/// ```
#[derive(Debug, Clone)]
pub struct IdMap<V> {
    values: Vec<V>,
    ids: HashMap<V, usize>,
}

// `ids` is the inverse of `values`.
impl<V> PartialEq for IdMap<V>
where
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<V> Eq for IdMap<V> where V: Eq {}

impl<V> IdMap<V>
where
    V: Eq + Hash + Clone,
{
    /// Assigns indices in iteration order; repeated values keep their first index.
    #[must_use]
    pub fn from_ordered<I>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        let mut map = Self {
            values: Vec::new(),
            ids: HashMap::new(),
        };
        for value in values {
            if !map.ids.contains_key(&value) {
                map.ids.insert(value.clone(), map.values.len());
                map.values.push(value);
            }
        }
        map
    }

    #[must_use]
    pub fn id_of<Q>(&self, value: &Q) -> Option<usize>
    where
        V: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.ids.get(value).copied()
    }

    #[must_use]
    pub fn value_of(&self, id: usize) -> Option<&V> {
        self.values.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in index order.
    #[must_use]
    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &V)> {
        self.values.iter().enumerate()
    }
}

/// Serialized as the list of values; the index is the position.
impl<V> Serialize for IdMap<V>
where
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.values.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order() {
        let ids = IdMap::from_ordered(["A".to_owned(), "B".to_owned(), "C".to_owned()]);
        assert_eq!(ids.id_of("A"), Some(0));
        assert_eq!(ids.id_of("B"), Some(1));
        assert_eq!(ids.id_of("C"), Some(2));
        assert_eq!(ids.id_of("D"), None);
        assert_eq!(ids.value_of(3), None);
    }

    #[test]
    fn test_is_bijection() {
        let ids = IdMap::from_ordered([5, 3, 5, 9, 3, 1]);
        assert_eq!(ids.values(), [5, 3, 9, 1]);
        for (id, value) in ids.iter() {
            assert_eq!(ids.id_of(value), Some(id));
            assert_eq!(ids.value_of(id), Some(value));
        }
    }

    #[test]
    fn test_empty() {
        let ids = IdMap::<String>::from_ordered([]);
        assert!(ids.is_empty());
        assert_eq!(ids.value_of(0), None);
    }

    #[test]
    fn test_equality_follows_index_order() {
        assert_eq!(IdMap::from_ordered([1, 2, 1]), IdMap::from_ordered([1, 2]));
        assert_ne!(IdMap::from_ordered([1, 2]), IdMap::from_ordered([2, 1]));
    }

    #[test]
    fn test_serialize_as_list() {
        let ids = IdMap::from_ordered(["x", "y"]);
        assert_eq!(serde_json::to_string(&ids).unwrap(), r#"["x","y"]"#);
    }
}
