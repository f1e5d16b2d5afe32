//! Frequency distributions of attribute values
//!
//! A [`Distribution`] maps each observed (non-missing) value to its number of
//! occurrences and remembers the order in which its keys were introduced. The order is
//! part of the result: it is the order in which axis ticks and bars are laid out.
//!
//! | Level    | Key order                          | Keys                              |
//! |----------|------------------------------------|-----------------------------------|
//! | Nominal  | first seen in the records          | observed values                   |
//! | Ordinal  | ordering dictionary (ascending)    | every dictionary code, even if 0  |
//! | Interval | ascending code                     | observed codes                    |
//!
//! Sentinels never contribute to any key, so the sum of all counts always equals the
//! number of non-missing observations.

use std::{
    collections::{HashMap, HashSet},
    hash::Hash,
};

use serde::{Serialize, Serializer, ser::SerializeSeq as _};

use crate::{
    dataset::Ordering,
    level::{is_missing_code, is_missing_nominal},
};

/// Value-to-count mapping that keeps its keys in insertion order.
#[derive(Debug, Clone)]
pub struct Distribution<K> {
    entries: Vec<(K, usize)>,
    positions: HashMap<K, usize>,
}

// `positions` is an index over `entries`.
impl<K> PartialEq for Distribution<K>
where
    K: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K> Eq for Distribution<K> where K: Eq {}

impl<K> Default for Distribution<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<K> Distribution<K>
where
    K: Eq + Hash + Clone,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a distribution whose keys are all present with a count of zero.
    ///
    /// Duplicated keys keep their first position.
    #[must_use]
    pub fn with_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut distribution = Self::new();
        for key in keys {
            distribution.ensure_key(key);
        }
        distribution
    }

    fn ensure_key(&mut self, key: K) -> usize {
        if let Some(&position) = self.positions.get(&key) {
            return position;
        }
        let position = self.entries.len();
        self.positions.insert(key.clone(), position);
        self.entries.push((key, 0));
        position
    }

    /// Increments the count of an existing key; returns `false` if the key is unknown.
    pub fn increment(&mut self, key: &K) -> bool {
        match self.positions.get(key) {
            Some(&position) => {
                self.entries[position].1 += 1;
                true
            }
            None => false,
        }
    }

    /// Increments the count of `key`, appending it first if it is new.
    pub fn increment_or_insert(&mut self, key: K) {
        let position = self.ensure_key(key);
        self.entries[position].1 += 1;
    }

    /// Count of `key`, or `None` if the key is not part of the distribution.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<usize> {
        self.positions
            .get(key)
            .map(|&position| self.entries[position].1)
    }

    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.entries.iter().map(|(key, count)| (key, *count))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Counts in key order, ready to be drawn as bars.
    #[must_use]
    pub fn counts(&self) -> Vec<usize> {
        self.entries.iter().map(|(_, count)| *count).collect()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    #[must_use]
    pub fn count_extent(&self) -> CountExtent {
        CountExtent::new(self.entries.iter().map(|(_, count)| *count))
    }

    /// Reorders the keys ascending.
    fn sort_keys(&mut self)
    where
        K: Ord,
    {
        self.entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        for (position, (key, _)) in self.entries.iter().enumerate() {
            if let Some(slot) = self.positions.get_mut(key) {
                *slot = position;
            }
        }
    }
}

/// Serialized as a list of `[key, count]` pairs so that the key order survives.
impl<K> Serialize for Distribution<K>
where
    K: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for entry in &self.entries {
            seq.serialize_element(entry)?;
        }
        seq.end()
    }
}

/// Extent of the counts of a distribution.
///
/// Used to scale the bars of a frequency chart. The zero-bound variants always start
/// at zero so that bars grow from the axis origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CountExtent {
    pub min: usize,
    pub max: usize,
    pub range: usize,
    pub zero_bound_min: usize,
    pub zero_bound_max: usize,
    pub zero_bound_range: usize,
}

impl CountExtent {
    /// Computes the extent of `counts`; all fields are zero if `counts` is empty.
    #[must_use]
    pub fn new<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let Some((min, max)) = counts.into_iter().fold(None, |acc, count| match acc {
            None => Some((count, count)),
            Some((min, max)) => Some((usize::min(min, count), usize::max(max, count))),
        }) else {
            return Self::default();
        };
        Self {
            min,
            max,
            range: max - min,
            zero_bound_min: 0,
            zero_bound_max: max,
            zero_bound_range: max,
        }
    }
}

/// Non-missing nominal values in first-seen order.
#[must_use]
pub fn unique_nominal_values<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| !is_missing_nominal(value) && seen.insert(*value))
        .map(str::to_owned)
        .collect()
}

/// Nominal distribution keyed in first-seen order.
///
/// The unique values are collected first so that the key order (and therefore the ID
/// assignment) is fixed before counting.
#[must_use]
pub fn nominal_distribution<'a, I>(values: I) -> Distribution<String>
where
    I: IntoIterator<Item = &'a str> + Clone,
{
    let mut distribution = Distribution::with_keys(unique_nominal_values(values.clone()));
    for value in values {
        if !is_missing_nominal(value) {
            distribution.increment(&value.to_owned());
        }
    }
    distribution
}

/// Result of counting ordinal codes against an ordering dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdinalCounts {
    /// Every dictionary code with its count, in dictionary order.
    pub distribution: Distribution<i32>,
    /// Non-missing codes that are not part of the dictionary.
    pub unknown: usize,
}

/// Ordinal distribution pre-seeded with every code of `ordering`.
#[must_use]
pub fn ordinal_distribution<I>(values: I, ordering: &Ordering) -> OrdinalCounts
where
    I: IntoIterator<Item = i32>,
{
    let mut distribution = Distribution::with_keys(ordering.keys().copied());
    let mut unknown = 0;
    for code in values {
        if !is_missing_code(code) && !distribution.increment(&code) {
            unknown += 1;
        }
    }
    OrdinalCounts {
        distribution,
        unknown,
    }
}

/// Interval distribution over the observed codes, keyed ascending.
#[must_use]
pub fn interval_distribution<I>(values: I) -> Distribution<i32>
where
    I: IntoIterator<Item = i32>,
{
    let mut distribution = Distribution::new();
    for code in values {
        if !is_missing_code(code) {
            distribution.increment_or_insert(code);
        }
    }
    distribution.sort_keys();
    distribution
}
