//! Per-attribute statistics summaries
//!
//! [`AttributeStats`] is computed once per attribute when a data set is loaded and is
//! read-only afterwards. Each level of measurement has its own summary with its own
//! notion of "min" and "max":
//!
//! | Level    | Summary            | min / max                                         |
//! |----------|--------------------|---------------------------------------------------|
//! | Nominal  | [`NominalStats`]   | index bounds `0 ..= unique_count - 1`             |
//! | Ordinal  | [`OrdinalStats`]   | smallest / largest code of the ordering dictionary |
//! | Interval | [`IntervalStats`]  | caller-supplied bounds, else the observed codes   |
//! | Ratio    | [`RatioStats`]     | observed values, plus zero-bound variants         |
//!
//! Categories of an ordinal attribute that never occur still count towards its range,
//! so that an axis shows the whole scale.
//!
//! [`DataSetStats`] computes the summaries of every attribute. A failure is terminal for
//! that attribute only; the others are still computed.

use std::{collections::HashMap, ops::RangeInclusive};

use serde::Serialize;

use crate::{
    StatsError,
    bijection::IdMap,
    dataset::{Attribute, AttributeId, DataSet, IntervalBounds, Ordering, Scale},
    distribution::{self, CountExtent, Distribution, OrdinalCounts},
    extent::{CodeExtent, RatioExtent},
    level::LevelOfMeasurement,
};

/// Statistics of a nominal attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NominalStats {
    attribute: AttributeId,
    name: String,
    distribution: Distribution<String>,
    values: IdMap<String>,
    count_extent: CountExtent,
}

impl NominalStats {
    /// Computes the statistics from raw values (sentinels included).
    ///
    /// # Examples
    ///
    /// ```
    /// # use arvis_stats::attribute_stats::NominalStats;
    /// let stats = NominalStats::new(0, "Country", ["A", "B", "A", "missingValue", "C"]);
    /// assert_eq!(stats.unique_values(), ["A", "B", "C"]);
    /// assert_eq!(stats.id_of("C").unwrap(), 2);
    /// assert_eq!(stats.max(), Some(2));
    /// ```
    pub fn new<'a, I>(attribute: AttributeId, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = &'a str> + Clone,
    {
        let distribution = distribution::nominal_distribution(values);
        let values = IdMap::from_ordered(distribution.keys().cloned());
        let count_extent = distribution.count_extent();
        Self {
            attribute,
            name: name.into(),
            distribution,
            values,
            count_extent,
        }
    }

    #[must_use]
    pub fn attribute(&self) -> AttributeId {
        self.attribute
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn distribution(&self) -> &Distribution<String> {
        &self.distribution
    }

    #[must_use]
    pub fn count_extent(&self) -> CountExtent {
        self.count_extent
    }

    /// Unique non-missing values in first-seen order.
    #[must_use]
    pub fn unique_values(&self) -> &[String] {
        self.values.values()
    }

    #[must_use]
    pub fn unique_count(&self) -> usize {
        self.values.len()
    }

    /// Smallest index; always 0.
    #[must_use]
    pub fn min(&self) -> usize {
        0
    }

    /// Largest index, `None` if no value was observed.
    #[must_use]
    pub fn max(&self) -> Option<usize> {
        self.unique_count().checked_sub(1)
    }

    /// `0 ..= unique_count - 1`, `None` if no value was observed.
    #[must_use]
    pub fn index_range(&self) -> Option<RangeInclusive<usize>> {
        self.max().map(|max| 0..=max)
    }

    pub fn id_of(&self, value: &str) -> Result<usize, StatsError> {
        self.values.id_of(value).ok_or_else(|| self.missing_key(value))
    }

    pub fn value_of(&self, id: usize) -> Result<&str, StatsError> {
        self.values
            .value_of(id)
            .map(String::as_str)
            .ok_or_else(|| self.missing_key(id))
    }

    pub fn count_of(&self, value: &str) -> Result<usize, StatsError> {
        self.distribution
            .get(&value.to_owned())
            .ok_or_else(|| self.missing_key(value))
    }

    /// Maps an index into `[0, 1]`; a single category maps to `0.0`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn normalize(&self, id: usize) -> f32 {
        match self.max() {
            Some(max) if max > 0 => id as f32 / max as f32,
            _ => 0.0,
        }
    }

    fn missing_key(&self, key: impl ToString) -> StatsError {
        StatsError::MissingKey {
            attribute: self.name.clone(),
            key: key.to_string(),
        }
    }
}

/// Statistics of an ordinal attribute.
///
/// The ordering dictionary defines the categories and their total order. Indices are
/// dense positions in that order, codes are the dictionary keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrdinalStats {
    attribute: AttributeId,
    name: String,
    #[serde(serialize_with = "serialize_ordering")]
    ordering: Ordering,
    distribution: Distribution<i32>,
    #[serde(skip)]
    categories: IdMap<i32>,
    #[serde(skip)]
    label_codes: HashMap<String, i32>,
    extent: CodeExtent,
    count_extent: CountExtent,
    unknown_count: usize,
}

fn serialize_ordering<S>(ordering: &Ordering, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(ordering.iter())
}

impl OrdinalStats {
    /// Computes the statistics from raw codes (sentinels included).
    ///
    /// Codes that are not part of `ordering` are not counted; their number is kept in
    /// [`unknown_count`](Self::unknown_count).
    ///
    /// # Examples
    ///
    /// ```
    /// # use arvis_stats::{attribute_stats::OrdinalStats, dataset::Ordering};
    /// let ordering = Ordering::from([(0, "Low".into()), (1, "Mid".into()), (2, "High".into())]);
    /// let stats = OrdinalStats::new(0, "Severity", ordering, [0, 0, 2]).unwrap();
    /// assert_eq!(stats.distribution().counts(), [2, 0, 1]);
    /// assert_eq!((stats.min(), stats.max()), (0, 2));
    /// ```
    pub fn new<I>(
        attribute: AttributeId,
        name: impl Into<String>,
        ordering: Ordering,
        codes: I,
    ) -> Result<Self, StatsError>
    where
        I: IntoIterator<Item = i32>,
    {
        let name = name.into();
        let (Some((&min, _)), Some((&max, _))) =
            (ordering.first_key_value(), ordering.last_key_value())
        else {
            return Err(StatsError::EmptyOrdering { attribute: name });
        };
        let extent = CodeExtent { min, max };

        let OrdinalCounts {
            distribution,
            unknown,
        } = distribution::ordinal_distribution(codes, &ordering);
        if unknown > 0 {
            tracing::warn!(
                attribute = %name,
                unknown,
                "codes outside the ordering dictionary were not counted"
            );
        }

        let categories = IdMap::from_ordered(ordering.keys().copied());
        let mut label_codes = HashMap::with_capacity(ordering.len());
        for (code, label) in &ordering {
            if label_codes.insert(label.clone(), *code).is_some() {
                return Err(StatsError::DuplicateCategory {
                    attribute: name,
                    label: label.clone(),
                });
            }
        }
        let count_extent = distribution.count_extent();

        Ok(Self {
            attribute,
            name,
            ordering,
            distribution,
            categories,
            label_codes,
            extent,
            count_extent,
            unknown_count: unknown,
        })
    }

    #[must_use]
    pub fn attribute(&self) -> AttributeId {
        self.attribute
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn ordering(&self) -> &Ordering {
        &self.ordering
    }

    /// Counts keyed by code, in dictionary order, including unobserved categories.
    #[must_use]
    pub fn distribution(&self) -> &Distribution<i32> {
        &self.distribution
    }

    #[must_use]
    pub fn count_extent(&self) -> CountExtent {
        self.count_extent
    }

    /// Smallest code of the ordering dictionary.
    #[must_use]
    pub fn min(&self) -> i32 {
        self.extent.min
    }

    /// Largest code of the ordering dictionary.
    #[must_use]
    pub fn max(&self) -> i32 {
        self.extent.max
    }

    #[must_use]
    pub fn range(&self) -> i64 {
        self.extent.range()
    }

    #[must_use]
    pub fn extent(&self) -> CodeExtent {
        self.extent
    }

    /// Number of categories in the ordering dictionary.
    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Labels in dictionary order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.ordering.values().map(String::as_str)
    }

    /// Non-missing codes that were not part of the ordering dictionary.
    #[must_use]
    pub fn unknown_count(&self) -> usize {
        self.unknown_count
    }

    pub fn label_of(&self, code: i32) -> Result<&str, StatsError> {
        self.ordering
            .get(&code)
            .map(String::as_str)
            .ok_or_else(|| self.missing_key(code))
    }

    pub fn code_of(&self, label: &str) -> Result<i32, StatsError> {
        self.label_codes
            .get(label)
            .copied()
            .ok_or_else(|| self.missing_key(label))
    }

    /// Dense position of `code` in dictionary order.
    pub fn index_of(&self, code: i32) -> Result<usize, StatsError> {
        self.categories
            .id_of(&code)
            .ok_or_else(|| self.missing_key(code))
    }

    /// Code at a dense position in dictionary order.
    pub fn code_at(&self, index: usize) -> Result<i32, StatsError> {
        self.categories
            .value_of(index)
            .copied()
            .ok_or_else(|| self.missing_key(index))
    }

    pub fn count_of(&self, code: i32) -> Result<usize, StatsError> {
        self.distribution
            .get(&code)
            .ok_or_else(|| self.missing_key(code))
    }

    /// Maps a code into `[0, 1]` relative to the dictionary's code range.
    #[must_use]
    pub fn normalize(&self, code: i32) -> f32 {
        self.extent.normalize(code)
    }

    fn missing_key(&self, key: impl ToString) -> StatsError {
        StatsError::MissingKey {
            attribute: self.name.clone(),
            key: key.to_string(),
        }
    }
}

/// Statistics of an interval attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalStats {
    attribute: AttributeId,
    name: String,
    translator: String,
    distribution: Distribution<i32>,
    extent: CodeExtent,
    bounds_supplied: bool,
    count_extent: CountExtent,
}

impl IntervalStats {
    /// Computes the statistics from raw codes (sentinels included).
    ///
    /// `bounds` carries domain knowledge such as known calendar limits. Without it the
    /// observed extent is used, which fails if no code was observed.
    pub fn new<I>(
        attribute: AttributeId,
        name: impl Into<String>,
        translator: impl Into<String>,
        bounds: Option<IntervalBounds>,
        codes: I,
    ) -> Result<Self, StatsError>
    where
        I: IntoIterator<Item = i32> + Clone,
    {
        let name = name.into();
        let (extent, bounds_supplied) = match bounds {
            Some(IntervalBounds { min, max }) => {
                let extent = CodeExtent::new(min, max).ok_or_else(|| {
                    StatsError::InvalidBounds {
                        attribute: name.clone(),
                        min,
                        max,
                    }
                })?;
                (extent, true)
            }
            None => {
                let extent = CodeExtent::observed(codes.clone()).ok_or_else(|| {
                    StatsError::EmptyDistribution {
                        attribute: name.clone(),
                    }
                })?;
                (extent, false)
            }
        };

        let distribution = distribution::interval_distribution(codes);
        let count_extent = distribution.count_extent();
        Ok(Self {
            attribute,
            name,
            translator: translator.into(),
            distribution,
            extent,
            bounds_supplied,
            count_extent,
        })
    }

    #[must_use]
    pub fn attribute(&self) -> AttributeId {
        self.attribute
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the translation table used to label codes.
    #[must_use]
    pub fn translator(&self) -> &str {
        &self.translator
    }

    /// Counts keyed by observed code, ascending.
    #[must_use]
    pub fn distribution(&self) -> &Distribution<i32> {
        &self.distribution
    }

    #[must_use]
    pub fn count_extent(&self) -> CountExtent {
        self.count_extent
    }

    #[must_use]
    pub fn min(&self) -> i32 {
        self.extent.min
    }

    #[must_use]
    pub fn max(&self) -> i32 {
        self.extent.max
    }

    #[must_use]
    pub fn range(&self) -> i64 {
        self.extent.range()
    }

    #[must_use]
    pub fn extent(&self) -> CodeExtent {
        self.extent
    }

    /// Whether min/max came from the caller rather than from the data.
    #[must_use]
    pub fn bounds_supplied(&self) -> bool {
        self.bounds_supplied
    }

    pub fn count_of(&self, code: i32) -> Result<usize, StatsError> {
        self.distribution
            .get(&code)
            .ok_or_else(|| StatsError::MissingKey {
                attribute: self.name.clone(),
                key: code.to_string(),
            })
    }

    #[must_use]
    pub fn normalize(&self, code: i32) -> f32 {
        self.extent.normalize(code)
    }
}

/// Statistics of a ratio attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioStats {
    attribute: AttributeId,
    name: String,
    #[serde(flatten)]
    extent: RatioExtent,
    observed: usize,
}

impl RatioStats {
    /// Computes the statistics from raw values (NaN sentinels included).
    ///
    /// Infinite values cannot be placed on an axis and are skipped like missing ones.
    /// Fails with [`StatsError::EmptyDistribution`] when no finite value remains.
    pub fn new<I>(
        attribute: AttributeId,
        name: impl Into<String>,
        values: I,
    ) -> Result<Self, StatsError>
    where
        I: IntoIterator<Item = f32> + Clone,
    {
        let name = name.into();
        let extent = RatioExtent::new(values.clone()).ok_or_else(|| {
            StatsError::EmptyDistribution {
                attribute: name.clone(),
            }
        })?;
        let observed = values.clone().into_iter().filter(|v| v.is_finite()).count();
        let infinite = values.into_iter().filter(|v| v.is_infinite()).count();
        if infinite > 0 {
            tracing::warn!(attribute = %name, infinite, "infinite values were skipped");
        }
        Ok(Self {
            attribute,
            name,
            extent,
            observed,
        })
    }

    #[must_use]
    pub fn attribute(&self) -> AttributeId {
        self.attribute
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn extent(&self) -> &RatioExtent {
        &self.extent
    }

    /// Number of non-missing observations.
    #[must_use]
    pub fn observed(&self) -> usize {
        self.observed
    }

    #[must_use]
    pub fn normalize(&self, value: f32) -> f32 {
        self.extent.normalize(value)
    }

    #[must_use]
    pub fn normalize_zero_bound(&self, value: f32) -> f32 {
        self.extent.normalize_zero_bound(value)
    }
}

/// Statistics of one attribute, tagged by level of measurement.
#[derive(Debug, Clone, PartialEq, Serialize, derive_more::IsVariant)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum AttributeStats {
    Nominal(NominalStats),
    Ordinal(OrdinalStats),
    Interval(IntervalStats),
    Ratio(RatioStats),
}

impl AttributeStats {
    /// Computes the statistics of attribute `id` of `data`.
    pub fn compute(data: &DataSet, id: AttributeId) -> Result<Self, StatsError> {
        let Attribute { name, scale, .. } = data.attribute(id)?;
        let stats = match scale {
            Scale::Nominal => {
                Self::Nominal(NominalStats::new(id, name.as_str(), data.nominal_values(id)?))
            }
            Scale::Ordinal { ordering } => Self::Ordinal(OrdinalStats::new(
                id,
                name.as_str(),
                ordering.clone(),
                data.ordinal_values(id)?,
            )?),
            Scale::Interval { translator, bounds } => Self::Interval(IntervalStats::new(
                id,
                name.as_str(),
                translator.as_str(),
                *bounds,
                data.interval_values(id)?,
            )?),
            Scale::Ratio => Self::Ratio(RatioStats::new(id, name.as_str(), data.ratio_values(id)?)?),
        };
        Ok(stats)
    }

    #[must_use]
    pub fn attribute(&self) -> AttributeId {
        match self {
            Self::Nominal(stats) => stats.attribute(),
            Self::Ordinal(stats) => stats.attribute(),
            Self::Interval(stats) => stats.attribute(),
            Self::Ratio(stats) => stats.attribute(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Nominal(stats) => stats.name(),
            Self::Ordinal(stats) => stats.name(),
            Self::Interval(stats) => stats.name(),
            Self::Ratio(stats) => stats.name(),
        }
    }

    #[must_use]
    pub fn level(&self) -> LevelOfMeasurement {
        match self {
            Self::Nominal(_) => LevelOfMeasurement::Nominal,
            Self::Ordinal(_) => LevelOfMeasurement::Ordinal,
            Self::Interval(_) => LevelOfMeasurement::Interval,
            Self::Ratio(_) => LevelOfMeasurement::Ratio,
        }
    }

    /// Extent of the category counts; `None` for ratio attributes.
    #[must_use]
    pub fn count_extent(&self) -> Option<CountExtent> {
        match self {
            Self::Nominal(stats) => Some(stats.count_extent()),
            Self::Ordinal(stats) => Some(stats.count_extent()),
            Self::Interval(stats) => Some(stats.count_extent()),
            Self::Ratio(_) => None,
        }
    }
}

/// Statistics of every attribute of a data set, indexed by [`AttributeId`].
#[derive(Debug, Clone, PartialEq)]
pub struct DataSetStats {
    entries: Vec<Result<AttributeStats, StatsError>>,
}

impl DataSetStats {
    /// Computes the statistics of all attributes.
    ///
    /// Attributes whose statistics cannot be computed keep their error; the others
    /// are unaffected.
    #[must_use]
    pub fn compute(data: &DataSet) -> Self {
        let entries = data
            .attributes()
            .iter()
            .map(|attribute| {
                let result = AttributeStats::compute(data, attribute.id);
                match &result {
                    Ok(stats) => tracing::debug!(
                        attribute = %attribute.name,
                        level = %stats.level(),
                        "attribute statistics computed"
                    ),
                    Err(err) => tracing::warn!(
                        attribute = %attribute.name,
                        error = %err,
                        "attribute statistics unavailable"
                    ),
                }
                result
            })
            .collect();
        Self { entries }
    }

    /// Statistics of attribute `id`, `None` if unknown or failed.
    #[must_use]
    pub fn get(&self, id: AttributeId) -> Option<&AttributeStats> {
        self.entries.get(id).and_then(|entry| entry.as_ref().ok())
    }

    /// Statistics or failure of attribute `id`, `None` if the ID is out of range.
    #[must_use]
    pub fn entry(&self, id: AttributeId) -> Option<Result<&AttributeStats, &StatsError>> {
        self.entries.get(id).map(Result::as_ref)
    }

    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&AttributeStats> {
        self.iter().find(|stats| stats.name() == name)
    }

    /// Successfully computed statistics in attribute order.
    pub fn iter(&self) -> impl Iterator<Item = &AttributeStats> {
        self.entries.iter().filter_map(|entry| entry.as_ref().ok())
    }

    /// Failures with the ID of the attribute they belong to.
    pub fn errors(&self) -> impl Iterator<Item = (AttributeId, &StatsError)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(id, entry)| entry.as_ref().err().map(|err| (id, err)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
