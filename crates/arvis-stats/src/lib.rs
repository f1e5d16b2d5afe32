//! Attribute statistics for level-of-measurement aware charting.
//!
//! This crate computes, for every attribute of a [`DataSet`](dataset::DataSet), an
//! immutable statistics summary used by axis construction and value scaling:
//!
//! - **Levels of measurement**: nominal, ordinal, interval and ratio values, each with
//!   its own missing-value sentinel ([`level`])
//! - **Data sets**: attribute schema, records and translation tables ([`dataset`])
//! - **Distributions**: value-to-count mappings that remember key order ([`distribution`])
//! - **Extents**: min/max/range and zero-bound variants ([`extent`])
//! - **Bijections**: dense value/ID mappings for categorical attributes ([`bijection`])
//! - **Attribute statistics**: the per-level summaries themselves ([`attribute_stats`])
//! - **Cross counting**: records matching two categories at once ([`crosstab`])
//!
//! Missing values are never an error: they are coded with the level's sentinel and
//! skipped by every statistic. Only situations that make a summary meaningless (a ratio
//! attribute without a single observation, an empty ordering dictionary, ...) surface
//! as a [`StatsError`] for that attribute.
//!
//! # Examples
//!
//! ```
//! use arvis_stats::{
//!     attribute_stats::{AttributeStats, DataSetStats},
//!     dataset::{AttributeSchema, DataSet, Record, Scale},
//!     level::Value,
//! };
//!
//! let data = DataSet::new(
//!     vec![
//!         AttributeSchema::new("Country", Scale::Nominal),
//!         AttributeSchema::new("GDP", Scale::Ratio),
//!     ],
//!     vec![
//!         Record::new(vec![Value::Nominal("A".into()), Value::Ratio(10.0)]),
//!         Record::new(vec![Value::Nominal("B".into()), Value::Ratio(f32::NAN)]),
//!         Record::new(vec![Value::Nominal("A".into()), Value::Ratio(-5.0)]),
//!     ],
//!     Default::default(),
//! )
//! .unwrap();
//!
//! let stats = DataSetStats::compute(&data);
//! let Some(AttributeStats::Ratio(gdp)) = stats.get(1) else {
//!     panic!("GDP is a ratio attribute");
//! };
//! assert_eq!(gdp.extent().min, -5.0);
//! assert_eq!(gdp.extent().zero_bound_max, 10.0);
//! ```

use crate::{dataset::AttributeId, level::LevelOfMeasurement};

pub mod attribute_stats;
pub mod bijection;
pub mod crosstab;
pub mod dataset;
pub mod distribution;
pub mod extent;
pub mod level;

/// Errors produced while building a data set or computing its statistics.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StatsError {
    /// A typed accessor was used on an attribute of another level.
    #[display("attribute #{attribute} is {actual}, expected {expected}")]
    TypeMismatch {
        attribute: AttributeId,
        expected: LevelOfMeasurement,
        actual: LevelOfMeasurement,
    },
    /// The attribute has no non-missing observation to derive its extent from.
    #[display("attribute '{attribute}' has no non-missing values")]
    EmptyDistribution { attribute: String },
    /// A code, value or index was looked up but is not part of the mapping.
    #[display("attribute '{attribute}' has no entry for key {key}")]
    MissingKey { attribute: String, key: String },
    #[display("ordinal attribute '{attribute}' has an empty ordering dictionary")]
    EmptyOrdering { attribute: String },
    /// Two categories of an ordering dictionary share a label.
    #[display("ordinal attribute '{attribute}' lists category '{label}' more than once")]
    DuplicateCategory { attribute: String, label: String },
    #[display("interval attribute '{attribute}' has inverted bounds [{min}, {max}]")]
    InvalidBounds { attribute: String, min: i32, max: i32 },
    #[display("unknown attribute '{name}'")]
    UnknownAttribute { name: String },
    #[display("attribute id {attribute} out of range (data set has {count} attributes)")]
    AttributeOutOfRange { attribute: AttributeId, count: usize },
    #[display("interval attribute '{attribute}' refers to unknown translation table '{table}'")]
    UnknownTranslator { attribute: String, table: String },
    #[display("record #{record} does not match the schema: {reason}")]
    SchemaMismatch { record: usize, reason: String },
}
