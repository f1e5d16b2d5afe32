//! Levels of measurement and their missing-value sentinels
//!
//! Every attribute value is tagged with one of four levels of measurement. The level
//! decides both how the value is stored and how a missing observation is coded:
//!
//! | Level    | Storage  | Missing-value sentinel            |
//! |----------|----------|-----------------------------------|
//! | Nominal  | `String` | the literal [`MISSING_NOMINAL`]   |
//! | Ordinal  | `i32`    | [`MISSING_CODE`] (`i32::MIN`)     |
//! | Interval | `i32`    | [`MISSING_CODE`] (`i32::MIN`)     |
//! | Ratio    | `f32`    | NaN                               |
//!
//! Sentinels are excluded from every statistic computed for that level.

use serde::{Deserialize, Serialize};

/// Sentinel marking a missing nominal value.
pub const MISSING_NOMINAL: &str = "missingValue";

/// Sentinel marking a missing ordinal or interval code.
pub const MISSING_CODE: i32 = i32::MIN;

/// Classification of an attribute deciding which statistics and scaling rules apply.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum LevelOfMeasurement {
    #[display("nominal")]
    Nominal,
    #[display("ordinal")]
    Ordinal,
    #[display("interval")]
    Interval,
    #[display("ratio")]
    Ratio,
}

/// A single attribute value of a record.
#[derive(Debug, Clone, PartialEq, derive_more::IsVariant)]
pub enum Value {
    Nominal(String),
    Ordinal(i32),
    Interval(i32),
    Ratio(f32),
}

impl Value {
    /// The missing-value sentinel for `level`.
    #[must_use]
    pub fn missing(level: LevelOfMeasurement) -> Self {
        match level {
            LevelOfMeasurement::Nominal => Self::Nominal(MISSING_NOMINAL.to_owned()),
            LevelOfMeasurement::Ordinal => Self::Ordinal(MISSING_CODE),
            LevelOfMeasurement::Interval => Self::Interval(MISSING_CODE),
            LevelOfMeasurement::Ratio => Self::Ratio(f32::NAN),
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

    /// Returns `true` if the value is its level's missing-value sentinel.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Nominal(value) => is_missing_nominal(value),
            Self::Ordinal(code) | Self::Interval(code) => is_missing_code(*code),
            Self::Ratio(value) => value.is_nan(),
        }
    }

    #[must_use]
    pub fn as_nominal(&self) -> Option<&str> {
        match self {
            Self::Nominal(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_ordinal(&self) -> Option<i32> {
        match self {
            Self::Ordinal(code) => Some(*code),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_interval(&self) -> Option<i32> {
        match self {
            Self::Interval(code) => Some(*code),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_ratio(&self) -> Option<f32> {
        match self {
            Self::Ratio(value) => Some(*value),
            _ => None,
        }
    }
}

#[must_use]
pub fn is_missing_nominal(value: &str) -> bool {
    value == MISSING_NOMINAL
}

#[must_use]
pub fn is_missing_code(code: i32) -> bool {
    code == MISSING_CODE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_roundtrip_per_level() {
        for level in [
            LevelOfMeasurement::Nominal,
            LevelOfMeasurement::Ordinal,
            LevelOfMeasurement::Interval,
            LevelOfMeasurement::Ratio,
        ] {
            let value = Value::missing(level);
            assert_eq!(value.level(), level);
            assert!(value.is_missing(), "{level} sentinel must be missing");
        }
    }

    #[test]
    fn test_regular_values_are_not_missing() {
        assert!(!Value::Nominal("missing".into()).is_missing());
        assert!(!Value::Ordinal(0).is_missing());
        assert!(!Value::Interval(i32::MIN + 1).is_missing());
        assert!(!Value::Ratio(0.0).is_missing());
        assert!(!Value::Ratio(f32::INFINITY).is_missing());
    }

    #[test]
    fn test_typed_accessors() {
        let value = Value::Ordinal(3);
        assert_eq!(value.as_ordinal(), Some(3));
        assert_eq!(value.as_interval(), None);
        assert_eq!(value.as_nominal(), None);
        assert!(value.is_ordinal());
    }

    #[test]
    fn test_level_serialization() {
        let json = serde_json::to_string(&LevelOfMeasurement::Interval).unwrap();
        assert_eq!(json, "\"interval\"");
        assert_eq!(LevelOfMeasurement::Ratio.to_string(), "ratio");
    }
}
