//! Counting records that fall into two categories at once
//!
//! Bar charts with two categorical axes need, for every pair of categories, the number
//! of records carrying both. Supported pairs are nominal/nominal, ordinal/ordinal and
//! nominal/ordinal in either order.

use crate::{
    StatsError,
    dataset::{AttributeId, DataSet},
    level::{is_missing_code, is_missing_nominal},
};

/// A categorical value to match an attribute against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Category<'a> {
    #[display("{_0:?}")]
    Nominal(&'a str),
    Ordinal(i32),
}

impl Category<'_> {
    #[must_use]
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Nominal(value) => is_missing_nominal(value),
            Self::Ordinal(code) => is_missing_code(*code),
        }
    }
}

/// Counts the records whose value of `a.0` equals `a.1` and whose value of `b.0`
/// equals `b.1`.
///
/// Missing values never match, not even a missing-value sentinel passed as the
/// category. An attribute whose level does not fit its category is logged and counts
/// as 0.
///
/// # Examples
///
/// ```
/// # use arvis_stats::{crosstab::{Category, count_matching}, dataset::*, level::Value};
/// let data = DataSet::new(
///     vec![
///         AttributeSchema::new("Country", Scale::Nominal),
///         AttributeSchema::new("Severity", Scale::Ordinal {
///             ordering: Ordering::from([(0, "Low".into()), (1, "High".into())]),
///         }),
///     ],
///     vec![
///         Record::new(vec![Value::Nominal("A".into()), Value::Ordinal(1)]),
///         Record::new(vec![Value::Nominal("A".into()), Value::Ordinal(0)]),
///         Record::new(vec![Value::Nominal("B".into()), Value::Ordinal(1)]),
///     ],
///     Translators::new(),
/// )
/// .unwrap();
///
/// let count = count_matching(&data, (0, Category::Nominal("A")), (1, Category::Ordinal(1)));
/// assert_eq!(count, 1);
/// ```
#[must_use]
pub fn count_matching(
    data: &DataSet,
    a: (AttributeId, Category<'_>),
    b: (AttributeId, Category<'_>),
) -> usize {
    match try_count_matching(data, a, b) {
        Ok(count) => count,
        Err(err) => {
            tracing::warn!(
                error = %err,
                first = %a.1,
                second = %b.1,
                "attributes must be nominal or ordinal to count matching records"
            );
            0
        }
    }
}

/// Like [`count_matching`] but surfaces mismatching or unknown attributes as errors.
pub fn try_count_matching(
    data: &DataSet,
    a: (AttributeId, Category<'_>),
    b: (AttributeId, Category<'_>),
) -> Result<usize, StatsError> {
    let first = matches(data, a.0, a.1)?;
    let second = matches(data, b.0, b.1)?;
    Ok(first.zip(second).filter(|(x, y)| *x && *y).count())
}

fn matches<'a>(
    data: &'a DataSet,
    id: AttributeId,
    category: Category<'a>,
) -> Result<Box<dyn Iterator<Item = bool> + 'a>, StatsError> {
    let missing = category.is_missing();
    let matches: Box<dyn Iterator<Item = bool> + 'a> = match category {
        Category::Nominal(expected) => Box::new(
            data.nominal_values(id)?
                .map(move |value| !missing && value == expected),
        ),
        Category::Ordinal(expected) => Box::new(
            data.ordinal_values(id)?
                .map(move |code| !missing && code == expected),
        ),
    };
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use crate::{
        dataset::{AttributeSchema, Ordering, Record, Scale, Translators},
        level::{LevelOfMeasurement, MISSING_CODE, MISSING_NOMINAL, Value},
    };

    use super::*;

    fn data() -> DataSet {
        let schema = vec![
            AttributeSchema::new("Country", Scale::Nominal),
            AttributeSchema::new("Continent", Scale::Nominal),
            AttributeSchema::new(
                "Severity",
                Scale::Ordinal {
                    ordering: Ordering::from([(0, "Low".into()), (1, "High".into())]),
                },
            ),
            AttributeSchema::new(
                "Trend",
                Scale::Ordinal {
                    ordering: Ordering::from([(-1, "Down".into()), (1, "Up".into())]),
                },
            ),
            AttributeSchema::new("GDP", Scale::Ratio),
        ];
        let rows = [
            ("A", "X", 1, 1, 3.0),
            ("A", "X", 0, -1, 2.0),
            ("B", "Y", 1, 1, 1.0),
            ("A", "Y", 1, 1, 5.0),
            (MISSING_NOMINAL, "X", MISSING_CODE, 1, f32::NAN),
        ];
        let records = rows
            .into_iter()
            .map(|(country, continent, severity, trend, gdp)| {
                Record::new(vec![
                    Value::Nominal(country.into()),
                    Value::Nominal(continent.into()),
                    Value::Ordinal(severity),
                    Value::Ordinal(trend),
                    Value::Ratio(gdp),
                ])
            })
            .collect();
        DataSet::new(schema, records, Translators::new()).unwrap()
    }

    #[test]
    fn test_nominal_nominal() {
        let data = data();
        let count = count_matching(&data, (0, Category::Nominal("A")), (1, Category::Nominal("X")));
        assert_eq!(count, 2);
    }

    #[test]
    fn test_ordinal_ordinal() {
        let data = data();
        let count = count_matching(&data, (2, Category::Ordinal(1)), (3, Category::Ordinal(1)));
        assert_eq!(count, 3);
    }

    #[test]
    fn test_nominal_ordinal_either_order() {
        let data = data();
        let a = (0, Category::Nominal("A"));
        let b = (2, Category::Ordinal(1));
        assert_eq!(count_matching(&data, a, b), 2);
        assert_eq!(count_matching(&data, b, a), 2);
    }

    #[test]
    fn test_missing_never_matches() {
        let data = data();
        let count = count_matching(
            &data,
            (0, Category::Nominal(MISSING_NOMINAL)),
            (1, Category::Nominal("X")),
        );
        assert_eq!(count, 0);
        let count = count_matching(
            &data,
            (2, Category::Ordinal(MISSING_CODE)),
            (3, Category::Ordinal(1)),
        );
        assert_eq!(count, 0);
    }

    #[test]
    fn test_type_mismatch_counts_zero() {
        let data = data();
        let a = (0, Category::Ordinal(1));
        let b = (2, Category::Ordinal(1));
        assert_eq!(count_matching(&data, a, b), 0);
        assert_eq!(
            try_count_matching(&data, a, b).unwrap_err(),
            StatsError::TypeMismatch {
                attribute: 0,
                expected: LevelOfMeasurement::Ordinal,
                actual: LevelOfMeasurement::Nominal,
            }
        );

        let ratio = (4, Category::Nominal("A"));
        assert_eq!(count_matching(&data, ratio, b), 0);
    }

    #[test]
    fn test_unknown_attribute_counts_zero() {
        let data = data();
        let count = count_matching(&data, (9, Category::Nominal("A")), (2, Category::Ordinal(1)));
        assert_eq!(count, 0);
    }
}
