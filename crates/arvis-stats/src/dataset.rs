//! Data sets: attribute schema, records and translation tables
//!
//! A [`DataSet`] is an ordered sequence of [`Record`]s sharing one attribute schema.
//! Each attribute is identified by its position in the schema ([`AttributeId`]), has a
//! human-readable name and exactly one [`Scale`], which fixes its level of measurement
//! and carries the externally supplied tables the level needs:
//!
//! - ordinal attributes carry their ordering dictionary (code → display label), which
//!   defines the total order of the categories
//! - interval attributes name a translation table (code → display label) and may carry
//!   known bounds
//!
//! Construction validates the records against the schema once, so the typed column
//! accessors never have to deal with a value of the wrong level.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    StatsError,
    level::{LevelOfMeasurement, Value},
};

/// Position of an attribute in its data set's schema.
pub type AttributeId = usize;

/// Ordering dictionary of an ordinal attribute (code → display label).
pub type Ordering = BTreeMap<i32, String>;

/// Translation table of an interval attribute (code → display label).
pub type TranslationTable = BTreeMap<i32, String>;

/// Named translation tables shared by the interval attributes of a data set.
pub type Translators = BTreeMap<String, TranslationTable>;

/// Caller-supplied bounds of an interval attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalBounds {
    pub min: i32,
    pub max: i32,
}

/// Level of measurement of an attribute together with its level-specific tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum Scale {
    Nominal,
    Ordinal {
        #[serde(with = "ordering_entries")]
        ordering: Ordering,
    },
    Interval {
        translator: String,
        #[serde(default)]
        bounds: Option<IntervalBounds>,
    },
    Ratio,
}

impl Scale {
    #[must_use]
    pub fn level(&self) -> LevelOfMeasurement {
        match self {
            Self::Nominal => LevelOfMeasurement::Nominal,
            Self::Ordinal { .. } => LevelOfMeasurement::Ordinal,
            Self::Interval { .. } => LevelOfMeasurement::Interval,
            Self::Ratio => LevelOfMeasurement::Ratio,
        }
    }
}

/// Ordering dictionaries travel as `[[code, label], ...]` so that they survive the
/// buffering done for the internally tagged [`Scale`].
mod ordering_entries {
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

    use super::Ordering;

    pub(super) fn serialize<S>(ordering: &Ordering, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let entries = ordering.iter().collect::<Vec<_>>();
        entries.serialize(serializer)
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Ordering, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<(i32, String)>::deserialize(deserializer)?;
        let mut ordering = Ordering::new();
        for (code, label) in entries {
            if ordering.insert(code, label).is_some() {
                return Err(D::Error::custom(format!(
                    "duplicate code {code} in ordering"
                )));
            }
        }
        Ok(ordering)
    }
}

/// Declaration of an attribute before it is assigned an ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSchema {
    pub name: String,
    #[serde(flatten)]
    pub scale: Scale,
}

impl AttributeSchema {
    pub fn new(name: impl Into<String>, scale: Scale) -> Self {
        Self {
            name: name.into(),
            scale,
        }
    }
}

/// An attribute of a data set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub id: AttributeId,
    pub name: String,
    #[serde(flatten)]
    pub scale: Scale,
}

impl Attribute {
    #[must_use]
    pub fn level(&self) -> LevelOfMeasurement {
        self.scale.level()
    }
}

/// One observation: a value per attribute, indexed by [`AttributeId`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    values: Vec<Value>,
}

impl Record {
    #[must_use]
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[must_use]
    pub fn value(&self, attribute: AttributeId) -> Option<&Value> {
        self.values.get(attribute)
    }
}

/// Attribute IDs split by level of measurement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttributeIdsByLevel {
    pub nominal: Vec<AttributeId>,
    pub ordinal: Vec<AttributeId>,
    pub interval: Vec<AttributeId>,
    pub ratio: Vec<AttributeId>,
}

/// An ordered sequence of records sharing one attribute schema.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    attributes: Vec<Attribute>,
    records: Vec<Record>,
    translators: Translators,
}

impl DataSet {
    /// Builds a data set, assigning attribute IDs in schema order.
    ///
    /// Fails if a record does not hold exactly one value per attribute, if a value's
    /// level differs from its attribute's level, or if an interval attribute names a
    /// translation table missing from `translators`.
    pub fn new(
        schema: Vec<AttributeSchema>,
        records: Vec<Record>,
        translators: Translators,
    ) -> Result<Self, StatsError> {
        let attributes = schema
            .into_iter()
            .enumerate()
            .map(|(id, AttributeSchema { name, scale })| Attribute { id, name, scale })
            .collect::<Vec<_>>();

        for attribute in &attributes {
            if let Scale::Interval { translator, .. } = &attribute.scale
                && !translators.contains_key(translator)
            {
                return Err(StatsError::UnknownTranslator {
                    attribute: attribute.name.clone(),
                    table: translator.clone(),
                });
            }
        }

        for (index, record) in records.iter().enumerate() {
            if record.values.len() != attributes.len() {
                return Err(StatsError::SchemaMismatch {
                    record: index,
                    reason: format!(
                        "expected {} values, found {}",
                        attributes.len(),
                        record.values.len()
                    ),
                });
            }
            for (attribute, value) in attributes.iter().zip(&record.values) {
                if attribute.level() != value.level() {
                    return Err(StatsError::SchemaMismatch {
                        record: index,
                        reason: format!(
                            "attribute '{}' is {}, found a {} value",
                            attribute.name,
                            attribute.level(),
                            value.level()
                        ),
                    });
                }
            }
        }

        Ok(Self {
            attributes,
            records,
            translators,
        })
    }

    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn translators(&self) -> &Translators {
        &self.translators
    }

    pub fn attribute(&self, id: AttributeId) -> Result<&Attribute, StatsError> {
        self.attributes
            .get(id)
            .ok_or(StatsError::AttributeOutOfRange {
                attribute: id,
                count: self.attributes.len(),
            })
    }

    pub fn attribute_by_name(&self, name: &str) -> Result<&Attribute, StatsError> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .ok_or_else(|| StatsError::UnknownAttribute {
                name: name.to_owned(),
            })
    }

    pub fn id_of(&self, name: &str) -> Result<AttributeId, StatsError> {
        self.attribute_by_name(name).map(|attribute| attribute.id)
    }

    pub fn level_of(&self, name: &str) -> Result<LevelOfMeasurement, StatsError> {
        self.attribute_by_name(name).map(Attribute::level)
    }

    /// Translation table named by an interval attribute, if any.
    #[must_use]
    pub fn translation_table(&self, name: &str) -> Option<&TranslationTable> {
        self.translators.get(name)
    }

    fn expect_level(
        &self,
        id: AttributeId,
        expected: LevelOfMeasurement,
    ) -> Result<&Attribute, StatsError> {
        let attribute = self.attribute(id)?;
        if attribute.level() == expected {
            Ok(attribute)
        } else {
            Err(StatsError::TypeMismatch {
                attribute: id,
                expected,
                actual: attribute.level(),
            })
        }
    }

    /// Raw nominal values of an attribute in record order, sentinels included.
    pub fn nominal_values(
        &self,
        id: AttributeId,
    ) -> Result<impl Iterator<Item = &str> + Clone + '_, StatsError> {
        self.expect_level(id, LevelOfMeasurement::Nominal)?;
        Ok(self
            .records
            .iter()
            .filter_map(move |record| record.value(id).and_then(Value::as_nominal)))
    }

    /// Raw ordinal codes of an attribute in record order, sentinels included.
    pub fn ordinal_values(
        &self,
        id: AttributeId,
    ) -> Result<impl Iterator<Item = i32> + Clone + '_, StatsError> {
        self.expect_level(id, LevelOfMeasurement::Ordinal)?;
        Ok(self
            .records
            .iter()
            .filter_map(move |record| record.value(id).and_then(Value::as_ordinal)))
    }

    /// Raw interval codes of an attribute in record order, sentinels included.
    pub fn interval_values(
        &self,
        id: AttributeId,
    ) -> Result<impl Iterator<Item = i32> + Clone + '_, StatsError> {
        self.expect_level(id, LevelOfMeasurement::Interval)?;
        Ok(self
            .records
            .iter()
            .filter_map(move |record| record.value(id).and_then(Value::as_interval)))
    }

    /// Raw ratio values of an attribute in record order, NaN sentinels included.
    pub fn ratio_values(
        &self,
        id: AttributeId,
    ) -> Result<impl Iterator<Item = f32> + Clone + '_, StatsError> {
        self.expect_level(id, LevelOfMeasurement::Ratio)?;
        Ok(self
            .records
            .iter()
            .filter_map(move |record| record.value(id).and_then(Value::as_ratio)))
    }

    /// Splits attribute names into per-level ID lists, keeping the input order.
    pub fn partition_by_level<S>(&self, names: &[S]) -> Result<AttributeIdsByLevel, StatsError>
    where
        S: AsRef<str>,
    {
        let mut ids = AttributeIdsByLevel::default();
        for name in names {
            let attribute = self.attribute_by_name(name.as_ref())?;
            let list = match attribute.level() {
                LevelOfMeasurement::Nominal => &mut ids.nominal,
                LevelOfMeasurement::Ordinal => &mut ids.ordinal,
                LevelOfMeasurement::Interval => &mut ids.interval,
                LevelOfMeasurement::Ratio => &mut ids.ratio,
            };
            list.push(attribute.id);
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> Vec<AttributeSchema> {
        vec![
            AttributeSchema::new("Country", Scale::Nominal),
            AttributeSchema::new(
                "Severity",
                Scale::Ordinal {
                    ordering: BTreeMap::from([(0, "Low".into()), (1, "High".into())]),
                },
            ),
            AttributeSchema::new(
                "Year",
                Scale::Interval {
                    translator: "year".into(),
                    bounds: None,
                },
            ),
            AttributeSchema::new("GDP", Scale::Ratio),
        ]
    }

    fn sample_translators() -> Translators {
        BTreeMap::from([("year".into(), TranslationTable::new())])
    }

    fn record(country: &str, severity: i32, year: i32, gdp: f32) -> Record {
        Record::new(vec![
            Value::Nominal(country.into()),
            Value::Ordinal(severity),
            Value::Interval(year),
            Value::Ratio(gdp),
        ])
    }

    #[test]
    fn test_ids_follow_schema_order() {
        let data = DataSet::new(sample_schema(), vec![], sample_translators()).unwrap();
        assert_eq!(data.id_of("Country").unwrap(), 0);
        assert_eq!(data.id_of("GDP").unwrap(), 3);
        assert_eq!(data.level_of("Year").unwrap(), LevelOfMeasurement::Interval);
        assert!(matches!(
            data.id_of("Population"),
            Err(StatsError::UnknownAttribute { .. })
        ));
    }

    #[test]
    fn test_rejects_wrong_arity() {
        let records = vec![Record::new(vec![Value::Nominal("A".into())])];
        let err = DataSet::new(sample_schema(), records, sample_translators()).unwrap_err();
        assert!(matches!(err, StatsError::SchemaMismatch { record: 0, .. }));
    }

    #[test]
    fn test_rejects_wrong_level() {
        let records = vec![
            record("A", 0, 2000, 1.0),
            Record::new(vec![
                Value::Nominal("B".into()),
                Value::Interval(1),
                Value::Interval(2001),
                Value::Ratio(2.0),
            ]),
        ];
        let err = DataSet::new(sample_schema(), records, sample_translators()).unwrap_err();
        assert!(matches!(err, StatsError::SchemaMismatch { record: 1, .. }));
    }

    #[test]
    fn test_rejects_unknown_translator() {
        let err = DataSet::new(sample_schema(), vec![], Translators::new()).unwrap_err();
        assert_eq!(
            err,
            StatsError::UnknownTranslator {
                attribute: "Year".into(),
                table: "year".into(),
            }
        );
    }

    #[test]
    fn test_typed_columns() {
        let records = vec![record("A", 0, 2000, 1.5), record("B", 1, 2001, f32::NAN)];
        let data = DataSet::new(sample_schema(), records, sample_translators()).unwrap();

        assert_eq!(
            data.nominal_values(0).unwrap().collect::<Vec<_>>(),
            ["A", "B"]
        );
        assert_eq!(data.ordinal_values(1).unwrap().collect::<Vec<_>>(), [0, 1]);
        assert_eq!(
            data.interval_values(2).unwrap().collect::<Vec<_>>(),
            [2000, 2001]
        );
        let ratio = data.ratio_values(3).unwrap().collect::<Vec<_>>();
        assert_eq!(ratio[0], 1.5);
        assert!(ratio[1].is_nan());
    }

    #[test]
    fn test_typed_column_mismatch() {
        let data = DataSet::new(sample_schema(), vec![], sample_translators()).unwrap();
        let Err(err) = data.ordinal_values(0) else {
            panic!("nominal attribute must not yield ordinal codes");
        };
        assert_eq!(
            err,
            StatsError::TypeMismatch {
                attribute: 0,
                expected: LevelOfMeasurement::Ordinal,
                actual: LevelOfMeasurement::Nominal,
            }
        );
        assert!(matches!(
            data.ratio_values(9),
            Err(StatsError::AttributeOutOfRange {
                attribute: 9,
                count: 4
            })
        ));
    }

    #[test]
    fn test_partition_by_level() {
        let data = DataSet::new(sample_schema(), vec![], sample_translators()).unwrap();
        let ids = data
            .partition_by_level(&["GDP", "Country", "Year", "Severity"])
            .unwrap();
        assert_eq!(ids.nominal, [0]);
        assert_eq!(ids.ordinal, [1]);
        assert_eq!(ids.interval, [2]);
        assert_eq!(ids.ratio, [3]);

        assert!(data.partition_by_level(&["GDP", "Nope"]).is_err());
    }

    #[test]
    fn test_schema_deserialization() {
        let json = r#"[
            {"name": "Severity", "level": "ordinal", "ordering": [[0, "Low"], [2, "High"]]},
            {"name": "Year", "level": "interval", "translator": "year",
             "bounds": {"min": 1990, "max": 2020}},
            {"name": "GDP", "level": "ratio"}
        ]"#;
        let schema: Vec<AttributeSchema> = serde_json::from_str(json).unwrap();
        assert_eq!(schema[0].scale.level(), LevelOfMeasurement::Ordinal);
        let Scale::Ordinal { ordering } = &schema[0].scale else {
            panic!("expected ordinal scale");
        };
        assert_eq!(ordering.get(&2).map(String::as_str), Some("High"));
        assert_eq!(
            schema[1].scale,
            Scale::Interval {
                translator: "year".into(),
                bounds: Some(IntervalBounds {
                    min: 1990,
                    max: 2020
                }),
            }
        );
        assert_eq!(schema[2].scale, Scale::Ratio);
    }

    #[test]
    fn test_schema_rejects_duplicate_code() {
        let json = r#"{"name": "Severity", "level": "ordinal", "ordering": [[0, "a"], [0, "b"]]}"#;
        let err = serde_json::from_str::<AttributeSchema>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate code 0"));
    }
}
