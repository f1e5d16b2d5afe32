use anyhow::{Context, bail};
use arvis_stats::{
    dataset::{AttributeSchema, DataSet, Record, Translators},
    level::{LevelOfMeasurement, Value},
};
use serde::{Deserialize, Serialize};

/// On-disk layout of a data set.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataSetFile {
    pub attributes: Vec<AttributeSchema>,
    #[serde(default)]
    pub translators: Translators,
    /// One row per record, one cell per attribute in schema order.
    pub records: Vec<Vec<serde_json::Value>>,
}

impl DataSetFile {
    pub(crate) fn into_data_set(self) -> anyhow::Result<DataSet> {
        let levels = self
            .attributes
            .iter()
            .map(|attribute| attribute.scale.level())
            .collect::<Vec<_>>();
        let records = self
            .records
            .iter()
            .enumerate()
            .map(|(index, row)| {
                parse_record(&self.attributes, &levels, row)
                    .with_context(|| format!("Invalid record #{index}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(DataSet::new(self.attributes, records, self.translators)?)
    }
}

fn parse_record(
    attributes: &[AttributeSchema],
    levels: &[LevelOfMeasurement],
    row: &[serde_json::Value],
) -> anyhow::Result<Record> {
    if row.len() != levels.len() {
        bail!("expected {} values, found {}", levels.len(), row.len());
    }
    let values = attributes
        .iter()
        .zip(levels)
        .zip(row)
        .map(|((attribute, level), cell)| {
            parse_value(*level, cell)
                .with_context(|| format!("Invalid value for attribute '{}'", attribute.name))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(Record::new(values))
}

#[expect(clippy::cast_possible_truncation)]
fn parse_value(level: LevelOfMeasurement, cell: &serde_json::Value) -> anyhow::Result<Value> {
    use serde_json::Value as Json;

    if cell.is_null() {
        return Ok(Value::missing(level));
    }
    let value = match (level, cell) {
        (LevelOfMeasurement::Nominal, Json::String(value)) => Value::Nominal(value.clone()),
        (LevelOfMeasurement::Ordinal, Json::Number(_)) => Value::Ordinal(parse_code(cell)?),
        (LevelOfMeasurement::Interval, Json::Number(_)) => Value::Interval(parse_code(cell)?),
        (LevelOfMeasurement::Ratio, Json::Number(number)) => {
            let value = number
                .as_f64()
                .with_context(|| format!("{number} is not representable as a float"))?;
            let value = value as f32;
            if !value.is_finite() {
                bail!("{number} is out of range for a 32-bit float");
            }
            Value::Ratio(value)
        }
        (level, cell) => bail!("expected a {level} value, found {cell}"),
    };
    Ok(value)
}

fn parse_code(cell: &serde_json::Value) -> anyhow::Result<i32> {
    let code = cell
        .as_i64()
        .with_context(|| format!("{cell} is not an integer code"))?;
    i32::try_from(code).with_context(|| format!("{code} does not fit in a 32-bit code"))
}

#[cfg(test)]
mod tests {
    use arvis_stats::level::{MISSING_CODE, MISSING_NOMINAL};

    use super::*;

    const SAMPLE: &str = r#"{
        "attributes": [
            {"name": "Country", "level": "nominal"},
            {"name": "Severity", "level": "ordinal",
             "ordering": [[0, "Low"], [1, "Mid"], [2, "High"]]},
            {"name": "Year", "level": "interval", "translator": "year",
             "bounds": {"min": 1990, "max": 2020}},
            {"name": "GDP", "level": "ratio"}
        ],
        "translators": {"year": {"1990": "'90"}},
        "records": [
            ["A", 0, 1995, 10.5],
            [null, null, null, null],
            ["missingValue", -2147483648, 2001, 3]
        ]
    }"#;

    #[test]
    fn test_load_sample() {
        let file: DataSetFile = serde_json::from_str(SAMPLE).unwrap();
        let data = file.into_data_set().unwrap();

        assert_eq!(data.attributes().len(), 4);
        assert_eq!(data.records().len(), 3);
        assert_eq!(
            data.translation_table("year")
                .and_then(|table| table.get(&1990))
                .map(String::as_str),
            Some("'90")
        );

        let countries = data.nominal_values(0).unwrap().collect::<Vec<_>>();
        assert_eq!(countries, ["A", MISSING_NOMINAL, MISSING_NOMINAL]);
        let severities = data.ordinal_values(1).unwrap().collect::<Vec<_>>();
        assert_eq!(severities, [0, MISSING_CODE, MISSING_CODE]);
        let gdp = data.ratio_values(3).unwrap().collect::<Vec<_>>();
        assert_eq!(gdp[0], 10.5);
        assert!(gdp[1].is_nan());
        assert_eq!(gdp[2], 3.0);
    }

    #[test]
    fn test_rejects_wrong_arity() {
        let json = r#"{"attributes": [{"name": "A", "level": "nominal"}], "records": [["x", "y"]]}"#;
        let file: DataSetFile = serde_json::from_str(json).unwrap();
        let err = file.into_data_set().unwrap_err();
        assert!(format!("{err:#}").contains("record #0"));
    }

    #[test]
    fn test_rejects_wrong_kind() {
        let json = r#"{"attributes": [{"name": "N", "level": "ordinal", "ordering": [[0, "a"]]}],
                       "records": [["high"]]}"#;
        let file: DataSetFile = serde_json::from_str(json).unwrap();
        let err = file.into_data_set().unwrap_err();
        assert!(format!("{err:#}").contains("attribute 'N'"));
    }

    #[test]
    fn test_rejects_out_of_range_code() {
        let cell = serde_json::json!(4_000_000_000_i64);
        assert!(parse_value(LevelOfMeasurement::Interval, &cell).is_err());
        let cell = serde_json::json!(1.5);
        assert!(parse_value(LevelOfMeasurement::Ordinal, &cell).is_err());
    }

    #[test]
    fn test_rejects_ratio_overflow() {
        let cell = serde_json::json!(1e39);
        let err = parse_value(LevelOfMeasurement::Ratio, &cell).unwrap_err();
        assert!(err.to_string().contains("out of range"));
        let cell = serde_json::json!(-2.5);
        assert_eq!(
            parse_value(LevelOfMeasurement::Ratio, &cell).unwrap(),
            Value::Ratio(-2.5)
        );
    }

    #[test]
    fn test_rejects_unknown_translator() {
        let json = r#"{"attributes": [{"name": "Y", "level": "interval", "translator": "t"}],
                       "records": []}"#;
        let file: DataSetFile = serde_json::from_str(json).unwrap();
        assert!(file.into_data_set().is_err());
    }
}
