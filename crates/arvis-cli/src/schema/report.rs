use arvis_stats::{
    StatsError,
    attribute_stats::AttributeStats,
    dataset::{AttributeId, DataSet},
    level::LevelOfMeasurement,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Statistics report written by `arvis stats`.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport<'a> {
    pub dataset: String,
    pub generated_at: DateTime<Utc>,
    pub record_count: usize,
    pub attributes: Vec<AttributeReport<'a>>,
}

/// Statistics of one attribute, or the reason they are unavailable.
#[derive(Debug, Clone, Serialize)]
pub struct AttributeReport<'a> {
    pub id: AttributeId,
    pub name: &'a str,
    pub level: LevelOfMeasurement,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<&'a AttributeStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> StatsReport<'a> {
    /// Builds the report of the computed `entries`, in the given order.
    pub fn new(
        dataset: String,
        data: &'a DataSet,
        entries: &'a [(AttributeId, Result<AttributeStats, StatsError>)],
    ) -> Self {
        let attributes = entries
            .iter()
            .filter_map(|(id, entry)| {
                let attribute = data.attributes().get(*id)?;
                let (stats, error) = match entry {
                    Ok(stats) => (Some(stats), None),
                    Err(err) => (None, Some(err.to_string())),
                };
                Some(AttributeReport {
                    id: *id,
                    name: &attribute.name,
                    level: attribute.level(),
                    stats,
                    error,
                })
            })
            .collect();
        Self {
            dataset,
            generated_at: Utc::now(),
            record_count: data.records().len(),
            attributes,
        }
    }
}
