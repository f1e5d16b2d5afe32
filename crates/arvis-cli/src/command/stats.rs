use std::path::PathBuf;

use anyhow::Context;
use arvis_stats::{attribute_stats::AttributeStats, dataset::AttributeId};
use clap::Args;

use crate::{
    schema::report::StatsReport,
    util::{self, Output},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct StatsArg {
    /// Path to the data set JSON file
    pub(crate) dataset: PathBuf,

    /// Attributes to report (comma-separated, defaults to all)
    #[arg(long, value_delimiter = ',')]
    pub(crate) attributes: Vec<String>,

    /// Output file path (defaults to stdout)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run(arg: &StatsArg) -> anyhow::Result<()> {
    let data = util::read_dataset_file(&arg.dataset)?;

    let ids = if arg.attributes.is_empty() {
        (0..data.attributes().len()).collect()
    } else {
        arg.attributes
            .iter()
            .map(|name| {
                data.id_of(name)
                    .with_context(|| format!("Cannot report attribute '{name}'"))
            })
            .collect::<anyhow::Result<Vec<AttributeId>>>()?
    };

    let entries = ids
        .into_iter()
        .map(|id| {
            let stats = AttributeStats::compute(&data, id);
            if let Err(err) = &stats {
                tracing::warn!(attribute = id, %err, "no statistics for attribute");
            }
            (id, stats)
        })
        .collect::<Vec<_>>();

    let report = StatsReport::new(arg.dataset.display().to_string(), &data, &entries);
    Output::save_json(&report, arg.output.clone())
}
