use std::path::PathBuf;

use anyhow::Context;
use arvis_axis::AxisOptions;
use arvis_stats::attribute_stats::AttributeStats;
use clap::Args;

use crate::util::{self, Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct AxisArg {
    /// Path to the data set JSON file
    pub(crate) dataset: PathBuf,

    /// Name of the attribute to lay out
    pub(crate) attribute: String,

    /// Manual axis length
    #[arg(long)]
    pub(crate) length: Option<f32>,

    /// Distance between category ticks when the length is automatic
    #[arg(long, default_value_t = 0.15)]
    pub(crate) tick_spacing: f32,

    /// Keep only the first and the last tick
    #[arg(long)]
    pub(crate) endpoints_only: bool,

    /// Maximum number of tick intervals on ratio axes
    #[arg(long, default_value_t = 10)]
    pub(crate) max_ratio_ticks: usize,

    /// Output file path (defaults to stdout)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

impl AxisArg {
    fn options(&self) -> AxisOptions {
        AxisOptions {
            tick_spacing: self.tick_spacing,
            length: self.length,
            endpoints_only: self.endpoints_only,
            max_ratio_ticks: self.max_ratio_ticks,
            ..AxisOptions::default()
        }
    }
}

pub(crate) fn run(arg: &AxisArg) -> anyhow::Result<()> {
    let data = util::read_dataset_file(&arg.dataset)?;
    let id = data.id_of(&arg.attribute)?;
    let stats = AttributeStats::compute(&data, id)
        .with_context(|| format!("No statistics for attribute '{}'", arg.attribute))?;
    let layout = arvis_axis::layout(&stats, data.translators(), &arg.options())
        .with_context(|| format!("Cannot lay out the axis of '{}'", arg.attribute))?;
    Output::save_json(&layout, arg.output.clone())
}
