use std::path::PathBuf;

use clap::Args;

use crate::util::{self, Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct PartitionArg {
    /// Path to the data set JSON file
    pub(crate) dataset: PathBuf,

    /// Attribute names to split
    #[arg(required = true)]
    pub(crate) names: Vec<String>,
}

pub(crate) fn run(arg: &PartitionArg) -> anyhow::Result<()> {
    let data = util::read_dataset_file(&arg.dataset)?;
    let ids = data.partition_by_level(&arg.names)?;
    Output::save_json(&ids, None)
}
