use clap::{Parser, Subcommand};

use self::{axis::AxisArg, partition::PartitionArg, stats::StatsArg};

mod axis;
mod partition;
mod stats;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Compute per-attribute statistics of a data set
    Stats(#[clap(flatten)] StatsArg),
    /// Lay out the axis of one attribute
    Axis(#[clap(flatten)] AxisArg),
    /// Split attribute names by level of measurement
    Partition(#[clap(flatten)] PartitionArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Stats(arg) => stats::run(&arg)?,
        Mode::Axis(arg) => axis::run(&arg)?,
        Mode::Partition(arg) => partition::run(&arg)?,
    }
    Ok(())
}
