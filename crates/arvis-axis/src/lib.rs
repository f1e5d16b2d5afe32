//! Axis layout for charts built on [`arvis_stats`] attribute statistics.
//!
//! An axis is laid out in local units along one direction: it has a length and a list
//! of ticks, each with a position in `[0, length]` and a label. How ticks are chosen
//! depends on the attribute's level of measurement:
//!
//! - **Nominal / ordinal**: one tick per category in ID order, evenly spaced
//! - **Interval**: one tick per code between the bounds, labeled through the
//!   attribute's translation table
//! - **Ratio**: ticks at a "nice" step (1, 2 or 5 × 10ⁿ) over the zero-bound extent
//!
//! See [`layout::layout`] for the entry point and [`AxisOptions`] for the knobs.

use arvis_stats::level::LevelOfMeasurement;

pub use self::{
    layout::{AxisLayout, Tick, layout},
    options::AxisOptions,
};

pub mod layout;
pub mod options;
pub mod scale;

/// Errors produced while laying out an axis.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum AxisError {
    #[display("tick spacing must be positive and finite, got {spacing}")]
    InvalidTickSpacing { spacing: f32 },
    #[display("axis length must be positive and finite, got {length}")]
    InvalidLength { length: f32 },
    #[display("at least one tick interval is required for {level} axes")]
    NoTickIntervals { level: LevelOfMeasurement },
}
