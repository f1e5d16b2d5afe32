use serde::{Deserialize, Serialize};

use crate::AxisError;

/// Knobs of the axis layout.
///
/// Categorical axes grow with their number of categories unless a manual `length` is
/// given; interval and ratio axes have length 1 unless a manual `length` is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisOptions {
    /// Distance between two category ticks when the axis length is automatic.
    pub tick_spacing: f32,
    /// Manual axis length.
    pub length: Option<f32>,
    /// Keep only the first and the last tick.
    pub endpoints_only: bool,
    /// Upper bound on the number of tick intervals of a ratio axis.
    pub max_ratio_ticks: usize,
    /// Upper bound on the number of tick intervals of an interval axis; above it codes
    /// are skipped at an integral step.
    pub max_interval_ticks: usize,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            tick_spacing: 0.15,
            length: None,
            endpoints_only: false,
            max_ratio_ticks: 10,
            max_interval_ticks: 100,
        }
    }
}

impl AxisOptions {
    pub(crate) fn validate(&self) -> Result<(), AxisError> {
        if !(self.tick_spacing.is_finite() && self.tick_spacing > 0.0) {
            return Err(AxisError::InvalidTickSpacing {
                spacing: self.tick_spacing,
            });
        }
        if let Some(length) = self.length
            && !(length.is_finite() && length > 0.0)
        {
            return Err(AxisError::InvalidLength { length });
        }
        Ok(())
    }
}
