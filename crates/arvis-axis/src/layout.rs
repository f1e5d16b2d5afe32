//! Tick placement per level of measurement

use arvis_stats::{
    attribute_stats::{AttributeStats, IntervalStats, NominalStats, OrdinalStats, RatioStats},
    dataset::Translators,
    level::LevelOfMeasurement,
};
use serde::Serialize;

use crate::{
    AxisError,
    options::AxisOptions,
    scale::{format_tick, nice_step, step_values},
};

/// A labeled position along an axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    /// Distance from the axis origin, in `[0, length]`.
    pub position: f32,
    pub label: String,
}

/// Length and ticks of one axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLayout {
    pub name: String,
    pub level: LevelOfMeasurement,
    pub length: f32,
    pub ticks: Vec<Tick>,
}

/// Lays out the axis of an attribute.
///
/// `translators` provides the labels of interval codes; codes without a translation
/// are labeled with their decimal value.
///
/// # Examples
///
/// ```
/// # use arvis_axis::{AxisOptions, layout};
/// # use arvis_stats::{attribute_stats::{AttributeStats, NominalStats}, dataset::Translators};
/// let stats = AttributeStats::Nominal(NominalStats::new(0, "Country", ["A", "B", "C"]));
/// let axis = layout(&stats, &Translators::new(), &AxisOptions::default()).unwrap();
///
/// let labels = axis.ticks.iter().map(|tick| tick.label.as_str()).collect::<Vec<_>>();
/// assert_eq!(labels, ["A", "B", "C"]);
/// assert!((axis.length - 0.6).abs() < 1e-6);
/// ```
pub fn layout(
    stats: &AttributeStats,
    translators: &Translators,
    options: &AxisOptions,
) -> Result<AxisLayout, AxisError> {
    options.validate()?;

    let (length, mut ticks) = match stats {
        AttributeStats::Nominal(stats) => nominal_ticks(stats, options),
        AttributeStats::Ordinal(stats) => ordinal_ticks(stats, options),
        AttributeStats::Interval(stats) => interval_ticks(stats, translators, options)?,
        AttributeStats::Ratio(stats) => ratio_ticks(stats, options)?,
    };

    if options.endpoints_only && ticks.len() > 2 {
        let last = ticks.split_off(ticks.len() - 1);
        ticks.truncate(1);
        ticks.extend(last);
    }

    tracing::debug!(
        attribute = stats.name(),
        level = %stats.level(),
        length,
        ticks = ticks.len(),
        "axis laid out"
    );

    Ok(AxisLayout {
        name: stats.name().to_owned(),
        level: stats.level(),
        length,
        ticks,
    })
}

fn nominal_ticks(stats: &NominalStats, options: &AxisOptions) -> (f32, Vec<Tick>) {
    let labels = stats
        .unique_values()
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>();
    categorical_ticks(&labels, options)
}

fn ordinal_ticks(stats: &OrdinalStats, options: &AxisOptions) -> (f32, Vec<Tick>) {
    let labels = stats.labels().collect::<Vec<_>>();
    categorical_ticks(&labels, options)
}

/// Evenly spaced category ticks.
///
/// With an automatic length the first tick sits one spacing away from the origin and
/// the axis extends one spacing past the last tick. With a manual length the first and
/// last ticks sit on the axis ends.
#[expect(clippy::cast_precision_loss)]
fn categorical_ticks(labels: &[&str], options: &AxisOptions) -> (f32, Vec<Tick>) {
    let count = labels.len();
    let (length, spacing, offset) = match options.length {
        Some(length) => {
            let spacing = if count > 1 {
                length / (count - 1) as f32
            } else {
                0.0
            };
            (length, spacing, 0.0)
        }
        None => {
            let spacing = options.tick_spacing;
            (spacing * count as f32 + spacing, spacing, spacing)
        }
    };
    let ticks = labels
        .iter()
        .enumerate()
        .map(|(index, label)| Tick {
            position: spacing * index as f32 + offset,
            label: (*label).to_owned(),
        })
        .collect();
    (length, ticks)
}

#[expect(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn interval_ticks(
    stats: &IntervalStats,
    translators: &Translators,
    options: &AxisOptions,
) -> Result<(f32, Vec<Tick>), AxisError> {
    if options.max_interval_ticks == 0 {
        return Err(AxisError::NoTickIntervals {
            level: LevelOfMeasurement::Interval,
        });
    }
    let length = options.length.unwrap_or(1.0);
    let table = translators.get(stats.translator());
    if table.is_none() {
        tracing::warn!(
            attribute = stats.name(),
            translator = stats.translator(),
            "translation table not found, labeling codes with their value"
        );
    }

    let max_ticks = i64::try_from(options.max_interval_ticks).unwrap_or(i64::MAX);
    let codes = if stats.range() <= max_ticks {
        (stats.min()..=stats.max()).collect::<Vec<_>>()
    } else {
        let range = stats.range() as f64;
        let step = nice_step(range, options.max_interval_ticks)
            .unwrap_or(range)
            .ceil();
        step_values(f64::from(stats.min()), f64::from(stats.max()), step)
            .into_iter()
            .map(|code| code as i32)
            .collect()
    };

    let ticks = codes
        .into_iter()
        .map(|code| Tick {
            position: stats.normalize(code) * length,
            label: table
                .and_then(|table| table.get(&code))
                .cloned()
                .unwrap_or_else(|| code.to_string()),
        })
        .collect();
    Ok((length, ticks))
}

/// Ticks over the zero-bound extent at a nice step.
#[expect(clippy::cast_possible_truncation)]
fn ratio_ticks(
    stats: &RatioStats,
    options: &AxisOptions,
) -> Result<(f32, Vec<Tick>), AxisError> {
    let length = options.length.unwrap_or(1.0);
    let extent = stats.extent();
    let range = f64::from(extent.zero_bound_range);
    if range == 0.0 {
        let tick = Tick {
            position: 0.0,
            label: format_tick(f64::from(extent.zero_bound_min), 1.0),
        };
        return Ok((length, vec![tick]));
    }

    let step = nice_step(range, options.max_ratio_ticks).ok_or(AxisError::NoTickIntervals {
        level: LevelOfMeasurement::Ratio,
    })?;
    let values = step_values(
        f64::from(extent.zero_bound_min),
        f64::from(extent.zero_bound_max),
        step,
    );
    let ticks = values
        .into_iter()
        .map(|value| Tick {
            position: stats.normalize_zero_bound(value as f32) * length,
            label: format_tick(value, step),
        })
        .collect();
    Ok((length, ticks))
}
