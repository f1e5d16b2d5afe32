//! Tick steps and tick labels for continuous axes
//!
//! Ratio axes place their ticks at multiples of a "nice" step: 1, 2 or 5 times a power
//! of ten, chosen as the smallest such step that needs no more than the requested
//! number of intervals to cover the range.

/// Smallest nice step `s` (1, 2 or 5 × 10ⁿ) with `range / s <= max_intervals`.
///
/// # Returns
///
/// * `Some(step)` - for a positive finite range and at least one interval
/// * `None` - otherwise
///
/// # Examples
///
/// ```
/// # use arvis_axis::scale::nice_step;
/// assert_eq!(nice_step(25.0, 10), Some(5.0));
/// assert_eq!(nice_step(1.0, 10), Some(0.1));
/// assert_eq!(nice_step(0.0, 10), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn nice_step(range: f64, max_intervals: usize) -> Option<f64> {
    if !(range.is_finite() && range > 0.0) || max_intervals == 0 {
        return None;
    }
    let raw = range / max_intervals as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|factor| factor * magnitude)
        .find(|step| range / step <= max_intervals as f64 * (1.0 + 1e-9))
        .unwrap_or(10.0 * magnitude);
    Some(round_to_step_precision(step, step))
}

/// Multiples of `step` that lie within `[min, max]`, ascending.
#[expect(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
#[must_use]
pub fn step_values(min: f64, max: f64, step: f64) -> Vec<f64> {
    let tolerance = 1e-9;
    let first = (min / step - tolerance).ceil() as i64;
    let last = (max / step + tolerance).floor() as i64;
    (first..=last)
        .map(|k| round_to_step_precision(k as f64 * step, step))
        .collect()
}

/// Number of decimals needed to tell multiples of `step` apart.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn decimals_for_step(step: f64) -> usize {
    if step >= 1.0 || !step.is_finite() || step <= 0.0 {
        return 0;
    }
    (-step.log10().floor()) as usize
}

/// Formats a tick value, without decimals when it is integral.
///
/// ```
/// # use arvis_axis::scale::format_tick;
/// assert_eq!(format_tick(20.0, 5.0), "20");
/// assert_eq!(format_tick(0.3, 0.1), "0.3");
/// assert_eq!(format_tick(-0.25, 0.05), "-0.25");
/// ```
#[must_use]
pub fn format_tick(value: f64, step: f64) -> String {
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    let decimals = decimals_for_step(step);
    let label = format!("{value:.decimals$}");
    if label.contains('.') {
        label.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        label
    }
}

// Removes the binary noise of `k * step` (e.g. 0.30000000000000004).
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn round_to_step_precision(value: f64, step: f64) -> f64 {
    let scale = 10f64.powi(decimals_for_step(step) as i32 + 1);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 { 0.0 } else { rounded }
}
