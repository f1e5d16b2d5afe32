//! Extents (min/max/range) of attribute values
//!
//! Axis construction scales values with `(value - min) / range`. Two flavors exist:
//!
//! - [`RatioExtent`]: observed minimum and maximum of a ratio attribute, plus the
//!   *zero-bound* variants which are forced to include zero so that bar-chart axes
//!   always start at or cross zero
//! - [`CodeExtent`]: closed range of integer codes, used for ordinal and interval
//!   attributes
//!
//! Both refuse to exist without data: an attribute with no observation has no extent,
//! rather than one made of sentinel extremes.

use serde::Serialize;

use crate::level::is_missing_code;

/// Observed extent of a ratio attribute and its zero-bound variant.
///
/// # Invariants
///
/// - `min <= max`, `range = max - min >= 0`
/// - `zero_bound_min <= 0 <= zero_bound_max`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioExtent {
    pub min: f32,
    pub max: f32,
    pub range: f32,
    pub zero_bound_min: f32,
    pub zero_bound_max: f32,
    pub zero_bound_range: f32,
}

impl RatioExtent {
    /// Computes the extent of the finite `values`.
    ///
    /// NaN sentinels and infinities are skipped.
    ///
    /// # Returns
    ///
    /// * `Some(RatioExtent)` - if at least one value is finite
    /// * `None` - if there are no values or none of them is finite
    ///
    /// # Examples
    ///
    /// ```
    /// # use arvis_stats::extent::RatioExtent;
    /// let extent = RatioExtent::new([10.0, f32::NAN, -5.0, 20.0]).unwrap();
    /// assert_eq!(extent.min, -5.0);
    /// assert_eq!(extent.max, 20.0);
    /// assert_eq!(extent.range, 25.0);
    ///
    /// assert!(RatioExtent::new([f32::NAN]).is_none());
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        let (min, max) = values
            .into_iter()
            .filter(|value| value.is_finite())
            .fold(None, |acc, value| match acc {
                None => Some((value, value)),
                Some((min, max)) => Some((f32::min(min, value), f32::max(max, value))),
            })?;
        Some(Self::from_bounds(min, max))
    }

    /// Builds the extent from known bounds.
    #[must_use]
    pub fn from_bounds(min: f32, max: f32) -> Self {
        debug_assert!(min <= max, "min must not exceed max");
        let zero_bound_min = if min > 0.0 { 0.0 } else { min };
        let zero_bound_max = if max < 0.0 { 0.0 } else { max };
        Self {
            min,
            max,
            range: max - min,
            zero_bound_min,
            zero_bound_max,
            zero_bound_range: zero_bound_max - zero_bound_min,
        }
    }

    /// Maps `value` into `[0, 1]` relative to `[min, max]`.
    ///
    /// A zero-width extent maps every value to `0.0`.
    #[must_use]
    pub fn normalize(&self, value: f32) -> f32 {
        normalize(value - self.min, self.range)
    }

    /// Maps `value` into `[0, 1]` relative to the zero-bound extent.
    #[must_use]
    pub fn normalize_zero_bound(&self, value: f32) -> f32 {
        normalize(value - self.zero_bound_min, self.zero_bound_range)
    }
}

/// Closed range of integer codes `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CodeExtent {
    pub min: i32,
    pub max: i32,
}

impl CodeExtent {
    /// Returns `None` if `min > max`.
    #[must_use]
    pub fn new(min: i32, max: i32) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    /// Extent of the observed codes, skipping the missing-value sentinel.
    #[must_use]
    pub fn observed<I>(codes: I) -> Option<Self>
    where
        I: IntoIterator<Item = i32>,
    {
        codes
            .into_iter()
            .filter(|code| !is_missing_code(*code))
            .fold(None, |acc, code| match acc {
                None => Some(Self {
                    min: code,
                    max: code,
                }),
                Some(Self { min, max }) => Some(Self {
                    min: min.min(code),
                    max: max.max(code),
                }),
            })
    }

    /// `max - min`, widened so that extreme codes cannot overflow.
    #[must_use]
    pub fn range(&self) -> i64 {
        i64::from(self.max) - i64::from(self.min)
    }

    #[must_use]
    pub fn contains(&self, code: i32) -> bool {
        (self.min..=self.max).contains(&code)
    }

    /// Maps `code` into `[0, 1]` relative to `[min, max]`.
    ///
    /// A single-code extent maps every code to `0.0`.
    #[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    #[must_use]
    pub fn normalize(&self, code: i32) -> f32 {
        let offset = i64::from(code) - i64::from(self.min);
        if self.range() == 0 {
            0.0
        } else {
            (offset as f64 / self.range() as f64) as f32
        }
    }
}

fn normalize(offset: f32, range: f32) -> f32 {
    if range == 0.0 { 0.0 } else { offset / range }
}

#[cfg(test)]
mod tests {
    use crate::level::MISSING_CODE;

    use super::*;

    #[test]
    fn test_ratio_scenario_mixed_signs() {
        let extent = RatioExtent::new([10.0, f32::NAN, -5.0, 20.0]).unwrap();
        assert_eq!(extent, RatioExtent {
            min: -5.0,
            max: 20.0,
            range: 25.0,
            zero_bound_min: -5.0,
            zero_bound_max: 20.0,
            zero_bound_range: 25.0,
        });
    }

    #[test]
    fn test_ratio_zero_bound_positive() {
        let extent = RatioExtent::new([3.0, 8.0]).unwrap();
        assert_eq!(extent.min, 3.0);
        assert_eq!(extent.zero_bound_min, 0.0);
        assert_eq!(extent.zero_bound_max, 8.0);
        assert_eq!(extent.zero_bound_range, 8.0);
        assert_eq!(extent.range, 5.0);
    }

    #[test]
    fn test_ratio_zero_bound_negative() {
        let extent = RatioExtent::new([-3.0, -8.0]).unwrap();
        assert_eq!(extent.max, -3.0);
        assert_eq!(extent.zero_bound_min, -8.0);
        assert_eq!(extent.zero_bound_max, 0.0);
        assert_eq!(extent.zero_bound_range, 8.0);
    }

    #[test]
    fn test_ratio_all_missing_has_no_extent() {
        assert!(RatioExtent::new([f32::NAN, f32::NAN]).is_none());
        assert!(RatioExtent::new(std::iter::empty()).is_none());
    }

    #[test]
    fn test_ratio_skips_infinities() {
        let extent = RatioExtent::new([f32::INFINITY, 5.0, f32::NEG_INFINITY, 1.0]).unwrap();
        assert_eq!((extent.min, extent.max), (1.0, 5.0));
        assert!(extent.range.is_finite());
        assert!(extent.normalize(5.0).is_finite());
        assert!(RatioExtent::new([f32::INFINITY]).is_none());
    }

    #[test]
    fn test_ratio_normalize() {
        let extent = RatioExtent::new([2.0, 6.0]).unwrap();
        assert_eq!(extent.normalize(2.0), 0.0);
        assert_eq!(extent.normalize(4.0), 0.5);
        assert_eq!(extent.normalize(6.0), 1.0);
        assert_eq!(extent.normalize_zero_bound(3.0), 0.5);
    }

    #[test]
    fn test_ratio_normalize_zero_width() {
        let extent = RatioExtent::new([4.0, 4.0]).unwrap();
        assert_eq!(extent.range, 0.0);
        assert_eq!(extent.normalize(4.0), 0.0);
        assert_eq!(extent.normalize_zero_bound(2.0), 0.5);
    }

    #[test]
    fn test_code_extent_observed() {
        let extent = CodeExtent::observed([5, MISSING_CODE, -2, 9]).unwrap();
        assert_eq!(extent, CodeExtent { min: -2, max: 9 });
        assert_eq!(extent.range(), 11);
        assert!(CodeExtent::observed([MISSING_CODE]).is_none());
    }

    #[test]
    fn test_code_extent_bounds() {
        assert!(CodeExtent::new(3, 1).is_none());
        let extent = CodeExtent::new(1990, 2020).unwrap();
        assert!(extent.contains(2000));
        assert!(!extent.contains(2021));
        assert_eq!(extent.normalize(2005), 0.5);
        assert_eq!(CodeExtent::new(7, 7).unwrap().normalize(7), 0.0);
    }

    #[test]
    fn test_code_extent_wide_range() {
        let extent = CodeExtent::new(i32::MIN + 1, i32::MAX).unwrap();
        assert_eq!(extent.range(), i64::from(i32::MAX) * 2);
        assert_eq!(extent.normalize(i32::MAX), 1.0);
    }
}
