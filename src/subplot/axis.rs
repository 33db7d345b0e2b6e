//! Axis range and tick step selection.
//!
//! Y axes are padded by a fixed fraction of the data span on each side, and
//! ticks are placed on multiples of a "nice" step of 1, 2 or 5 times a power
//! of ten, chosen so that roughly [`TARGET_TICKS`] ticks span the axis.

use core::ops::Range;

/// Fraction of the data span added above and below the data.
pub const PADDING: f64 = 0.2;

/// Number of ticks aimed for along a y axis.
pub const TARGET_TICKS: f64 = 11.0;

/// Mantissas a tick step may take.
pub const STEP_MULTIPLIERS: [f64; 3] = [1.0, 2.0, 5.0];

/// Upper limit on generated tick positions.
const MAX_TICKS: usize = 1000;

/// A closed interval along one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Absolute width of the interval.
    pub fn span(&self) -> f64 {
        (self.max - self.min).abs()
    }

    /// Smallest interval containing all of `ranges`.
    pub fn union<I: IntoIterator<Item = AxisRange>>(ranges: I) -> Option<Self> {
        ranges.into_iter().reduce(|acc, r| AxisRange {
            min: acc.min.min(r.min),
            max: acc.max.max(r.max),
        })
    }

    /// Extend both ends by [`PADDING`] times the span.
    pub fn padded(&self) -> Self {
        let pad = PADDING * self.span();
        Self::new(self.min - pad, self.max + pad)
    }

    /// Extend each end by [`PADDING`] times its own magnitude.
    ///
    /// Used for numeric x axes, which leaves room for line labels near data
    /// that sits far from zero.
    pub fn padded_by_magnitude(&self) -> Self {
        Self::new(
            self.min - PADDING * self.min.abs(),
            self.max + PADDING * self.max.abs(),
        )
    }

    /// Widen a zero-width interval by 10% of its value on each side, or by
    /// one unit when the value is zero.
    pub fn nonsingular(&self) -> Self {
        let pad = if self.min == 0.0 { 1.0 } else { 0.1 * self.min.abs() };
        self.nonsingular_by(pad)
    }

    /// Widen a zero-width interval by `pad` on each side.
    pub fn nonsingular_by(&self, pad: f64) -> Self {
        if self.min == self.max {
            Self::new(self.min - pad, self.max + pad)
        } else {
            *self
        }
    }

    /// Multiples of `step` that fall inside the interval, in increasing order.
    ///
    /// Returns nothing for a step that is not a positive finite number, or
    /// that would produce an unreasonable number of ticks.
    pub fn ticks(&self, step: f64) -> Vec<f64> {
        if !(step > 0.0 && step.is_finite()) {
            return Vec::new();
        }

        // Tolerate rounding in the division for ticks right on the ends
        let (lo, hi) = (self.min.min(self.max), self.min.max(self.max));
        let first = (lo / step - 1e-9).ceil();
        let last = (hi / step + 1e-9).floor();
        if !(first.is_finite() && last.is_finite()) || last - first > MAX_TICKS as f64 {
            return Vec::new();
        }

        let n = (last - first) as i64;
        (0..=n).map(|k| (first + k as f64) * step).collect()
    }

    pub fn as_range(&self) -> Range<f64> {
        self.min..self.max
    }
}

/// Pick a tick step for the interval.
///
/// The target step divides `1.1 * span` into [`TARGET_TICKS`] parts. Its
/// decimal exponent is kept and its mantissa snapped to whichever of
/// [`STEP_MULTIPLIERS`] is nearest in log space.
///
/// A zero-width interval has no usable target and falls back to a tenth of
/// the span, see [`resolve_step`].
pub fn tick_step(range: &AxisRange) -> f64 {
    let span = range.span();
    let logstep = (span * 1.1 / TARGET_TICKS).log10();

    let step = if logstep.is_finite() {
        let pow = logstep.floor();
        let mantissa = 10_f64.powf(logstep - pow);
        let mult = STEP_MULTIPLIERS
            .iter()
            .copied()
            .min_by(|a, b| {
                let da = (mantissa / a).log10().abs();
                let db = (mantissa / b).log10().abs();
                da.total_cmp(&db)
            })
            .unwrap_or(1.0);
        mult * 10_f64.powi(pow as i32)
    } else {
        0.0
    };

    resolve_step(step, range)
}

/// Replace a zero or non-finite step with a tenth of the span.
pub fn resolve_step(step: f64, range: &AxisRange) -> f64 {
    if step == 0.0 || !step.is_finite() {
        range.span() / 10.0
    } else {
        step.abs()
    }
}

/// Format a tick label with just enough decimals to distinguish multiples
/// of `step`.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step.is_finite() {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    // Avoid printing "-0"
    let value = if value.abs() < step.abs() * 1e-9 { 0.0 } else { value };
    format!("{value:.decimals$}")
}
