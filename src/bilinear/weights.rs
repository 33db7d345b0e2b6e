//! Linear weight pairs along a single grid axis.

use num_traits::{Float, NumCast};

/// Lower bracketing index and linear weights for a fractional coordinate
/// along one axis.
///
/// For a coordinate `w` with `i0 = floor(w)` and `i1 = i0 + 1`, the weights are
/// `(i1 - w, w - i0)`, so the sample at `i0` gets the larger share when `w` is
/// closer to it. The pair always sums to one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisWeights<T: Float> {
    lower: usize,
    weights: [T; 2],
}

impl<T: Float> AxisWeights<T> {
    /// Bracket a fractional coordinate.
    ///
    /// # Errors
    /// * If the coordinate is negative, NaN, infinite, or otherwise has a
    ///   floor that does not fit in a `usize`
    #[inline]
    pub fn new(w: T) -> Result<Self, &'static str> {
        let floor = w.floor();
        let lower = <usize as NumCast>::from(floor).ok_or("Unrepresentable coordinate value")?;
        // Upper index must also be addressable
        lower.checked_add(1).ok_or("Unrepresentable coordinate value")?;

        let frac = w - floor;
        Ok(Self {
            lower,
            weights: [T::one() - frac, frac],
        })
    }

    /// Index of the lower bracketing sample, `floor(w)`.
    #[inline]
    pub fn lower(&self) -> usize {
        self.lower
    }

    /// Index of the upper bracketing sample, `floor(w) + 1`.
    #[inline]
    pub fn upper(&self) -> usize {
        self.lower + 1
    }

    /// Weights for the lower and upper samples, in that order.
    #[inline]
    pub fn weights(&self) -> [T; 2] {
        self.weights
    }

    /// Apply the weight pair to the samples at the lower and upper index.
    #[inline]
    pub fn blend(&self, lo: T, hi: T) -> T {
        self.weights[0] * lo + self.weights[1] * hi
    }
}

#[cfg(all(test, feature = "std"))]
mod test {
    use super::AxisWeights;
    use crate::testing::*;

    #[test]
    fn test_weights_sum_to_one() {
        let mut rng = rng_fixed_seed();
        let locs = randn::<f64>(&mut rng, 1000);

        for loc in locs.iter().map(|x| x * 512.0) {
            let w = AxisWeights::new(loc).unwrap();
            let [w0, w1] = w.weights();
            assert!((w0 + w1 - 1.0).abs() < 1e-12);
            assert!(w0 >= 0.0 && w1 >= 0.0);
            assert!((w.lower() as f64) <= loc && loc < w.upper() as f64);
        }
    }

    #[test]
    fn test_integer_coordinate_is_degenerate() {
        let w = AxisWeights::new(7.0_f64).unwrap();
        assert_eq!(w.lower(), 7);
        assert_eq!(w.upper(), 8);
        assert_eq!(w.weights(), [1.0, 0.0]);
        assert_eq!(w.blend(3.0, 100.0), 3.0);
    }

    #[test]
    fn test_nearer_index_gets_larger_weight() {
        let w = AxisWeights::new(2.25_f32).unwrap();
        assert_eq!(w.lower(), 2);
        assert_eq!(w.weights(), [0.75, 0.25]);
        assert_eq!(w.blend(0.0, 4.0), 1.0);
    }

    #[test]
    fn test_unrepresentable() {
        assert!(AxisWeights::new(-0.5_f64).is_err());
        assert!(AxisWeights::new(f64::NAN).is_err());
        assert!(AxisWeights::new(f64::INFINITY).is_err());
    }
}
