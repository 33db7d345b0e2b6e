//! Bilinear sampling of a 2x2 (or 2x2xchannels) neighborhood at a fixed
//! fractional pixel location.
//!
//! Operation Complexity
//! * O(1) per channel; four reads and three weighted sums.
//!
//! Memory Complexity
//! * No allocation, except in the `_alloc` convenience method.
//!
//! References
//! * https://en.wikipedia.org/wiki/Bilinear_interpolation#Repeated_linear_interpolation
use num_traits::Float;

use super::AxisWeights;

#[cfg(feature = "std")]
use super::Sample;

/// Returned for arrays that are neither (rows, cols) nor (channels, rows, cols).
pub const RANK_ERROR: &str = "Array must be of dim 2 or 3";

/// Bilinear interpolator for a single fractional `(row, col)` location.
///
/// The floor indices and weight pairs are computed once at construction, so
/// one instance can be reused to sample many arrays of the same shape, such as
/// each frame of a time series of gridded fields.
///
/// Assumes C-style ordering of vals, with the column index varying fastest:
/// (z(r0, c0), z(r0, c1), ..., z(r0, cn), z(r1, c0), ...). Rank-3 arrays are
/// laid out as (channels, rows, cols).
///
/// No clamping or extrapolation is done. Both bracketing indices on each axis
/// must be inside the array.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bilinear<T: Float> {
    row: AxisWeights<T>,
    col: AxisWeights<T>,
}

impl<T: Float> Bilinear<T> {
    /// Build an interpolator for the fractional location `(row, col)`.
    ///
    /// # Errors
    /// * If either coordinate is negative, NaN, or too large to index with
    #[inline]
    pub fn new(row: T, col: T) -> Result<Self, &'static str> {
        Ok(Self {
            row: AxisWeights::new(row)?,
            col: AxisWeights::new(col)?,
        })
    }

    /// Weights along the row axis, for rows `i0` and `i0 + 1`.
    #[inline]
    pub fn row_weights(&self) -> [T; 2] {
        self.row.weights()
    }

    /// Weights along the column axis, for columns `j0` and `j0 + 1`.
    #[inline]
    pub fn col_weights(&self) -> [T; 2] {
        self.col.weights()
    }

    /// Lower corner `(i0, j0)` of the sampled neighborhood.
    #[inline]
    pub fn origin(&self) -> (usize, usize) {
        (self.row.lower(), self.col.lower())
    }

    /// Interpolate a rank-2 `(rows, cols)` or rank-3 `(channels, rows, cols)`
    /// array, writing one value per channel to `out`.
    ///
    /// A rank-2 array has exactly one channel.
    ///
    /// # Errors
    /// * [`RANK_ERROR`] if `dims` has any length other than 2 or 3
    /// * If the number of values does not match `dims`, or `dims` overflows `usize`
    /// * If `out` does not have one entry per channel
    /// * If the 2x2 neighborhood extends past the last row or column
    #[inline]
    pub fn interp(&self, dims: &[usize], vals: &[T], out: &mut [T]) -> Result<(), &'static str> {
        let (channels, rows, cols) = match *dims {
            [rows, cols] => (1, rows, cols),
            [channels, rows, cols] => (channels, rows, cols),
            _ => return Err(RANK_ERROR),
        };

        let nvals = dims
            .iter()
            .try_fold(1_usize, |acc, &d| acc.checked_mul(d))
            .ok_or("Dimension mismatch")?;
        if vals.len() != nvals || out.len() != channels {
            return Err("Dimension mismatch");
        }
        self.check_bounds(rows, cols)?;

        let (i0, j0) = self.origin();
        let plane = rows * cols;
        for c in 0..channels {
            let base = c * plane + i0 * cols + j0;
            out[c] = self.blend(|di, dj| vals[base + di * cols + dj]);
        }

        Ok(())
    }

    /// Interpolate a rank-2 `(rows, cols)` array to a single value.
    ///
    /// # Errors
    /// * [`RANK_ERROR`] for anything but rank 2 or 3
    /// * If a rank-3 array is passed, since it produces one value per channel
    /// * Otherwise, as [`Bilinear::interp`]
    #[inline]
    pub fn interp_one(&self, dims: &[usize], vals: &[T]) -> Result<T, &'static str> {
        match dims.len() {
            2 => {
                let mut out = [T::zero()];
                self.interp(dims, vals, &mut out)?;
                Ok(out[0])
            }
            3 => Err("Dimension mismatch"),
            _ => Err(RANK_ERROR),
        }
    }

    /// Interpolate, allocating for the per-channel output for convenience.
    ///
    /// Returns [`Sample::Scalar`] for rank-2 input and [`Sample::Channels`]
    /// for rank-3 input.
    #[cfg(feature = "std")]
    pub fn interp_alloc(&self, dims: &[usize], vals: &[T]) -> Result<Sample<T>, &'static str> {
        match dims.len() {
            2 => Ok(Sample::Scalar(self.interp_one(dims, vals)?)),
            3 => {
                let mut out = vec![T::zero(); dims[0]];
                self.interp(dims, vals, &mut out)?;
                Ok(Sample::Channels(out))
            }
            _ => Err(RANK_ERROR),
        }
    }

    /// Interpolate an `ndarray` array or view of any memory layout.
    ///
    /// The rank is only known at runtime for dynamic-dimension arrays, so it is
    /// checked here the same way as for flat slices.
    #[cfg(feature = "ndarray")]
    pub fn interp_array<S, D>(
        &self,
        arr: &ndarray::ArrayBase<S, D>,
    ) -> Result<Sample<T>, &'static str>
    where
        S: ndarray::Data<Elem = T>,
        D: ndarray::Dimension,
    {
        let view = arr.view().into_dyn();
        match *view.shape() {
            [rows, cols] => {
                self.check_bounds(rows, cols)?;
                let (i0, j0) = self.origin();
                let v = self.blend(|di, dj| view[[i0 + di, j0 + dj].as_slice()]);
                Ok(Sample::Scalar(v))
            }
            [channels, rows, cols] => {
                self.check_bounds(rows, cols)?;
                let (i0, j0) = self.origin();
                let out = (0..channels)
                    .map(|c| self.blend(|di, dj| view[[c, i0 + di, j0 + dj].as_slice()]))
                    .collect();
                Ok(Sample::Channels(out))
            }
            _ => Err(RANK_ERROR),
        }
    }

    /// Make sure the whole neighborhood is addressable.
    #[inline]
    fn check_bounds(&self, rows: usize, cols: usize) -> Result<(), &'static str> {
        if self.row.upper() >= rows || self.col.upper() >= cols {
            return Err("Neighborhood exceeds array bounds");
        }
        Ok(())
    }

    /// Combine the neighborhood given by `at(row_offset, col_offset)`.
    ///
    /// Column weights are applied first, giving one partial sum per row,
    /// then the row weights combine the two partial sums.
    #[inline(always)]
    fn blend<F>(&self, at: F) -> T
    where
        F: Fn(usize, usize) -> T,
    {
        let top = self.col.blend(at(0, 0), at(0, 1));
        let bottom = self.col.blend(at(1, 0), at(1, 1));
        self.row.blend(top, bottom)
    }
}

/// Sample a rank-2 or rank-3 array at the fractional location `(row, col)`,
/// writing one value per channel to `out`.
///
/// This is a convenience function. When sampling many arrays at the same
/// location, build a [`Bilinear`] once and reuse it.
#[inline]
pub fn interpn<T: Float>(
    row: T,
    col: T,
    dims: &[usize],
    vals: &[T],
    out: &mut [T],
) -> Result<(), &'static str> {
    Bilinear::new(row, col)?.interp(dims, vals, out)
}
