//! Bilinear interpolation at a fixed fractional pixel location.
//!
//! The interpolator is built for one `(row, col)` location and then applied to
//! any number of arrays, which is the common pattern when extracting a point
//! time series from a stack of gridded fields.
//!
//! ```rust
//! use gridsample::bilinear::Bilinear;
//!
//! // A 2x2 grid, C-ordered with the column index varying fastest
//! let dims = [2, 2];
//! let z = [0.0_f64, 0.0, 0.0, 10.0];
//!
//! // Each weight pair is (0.5, 0.5) at the cell center
//! let interpolator = Bilinear::new(0.5, 0.5).unwrap();
//! assert_eq!(interpolator.interp_one(&dims, &z).unwrap(), 2.5);
//!
//! // Multichannel data is laid out as (channels, rows, cols)
//! let dims = [2, 2, 2];
//! let z = [0.0_f64, 0.0, 0.0, 10.0, 1.0, 1.0, 1.0, 1.0];
//! let mut out = [0.0; 2];
//! interpolator.interp(&dims, &z, &mut out).unwrap();
//! assert_eq!(out, [2.5, 1.0]);
//!
//! // Anything but rank 2 or 3 is an error, not a value
//! assert!(interpolator.interp(&[8], &z, &mut out[..1]).is_err());
//! ```
//!
//! References
//! * https://en.wikipedia.org/wiki/Bilinear_interpolation

pub mod interpolator;
pub mod weights;

pub use interpolator::{interpn, Bilinear, RANK_ERROR};
pub use weights::AxisWeights;

/// Output of an allocating interpolation.
#[cfg(feature = "std")]
#[derive(Clone, Debug, PartialEq)]
pub enum Sample<T> {
    /// Value sampled from a rank-2 array
    Scalar(T),
    /// One value per channel, sampled from a rank-3 array
    Channels(Vec<T>),
}

#[cfg(feature = "std")]
impl<T> Sample<T> {
    /// View the sample as one value per channel.
    pub fn as_slice(&self) -> &[T] {
        match self {
            Sample::Scalar(v) => core::slice::from_ref(v),
            Sample::Channels(v) => v,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}
