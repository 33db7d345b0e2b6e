//! Point sampling of gridded data and stacked multi-line charts for the
//! resulting time series.
//!
//! [`bilinear`] interpolates 2D fields, or multichannel stacks of them, at a
//! fixed fractional pixel location. It is no-std and no-alloc compatible,
//! and the weights are computed once per location so repeated sampling of
//! many arrays costs four multiply-adds per channel.
//!
//! [`subplot`] (feature `plot`) lays out several subplots of line series in a
//! single column or row, with padded y ranges, "nice" tick steps, optional
//! time windows and a timestamped title, and renders them through `plotters`.
//!
//! # Example: Sampling a stack of fields
//! ```rust
//! use gridsample::Bilinear;
//!
//! // Three 3x4 fields, one per hour, with the column index varying fastest
//! let dims = [3, 3, 4];
//! let vals: Vec<f64> = (0..36).map(|i| i as f64).collect();
//!
//! // Sample a quarter of the way from row 1 to row 2, halfway from column 2 to 3
//! let interpolator = Bilinear::new(1.25, 2.5).unwrap();
//! let mut out = [0.0; 3];
//! interpolator.interp(&dims, &vals, &mut out).unwrap();
//!
//! // Value is linear in row and column, so the interpolation is exact
//! assert_eq!(out, [7.5, 19.5, 31.5]);
//! ```
//!
//! # Example: Charting the sampled series
//! ```rust
//! use gridsample::subplot::{LineSeries, PlotOptions, VerticalPlotter};
//!
//! let hours = vec![0.0, 1.0, 2.0];
//! let mut plotter = VerticalPlotter::new((10.0, 3.0), 1, "Site A");
//! plotter
//!     .add_plot(
//!         vec![LineSeries::new("sampled", hours, vec![7.5, 19.5, 31.5])],
//!         &PlotOptions::new().ylabel("value"),
//!     )
//!     .unwrap();
//! assert_eq!(plotter.figure_size(), (10.0, 4.0));
//! ```
//!
//! # Features
//! * `std` (default): allocating helpers and [`utils`]
//! * `plot` (default): the [`subplot`] module, backed by `plotters`, `chrono`
//!   and `tracing`
//! * `ndarray`: sample directly from `ndarray` arrays
#![cfg_attr(not(feature = "std"), no_std)]

pub mod bilinear;
pub use bilinear::{interpn, AxisWeights, Bilinear};

#[cfg(feature = "std")]
pub use bilinear::Sample;

#[cfg(feature = "plot")]
pub mod subplot;
#[cfg(feature = "plot")]
pub use subplot::{
    ChartError, HorizontalPlotter, LineSeries, MultiLineSubplotter, PlotOptions, VerticalPlotter,
};

#[cfg(feature = "std")]
pub mod utils;

#[cfg(all(test, feature = "std"))]
pub(crate) mod testing;
