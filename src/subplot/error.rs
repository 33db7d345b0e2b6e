//! Error types for chart construction and rendering.

use thiserror::Error;

/// Errors from building or drawing a multi-subplot chart.
#[derive(Error, Debug)]
pub enum ChartError {
    /// Every subplot slot has already been filled.
    #[error("All {total} subplots are already in use")]
    SubplotsExhausted { total: usize },

    /// Nothing left to plot after dropping invalid series.
    #[error("No series with valid data for {ylabel:?}")]
    NoValidSeries { ylabel: String },

    /// One subplot cannot mix numeric and time x axes.
    #[error("Series in a subplot must all have numeric or all have time x values")]
    MixedAxisKinds,

    /// Time windows only apply to time x axes.
    #[error("Time bound given for series {label:?}, which has a numeric x axis")]
    TimeBoundOnNumericAxis { label: String },

    /// x and y values do not pair up.
    #[error("Series {label:?} has {x} x values but {y} y values")]
    LengthMismatch { label: String, x: usize, y: usize },

    /// Unrecognized color, marker or line style.
    #[error("Invalid style: {0}")]
    InvalidStyle(String),

    /// Error reported by the drawing backend.
    #[error("Render error: {0}")]
    Render(String),
}

/// Result type for chart operations.
pub type Result<T> = std::result::Result<T, ChartError>;

impl ChartError {
    /// Wrap a drawing backend error.
    pub fn render(err: impl std::fmt::Display) -> Self {
        Self::Render(err.to_string())
    }
}
