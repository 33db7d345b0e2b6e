//! Subplot grid geometry for the stacking directions.

/// Pixels per inch when rendering.
pub const DPI: f64 = 100.0;

/// Height in inches reserved above the subplots for the title and timestamp.
pub const TITLE_BAND: f64 = 1.0;

/// Arrangement of subplots in a figure.
pub trait Layout {
    /// Figure size in inches, given the size of each subplot in inches.
    fn figure_size(&self, subplot_size: (f64, f64), total_subplots: usize) -> (f64, f64);

    /// Number of (rows, columns) in the subplot grid.
    fn grid_dims(&self, total_subplots: usize) -> (usize, usize);
}

/// Subplots stacked top to bottom, sharing the figure width.
#[derive(Clone, Copy, Debug, Default)]
pub struct Vertical;

impl Layout for Vertical {
    fn figure_size(&self, (width, height): (f64, f64), total_subplots: usize) -> (f64, f64) {
        (width, total_subplots as f64 * height + TITLE_BAND)
    }

    fn grid_dims(&self, total_subplots: usize) -> (usize, usize) {
        (total_subplots, 1)
    }
}

/// Subplots placed left to right, sharing the figure height.
#[derive(Clone, Copy, Debug, Default)]
pub struct Horizontal;

impl Layout for Horizontal {
    fn figure_size(&self, (width, height): (f64, f64), total_subplots: usize) -> (f64, f64) {
        (total_subplots as f64 * width, height + TITLE_BAND)
    }

    fn grid_dims(&self, total_subplots: usize) -> (usize, usize) {
        (1, total_subplots)
    }
}

/// Convert a size in inches to whole pixels.
pub fn to_pixels((width, height): (f64, f64)) -> (u32, u32) {
    (
        (width * DPI).round().max(1.0) as u32,
        (height * DPI).round().max(1.0) as u32,
    )
}
