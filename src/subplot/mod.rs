//! Stacked multi-line subplot charts.
//!
//! Each subplot holds any number of line series that share one y unit,
//! e.g. temperatures in Kelvin from several stations. Subplots are stacked
//! vertically or horizontally and filled in call order; y ranges and tick
//! steps are worked out from the data unless given.
//!
//! ```rust
//! use gridsample::subplot::{LineSeries, PlotOptions, VerticalPlotter};
//!
//! let mut plotter = VerticalPlotter::new((10.0, 3.0), 2, "Probe 7");
//!
//! let x = vec![0.0, 1.0, 2.0, 3.0];
//! let temps = vec![
//!     LineSeries::new("air", x.clone(), vec![280.0, 281.5, 283.0, 282.0]),
//!     LineSeries::new("ground", x.clone(), vec![276.0, 276.5, f64::NAN, 277.0])
//!         .style("r", "--", "o")
//!         .unwrap(),
//! ];
//! plotter
//!     .add_plot(temps, &PlotOptions::new().ylabel("T [K]").legend(true))
//!     .unwrap();
//!
//! let wind = vec![LineSeries::new("wind", x, vec![3.0, 4.0, 2.5, 5.0])];
//! plotter
//!     .add_plot(wind, &PlotOptions::new().ylabel("m/s").plot_range(0.0, 10.0))
//!     .unwrap();
//!
//! // Both slots are now filled
//! assert_eq!(plotter.num_subplots(), 2);
//! assert!(plotter.add_plot(vec![], &PlotOptions::new()).is_err());
//!
//! let figure = plotter.figure();
//! assert_eq!(figure.grid_dims(), (2, 1));
//! assert_eq!(figure.subplot(1).unwrap().y_step, 1.0);
//! ```

pub mod axis;
pub mod error;
pub mod figure;
pub mod layout;
pub mod options;
pub mod series;

use std::path::Path;

use chrono::{DateTime, Utc};
use plotters::coord::Shift;
use plotters::prelude::{BitMapBackend, DrawingArea, DrawingBackend, IntoDrawingArea, SVGBackend};
use tracing::{debug, warn};

pub use axis::{tick_step, AxisRange};
pub use error::{ChartError, Result};
pub use figure::{Figure, Subplot};
pub use layout::{Horizontal, Layout, Vertical};
pub use options::PlotOptions;
pub use series::{AxisKind, Color, LineSeries, LineStyle, Marker, XValues};

/// Format of the figure timestamp shown under the title.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Default gap between subplots, as a fraction of a subplot.
pub const DEFAULT_SPACE_BETWEEN: f64 = 0.5;

/// Subplots stacked top to bottom.
pub type VerticalPlotter = MultiLineSubplotter<Vertical>;

/// Subplots placed left to right.
pub type HorizontalPlotter = MultiLineSubplotter<Horizontal>;

/// Builds a figure of `total_subplots` aligned subplots, one [`add_plot`]
/// call per subplot.
///
/// The figure model is created on first use and filled in place. Calls must
/// be made in the order the subplots should appear.
///
/// [`add_plot`]: MultiLineSubplotter::add_plot
#[derive(Clone, Debug)]
pub struct MultiLineSubplotter<L: Layout> {
    layout: L,
    /// Size of each subplot in inches
    subplot_size: (f64, f64),
    total_subplots: usize,
    /// Number of subplots filled so far
    num_subplots: usize,
    space_between: f64,
    title: String,
    time: DateTime<Utc>,
    figure: Option<Figure>,
}

impl<L: Layout + Default> MultiLineSubplotter<L> {
    /// New chart with `total_subplots` slots of `subplot_size` inches each,
    /// timestamped with the current time.
    pub fn new(subplot_size: (f64, f64), total_subplots: usize, title: impl Into<String>) -> Self {
        Self::with_layout(L::default(), subplot_size, total_subplots, title)
    }
}

impl<L: Layout> MultiLineSubplotter<L> {
    pub fn with_layout(
        layout: L,
        subplot_size: (f64, f64),
        total_subplots: usize,
        title: impl Into<String>,
    ) -> Self {
        Self {
            layout,
            subplot_size,
            total_subplots,
            num_subplots: 0,
            space_between: DEFAULT_SPACE_BETWEEN,
            title: title.into(),
            time: Utc::now(),
            figure: None,
        }
    }

    /// Gap between neighboring subplots, as a fraction of a subplot.
    pub fn space_between(mut self, space_between: f64) -> Self {
        self.space_between = space_between;
        self
    }

    /// Time shown under the title.
    pub fn time(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }

    /// Figure size in inches.
    pub fn figure_size(&self) -> (f64, f64) {
        self.layout.figure_size(self.subplot_size, self.total_subplots)
    }

    pub fn grid_dims(&self) -> (usize, usize) {
        self.layout.grid_dims(self.total_subplots)
    }

    pub fn total_subplots(&self) -> usize {
        self.total_subplots
    }

    /// Number of subplots filled so far.
    pub fn num_subplots(&self) -> usize {
        self.num_subplots
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn timestamp(&self) -> String {
        self.time.format(TIMESTAMP_FORMAT).to_string()
    }

    /// The figure model, created the first time it is needed.
    pub fn figure(&mut self) -> &Figure {
        self.figure_mut()
    }

    fn figure_mut(&mut self) -> &mut Figure {
        // Disjoint field borrows; the closure only reads layout and sizes
        let (layout, subplot_size, total) = (&self.layout, self.subplot_size, self.total_subplots);
        self.figure.get_or_insert_with(|| {
            debug!(total, "creating figure");
            Figure::new(
                layout.grid_dims(total),
                layout.figure_size(subplot_size, total),
            )
        })
    }

    /// Plot a group of line series into the next empty subplot.
    ///
    /// Series with no valid y data are skipped with a warning. With a time
    /// bound, each series is cut down to the samples nearest the bounds. The y
    /// range and tick step come from the options if set, otherwise from the
    /// data.
    ///
    /// # Errors
    /// * If every subplot is already filled
    /// * If a series has different numbers of x and y values
    /// * If no series has valid data left to plot
    /// * If numeric and time x axes are mixed, or a time bound is given for
    ///   a numeric x axis
    pub fn add_plot(&mut self, series: Vec<LineSeries>, options: &PlotOptions) -> Result<()> {
        if self.num_subplots >= self.total_subplots {
            return Err(ChartError::SubplotsExhausted {
                total: self.total_subplots,
            });
        }

        for line in &series {
            line.check_lengths()?;
        }

        let ylabel = options.ylabel.as_deref().unwrap_or_default();
        let mut series: Vec<LineSeries> = series
            .into_iter()
            .filter(|line| {
                let invalid = line.is_all_invalid();
                if invalid {
                    warn!(series = %line.label, ylabel, "series has no valid data, skipping");
                }
                !invalid
            })
            .collect();

        if let Some((lower, upper)) = options.time_bound {
            for line in series.iter_mut() {
                line.truncate_to_window(lower, upper)?;
            }
        }

        let subplot = Subplot::from_series(series, options)?;

        let index = self.num_subplots;
        self.figure_mut().place(index, subplot)?;
        self.num_subplots += 1;
        debug!(index, ylabel, "filled subplot");

        let (space_between, title, timestamp) =
            (self.space_between, self.title.clone(), self.timestamp());
        let figure = self.figure_mut();
        figure.adjust(space_between);
        figure.suptitle(&title, &timestamp);

        Ok(())
    }

    /// Draw the figure onto any `plotters` drawing area.
    pub fn draw<DB: DrawingBackend>(&mut self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        self.prepare();
        self.figure().draw(root)
    }

    /// Render the figure to a PNG (or other bitmap format, by extension).
    pub fn save_png(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.prepare();
        let size = self.figure().pixel_size();
        let root = BitMapBackend::new(path.as_ref(), size).into_drawing_area();
        self.figure().draw(&root)?;
        root.present().map_err(ChartError::render)
    }

    /// Render the figure to an SVG file.
    pub fn save_svg(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.prepare();
        let size = self.figure().pixel_size();
        let root = SVGBackend::new(path.as_ref(), size).into_drawing_area();
        self.figure().draw(&root)?;
        root.present().map_err(ChartError::render)
    }

    /// Render the figure to an SVG document in memory.
    pub fn to_svg_string(&mut self) -> Result<String> {
        self.prepare();
        let size = self.figure().pixel_size();
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
            self.figure().draw(&root)?;
            root.present().map_err(ChartError::render)?;
        }
        Ok(svg)
    }

    /// Apply figure-level spacing and titles, for figures drawn before any
    /// subplot was added.
    fn prepare(&mut self) {
        let (space_between, title, timestamp) =
            (self.space_between, self.title.clone(), self.timestamp());
        let figure = self.figure_mut();
        figure.adjust(space_between);
        figure.suptitle(&title, &timestamp);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;
    use chrono::{Duration, TimeZone};

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 11, 5, 18, 42, 10).unwrap()
    }

    fn hourly(n: usize) -> Vec<DateTime<Utc>> {
        (0..n).map(|i| stamp() + Duration::hours(i as i64)).collect()
    }

    fn line(label: &str, y: Vec<f64>) -> LineSeries {
        let x = (0..y.len()).map(|i| i as f64).collect::<Vec<f64>>();
        LineSeries::new(label, x, y)
    }

    #[test]
    fn test_geometry() {
        let plotter = VerticalPlotter::new((10.0, 2.0), 3, "v");
        assert_eq!(plotter.grid_dims(), (3, 1));
        assert_eq!(plotter.figure_size(), (10.0, 7.0));

        let plotter = HorizontalPlotter::new((4.0, 3.0), 2, "h");
        assert_eq!(plotter.grid_dims(), (1, 2));
        assert_eq!(plotter.figure_size(), (8.0, 4.0));
    }

    #[test]
    fn test_figure_created_once() {
        let mut plotter = VerticalPlotter::new((10.0, 2.0), 2, "probe").time(stamp());
        assert!(plotter.figure.is_none());

        let size = plotter.figure().size();
        assert_eq!(size, (10.0, 5.0));
        assert!(plotter.figure.is_some());

        plotter
            .add_plot(vec![line("a", vec![1.0, 2.0])], &PlotOptions::new())
            .unwrap();

        // Same figure, now with the first slot filled
        let figure = plotter.figure();
        assert!(figure.subplot(0).is_some());
        assert!(figure.subplot(1).is_none());
        assert_eq!(figure.title(), "probe");
        assert_eq!(figure.timestamp(), "2023-11-05 18:42 UTC");
        assert_eq!(figure.space_between(), DEFAULT_SPACE_BETWEEN);
    }

    #[test]
    fn test_slots_fill_in_order() {
        let mut plotter = HorizontalPlotter::new((4.0, 3.0), 3, "t").space_between(0.2);
        for i in 0..3 {
            let y = vec![i as f64, i as f64 + 1.0];
            plotter
                .add_plot(vec![line(&format!("s{i}"), y)], &PlotOptions::new())
                .unwrap();
            assert_eq!(plotter.num_subplots(), i + 1);
        }

        let figure = plotter.figure();
        assert_eq!(figure.space_between(), 0.2);
        for i in 0..3 {
            assert_eq!(figure.subplot(i).unwrap().series[0].label, format!("s{i}"));
        }
    }

    #[test]
    fn test_too_many_plots() {
        let mut plotter = VerticalPlotter::new((10.0, 2.0), 2, "t");
        let options = PlotOptions::new();
        plotter.add_plot(vec![line("a", vec![1.0, 2.0])], &options).unwrap();
        plotter.add_plot(vec![line("b", vec![3.0, 4.0])], &options).unwrap();

        let err = plotter.add_plot(vec![line("c", vec![5.0, 6.0])], &options);
        assert!(matches!(err, Err(ChartError::SubplotsExhausted { total: 2 })));
        assert_eq!(plotter.num_subplots(), 2);

        // Nothing was overwritten
        let figure = plotter.figure();
        assert_eq!(figure.subplot(0).unwrap().series[0].label, "a");
        assert_eq!(figure.subplot(1).unwrap().series[0].label, "b");
    }

    #[test]
    fn test_single_subplot() {
        let mut plotter = VerticalPlotter::new((10.0, 2.0), 1, "t");
        let options = PlotOptions::new();
        plotter.add_plot(vec![line("a", vec![1.0, 2.0])], &options).unwrap();
        assert_eq!(plotter.figure().slots().len(), 1);

        // A second call must not replace the only subplot
        assert!(plotter.add_plot(vec![line("b", vec![1.0])], &options).is_err());
        assert_eq!(plotter.figure().subplot(0).unwrap().series[0].label, "a");
    }

    #[test]
    fn test_invalid_series_dropped() {
        let mut rng = rng_fixed_seed();
        let mut plotter = VerticalPlotter::new((10.0, 2.0), 2, "t");

        let series = vec![
            line("good", noisy_series(&mut rng, 24, 270.0, 290.0, 5)),
            line("bad", vec![f64::NAN; 24]),
            line("empty", vec![]),
        ];
        plotter
            .add_plot(series, &PlotOptions::new().ylabel("T [K]"))
            .unwrap();

        let subplot = plotter.figure().subplot(0).unwrap();
        assert_eq!(subplot.series.len(), 1);
        assert_eq!(subplot.series[0].label, "good");
        let data = subplot.series[0].y_extent().unwrap();
        assert!(data.min >= 270.0 && data.max < 290.0);
        assert_eq!(subplot.y_range, data.padded());
    }

    #[test]
    fn test_infinite_series_dropped() {
        let mut plotter = VerticalPlotter::new((10.0, 2.0), 1, "t");
        let series = vec![
            line("good", vec![1.0, 2.0, 3.0]),
            line("blown up", vec![f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY]),
        ];
        plotter.add_plot(series, &PlotOptions::new()).unwrap();

        let subplot = plotter.figure().subplot(0).unwrap();
        assert_eq!(subplot.series.len(), 1);
        assert_eq!(subplot.series[0].label, "good");
    }

    #[test]
    fn test_all_series_invalid() {
        let mut plotter = VerticalPlotter::new((10.0, 2.0), 2, "t");
        let err = plotter.add_plot(
            vec![line("bad", vec![f64::NAN; 3])],
            &PlotOptions::new().ylabel("rh"),
        );
        assert!(matches!(err, Err(ChartError::NoValidSeries { .. })));

        // The failed call does not use up a slot
        assert_eq!(plotter.num_subplots(), 0);
        plotter
            .add_plot(vec![line("ok", vec![1.0, 2.0])], &PlotOptions::new())
            .unwrap();
        assert_eq!(plotter.num_subplots(), 1);
    }

    #[test]
    fn test_length_mismatch() {
        let mut plotter = VerticalPlotter::new((10.0, 2.0), 1, "t");
        let series = vec![LineSeries::new("a", vec![0.0, 1.0, 2.0], vec![1.0, 2.0])];
        assert!(matches!(
            plotter.add_plot(series, &PlotOptions::new()),
            Err(ChartError::LengthMismatch { x: 3, y: 2, .. })
        ));
    }

    #[test]
    fn test_time_bound() {
        let mut plotter = VerticalPlotter::new((10.0, 2.0), 1, "t");
        let t = hourly(12);
        let y: Vec<f64> = (0..12).map(|i| i as f64).collect();
        let other: Vec<f64> = (0..12).map(|i| 100.0 - i as f64).collect();

        let options = PlotOptions::new()
            .time_bound(t[3] - Duration::minutes(10), t[8] + Duration::minutes(25))
            .ylabel("x");
        plotter
            .add_plot(
                vec![
                    LineSeries::new("up", t.clone(), y),
                    LineSeries::new("down", t.clone(), other),
                ],
                &options,
            )
            .unwrap();

        let subplot = plotter.figure().subplot(0).unwrap();
        assert_eq!(subplot.series[0].y, vec![3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(subplot.series[1].y, vec![97.0, 96.0, 95.0, 94.0, 93.0, 92.0]);
        assert_eq!(subplot.x_range.min, t[3].timestamp() as f64);
        assert_eq!(subplot.x_range.max, t[8].timestamp() as f64);
        assert!(subplot.time_labels);
    }

    #[test]
    fn test_time_bound_numeric_axis() {
        let mut plotter = VerticalPlotter::new((10.0, 2.0), 1, "t");
        let t = hourly(2);
        let options = PlotOptions::new().time_bound(t[0], t[1]);
        assert!(matches!(
            plotter.add_plot(vec![line("a", vec![1.0, 2.0])], &options),
            Err(ChartError::TimeBoundOnNumericAxis { .. })
        ));
        assert_eq!(plotter.num_subplots(), 0);
    }

    #[test]
    fn test_shared_tick_step() {
        let mut plotter = VerticalPlotter::new((10.0, 2.0), 1, "t");
        // Data spanning 0..164.3 pads to a 230 wide range, a 23 target step
        let series = vec![
            line("a", vec![0.0, 100.0, 164.3]),
            line("b", vec![50.0, 20.0, 10.0]),
        ];
        plotter.add_plot(series, &PlotOptions::new()).unwrap();

        let subplot = plotter.figure().subplot(0).unwrap();
        assert!((subplot.y_range.span() - 230.0).abs() < 0.1);
        assert_eq!(subplot.y_step, 20.0);
        assert!(subplot.y_ticks().iter().all(|t| (t / 20.0).fract() == 0.0));
    }

    #[test]
    #[ignore = "needs a system sans-serif font for text layout"]
    fn test_render_svg() {
        let mut plotter = VerticalPlotter::new((6.0, 2.0), 2, "render").time(stamp());
        let t = hourly(6);
        plotter
            .add_plot(
                vec![
                    LineSeries::new("a", t.clone(), vec![1.0, 2.0, f64::NAN, 4.0, 3.0, 2.0])
                        .style("k", "--", "o")
                        .unwrap(),
                    LineSeries::new("b", t, vec![2.0, 2.5, 3.0, 3.5, 2.5, 1.0]),
                ],
                &PlotOptions::new().ylabel("y").legend(true),
            )
            .unwrap();

        let svg = plotter.to_svg_string().unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("render"));
        assert!(svg.contains("2023-11-05 18:42 UTC"));
    }
}
