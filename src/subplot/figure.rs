//! Figure model and its rendering through `plotters`.
//!
//! A [`Figure`] is a grid of subplot slots under a title band. Slots are
//! filled with fully resolved [`Subplot`]s (ranges, ticks and styles already
//! decided), so drawing is a straight mapping onto the backend.

use core::ops::Range;

use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::Shift;
use plotters::prelude::{
    ChartBuilder, Circle, Color as _, Cross, DrawingArea, DrawingBackend, EmptyElement, IntoFont,
    PathElement, RGBColor, Rectangle, SeriesLabelPosition, TextStyle, TriangleMarker, BLACK, WHITE,
};
use plotters::series::{DashedLineSeries, LineSeries as PlotLine};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use super::axis::{format_tick, resolve_step, tick_step, AxisRange};
use super::error::{ChartError, Result};
use super::layout::{to_pixels, DPI, TITLE_BAND};
use super::options::PlotOptions;
use super::series::{key_time, AxisKind, LineSeries, LineStyle, Marker};

/// Format of time x axis labels.
pub const TIME_LABEL_FORMAT: &str = "%m-%d %H:%M UTC";

/// Half-width used to widen a time axis covering a single instant.
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Linear `f64` axis whose key points are a fixed list of tick positions.
///
/// The left and right y axes are built from the same list, so their ticks
/// line up exactly.
#[derive(Clone, Debug, PartialEq)]
pub struct TickedAxis {
    range: AxisRange,
    ticks: Vec<f64>,
}

impl TickedAxis {
    pub fn new(range: AxisRange, ticks: Vec<f64>) -> Self {
        Self { range, ticks }
    }
}

impl Ranged for TickedAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        let logic_length = (*value - self.range.min) / (self.range.max - self.range.min);
        let actual_length = limit.1 - limit.0;

        if actual_length == 0 {
            return limit.1;
        }
        if logic_length.is_infinite() {
            return if logic_length.is_sign_positive() { limit.1 } else { limit.0 };
        }

        limit.0 + (actual_length as f64 * logic_length + 1e-3).floor() as i32
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        self.ticks.clone()
    }

    fn range(&self) -> Range<f64> {
        self.range.as_range()
    }
}

/// One filled subplot, with every axis decision already made.
#[derive(Clone, Debug, PartialEq)]
pub struct Subplot {
    pub series: Vec<LineSeries>,
    pub x_kind: AxisKind,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    pub y_step: f64,
    pub ylabel: Option<String>,
    pub xlabel: Option<String>,
    /// Format x labels as UTC times
    pub time_labels: bool,
    pub legend: bool,
}

impl Subplot {
    /// Resolve the axes for a set of already-filtered series.
    ///
    /// # Errors
    /// * If there is no series, or no finite sample among them
    /// * If numeric and time x axes are mixed
    pub fn from_series(series: Vec<LineSeries>, options: &PlotOptions) -> Result<Self> {
        let no_data = || ChartError::NoValidSeries {
            ylabel: options.ylabel.clone().unwrap_or_default(),
        };

        let x_kind = series.first().map(|s| s.x.kind()).ok_or_else(no_data)?;
        if series.iter().any(|s| s.x.kind() != x_kind) {
            return Err(ChartError::MixedAxisKinds);
        }

        let y_extent = AxisRange::union(series.iter().filter_map(LineSeries::y_extent))
            .ok_or_else(no_data)?;
        let x_extent = AxisRange::union(series.iter().filter_map(LineSeries::x_extent))
            .ok_or_else(no_data)?;

        let y_range = match options.plot_range {
            Some((min, max)) => AxisRange::new(min, max),
            None => y_extent.padded(),
        }
        .nonsingular();

        let y_step = match options.ystep {
            Some(step) => resolve_step(step, &y_range),
            None => tick_step(&y_range),
        };

        let x_range = match x_kind {
            AxisKind::Numeric => x_extent.padded_by_magnitude().nonsingular(),
            AxisKind::Time => x_extent.nonsingular_by(SECONDS_PER_HOUR),
        };

        debug!(?y_range, y_step, ?x_range, nseries = series.len(), "resolved subplot axes");

        Ok(Self {
            series,
            x_kind,
            x_range,
            y_range,
            y_step,
            ylabel: options.ylabel.clone(),
            xlabel: options.xlabel.clone(),
            time_labels: options.timeseries && x_kind == AxisKind::Time,
            legend: options.legend,
        })
    }

    /// Y tick positions, shared by the left and right axes.
    pub fn y_ticks(&self) -> Vec<f64> {
        self.y_range.ticks(self.y_step)
    }

    /// X tick positions, on a nice step of the x range.
    pub fn x_ticks(&self) -> Vec<f64> {
        self.x_range.ticks(tick_step(&self.x_range))
    }

    fn draw<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<()> {
        let x_ticks = self.x_ticks();
        let y_ticks = self.y_ticks();

        let mut builder = ChartBuilder::on(area);
        builder
            .margin(8)
            .margin_top(if self.legend { 40 } else { 8 })
            .x_label_area_size(if self.xlabel.is_some() { 50 } else { 30 })
            .y_label_area_size(if self.ylabel.is_some() { 70 } else { 50 })
            .right_y_label_area_size(50);

        let mut chart = builder
            .build_cartesian_2d(
                TickedAxis::new(self.x_range, x_ticks.clone()),
                TickedAxis::new(self.y_range, y_ticks.clone()),
            )
            .map_err(ChartError::render)?
            .set_secondary_coord(
                TickedAxis::new(self.x_range, x_ticks.clone()),
                TickedAxis::new(self.y_range, y_ticks.clone()),
            );

        let step = self.y_step;
        let y_fmt = move |y: &f64| format_tick(*y, step);
        let time_labels = self.time_labels;
        let x_fmt = move |x: &f64| {
            if time_labels {
                format_time(*x)
            } else {
                format_number(*x)
            }
        };

        // Grid lines are drawn dashed below, so the mesh only carries labels
        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh()
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt);
        if let Some(label) = &self.ylabel {
            mesh.y_desc(label.as_str());
        }
        if let Some(label) = &self.xlabel {
            mesh.x_desc(label.as_str());
        }
        mesh.draw().map_err(ChartError::render)?;

        // Right-hand axis mirrors the left one
        chart
            .configure_secondary_axes()
            .y_label_formatter(&y_fmt)
            .draw()
            .map_err(ChartError::render)?;

        let grid = BLACK.mix(0.35).stroke_width(1);
        let (x0, x1) = (self.x_range.min, self.x_range.max);
        let (y0, y1) = (self.y_range.min, self.y_range.max);
        for &y in &y_ticks {
            chart
                .draw_series(DashedLineSeries::new([(x0, y), (x1, y)], 4, 4, grid))
                .map_err(ChartError::render)?;
        }
        for &x in &x_ticks {
            chart
                .draw_series(DashedLineSeries::new([(x, y0), (x, y1)], 4, 4, grid))
                .map_err(ChartError::render)?;
        }

        for line in &self.series {
            let color: RGBColor = line.color.into();
            let stroke = color.stroke_width(2);
            let filled = color.filled();

            for segment in line.segments() {
                match line.linestyle {
                    LineStyle::Solid => {
                        chart
                            .draw_series(PlotLine::new(segment, stroke))
                            .map_err(ChartError::render)?;
                    }
                    LineStyle::Dashed => {
                        chart
                            .draw_series(DashedLineSeries::new(segment, 8, 4, stroke))
                            .map_err(ChartError::render)?;
                    }
                    LineStyle::Dotted => {
                        chart
                            .draw_series(DashedLineSeries::new(segment, 2, 3, stroke))
                            .map_err(ChartError::render)?;
                    }
                    // Plotters has no mixed dash pattern; long dashes with wide gaps read closest
                    LineStyle::DashDot => {
                        chart
                            .draw_series(DashedLineSeries::new(segment, 10, 6, stroke))
                            .map_err(ChartError::render)?;
                    }
                    LineStyle::None => {}
                }
            }

            let points = line.points();
            match line.marker {
                Marker::None => {}
                Marker::Point => {
                    chart
                        .draw_series(points.iter().map(|&p| Circle::new(p, 2, filled)))
                        .map_err(ChartError::render)?;
                }
                Marker::Circle => {
                    chart
                        .draw_series(points.iter().map(|&p| Circle::new(p, 4, filled)))
                        .map_err(ChartError::render)?;
                }
                Marker::Cross => {
                    chart
                        .draw_series(points.iter().map(|&p| Cross::new(p, 4, stroke)))
                        .map_err(ChartError::render)?;
                }
                Marker::Plus => {
                    chart
                        .draw_series(points.iter().map(|&p| {
                            EmptyElement::at(p)
                                + PathElement::new(vec![(-4, 0), (4, 0)], stroke)
                                + PathElement::new(vec![(0, -4), (0, 4)], stroke)
                        }))
                        .map_err(ChartError::render)?;
                }
                Marker::Square => {
                    chart
                        .draw_series(points.iter().map(|&p| {
                            EmptyElement::at(p) + Rectangle::new([(-3, -3), (3, 3)], filled)
                        }))
                        .map_err(ChartError::render)?;
                }
                Marker::Triangle => {
                    chart
                        .draw_series(points.iter().map(|&p| TriangleMarker::new(p, 5, filled)))
                        .map_err(ChartError::render)?;
                }
            }

            if self.legend {
                // Empty series, only here to carry the legend entry
                chart
                    .draw_series(std::iter::empty::<PathElement<(f64, f64)>>())
                    .map_err(ChartError::render)?
                    .label(line.label.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], stroke));
            }
        }

        if self.legend {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperMiddle)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .map_err(ChartError::render)?;
        }

        Ok(())
    }
}

/// A grid of subplot slots under a shared title and timestamp.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    grid: (usize, usize),
    size: (f64, f64),
    slots: Vec<Option<Subplot>>,
    space_between: f64,
    title: String,
    timestamp: String,
}

impl Figure {
    /// Empty figure with `rows * cols` slots, sized in inches.
    pub fn new((rows, cols): (usize, usize), size: (f64, f64)) -> Self {
        Self {
            grid: (rows, cols),
            size,
            slots: vec![None; rows * cols],
            space_between: 0.0,
            title: String::new(),
            timestamp: String::new(),
        }
    }

    pub fn grid_dims(&self) -> (usize, usize) {
        self.grid
    }

    /// Size in inches.
    pub fn size(&self) -> (f64, f64) {
        self.size
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        to_pixels(self.size)
    }

    pub fn space_between(&self) -> f64 {
        self.space_between
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// All slots in fill order; `None` for slots not yet filled.
    pub fn slots(&self) -> &[Option<Subplot>] {
        &self.slots
    }

    pub fn subplot(&self, index: usize) -> Option<&Subplot> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub(crate) fn place(&mut self, index: usize, subplot: Subplot) -> Result<()> {
        let total = self.slots.len();
        match self.slots.get_mut(index) {
            Some(slot @ None) => {
                *slot = Some(subplot);
                Ok(())
            }
            _ => Err(ChartError::SubplotsExhausted { total }),
        }
    }

    /// Set the gap between neighboring subplots, as a fraction of a subplot.
    pub(crate) fn adjust(&mut self, space_between: f64) {
        self.space_between = space_between;
    }

    pub(crate) fn suptitle(&mut self, title: &str, timestamp: &str) {
        self.title = title.to_owned();
        self.timestamp = timestamp.to_owned();
    }

    /// Draw the figure onto a backend's drawing area.
    pub fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        root.fill(&WHITE).map_err(ChartError::render)?;

        let (_, height) = root.dim_in_pixel();
        let band = ((TITLE_BAND * DPI) as u32).min(height);
        let (header, body) = root.split_vertically(band);
        self.draw_header(&header)?;

        match self.slots.as_slice() {
            [] => {}
            // With one subplot the whole body is the axes; there is no grid to index
            [only] => {
                if let Some(subplot) = only {
                    subplot.draw(&body)?;
                }
            }
            slots => {
                let areas = body.split_evenly(self.grid);
                for (area, slot) in areas.iter().zip(slots) {
                    if let Some(subplot) = slot {
                        subplot.draw(&self.spaced(area))?;
                    }
                }
            }
        }

        Ok(())
    }

    fn draw_header<DB: DrawingBackend>(&self, header: &DrawingArea<DB, Shift>) -> Result<()> {
        let (width, height) = header.dim_in_pixel();
        let centered = Pos::new(HPos::Center, VPos::Center);
        let cx = (width / 2) as i32;

        if !self.title.is_empty() {
            let style = TextStyle::from(("sans-serif", 24).into_font()).pos(centered);
            header
                .draw_text(&self.title, &style, (cx, (height as f64 * 0.4) as i32))
                .map_err(ChartError::render)?;
        }
        if !self.timestamp.is_empty() {
            let style = TextStyle::from(("sans-serif", 14).into_font()).pos(centered);
            header
                .draw_text(&self.timestamp, &style, (cx, (height as f64 * 0.75) as i32))
                .map_err(ChartError::render)?;
        }
        Ok(())
    }

    /// Shrink a grid cell so that neighboring plot areas are separated by
    /// `space_between` times their own extent.
    fn spaced<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> DrawingArea<DB, Shift> {
        let (width, height) = area.dim_in_pixel();
        let (rows, cols) = self.grid;
        let frac = (self.space_between / (2.0 * (1.0 + self.space_between))).max(0.0);
        let vpad = if rows > 1 { (height as f64 * frac) as u32 } else { 0 };
        let hpad = if cols > 1 { (width as f64 * frac) as u32 } else { 0 };
        area.margin(vpad, vpad, hpad, hpad)
    }
}

fn format_time(key: f64) -> String {
    key_time(key)
        .map(|t| t.format(TIME_LABEL_FORMAT).to_string())
        .unwrap_or_default()
}

fn format_number(x: f64) -> String {
    let rounded = (x * 1000.0).round() / 1000.0;
    format!("{rounded}")
}
