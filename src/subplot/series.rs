//! Line series descriptors and their display attributes.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use plotters::style::RGBColor;

use super::axis::AxisRange;
use super::error::{ChartError, Result};
use crate::utils::nearest_index;

/// Whether an x axis holds plain numbers or UTC timestamps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisKind {
    Numeric,
    Time,
}

/// The x values of a series.
#[derive(Clone, Debug, PartialEq)]
pub enum XValues {
    Numeric(Vec<f64>),
    Time(Vec<DateTime<Utc>>),
}

impl XValues {
    pub fn len(&self) -> usize {
        match self {
            XValues::Numeric(x) => x.len(),
            XValues::Time(x) => x.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> AxisKind {
        match self {
            XValues::Numeric(_) => AxisKind::Numeric,
            XValues::Time(_) => AxisKind::Time,
        }
    }

    /// Positions along the plotted axis. Timestamps map to seconds since the
    /// Unix epoch, with millisecond resolution.
    pub fn keys(&self) -> Vec<f64> {
        match self {
            XValues::Numeric(x) => x.clone(),
            XValues::Time(x) => x.iter().copied().map(time_key).collect(),
        }
    }

    fn clear(&mut self) {
        match self {
            XValues::Numeric(x) => x.clear(),
            XValues::Time(x) => x.clear(),
        }
    }

    fn keep(&mut self, lower: usize, upper: usize) {
        match self {
            XValues::Numeric(x) => {
                x.truncate(upper + 1);
                x.drain(..lower);
            }
            XValues::Time(x) => {
                x.truncate(upper + 1);
                x.drain(..lower);
            }
        }
    }
}

impl From<Vec<f64>> for XValues {
    fn from(x: Vec<f64>) -> Self {
        XValues::Numeric(x)
    }
}

impl From<Vec<DateTime<Utc>>> for XValues {
    fn from(x: Vec<DateTime<Utc>>) -> Self {
        XValues::Time(x)
    }
}

/// Seconds since the Unix epoch, as plotted.
pub fn time_key(t: DateTime<Utc>) -> f64 {
    t.timestamp_millis() as f64 / 1000.0
}

/// Inverse of [`time_key`], to the nearest millisecond.
pub fn key_time(key: f64) -> Option<DateTime<Utc>> {
    if !key.is_finite() {
        return None;
    }
    let millis = (key * 1000.0).round() as i64;
    let nanos = (millis.rem_euclid(1000) * 1_000_000) as u32;
    DateTime::from_timestamp(millis.div_euclid(1000), nanos)
}

/// Line color, parsed from matplotlib-style color strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Default for Color {
    fn default() -> Self {
        Color(31, 119, 180) // tab:blue
    }
}

impl From<Color> for RGBColor {
    fn from(c: Color) -> Self {
        RGBColor(c.0, c.1, c.2)
    }
}

impl FromStr for Color {
    type Err = ChartError;

    /// Accepts single-letter codes (`"r"`, `"k"`, ...), the `tab:` palette,
    /// a handful of plain names, and `#rrggbb` hex strings.
    fn from_str(s: &str) -> Result<Self> {
        let c = match s.trim() {
            "b" | "blue" => Color(0, 0, 255),
            "g" | "green" => Color(0, 128, 0),
            "r" | "red" => Color(255, 0, 0),
            "c" | "cyan" => Color(0, 191, 191),
            "m" | "magenta" => Color(191, 0, 191),
            "y" | "yellow" => Color(191, 191, 0),
            "k" | "black" => Color(0, 0, 0),
            "w" | "white" => Color(255, 255, 255),
            "grey" | "gray" => Color(128, 128, 128),
            "orange" => Color(255, 165, 0),
            "tab:blue" => Color(31, 119, 180),
            "tab:orange" => Color(255, 127, 14),
            "tab:green" => Color(44, 160, 44),
            "tab:red" => Color(214, 39, 40),
            "tab:purple" => Color(148, 103, 189),
            "tab:brown" => Color(140, 86, 75),
            "tab:pink" => Color(227, 119, 194),
            "tab:gray" | "tab:grey" => Color(127, 127, 127),
            "tab:olive" => Color(188, 189, 34),
            "tab:cyan" => Color(23, 190, 207),
            hex if hex.len() == 7 && hex.is_ascii() && hex.starts_with('#') => {
                let channel = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 2], 16)
                        .map_err(|_| ChartError::InvalidStyle(format!("color {s:?}")))
                };
                Color(channel(1)?, channel(3)?, channel(5)?)
            }
            _ => return Err(ChartError::InvalidStyle(format!("color {s:?}"))),
        };
        Ok(c)
    }
}

/// Point marker drawn at every valid sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Marker {
    #[default]
    None,
    Point,
    Circle,
    Cross,
    Plus,
    Square,
    Triangle,
}

impl FromStr for Marker {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        let m = match s.trim() {
            "" | "None" | "none" => Marker::None,
            "." => Marker::Point,
            "o" => Marker::Circle,
            "x" => Marker::Cross,
            "+" => Marker::Plus,
            "s" => Marker::Square,
            "^" => Marker::Triangle,
            _ => return Err(ChartError::InvalidStyle(format!("marker {s:?}"))),
        };
        Ok(m)
    }
}

/// Stroke pattern of the connecting line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
    /// Markers only
    None,
}

impl FromStr for LineStyle {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        // Whitespace-only means no line in matplotlib, so don't trim here
        let l = match s {
            "-" | "solid" => LineStyle::Solid,
            "--" | "dashed" => LineStyle::Dashed,
            ":" | "dotted" => LineStyle::Dotted,
            "-." | "dashdot" => LineStyle::DashDot,
            "" | " " | "None" | "none" => LineStyle::None,
            _ => return Err(ChartError::InvalidStyle(format!("linestyle {s:?}"))),
        };
        Ok(l)
    }
}

/// A named sequence of (x, y) samples with display attributes.
///
/// Missing y values are NaN; the drawn line breaks at them.
#[derive(Clone, Debug, PartialEq)]
pub struct LineSeries {
    pub label: String,
    pub x: XValues,
    pub y: Vec<f64>,
    pub color: Color,
    pub marker: Marker,
    pub linestyle: LineStyle,
}

impl LineSeries {
    pub fn new(label: impl Into<String>, x: impl Into<XValues>, y: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            x: x.into(),
            y,
            color: Color::default(),
            marker: Marker::default(),
            linestyle: LineStyle::default(),
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    pub fn linestyle(mut self, linestyle: LineStyle) -> Self {
        self.linestyle = linestyle;
        self
    }

    /// Set all display attributes from matplotlib-style strings,
    /// e.g. `("r", "--", "o")`.
    ///
    /// # Errors
    /// * If any of the strings is not recognized
    pub fn style(mut self, color: &str, linestyle: &str, marker: &str) -> Result<Self> {
        self.color = color.parse()?;
        self.linestyle = linestyle.parse()?;
        self.marker = marker.parse()?;
        Ok(self)
    }

    /// True if there is no finite y value to plot.
    pub fn is_all_invalid(&self) -> bool {
        self.y.iter().all(|v| !v.is_finite())
    }

    pub(crate) fn check_lengths(&self) -> Result<()> {
        if self.x.len() != self.y.len() {
            return Err(ChartError::LengthMismatch {
                label: self.label.clone(),
                x: self.x.len(),
                y: self.y.len(),
            });
        }
        Ok(())
    }

    /// Keep only the samples between the ones nearest to `lower` and `upper`,
    /// inclusive of both.
    ///
    /// The bounds do not need to match a sample exactly. If the nearest upper
    /// sample comes before the nearest lower one, nothing is kept.
    pub fn truncate_to_window(&mut self, lower: DateTime<Utc>, upper: DateTime<Utc>) -> Result<()> {
        if self.x.kind() != AxisKind::Time {
            return Err(ChartError::TimeBoundOnNumericAxis {
                label: self.label.clone(),
            });
        }

        let keys = self.x.keys();
        let (lo, hi) = match (
            nearest_index(&keys, time_key(lower)),
            nearest_index(&keys, time_key(upper)),
        ) {
            (Some(lo), Some(hi)) if lo <= hi => (lo, hi),
            (Some(_), Some(_)) => {
                self.x.clear();
                self.y.clear();
                return Ok(());
            }
            // Empty series, nothing to cut
            _ => return Ok(()),
        };

        self.x.keep(lo, hi);
        self.y.truncate(hi + 1);
        self.y.drain(..lo);
        Ok(())
    }

    /// Smallest and largest non-NaN y value.
    pub fn y_extent(&self) -> Option<AxisRange> {
        extent(self.y.iter().copied())
    }

    /// Smallest and largest x position.
    pub fn x_extent(&self) -> Option<AxisRange> {
        extent(self.x.keys().into_iter())
    }

    /// All plottable (x, y) positions.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.x
            .keys()
            .into_iter()
            .zip(self.y.iter().copied())
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect()
    }

    /// Split the series at missing values into continuous runs.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();

        for (x, y) in self.x.keys().into_iter().zip(self.y.iter().copied()) {
            if x.is_finite() && y.is_finite() {
                current.push((x, y));
            } else if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        segments
    }
}

fn extent<I: Iterator<Item = f64>>(vals: I) -> Option<AxisRange> {
    vals.filter(|v| v.is_finite())
        .minmax_by(|a, b| a.total_cmp(b))
        .into_option()
        .map(|(lo, hi)| AxisRange::new(lo, hi))
}
