//! Per-subplot formatting options.

use chrono::{DateTime, Utc};

/// Formatting and data-window options for one call to
/// [`MultiLineSubplotter::add_plot`](super::MultiLineSubplotter::add_plot).
///
/// Anything left unset is worked out from the data.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotOptions {
    /// Label for the shared y axis of every line in the subplot
    pub ylabel: Option<String>,
    pub xlabel: Option<String>,
    /// Fixed y axis limits, as (min, max)
    pub plot_range: Option<(f64, f64)>,
    /// Fixed interval between y ticks
    pub ystep: Option<f64>,
    /// Label a time x axis with month, day and UTC time of day
    pub timeseries: bool,
    /// Show a legend above the plot area
    pub legend: bool,
    /// Only keep samples between the ones nearest to these times
    pub time_bound: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            ylabel: None,
            xlabel: None,
            plot_range: None,
            ystep: None,
            timeseries: true,
            legend: false,
            time_bound: None,
        }
    }
}

impl PlotOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ylabel(mut self, ylabel: impl Into<String>) -> Self {
        self.ylabel = Some(ylabel.into());
        self
    }

    pub fn xlabel(mut self, xlabel: impl Into<String>) -> Self {
        self.xlabel = Some(xlabel.into());
        self
    }

    pub fn plot_range(mut self, min: f64, max: f64) -> Self {
        self.plot_range = Some((min, max));
        self
    }

    pub fn ystep(mut self, ystep: f64) -> Self {
        self.ystep = Some(ystep);
        self
    }

    pub fn timeseries(mut self, timeseries: bool) -> Self {
        self.timeseries = timeseries;
        self
    }

    pub fn legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }

    pub fn time_bound(mut self, lower: DateTime<Utc>, upper: DateTime<Utc>) -> Self {
        self.time_bound = Some((lower, upper));
        self
    }
}
