use serde::{Deserialize, Serialize};

use crate::core::{ChartKind, SeriesKind, TimeUnit};
use crate::error::{ChartError, ChartResult};
use crate::interaction::InteractionOptions;
use crate::render::{Color, series_styles};

/// Initial options object handed to the engine at construction.
///
/// This type is serializable so hosts can override parts of the chart setup
/// from JSON. Omitted fields keep the OEE dashboard defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    #[serde(default)]
    pub kind: ChartKind,
    #[serde(default = "default_true")]
    pub responsive: bool,
    #[serde(default)]
    pub maintain_aspect_ratio: bool,
    #[serde(default)]
    pub interaction: InteractionOptions,
    #[serde(default)]
    pub tooltip: InteractionOptions,
    #[serde(default)]
    pub legend: LegendOptions,
    #[serde(default)]
    pub x_axis: TimeAxisOptions,
    #[serde(default)]
    pub y_axis: PercentAxisOptions,
    #[serde(default = "default_datasets")]
    pub datasets: Vec<DatasetOptions>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            kind: ChartKind::Line,
            responsive: true,
            maintain_aspect_ratio: false,
            interaction: InteractionOptions::default(),
            tooltip: InteractionOptions::default(),
            legend: LegendOptions::default(),
            x_axis: TimeAxisOptions::default(),
            y_axis: PercentAxisOptions::default(),
            datasets: default_datasets(),
        }
    }
}

impl ChartOptions {
    /// Parses and validates a (possibly partial) JSON options object.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let options: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart options: {e}")))?;
        options.validate()?;
        Ok(options)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart options: {e}"))
        })
    }

    #[must_use]
    pub fn dataset(&self, series: SeriesKind) -> Option<&DatasetOptions> {
        self.datasets.iter().find(|dataset| dataset.series == series)
    }

    pub fn validate(&self) -> ChartResult<()> {
        let order: Vec<SeriesKind> = self.datasets.iter().map(|d| d.series).collect();
        if order != SeriesKind::ALL {
            return Err(ChartError::InvalidData(
                "datasets must list oee, availability, performance, quality in order".to_owned(),
            ));
        }
        for dataset in &self.datasets {
            dataset.validate()?;
        }
        let max = self.y_axis.max;
        if !max.is_finite() || max <= 0.0 {
            return Err(ChartError::InvalidData(
                "y-axis max must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendOptions {
    #[serde(default = "default_true")]
    pub display: bool,
    #[serde(default)]
    pub position: LegendPosition,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            display: true,
            position: LegendPosition::Top,
        }
    }
}

/// Temporal x-axis. `unit` is the initial granularity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeAxisOptions {
    #[serde(default)]
    pub unit: TimeUnit,
    #[serde(default = "default_time_title")]
    pub title: String,
}

impl Default for TimeAxisOptions {
    fn default() -> Self {
        Self {
            unit: TimeUnit::Hour,
            title: default_time_title(),
        }
    }
}

/// Fixed percentage y-axis, independent of the data's own range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentAxisOptions {
    #[serde(default = "default_true")]
    pub begin_at_zero: bool,
    #[serde(default = "default_percent_max")]
    pub max: f64,
    #[serde(default = "default_percent_title")]
    pub title: String,
}

impl Default for PercentAxisOptions {
    fn default() -> Self {
        Self {
            begin_at_zero: true,
            max: default_percent_max(),
            title: default_percent_title(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetOptions {
    pub series: SeriesKind,
    pub label: String,
    pub border_color: Color,
    pub background_color: Color,
    pub border_width: f64,
    pub tension: f64,
    pub fill: bool,
}

impl DatasetOptions {
    fn validate(&self) -> ChartResult<()> {
        self.border_color.validate()?;
        self.background_color.validate()?;
        if !self.border_width.is_finite() || self.border_width <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "dataset `{}` border width must be finite and > 0",
                self.label
            )));
        }
        if !self.tension.is_finite() || !(0.0..=1.0).contains(&self.tension) {
            return Err(ChartError::InvalidData(format!(
                "dataset `{}` tension must be finite and in [0, 1]",
                self.label
            )));
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_time_title() -> String {
    "Time".to_owned()
}

fn default_percent_title() -> String {
    "Percentage".to_owned()
}

fn default_percent_max() -> f64 {
    100.0
}

fn default_datasets() -> Vec<DatasetOptions> {
    series_styles()
        .iter()
        .map(|style| DatasetOptions {
            series: style.series,
            label: style.label.to_owned(),
            border_color: style.border_color,
            background_color: style.background_color,
            border_width: style.border_width,
            tension: style.tension,
            fill: style.fill,
        })
        .collect()
}
