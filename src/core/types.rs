use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One time-bucketed OEE measurement as delivered by the host.
///
/// Numeric fields are carried as-is: values outside `0..=100` are not
/// clamped and missing or `null` values become gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalRecord {
    #[serde(with = "crate::core::primitives::flexible_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub oee: Option<f64>,
    #[serde(default)]
    pub availability: Option<f64>,
    #[serde(default)]
    pub performance: Option<f64>,
    #[serde(default)]
    pub quality: Option<f64>,
}

impl IntervalRecord {
    #[must_use]
    pub fn new(
        timestamp: DateTime<Utc>,
        oee: f64,
        availability: f64,
        performance: f64,
        quality: f64,
    ) -> Self {
        Self {
            timestamp,
            oee: Some(oee),
            availability: Some(availability),
            performance: Some(performance),
            quality: Some(quality),
        }
    }

    #[must_use]
    pub fn value(&self, series: SeriesKind) -> Option<f64> {
        match series {
            SeriesKind::Oee => self.oee,
            SeriesKind::Availability => self.availability,
            SeriesKind::Performance => self.performance,
            SeriesKind::Quality => self.quality,
        }
    }
}

/// The four plotted metrics, in dataset order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Oee,
    Availability,
    Performance,
    Quality,
}

impl SeriesKind {
    pub const ALL: [Self; 4] = [
        Self::Oee,
        Self::Availability,
        Self::Performance,
        Self::Quality,
    ];

    /// Position of the series in the chart's dataset list.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Oee => 0,
            Self::Availability => 1,
            Self::Performance => 2,
            Self::Quality => 3,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Oee => "OEE",
            Self::Availability => "Availability",
            Self::Performance => "Performance",
            Self::Quality => "Quality",
        }
    }
}

/// Chart kind requested by the host on each refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
}

impl ChartKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(input: &str) -> ChartResult<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(Self::Line),
            "bar" => Ok(Self::Bar),
            other => Err(ChartError::InvalidData(format!(
                "unsupported chart kind `{other}`"
            ))),
        }
    }
}

/// Chart-ready columns derived from interval records.
///
/// The timestamp axis and the four metric series always share one length and
/// keep the input order. Deserialization rejects misaligned payloads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "SeriesSetColumns")]
pub struct SeriesSet {
    timestamps: Vec<DateTime<Utc>>,
    oee: Vec<Option<f64>>,
    availability: Vec<Option<f64>>,
    performance: Vec<Option<f64>>,
    quality: Vec<Option<f64>>,
}

impl SeriesSet {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            timestamps: Vec::with_capacity(capacity),
            oee: Vec::with_capacity(capacity),
            availability: Vec::with_capacity(capacity),
            performance: Vec::with_capacity(capacity),
            quality: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, record: &IntervalRecord) {
        self.timestamps.push(record.timestamp);
        self.oee.push(record.oee);
        self.availability.push(record.availability);
        self.performance.push(record.performance);
        self.quality.push(record.quality);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    #[must_use]
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    #[must_use]
    pub fn series(&self, kind: SeriesKind) -> &[Option<f64>] {
        match kind {
            SeriesKind::Oee => &self.oee,
            SeriesKind::Availability => &self.availability,
            SeriesKind::Performance => &self.performance,
            SeriesKind::Quality => &self.quality,
        }
    }

    /// First and last timestamps in input order, when at least two points exist.
    #[must_use]
    pub fn time_bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        if self.timestamps.len() < 2 {
            return None;
        }
        Some((*self.timestamps.first()?, *self.timestamps.last()?))
    }
}

#[derive(Deserialize)]
struct SeriesSetColumns {
    timestamps: Vec<DateTime<Utc>>,
    oee: Vec<Option<f64>>,
    availability: Vec<Option<f64>>,
    performance: Vec<Option<f64>>,
    quality: Vec<Option<f64>>,
}

impl TryFrom<SeriesSetColumns> for SeriesSet {
    type Error = ChartError;

    fn try_from(columns: SeriesSetColumns) -> ChartResult<Self> {
        let len = columns.timestamps.len();
        let aligned = [
            columns.oee.len(),
            columns.availability.len(),
            columns.performance.len(),
            columns.quality.len(),
        ]
        .iter()
        .all(|&series_len| series_len == len);
        if !aligned {
            return Err(ChartError::InvalidData(
                "series columns must match the timestamp axis length".to_owned(),
            ));
        }
        Ok(Self {
            timestamps: columns.timestamps,
            oee: columns.oee,
            availability: columns.availability,
            performance: columns.performance,
            quality: columns.quality,
        })
    }
}
