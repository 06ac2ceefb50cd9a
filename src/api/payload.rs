use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{ChartKind, SeriesSet, normalize_payload};
use crate::error::ChartResult;

pub const INTERVALS_ATTRIBUTE: &str = "intervals";
pub const CHART_TYPE_ATTRIBUTE: &str = "type";

/// Host-supplied attributes read before each refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePayload {
    /// Encoded interval collection (a JSON array).
    #[serde(default)]
    pub intervals: Option<String>,
    #[serde(default, rename = "type")]
    pub chart_type: Option<String>,
}

/// Payload after defaults and recovery were applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPayload {
    pub series: SeriesSet,
    /// `None` when the requested kind is not recognised.
    pub kind: Option<ChartKind>,
    /// Set when the interval collection could not be decoded.
    pub data_format_recovered: bool,
}

impl UpdatePayload {
    #[must_use]
    pub fn new(intervals: impl Into<String>, chart_type: impl Into<String>) -> Self {
        Self {
            intervals: Some(intervals.into()),
            chart_type: Some(chart_type.into()),
        }
    }

    #[must_use]
    pub fn with_intervals(intervals: impl Into<String>) -> Self {
        Self {
            intervals: Some(intervals.into()),
            chart_type: None,
        }
    }

    /// Builds a payload from element data attributes.
    ///
    /// Keys may carry the `data-` prefix. Unknown keys are ignored.
    #[must_use]
    pub fn from_dataset<'a>(attributes: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut payload = Self::default();
        for (key, value) in attributes {
            match key.strip_prefix("data-").unwrap_or(key) {
                INTERVALS_ATTRIBUTE => payload.intervals = Some(value.to_owned()),
                CHART_TYPE_ATTRIBUTE => payload.chart_type = Some(value.to_owned()),
                _ => {}
            }
        }
        payload
    }

    /// Strict decode of the interval collection; absent means empty.
    pub fn series(&self) -> ChartResult<SeriesSet> {
        normalize_payload(self.intervals.as_deref().unwrap_or_default())
    }

    /// Requested chart kind; absent or blank means `line`.
    pub fn requested_kind(&self) -> ChartResult<ChartKind> {
        match self.chart_type.as_deref().map(str::trim) {
            None | Some("") => Ok(ChartKind::Line),
            Some(kind) => kind.parse(),
        }
    }

    /// Applies the boundary policy: undecodable intervals become an empty
    /// collection and an unknown kind is reported as `None`. Each failure is
    /// logged once here.
    #[must_use]
    pub fn resolve(&self) -> ResolvedPayload {
        let (series, data_format_recovered) = match self.series() {
            Ok(series) => (series, false),
            Err(err) => {
                warn!(error = %err, "treating undecodable intervals as empty");
                (SeriesSet::empty(), true)
            }
        };
        let kind = match self.requested_kind() {
            Ok(kind) => Some(kind),
            Err(err) => {
                warn!(error = %err, "keeping current chart kind");
                None
            }
        };
        ResolvedPayload {
            series,
            kind,
            data_format_recovered,
        }
    }
}
