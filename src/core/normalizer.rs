use tracing::trace;

use crate::core::{IntervalRecord, SeriesSet};
use crate::error::{ChartError, ChartResult};

/// Decodes the host's encoded interval collection.
///
/// Blank input is an empty collection. Anything that is not a JSON array of
/// interval objects is a [`ChartError::DataFormat`].
pub fn decode_intervals(payload: &str) -> ChartResult<Vec<IntervalRecord>> {
    if payload.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(payload).map_err(|e| ChartError::DataFormat(e.to_string()))
}

/// Splits records into the aligned timestamp axis and four metric series.
///
/// Input order is preserved and values pass through unvalidated.
#[must_use]
pub fn normalize(records: &[IntervalRecord]) -> SeriesSet {
    let mut series = SeriesSet::with_capacity(records.len());
    for record in records {
        series.push(record);
    }
    trace!(count = series.len(), "normalized interval records");
    series
}

pub fn normalize_payload(payload: &str) -> ChartResult<SeriesSet> {
    decode_intervals(payload).map(|records| normalize(&records))
}
