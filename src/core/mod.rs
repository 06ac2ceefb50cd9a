pub mod normalizer;
pub mod primitives;
pub mod time_scale;
pub mod types;

pub use normalizer::{decode_intervals, normalize, normalize_payload};
pub use primitives::{datetime_to_unix_seconds, parse_timestamp, timestamp_from_unix_millis};
pub use time_scale::{
    DAY_UNIT_MIN_SPAN_DAYS, HOUR_UNIT_MIN_SPAN_DAYS, TimeUnit, resolve_time_unit,
    select_time_unit, span_days,
};
pub use types::{ChartKind, IntervalRecord, SeriesKind, SeriesSet};
