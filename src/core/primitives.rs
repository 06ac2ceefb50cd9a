use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::{ChartError, ChartResult};

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a record timestamp.
///
/// Accepted forms: RFC 3339 with offset, naive ISO-8601 date-time (read as
/// UTC), date-only (UTC midnight), and epoch milliseconds as an integer string.
pub fn parse_timestamp(input: &str) -> ChartResult<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    if let Ok(millis) = input.parse::<i64>() {
        return timestamp_from_unix_millis(millis);
    }
    Err(ChartError::DataFormat(format!(
        "timestamp `{input}` is not ISO-8601 or epoch milliseconds"
    )))
}

pub fn timestamp_from_unix_millis(millis: i64) -> ChartResult<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single().ok_or_else(|| {
        ChartError::DataFormat(format!("epoch milliseconds {millis} are out of range"))
    })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Serde adapter accepting the timestamp forms of [`parse_timestamp`] plus
/// JSON numbers (epoch milliseconds). Serializes as RFC 3339.
pub(crate) mod flexible_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Millis(i64),
        FractionalMillis(f64),
        Text(String),
    }

    pub fn serialize<S>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed = match RawTimestamp::deserialize(deserializer)? {
            RawTimestamp::Millis(millis) => super::timestamp_from_unix_millis(millis),
            RawTimestamp::FractionalMillis(millis) if millis.is_finite() => {
                super::timestamp_from_unix_millis(millis.trunc() as i64)
            }
            RawTimestamp::FractionalMillis(_) => {
                return Err(de::Error::custom("timestamp must be finite"));
            }
            RawTimestamp::Text(text) => super::parse_timestamp(&text),
        };
        parsed.map_err(de::Error::custom)
    }
}
