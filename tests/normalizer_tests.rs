use chrono::{TimeZone, Utc};
use oee_chart::ChartError;
use oee_chart::core::{SeriesKind, decode_intervals, normalize, normalize_payload};
use serde_json::json;

#[test]
fn empty_collection_yields_empty_series() {
    let series = normalize_payload("[]").expect("empty is valid");
    assert!(series.is_empty());
    for kind in SeriesKind::ALL {
        assert!(series.series(kind).is_empty());
    }
    assert!(normalize_payload("  ").expect("blank is empty").is_empty());
}

#[test]
fn input_order_is_preserved_without_sorting() {
    let payload = json!([
        {"timestamp": "2024-03-02T00:00:00Z", "oee": 2.0, "availability": 2.0, "performance": 2.0, "quality": 2.0},
        {"timestamp": "2024-03-01T00:00:00Z", "oee": 1.0, "availability": 1.0, "performance": 1.0, "quality": 1.0},
        {"timestamp": "2024-03-03T00:00:00Z", "oee": 3.0, "availability": 3.0, "performance": 3.0, "quality": 3.0}
    ])
    .to_string();
    let series = normalize_payload(&payload).expect("decode");

    let days: Vec<u32> = series
        .timestamps()
        .iter()
        .map(|t| chrono::Datelike::day(t))
        .collect();
    assert_eq!(days, vec![2, 1, 3]);
    assert_eq!(series.series(SeriesKind::Oee), &[Some(2.0), Some(1.0), Some(3.0)]);
}

#[test]
fn out_of_range_and_missing_values_pass_through() {
    let payload = json!([
        {"timestamp": "2024-03-01T00:00:00Z", "oee": 140.0, "availability": -5.0, "performance": null}
    ])
    .to_string();
    let series = normalize_payload(&payload).expect("decode");

    assert_eq!(series.series(SeriesKind::Oee), &[Some(140.0)]);
    assert_eq!(series.series(SeriesKind::Availability), &[Some(-5.0)]);
    assert_eq!(series.series(SeriesKind::Performance), &[None]);
    assert_eq!(series.series(SeriesKind::Quality), &[None]);
}

#[test]
fn timestamps_accept_iso_and_epoch_forms() {
    let payload = json!([
        {"timestamp": "2024-03-01T12:00:00"},
        {"timestamp": "2024-03-01T13:00:00+01:00"},
        {"timestamp": 1709294400000_i64},
        {"timestamp": "1709294400000"}
    ])
    .to_string();
    let records = decode_intervals(&payload).expect("decode");
    let expected = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    assert!(records.iter().all(|record| record.timestamp == expected));
}

#[test]
fn extra_record_fields_are_ignored() {
    let payload = json!([
        {"timestamp": "2024-03-01T00:00:00Z", "oee": 50.0, "machine_id": 7, "shift": "A"}
    ])
    .to_string();
    let records = decode_intervals(&payload).expect("decode");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].oee, Some(50.0));
}

#[test]
fn malformed_payloads_are_data_format_errors() {
    for payload in [
        "not-json",
        "{\"timestamp\": \"2024-03-01T00:00:00Z\"}",
        "[1, 2, 3]",
        "[{\"oee\": 50.0}]",
        "[{\"timestamp\": \"someday\"}]",
        "[{\"timestamp\": \"2024-03-01T00:00:00Z\", \"oee\": \"high\"}]",
    ] {
        let err = normalize_payload(payload).expect_err(payload);
        assert!(matches!(err, ChartError::DataFormat(_)), "{payload}: {err}");
    }
}

#[test]
fn normalize_is_pure_over_records() {
    let records = decode_intervals(
        &json!([{"timestamp": "2024-03-01T00:00:00Z", "oee": 1.0}]).to_string(),
    )
    .expect("decode");
    assert_eq!(normalize(&records), normalize(&records));
    assert_eq!(records.len(), 1);
}
