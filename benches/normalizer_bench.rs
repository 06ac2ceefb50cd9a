use chrono::{Duration, TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use oee_chart::api::{OeeChartController, UpdatePayload};
use oee_chart::core::{IntervalRecord, normalize, normalize_payload};
use oee_chart::render::{HeadlessEngine, SurfaceId};
use std::hint::black_box;

fn records(count: i64) -> Vec<IntervalRecord> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let wave = (i % 50) as f64;
            IntervalRecord::new(
                start + Duration::minutes(15 * i),
                55.0 + wave * 0.5,
                85.0 + wave * 0.2,
                75.0 + wave * 0.3,
                95.0 + wave * 0.05,
            )
        })
        .collect()
}

fn bench_normalize_10k(c: &mut Criterion) {
    let records = records(10_000);
    c.bench_function("normalize_10k", |b| {
        b.iter(|| {
            let _ = normalize(black_box(&records));
        })
    });
}

fn bench_decode_and_normalize_10k(c: &mut Criterion) {
    let payload = serde_json::to_string(&records(10_000)).expect("serialize records");
    c.bench_function("decode_and_normalize_10k", |b| {
        b.iter(|| {
            let _ = normalize_payload(black_box(&payload)).expect("decode");
        })
    });
}

fn bench_controller_refresh_1k(c: &mut Criterion) {
    let payload = UpdatePayload::new(
        serde_json::to_string(&records(1_000)).expect("serialize records"),
        "line",
    );
    let mut controller = OeeChartController::with_default_options(HeadlessEngine::new());
    controller
        .mount(&SurfaceId::new("bench"), &payload)
        .expect("mount");

    c.bench_function("controller_refresh_1k", |b| {
        b.iter(|| {
            let _ = controller.update(black_box(&payload)).expect("update");
        })
    });
}

criterion_group!(
    benches,
    bench_normalize_10k,
    bench_decode_and_normalize_10k,
    bench_controller_refresh_1k
);
criterion_main!(benches);
