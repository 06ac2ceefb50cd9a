use chrono::{DateTime, Duration, TimeZone, Utc};
use oee_chart::api::{LifecycleState, OeeChartController, SkipReason, UpdateOutcome, UpdatePayload};
use oee_chart::core::{ChartKind, SeriesKind, TimeUnit};
use oee_chart::render::{HeadlessEngine, RedrawMode, SurfaceId};
use serde_json::json;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()
}

fn intervals_spanning(span: Duration, count: i32) -> String {
    let step = if count > 1 { span / (count - 1) } else { Duration::zero() };
    let records: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "timestamp": (start() + step * i).to_rfc3339(),
                "oee": 60.0 + f64::from(i),
                "availability": 90.0,
                "performance": 80.0,
                "quality": 99.0
            })
        })
        .collect();
    serde_json::Value::Array(records).to_string()
}

fn mounted(payload: &UpdatePayload) -> OeeChartController<HeadlessEngine> {
    let mut controller = OeeChartController::with_default_options(HeadlessEngine::new());
    controller
        .mount(&SurfaceId::new("chart"), payload)
        .expect("mount");
    controller
}

#[test]
fn ten_day_span_uses_day_unit() {
    let controller = mounted(&UpdatePayload::new(
        intervals_spanning(Duration::days(10), 11),
        "line",
    ));
    let state = controller.engine().single_state().expect("state");
    assert_eq!(state.time_unit(), TimeUnit::Day);
    assert_eq!(controller.current_time_unit(), Some(TimeUnit::Day));
}

#[test]
fn three_hour_span_uses_minute_unit() {
    let controller = mounted(&UpdatePayload::new(
        intervals_spanning(Duration::hours(3), 4),
        "line",
    ));
    let state = controller.engine().single_state().expect("state");
    assert_eq!(state.time_unit(), TimeUnit::Minute);
}

#[test]
fn single_record_keeps_default_hour_unit() {
    let controller = mounted(&UpdatePayload::new(
        intervals_spanning(Duration::zero(), 1),
        "line",
    ));
    let state = controller.engine().single_state().expect("state");
    assert_eq!(state.time_unit(), TimeUnit::Hour);
    assert_eq!(state.len(), 1);
}

#[test]
fn short_payload_keeps_previously_selected_unit() {
    let mut controller = mounted(&UpdatePayload::new(
        intervals_spanning(Duration::days(20), 5),
        "line",
    ));
    assert_eq!(controller.current_time_unit(), Some(TimeUnit::Day));

    let outcome = controller
        .update(&UpdatePayload::new("[]", "line"))
        .expect("update");
    assert_eq!(outcome.applied().expect("applied").time_unit, TimeUnit::Day);
    let state = controller.engine().single_state().expect("state");
    assert_eq!(state.time_unit(), TimeUnit::Day);
    assert!(state.is_empty());
}

#[test]
fn malformed_payload_keeps_previous_kind_and_data() {
    let mut controller = mounted(&UpdatePayload::new(
        intervals_spanning(Duration::days(3), 4),
        "line",
    ));
    let before = controller.engine().single_state().expect("state").clone();
    let stats_before = controller.engine().stats();

    let outcome = controller
        .update(&UpdatePayload::new("not-json", "bar"))
        .expect("malformed data is recovered");
    let applied = outcome.applied().expect("applied");
    assert!(applied.data_format_recovered);
    assert!(!applied.kind_changed);
    assert_eq!(applied.kind, ChartKind::Line);
    assert_eq!(applied.points, 0);

    assert_eq!(controller.current_kind(), Some(ChartKind::Line));
    assert_eq!(controller.current_time_unit(), Some(TimeUnit::Hour));
    let state = controller.engine().single_state().expect("state");
    assert_eq!(state, &before);
    assert_eq!(state.kind(), ChartKind::Line);
    assert_eq!(state.len(), 4);
    for series in SeriesKind::ALL {
        assert_eq!(state.dataset(series).len(), 4);
    }
    assert_eq!(controller.engine().stats().mutate_calls, stats_before.mutate_calls);
    assert_eq!(controller.lifecycle_state(), LifecycleState::Mounted);

    controller
        .update(&UpdatePayload::new(intervals_spanning(Duration::days(3), 2), "bar"))
        .expect("valid payload applies again");
    assert_eq!(controller.current_kind(), Some(ChartKind::Bar));
    assert_eq!(controller.engine().single_state().expect("state").len(), 2);
}

#[test]
fn kind_switch_mutates_without_reconstruction() {
    let data = intervals_spanning(Duration::days(2), 3);
    let mut controller = mounted(&UpdatePayload::new(data.clone(), "line"));
    assert_eq!(controller.current_kind(), Some(ChartKind::Line));

    let outcome = controller
        .update(&UpdatePayload::new(data, "bar"))
        .expect("update");
    let applied = outcome.applied().expect("applied");
    assert!(applied.kind_changed);
    assert_eq!(applied.kind, ChartKind::Bar);

    let engine = controller.engine();
    assert_eq!(engine.stats().construct_calls, 1);
    assert_eq!(engine.live_charts(), 1);
    assert_eq!(engine.single_state().expect("state").kind(), ChartKind::Bar);
}

#[test]
fn unset_kind_defaults_to_line() {
    let mut controller = mounted(&UpdatePayload::new("[]", "bar"));
    controller
        .update(&UpdatePayload::with_intervals("[]"))
        .expect("update");
    assert_eq!(controller.current_kind(), Some(ChartKind::Line));
}

#[test]
fn unknown_kind_keeps_current_kind() {
    let mut controller = mounted(&UpdatePayload::new("[]", "bar"));
    let outcome = controller
        .update(&UpdatePayload::new("[]", "doughnut"))
        .expect("update");
    assert_eq!(outcome.applied().expect("applied").kind, ChartKind::Bar);
    assert!(!outcome.applied().expect("applied").kind_changed);
}

#[test]
fn repeated_identical_updates_do_not_accumulate() {
    let payload = UpdatePayload::new(intervals_spanning(Duration::hours(6), 7), "line");
    let mut controller = mounted(&payload);
    let once = controller.engine().single_state().expect("state").clone();

    controller.update(&payload).expect("first repeat");
    controller.update(&payload).expect("second repeat");

    let state = controller.engine().single_state().expect("state");
    assert_eq!(state, &once);
    assert_eq!(state.len(), 7);
}

#[test]
fn every_update_redraws_without_animation() {
    let payload = UpdatePayload::new(intervals_spanning(Duration::hours(1), 2), "line");
    let mut controller = mounted(&payload);
    controller.update(&payload).expect("update");

    let handle = controller.handle().expect("handle");
    assert_eq!(controller.engine().redraw_count(handle), 2);
    assert_eq!(
        controller.engine().last_redraw_mode(handle),
        Some(RedrawMode::Immediate)
    );
}

#[test]
fn all_sequences_stay_aligned_across_updates() {
    let mut controller = mounted(&UpdatePayload::new(
        intervals_spanning(Duration::days(9), 10),
        "line",
    ));
    for count in [3, 0, 12, 1] {
        controller
            .update(&UpdatePayload::new(
                intervals_spanning(Duration::hours(5), count),
                "line",
            ))
            .expect("update");
        let state = controller.engine().single_state().expect("state");
        for series in SeriesKind::ALL {
            assert_eq!(state.dataset(series).len(), state.labels().len());
        }
        assert_eq!(state.len(), count as usize);
    }
}

#[test]
fn update_before_mount_is_skipped() {
    let mut controller = OeeChartController::with_default_options(HeadlessEngine::new());
    let outcome = controller
        .update(&UpdatePayload::new("[]", "line"))
        .expect("no failure");
    assert_eq!(outcome, UpdateOutcome::Skipped(SkipReason::NotMounted));
    assert_eq!(controller.engine().stats().mutate_calls, 0);
}

#[test]
fn destroy_is_idempotent_and_terminal() {
    let mut controller = mounted(&UpdatePayload::new("[]", "line"));
    assert!(controller.destroy());
    assert!(!controller.destroy());
    assert_eq!(controller.engine().stats().destroy_calls, 1);

    let outcome = controller
        .update(&UpdatePayload::new("[]", "bar"))
        .expect("no failure");
    assert_eq!(outcome, UpdateOutcome::Skipped(SkipReason::Destroyed));

    let remount = controller
        .mount(&SurfaceId::new("chart"), &UpdatePayload::default())
        .expect("no failure");
    assert_eq!(remount, UpdateOutcome::Skipped(SkipReason::Destroyed));
    assert_eq!(controller.engine().stats().construct_calls, 1);
    assert_eq!(controller.lifecycle_state(), LifecycleState::Destroyed);
}

#[test]
fn destroy_before_mount_is_a_no_op() {
    let mut controller = OeeChartController::with_default_options(HeadlessEngine::new());
    assert!(!controller.destroy());
    assert_eq!(controller.lifecycle_state(), LifecycleState::Unmounted);
    assert_eq!(controller.engine().stats().destroy_calls, 0);
}

#[test]
fn second_mount_does_not_construct_again() {
    let mut controller = mounted(&UpdatePayload::default());
    let outcome = controller
        .mount(&SurfaceId::new("chart"), &UpdatePayload::default())
        .expect("no failure");
    assert_eq!(outcome, UpdateOutcome::Skipped(SkipReason::AlreadyMounted));
    assert_eq!(controller.engine().stats().construct_calls, 1);
}
