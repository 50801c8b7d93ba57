use std::time::Duration;

use timeline_axis::api::{TimelineEngine, TimelineEngineConfig, tick_interval};
use timeline_axis::core::{
    CalendarConfig, CalendarTimeZone, FixedClock, MAX_LENGTH_MS, TimeWindow, WeekStart,
    ZonedCalendar,
};
use timeline_axis::render::NullRenderer;
use timeline_axis::TimelineError;

// 2024-03-15 12:00:00 UTC
const T0: i64 = 1_710_504_000_000;

fn utc_config(span_ms: f64) -> TimelineEngineConfig {
    let window =
        TimeWindow::new(T0 as f64 - span_ms / 2.0, T0 as f64 + span_ms / 2.0).expect("window");
    TimelineEngineConfig::new(1_000, window).with_calendar(CalendarConfig {
        timezone: CalendarTimeZone::Utc,
        week_start: WeekStart::Monday,
    })
}

fn build_engine(span_ms: f64) -> TimelineEngine<NullRenderer> {
    TimelineEngine::new(NullRenderer::default(), utc_config(span_ms)).expect("engine init")
}

#[test]
fn idle_frame_lists_labeled_seconds() {
    let mut engine = build_engine(10_000.0);
    let frame = engine.build_frame(0).expect("frame");

    assert_eq!(frame.primary.level_name, "seconds");
    assert!(frame.secondary.is_none());
    assert!(frame.crossfade.is_none());
    assert!(frame.cursor.is_none());

    let timestamps: Vec<i64> = frame.primary.marks.iter().map(|m| m.timestamp).collect();
    let expected: Vec<i64> = (-4..=4).map(|i| T0 + i * 1_000).collect();
    assert_eq!(timestamps, expected);

    let labels: Vec<&str> = frame
        .primary
        .marks
        .iter()
        .filter_map(|m| m.label.as_deref())
        .collect();
    assert_eq!(labels, vec!["56", "57", "58", "59", "00", "01", "02", "03", "04"]);

    let center = frame.primary.marks.iter().find(|m| m.timestamp == T0).expect("center");
    assert!((center.x - 500.0).abs() <= 1e-6);
}

#[test]
fn secondary_layer_is_unlabeled() {
    let mut engine = build_engine(120_000.0);
    let frame = engine.build_frame(0).expect("frame");
    assert_eq!(frame.primary.level_name, "minutes");
    let secondary = frame.secondary.expect("secondary");
    assert_eq!(secondary.level_name, "seconds");
    assert_eq!(secondary.marks.len(), 119);
    assert!(secondary.marks.iter().all(|m| m.label.is_none()));
}

#[test]
fn zoom_across_threshold_crossfades_levels() {
    let mut engine = build_engine(10_000.0);
    let outcome = engine.on_wheel(500.0, 3.0, 0).expect("wheel");
    assert!(outcome.is_started());

    let mid = engine.tick(100);
    assert!(mid.needs_redraw);

    let settled = engine.tick(300);
    assert!(settled.needs_redraw);
    assert_eq!(settled.levels.current.primary, 1);

    let frame = engine.build_frame(300).expect("frame");
    assert_eq!(frame.primary.level_name, "minutes");
    assert_eq!(frame.secondary.as_ref().map(|l| l.level_name), Some("seconds"));

    let crossfade_seen = mid.levels.crossfade.is_some() || settled.levels.crossfade.is_some();
    assert!(crossfade_seen);

    // Crossfade lasts 150 ms from whichever tick noticed the change.
    let late = engine.tick(1_000);
    assert!(late.levels.crossfade.is_none());
    let idle = engine.tick(1_100);
    assert!(!idle.needs_redraw);
}

#[test]
fn crossfade_frame_carries_previous_levels_and_phase() {
    let mut engine = build_engine(10_000.0);
    engine.on_wheel(500.0, 3.0, 0).expect("wheel");

    // First observation of the new span happens here.
    let frame = engine.build_frame(400).expect("frame");
    let crossfade = frame.crossfade.expect("crossfade");
    assert_eq!(crossfade.phase, 0.0);
    assert_eq!(crossfade.primary.level_name, "seconds");
    assert!(crossfade.secondary.is_none());

    let later = engine.build_frame(475).expect("frame");
    let phase = later.crossfade.expect("crossfade").phase;
    assert!(phase > 0.5 && phase < 1.0);

    assert!(engine.build_frame(550).expect("frame").crossfade.is_none());
}

#[test]
fn cursor_frame_reports_status_and_pointer_labels() {
    let mut engine = build_engine(10_000.0);
    engine.on_pointer_move(500.0);
    let frame = engine.build_frame(0).expect("frame");
    let cursor = frame.cursor.expect("cursor");
    assert!((cursor.timestamp - T0 as f64).abs() <= 1e-6);
    assert_eq!(cursor.status_label, "Mar 15 12:00");
    assert_eq!(cursor.pointer_label, "AD 2024-03-15 12:00:00");

    engine.on_pointer_leave();
    assert!(engine.build_frame(0).expect("frame").cursor.is_none());
}

#[test]
fn render_hands_validated_frames_to_renderer() {
    let mut engine = build_engine(10_000.0);
    engine.render(0).expect("render");
    engine.on_wheel(200.0, 3.0, 10).expect("wheel");
    engine.render(400).expect("render");

    let renderer = engine.into_renderer();
    assert_eq!(renderer.frames_rendered, 2);
    assert_eq!(renderer.last_crossfade_phase, Some(0.0));
    assert!(renderer.last_mark_count > 0);
}

#[test]
fn rejected_wheel_does_not_move_window() {
    let mut engine = build_engine(150.0);
    let before = engine.window(0);
    let outcome = engine.on_wheel(500.0, -2.0, 0).expect("wheel");
    assert!(!outcome.is_started());
    assert_eq!(engine.window(50), before);
    assert!(!engine.tick(50).needs_redraw);
}

#[test]
fn non_finite_wheel_is_an_error() {
    let mut engine = build_engine(10_000.0);
    let err = engine.on_wheel(500.0, f64::NAN, 0).expect_err("nan amount");
    assert!(matches!(err, TimelineError::InvalidData(_)));
}

#[test]
fn resize_keeps_window_and_rescales_pixels() {
    let mut engine = build_engine(10_000.0);
    engine.on_resize(2_000).expect("resize");
    assert!((engine.pixel_at_timestamp(T0 as f64, 0) - 1_000.0).abs() <= 1e-6);
    assert!(matches!(
        engine.on_resize(0),
        Err(TimelineError::InvalidPixelWidth { width: 0 })
    ));
}

#[test]
fn tick_with_clock_matches_explicit_now() {
    let mut engine = build_engine(10_000.0);
    engine.on_wheel(500.0, 1.0, 0).expect("wheel");
    let mut clock = FixedClock::new(120);
    let via_clock = engine.tick_with(&clock).window;
    assert_eq!(via_clock, engine.window(120));
    clock.advance(1_000);
    assert_eq!(engine.tick_with(&clock).window, engine.navigator().target_window());
}

#[test]
fn injected_calendar_controls_labels() {
    let calendar = ZonedCalendar::fixed_offset_minutes(60).expect("offset");
    let mut engine =
        TimelineEngine::with_calendar(NullRenderer::default(), utc_config(10_000.0), Box::new(calendar))
            .expect("engine");
    engine.on_pointer_move(500.0);
    let cursor = engine.build_frame(0).expect("frame").cursor.expect("cursor");
    assert_eq!(cursor.pointer_label, "AD 2024-03-15 13:00:00");
}

#[test]
fn frame_json_exposes_layers() {
    let mut engine = build_engine(120_000.0);
    let json = engine.frame_json_pretty(0).expect("json");
    assert!(json.contains("\"level_name\": \"minutes\""));
    assert!(json.contains("\"secondary\""));
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = utc_config(10_000.0);
    config.pixel_width = 0;
    assert!(TimelineEngine::new(NullRenderer::default(), config).is_err());

    let mut config = utc_config(10_000.0);
    config.level_transition_duration_ms = 0;
    assert!(TimelineEngine::new(NullRenderer::default(), config).is_err());

    assert!(TimelineEngine::new(NullRenderer::default(), utc_config(1e15)).is_err());
    assert!(TimelineEngine::new(NullRenderer::default(), utc_config(10.0)).is_err());
}

#[test]
fn widest_accepted_window_still_builds_a_frame() {
    let mut engine = build_engine(MAX_LENGTH_MS);
    let frame = engine.build_frame(0).expect("frame");
    assert_eq!(frame.primary.level_name, "decades");
    let secondary = frame.secondary.expect("secondary layer");
    assert_eq!(secondary.level_name, "years");
    assert!((99..=101).contains(&secondary.marks.len()));
}

#[test]
fn tick_interval_follows_refresh_rate() {
    assert_eq!(tick_interval(60).expect("60 Hz"), Duration::from_millis(16));
    assert_eq!(tick_interval(240).expect("240 Hz"), Duration::from_millis(4));
    assert_eq!(tick_interval(5_000).expect("5 kHz"), Duration::from_millis(1));
    assert!(tick_interval(0).is_err());
}
