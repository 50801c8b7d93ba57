use proptest::prelude::*;
use timeline_axis::core::{
    MAX_LENGTH_MS, MIN_LENGTH_MS, TimeWindow, TimelineNavigator, ease,
};
use timeline_axis::delimiter::{fixed_interval_timestamps, select_primary_level};

proptest! {
    #[test]
    fn primary_level_is_monotonic_in_span(
        a in 0.0f64..4.0e12,
        b in 0.0f64..4.0e12
    ) {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(select_primary_level(small) <= select_primary_level(large));
    }

    #[test]
    fn ease_is_monotonic_and_bounded(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(ease(low) <= ease(high));
        prop_assert!((0.0..=1.0).contains(&ease(a)));
    }

    #[test]
    fn fixed_interval_candidates_are_aligned_and_in_range(
        from in -10_000_000i64..10_000_000,
        len in 1i64..5_000_000,
        interval in prop::sample::select(vec![1_000i64, 60_000, 300_000, 3_600_000])
    ) {
        let to = from + len;
        let ts = fixed_interval_timestamps("prop", from, to, interval).expect("timestamps");
        prop_assert!(ts.iter().all(|t| *t > from && *t < to));
        prop_assert!(ts.iter().all(|t| t.rem_euclid(interval) == 0));
        prop_assert!(ts.windows(2).all(|pair| pair[1] - pair[0] == interval));
        // Nothing aligned is skipped at either end.
        let first = ts.first().copied().unwrap_or(to);
        prop_assert!(first - interval <= from);
        let last = ts.last().copied().unwrap_or(from);
        prop_assert!(last + interval >= to);
    }

    #[test]
    fn round_trip_within_one_pixel(
        start in -2.0e12f64..2.0e12,
        span in MIN_LENGTH_MS..MAX_LENGTH_MS,
        width in 1u32..4_000,
        fraction in 0.0f64..1.0
    ) {
        let window = TimeWindow::new(start, start + span).expect("window");
        let nav = TimelineNavigator::new(window, width).expect("navigator");
        let t = start + fraction * span;
        let back = nav.timestamp_at_pixel(nav.pixel_at_timestamp(t, 0), 0);
        prop_assert!((back - t).abs() <= span / f64::from(width));
    }

    #[test]
    fn zoom_sequences_respect_length_limits(
        amounts in prop::collection::vec(-3.0f64..3.0, 1..60),
        gaps in prop::collection::vec(0i64..400, 60),
        anchor_x in 0.0f64..1_000.0
    ) {
        let window = TimeWindow::new(1.7e12, 1.7e12 + 3_600_000.0).expect("window");
        let mut nav = TimelineNavigator::new(window, 1_000).expect("navigator");
        let mut now = 0i64;
        for (amount, gap) in amounts.iter().zip(gaps.iter()) {
            nav.zoom(anchor_x, *amount, now).expect("zoom");
            now += gap;
            let length = nav.window_at(now).length();
            prop_assert!(length <= MAX_LENGTH_MS * (1.0 + 1e-9));
            prop_assert!(length >= MIN_LENGTH_MS - 1.0);
        }
    }
}
