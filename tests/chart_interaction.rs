use chrono::{DateTime, Duration, TimeDelta, Timelike, Utc};
use userchart::window::{MIN_HALF_WIDTH, zoom, zoom_half_width};
use userchart::{ChartState, Dataset, DateRange, Row, nearest_to, x_axis_date_values};

fn embedded() -> Dataset {
    Dataset::load_embedded().unwrap()
}

#[test]
fn embedded_range_yields_six_fortnightly_ticks() {
    let data = embedded();
    let total = data.total_range().unwrap();
    let ticks = x_axis_date_values(6, Some(&total), &Utc);

    assert_eq!(ticks.len(), 6);
    assert_eq!(ticks[0].to_rfc3339(), "2024-10-15T12:00:00+00:00");
    for pair in ticks.windows(2) {
        assert_eq!(pair[1] - pair[0], Duration::days(14));
    }
    assert!(ticks.iter().all(|t| t.hour() == 12));
    assert!(ticks.last().unwrap().date_naive() <= total.end().date_naive());
}

#[test]
fn zoom_always_stays_inside_the_dataset() {
    let data = embedded();
    let total = data.total_range().unwrap();
    let bases = [
        total,
        DateRange::new(total.start(), total.start() + TimeDelta::days(5)).unwrap(),
        DateRange::new(total.end() - TimeDelta::days(9), total.end()).unwrap(),
    ];
    for base in &bases {
        for mag in [0.05, 0.5, 1.0, 2.0, 7.5, 100.0] {
            for step in 0..=20 {
                let f = step as f64 / 20.0;
                let out = zoom(f, mag, base, &total);
                assert!(total.encloses(&out), "base={base:?} mag={mag} f={f}");
            }
        }
    }
}

#[test]
fn unit_magnification_gives_overshoot_or_minimum() {
    let total = embedded().total_range().unwrap();
    let wide = DateRange::new(total.start(), total.start() + TimeDelta::days(20)).unwrap();
    assert_eq!(zoom_half_width(&wide, 1.0), TimeDelta::days(12));
    let narrow = DateRange::new(total.start(), total.start() + TimeDelta::days(2)).unwrap();
    assert_eq!(zoom_half_width(&narrow, 1.0), MIN_HALF_WIDTH);
}

#[test]
fn nearest_tie_goes_to_earlier_row() {
    let base = DateTime::from_timestamp(1_729_000_000, 0).unwrap();
    let day = |n| base + TimeDelta::days(n);
    let rows = [Row::new(day(1), 5, 1), Row::new(day(3), 6, 1), Row::new(day(5), 7, 1)];
    assert_eq!(nearest_to(&rows, day(4)).unwrap().sample_date, day(3));
    assert!(nearest_to(&[], day(4)).is_none());
}

#[test]
fn gesture_end_clears_selection() {
    let data = embedded();
    let mut state = ChartState::for_dataset(&data).unwrap();
    state.begin_drag();
    let picked = *state.drag_to(&data, data.rows()[30].sample_date).unwrap();
    assert_eq!(picked, data.rows()[30]);
    assert_eq!(state.selected_row(&data), Some(&data.rows()[30]));
    state.end_drag();
    assert_eq!(state.selected_row(&data), None);
}

#[test]
fn pinch_sequence_does_not_compound() {
    let data = embedded();
    let mut state = ChartState::for_dataset(&data).unwrap();
    state.begin_zoom();
    for m in [1.1, 1.3, 1.6, 2.0] {
        state.update_zoom(0.25, m);
    }
    let after_gesture = state.window();
    state.end_zoom();

    let total = data.total_range().unwrap();
    assert_eq!(after_gesture, zoom(0.25, 2.0, &total, &total));
    assert!(data.rows_in(&after_gesture).len() < data.len());
}
