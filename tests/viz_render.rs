use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;
use userchart::viz::{self, LegendMode};
use userchart::{ChartConfig, ChartState, Dataset};

fn setup() -> (Dataset, ChartState) {
    let data = Dataset::load_embedded().unwrap();
    let state = ChartState::for_dataset(&data).unwrap();
    (data, state)
}

fn write_and_check<F: Fn(&PathBuf)>(maker: F, name: &str) -> String {
    let dir = tempdir().unwrap();
    let path: PathBuf = dir.path().join(name);
    maker(&path);
    let meta = fs::metadata(&path).expect("file created");
    assert!(meta.len() > 0, "{name} has content");
    if name.ends_with(".svg") {
        fs::read_to_string(&path).unwrap()
    } else {
        String::new()
    }
}

#[test]
fn full_range_svg_contains_title_and_bars() {
    let (data, state) = setup();
    let cfg = ChartConfig {
        title: "Signups Test".into(),
        width: 800,
        height: 600,
        ..ChartConfig::default()
    };
    let svg = write_and_check(
        |p| viz::plot_usage(&data, &state, p, &cfg, &Utc).unwrap(),
        "full.svg",
    );
    assert!(svg.contains("Signups Test"));
    assert!(svg.contains("<rect"));
}

#[test]
fn svg_labels_the_sampled_ticks() {
    let (data, state) = setup();
    let svg = write_and_check(
        |p| viz::plot_usage(&data, &state, p, &ChartConfig::default(), &Utc).unwrap(),
        "ticks.svg",
    );
    for label in ["Oct 15", "Oct 29", "Dec 24"] {
        assert!(svg.contains(label), "missing tick label {label}");
    }
}

#[test]
fn legend_modes_produce_files() {
    let (data, state) = setup();
    for (i, mode) in [LegendMode::Inside, LegendMode::Bottom].into_iter().enumerate() {
        let cfg = ChartConfig {
            legend: mode,
            ..ChartConfig::default()
        };
        write_and_check(
            |p| viz::plot_usage(&data, &state, p, &cfg, &Utc).unwrap(),
            &format!("legend{i}.svg"),
        );
    }
}

#[test]
fn zoomed_and_selected_png_is_written() {
    let (data, mut state) = setup();
    state.update_zoom(0.3, 3.0);
    state.end_zoom();
    state.begin_drag();
    let at = state.window().start();
    assert!(state.drag_to(&data, at).is_some());
    write_and_check(
        |p| viz::plot_usage(&data, &state, p, &ChartConfig::default(), &Utc).unwrap(),
        "zoomed.png",
    );
}

#[test]
fn png_with_inside_legend_draws_text() {
    let (data, state) = setup();
    let cfg = ChartConfig {
        legend: LegendMode::Inside,
        width: 480,
        height: 360,
        ..ChartConfig::default()
    };
    let dir = tempdir().unwrap();
    let out = dir.path().join("inside.png");
    viz::plot_usage(&data, &state, &out, &cfg, &Utc).unwrap();
    let bytes = fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"\x89PNG"));
}

#[test]
fn empty_dataset_is_error() {
    let (data, state) = setup();
    let empty = Dataset::default();
    let dir = tempdir().unwrap();
    let out = dir.path().join("empty.svg");
    assert!(viz::plot_usage(&empty, &state, &out, &ChartConfig::default(), &Utc).is_err());
    assert!(!data.is_empty());
}
