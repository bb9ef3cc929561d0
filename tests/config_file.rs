use std::fs;
use tempfile::tempdir;
use userchart::ChartConfig;
use userchart::viz::LegendMode;

#[test]
fn config_loads_from_json_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chart.json");
    fs::write(
        &path,
        r#"{ "title": "Weekly", "width": 640, "tick_count": 4, "legend": "Inside", "locale": "de" }"#,
    )
    .unwrap();

    let cfg = ChartConfig::load(&path).unwrap();
    assert_eq!(cfg.title, "Weekly");
    assert_eq!(cfg.width, 640);
    assert_eq!(cfg.height, ChartConfig::default().height);
    assert_eq!(cfg.tick_count, 4);
    assert_eq!(cfg.legend, LegendMode::Inside);
    assert_eq!(cfg.locale, "de");
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = tempdir().unwrap();
    let err = ChartConfig::load(dir.path().join("nope.json")).unwrap_err();
    assert!(format!("{err:#}").contains("nope.json"));
}

#[test]
fn config_round_trips_through_serde_json() {
    let cfg = ChartConfig::default();
    let text = serde_json::to_string(&cfg).unwrap();
    assert_eq!(ChartConfig::from_json_str(&text).unwrap(), cfg);
}
