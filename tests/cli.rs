use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("userchart").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("userchart"));
}

#[test]
fn ticks_span_the_dataset() {
    let mut cmd = Command::cargo_bin("userchart").unwrap();
    cmd.args(["--utc", "ticks"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "2024-10-15T12:00:00+00:00");
    assert_eq!(lines[5], "2024-12-24T12:00:00+00:00");
}

#[test]
fn nearest_prints_readout() {
    let mut cmd = Command::cargo_bin("userchart").unwrap();
    cmd.args(["--utc", "nearest", "2024-10-15"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Oct 15, 2024: 613 active, 47 new (660 total)"));
}

#[test]
fn bad_date_is_rejected() {
    let mut cmd = Command::cargo_bin("userchart").unwrap();
    cmd.args(["nearest", "yesterday"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid date"));
}

#[test]
fn inverted_tick_range_fails() {
    let mut cmd = Command::cargo_bin("userchart").unwrap();
    cmd.args(["--utc", "ticks", "--from", "2024-12-01", "--to", "2024-11-01"]);
    cmd.assert().failure();
}

#[test]
fn render_writes_svg() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("chart.svg");
    let mut cmd = Command::cargo_bin("userchart").unwrap();
    cmd.args(["--utc", "render", "--magnification", "2", "--select", "2024-11-20", "--out"])
        .arg(&out);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Wrote chart"));
    assert!(std::fs::metadata(&out).unwrap().len() > 0);
}

#[test]
fn render_writes_png() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("chart.png");
    let mut cmd = Command::cargo_bin("userchart").unwrap();
    cmd.args(["--utc", "render", "--width", "640", "--height", "480", "--out"])
        .arg(&out);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Wrote chart"));
    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"\x89PNG"));
}
