use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("slidechart").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("slidechart"))
        .stdout(predicate::str::contains("--data"));
}

#[test]
fn cli_lists_schemes() {
    let mut cmd = Command::cargo_bin("slidechart").unwrap();
    cmd.arg("--list-schemes");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("gold_blue"))
        .stdout(predicate::str::contains("#4A90E2"));
}

#[test]
fn cli_writes_svg_and_layout_json() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("waterfall.svg");
    let json = dir.path().join("waterfall.json");
    let mut cmd = Command::cargo_bin("slidechart").unwrap();
    cmd.args(["-t", "waterfall", "-d", "Base:100,Growth:+35,Total:200", "-c", "green"])
        .arg("-o")
        .arg(&out)
        .arg("--layout-json")
        .arg(&json)
        .args(["--dpi", "72"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Chart saved:"))
        .stdout(predicate::str::contains("waterfall.svg"));
    assert!(std::fs::metadata(&out).unwrap().len() > 0);

    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(v["figure"]["kind"], "waterfall");
    assert_eq!(v["figure"]["geometry"]["steps"][2]["span"]["top"], 200.0);
}

#[test]
fn cli_comparison_with_labels() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("cmp.svg");
    let mut cmd = Command::cargo_bin("slidechart").unwrap();
    cmd.args([
        "--type",
        "comparison",
        "--data",
        "A:10,B:20",
        "--compare",
        "A:12,B:18",
        "--labels",
        "2023,2024",
        "--dpi",
        "72",
    ])
    .arg("--output")
    .arg(&out);
    cmd.assert().success();
    let body = std::fs::read_to_string(&out).unwrap();
    assert!(body.contains("2024"));
}

#[test]
fn cli_rejects_malformed_record() {
    let mut cmd = Command::cargo_bin("slidechart").unwrap();
    cmd.args(["-d", "A:10,B", "-o", "never.svg"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("malformed"));
}

#[test]
fn cli_rejects_unknown_scheme() {
    let mut cmd = Command::cargo_bin("slidechart").unwrap();
    cmd.args(["-d", "A:10", "-c", "purple", "-o", "never.svg"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("purple"));
}

#[test]
fn cli_rejects_unknown_kind() {
    let mut cmd = Command::cargo_bin("slidechart").unwrap();
    cmd.args(["-t", "sparkline", "-d", "A:10"]);
    cmd.assert().failure();
}

#[test]
fn cli_requires_data() {
    let mut cmd = Command::cargo_bin("slidechart").unwrap();
    cmd.args(["-t", "bar"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--data"));
}
