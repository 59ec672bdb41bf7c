use std::fs;
use std::path::Path;
use std::process::Output;

use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::tempdir;

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout is not UTF-8")
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).expect("stderr is not UTF-8")
}

fn run_preset(output_dir: &Path, overwrite: bool) -> Output {
    let mut command = cargo_bin_cmd!("epigrid");
    command
        .args(["--preset", "COVID-19"])
        .arg("--output-dir")
        .arg(output_dir);
    if overwrite {
        command.arg("--overwrite");
    }
    command.output().expect("failed to run epigrid")
}

#[test]
fn runs_a_configured_outbreak_and_writes_a_report() {
    let temp_dir = tempdir().unwrap();
    let output = cargo_bin_cmd!("epigrid")
        .args(["--config", "tests/data/small_outbreak.json"])
        .args(["--random-seed", "3"])
        .arg("--output-dir")
        .arg(temp_dir.path())
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("days simulated: 20"));

    let report = fs::read_to_string(temp_dir.path().join("statistics.csv")).unwrap();
    let mut lines = report.lines();
    assert_eq!(
        lines.next(),
        Some("day,susceptible,infected,contagious,safe,dead")
    );
    assert_eq!(lines.count(), 20);
}

#[test]
fn refuses_to_overwrite_a_report() {
    let temp_dir = tempdir().unwrap();
    assert!(run_preset(temp_dir.path(), false).status.success());

    let second = run_preset(temp_dir.path(), false);
    assert!(!second.status.success());
    assert!(stderr(&second).contains("file already exists"));

    assert!(run_preset(temp_dir.path(), true).status.success());
}

#[test]
fn rejects_an_invalid_config() {
    let output = cargo_bin_cmd!("epigrid")
        .args(["--config", "tests/data/invalid_rates.json"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid configuration: infectionRate"));
}

#[test]
fn rejects_an_unknown_preset() {
    let output = cargo_bin_cmd!("epigrid")
        .args(["--preset", "Common Cold"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("no preset named"));
}

#[test]
fn logs_to_stderr_when_asked() {
    let output = cargo_bin_cmd!("epigrid")
        .args(["--log-level", "epigrid::simulation=info"])
        .args(["--seed-infections", "3"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(stderr(&output).contains("simulation finished after 50 days"));
    assert!(!stdout(&output).contains("simulation finished"));
}
