// End-to-end tests for the `matchday` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn core_fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../matchday-core/tests/fixtures")
        .join(name)
}

fn matchday(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_matchday"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("binary should run")
}

#[test]
fn parse_prints_report() {
    let input = core_fixture("season.txt");
    let output = matchday(&["parse", input.to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let expected = std::fs::read_to_string(core_fixture("season-report.txt")).unwrap();
    assert_eq!(String::from_utf8(output.stdout).unwrap(), expected);
}

#[test]
fn parse_json_output() {
    let input = core_fixture("season.txt");
    let output = matchday(&["parse", input.to_str().unwrap(), "--format", "json", "--top", "1"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("\"team\": \"Aptos FC\""));
    assert!(stdout.contains("\"day\": 3"));
}

#[test]
fn missing_file_is_reported() {
    let output = matchday(&["parse", "definitely/not/here.txt"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "stderr: {stderr}");
}

#[test]
fn directory_is_rejected() {
    let dir = core_fixture("");
    let output = matchday(&["parse", dir.to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("given path is a directory"), "stderr: {stderr}");
}

#[test]
fn bad_line_names_its_number() {
    let dir = std::env::temp_dir().join("matchday_cli_bad_line");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    let input = dir.join("matches.txt");
    std::fs::write(&input, "A 1, B 0\nC 1 D 0\n").unwrap();

    let output = matchday(&["parse", input.to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error parsing line 1 of match data"), "stderr: {stderr}");
    let _ = std::fs::remove_dir_all(&dir);
}
