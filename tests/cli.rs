use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const FIXTURE: &str = "tests/fixtures/iau2015";

fn scratch_copy() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for entry in fs::read_dir(FIXTURE).unwrap() {
        let entry = entry.unwrap();
        fs::copy(entry.path(), dir.path().join(entry.file_name())).unwrap();
    }
    dir
}

fn planetary_wkt(input_dir: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_planetary-wkt"))
        .arg("--input-dir")
        .arg(input_dir)
        .args(extra)
        .env_remove("PLANETARY_WKT_INPUT_DIR")
        .env_remove("PLANETARY_WKT_OUTPUT")
        .env("RUST_LOG", "warn")
        .output()
        .unwrap()
}

#[test]
fn successful_run_prints_summary_json() {
    let dir = scratch_copy();
    let output = planetary_wkt(dir.path(), &["--summary"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["objects_written"], 9);
    assert!(dir.path().join("wkt.txt").exists());
}

#[test]
fn malformed_longitude_direction_exits_non_zero() {
    let dir = scratch_copy();
    let path = dir.path().join("planetodetic.csv");
    let table = fs::read_to_string(&path).unwrap();
    fs::write(&path, table.replace("Mars 2000,49900,Ellipsoidal,East", "Mars 2000,49900,Ellipsoidal,north")).unwrap();

    let output = planetary_wkt(dir.path(), &[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("north"));
    assert!(!dir.path().join("wkt.txt").exists());
}

#[test]
fn missing_input_directory_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let output = planetary_wkt(&dir.path().join("absent"), &[]);
    assert!(!output.status.success());
}
