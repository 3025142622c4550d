extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

#[test]
fn cobweb_requires_a_lambda() {
    Command::cargo_bin("feigenbaum")
        .unwrap()
        .arg("cobweb")
        .assert()
        .failure()
        .stderr(predicate::str::contains("LAMBDA"));
}

#[test]
fn cobweb_rejects_a_non_numeric_lambda() {
    Command::cargo_bin("feigenbaum")
        .unwrap()
        .args(&["cobweb", "chaos"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not parse"));
}

#[test]
fn a_short_run_writes_well_formed_frames() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("feigenbaum")
        .unwrap()
        .args(&["cobweb", "3.5", "--frames", "2", "-o"])
        .arg(dir.path())
        .assert()
        .success();

    let frame = fs::read(dir.path().join("frame_0000.ppm")).unwrap();
    assert!(frame.starts_with(b"P6\n800 800\n255\n"));
    assert_eq!(frame.len(), "P6\n800 800\n255\n".len() + 800 * 800 * 3);
    assert!(dir.path().join("frame_0001.ppm").exists());
    assert!(!dir.path().join("frame_0002.ppm").exists());
}

#[test]
fn a_missing_output_directory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let gone = dir.path().join("not").join("there");
    Command::cargo_bin("feigenbaum")
        .unwrap()
        .args(&["sweep", "--frames", "1", "-o"])
        .arg(&gone)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Render failure"));
}
