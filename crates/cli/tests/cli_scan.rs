use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn scan_reports_known_keys_in_human_mode() {
    let tmp = tempdir().expect("tempdir");
    fs::write(tmp.path().join("env.yaml"), "env_cfg_path: envs/cartpole.yaml\n")
        .expect("write fixture");

    cargo_bin_cmd!("scan-configs")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 YAML files in total."))
        .stdout(predicate::str::contains("Found environment configuration entries:"))
        .stdout(predicate::str::contains("env_cfg_path: envs/cartpole.yaml"));
}

#[test]
fn scan_emits_hits_as_json() {
    let tmp = tempdir().expect("tempdir");
    fs::write(tmp.path().join("trainer.yaml"), "trainer:\n  env_module: tasks.walker\n")
        .expect("write fixture");

    let output = cargo_bin_cmd!("scan-configs")
        .arg(tmp.path())
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let body: serde_json::Value = serde_json::from_slice(&output).expect("scan json");
    assert_eq!(body.as_array().map(|hits| hits.len()), Some(1));
    assert_eq!(body[0]["key"], "trainer.env_module");
    assert_eq!(body[0]["value"], "tasks.walker");
}

#[test]
fn scan_reports_when_nothing_is_found() {
    let tmp = tempdir().expect("tempdir");
    fs::write(tmp.path().join("other.yaml"), "steps: 1000\n").expect("write fixture");

    cargo_bin_cmd!("scan-configs")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No environment configuration entries found in any YAML files.",
        ));
}

/// A broken YAML file is reported on stderr and does not stop the scan.
#[test]
fn scan_survives_invalid_yaml() {
    let tmp = tempdir().expect("tempdir");
    fs::write(tmp.path().join("broken.yaml"), "foo: [1, 2\n").expect("write broken");
    fs::write(tmp.path().join("good.yaml"), "config_path: a/b.yaml\n").expect("write good");

    cargo_bin_cmd!("scan-configs")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("config_path: a/b.yaml"))
        .stderr(predicate::str::contains("is not a valid YAML file"));
}
