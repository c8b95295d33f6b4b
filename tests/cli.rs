use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn touchtrack_cmd() -> Command {
    Command::cargo_bin("touchtrack").expect("binary exists")
}

const TAP_TRACE: &str = r#"{
  "surfaces": [{ "id": 1, "left": 0, "top": 0, "width": 500, "height": 500 }],
  "target": 1,
  "steps": [
    { "at_ms": 0, "action": "dispatch", "surface": 1, "channel": "mouse-down",
      "event": { "type": "mouse", "client_x": 100, "client_y": 100 } },
    { "at_ms": 50, "action": "dispatch", "channel": "mouse-up",
      "event": { "type": "mouse", "client_x": 102, "client_y": 101 } }
  ]
}"#;

#[test]
fn touchtrack_help_prints_about() {
    touchtrack_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Unified mouse and touch pointer tracking for canvas surfaces",
        ));
}

#[test]
fn no_flags_prints_usage_with_config_defaults() {
    let temp = TempDir::new().unwrap();
    touchtrack_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .env("HOME", temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("delay   <= 300 ms"));
}

#[test]
fn replay_prints_one_line_per_event() {
    let temp = TempDir::new().unwrap();
    let trace = temp.path().join("tap.json");
    std::fs::write(&trace, TAP_TRACE).unwrap();

    let assert = touchtrack_cmd()
        .arg("--config")
        .arg(temp.path().join("missing.toml"))
        .arg("--replay")
        .arg(&trace)
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let kinds: Vec<String> = stdout
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            value["kind"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(kinds, ["down", "up", "tap"]);
}

#[test]
fn replay_honours_config_file() {
    let temp = TempDir::new().unwrap();
    let trace = temp.path().join("tap.json");
    let config = temp.path().join("config.toml");
    std::fs::write(&trace, TAP_TRACE).unwrap();
    std::fs::write(&config, "[tracker]\ntap_delay_ms = 20\n").unwrap();

    touchtrack_cmd()
        .arg("--config")
        .arg(&config)
        .arg("--replay")
        .arg(&trace)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\":\"up\""))
        .stdout(predicate::str::contains("\"kind\":\"tap\"").not());
}

#[test]
fn replay_of_invalid_trace_fails() {
    let temp = TempDir::new().unwrap();
    let trace = temp.path().join("broken.json");
    std::fs::write(&trace, "{ \"steps\": 5 }").unwrap();

    touchtrack_cmd()
        .arg("--config")
        .arg(temp.path().join("missing.toml"))
        .arg("--replay")
        .arg(&trace)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse trace"));
}

#[test]
fn init_config_writes_defaults_once() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("touchtrack").join("config.toml");

    touchtrack_cmd()
        .arg("--init-config")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));

    let written = std::fs::read_to_string(&config).unwrap();
    assert!(written.contains("tap_distance_threshold"));

    touchtrack_cmd()
        .arg("--init-config")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn dump_config_schema_lists_tracker_fields() {
    Command::cargo_bin("dump_config_schema")
        .expect("binary exists")
        .assert()
        .success()
        .stdout(predicate::str::contains("tap_delay_ms"));
}
