use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "fmusim-rs-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn fmusim(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fmusim"))
        .args(args)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("run fmusim")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "fmusim failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn dq_rows_go_to_stdout_with_decimal_comma() {
    let output = fmusim(&["dq", "1", "0.25"]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 6, "stdout={stdout}");
    assert_eq!(lines[0], "time;x;der(x);k");
    assert_eq!(lines[1], "0;1;-1;1");
    assert_eq!(lines[2], "0,25;0,75;-0,75;1");
    assert!(lines[5].starts_with("1;"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("steps ............ 4"), "stderr={stderr}");
    assert!(stderr.contains("terminated successful"));
}

#[test]
fn results_file_uses_given_separator() {
    let dir = unique_temp_dir("csv");
    let out = dir.join("result.csv");

    let output = fmusim(&["dq", "1", "0.5", "0", ",", out.to_str().unwrap()]);
    assert_success(&output);
    assert!(output.stdout.is_empty());

    let raw = fs::read_to_string(&out).expect("read result.csv");
    assert_eq!(
        raw,
        "time,x,der(x),k\n0,1,-1,1\n0.5,0.5,-0.5,1\n1,0.25,-0.25,1\n"
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("CSV file"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn empty_results_file_disables_output() {
    let output = fmusim(&["van_der_pol", "1", "0.01", "0", ";", ""]);
    assert_success(&output);
    assert!(output.stdout.is_empty());
}

#[test]
fn inc_terminates_on_request_and_writes_summary_json() {
    let dir = unique_temp_dir("summary");
    let summary = dir.join("summary.json");

    let output = fmusim(&[
        "inc",
        "20",
        "0.1",
        "0",
        ";",
        "",
        "--summary-json",
        summary.to_str().unwrap(),
    ]);
    assert_success(&output);

    let raw = fs::read_to_string(&summary).expect("read summary.json");
    let v: Value = serde_json::from_str(&raw).expect("parse summary.json");
    assert_eq!(v["model"].as_str(), Some("inc"));
    assert_eq!(v["termination"]["kind"].as_str(), Some("model_requested"));
    assert_eq!(v["termination"]["at"].as_f64(), Some(12.0));
    assert_eq!(v["stop_time"].as_f64(), Some(12.0));
    assert_eq!(v["stats"]["time_events"].as_u64(), Some(12));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn config_file_supplies_defaults() {
    let dir = unique_temp_dir("config");
    let cfg = dir.join("run.json");
    fs::write(
        &cfg,
        r#"{ "end_time": 0.5, "step_size": 0.25, "output": "disabled" }"#,
    )
    .expect("write config");
    let summary = dir.join("summary.json");

    let output = fmusim(&[
        "dq",
        "--config",
        cfg.to_str().unwrap(),
        "--summary-json",
        summary.to_str().unwrap(),
    ]);
    assert_success(&output);
    assert!(output.stdout.is_empty());

    let v: Value =
        serde_json::from_str(&fs::read_to_string(&summary).expect("read summary")).expect("json");
    assert_eq!(v["stats"]["steps"].as_u64(), Some(2));
    assert_eq!(v["termination"]["kind"].as_str(), Some("end_time_reached"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn logging_reports_state_events() {
    let output = fmusim(&["bouncing_ball", "1", "0.01", "1", ";", ""]);
    assert_success(&output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("state event"), "stderr={stderr}");
}

#[test]
fn list_prints_builtin_models() {
    let output = fmusim(&["--list"]);
    assert_success(&output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["bouncing_ball", "dq", "inc", "values", "van_der_pol"] {
        assert!(stdout.lines().any(|l| l == name), "missing {name}");
    }
}

#[test]
fn unknown_model_fails_with_diagnostic() {
    let output = fmusim(&["not_a_model"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown model"), "stderr={stderr}");
}

#[test]
fn bad_arguments_are_rejected() {
    let output = fmusim(&["dq", "1", "0.1", "0", ";;"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("separator"));

    let output = fmusim(&["dq", "1", "0.1", "2"]);
    assert!(!output.status.success());

    let output = fmusim(&["dq", "1", "0"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("step size must be positive"));
}
