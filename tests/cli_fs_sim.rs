use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "meshsim-rs-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn run_fs_sim(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_fs_sim"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("run fs_sim")
}

#[test]
fn fs_sim_prints_json_summary() {
    let output = run_fs_sim(&[
        "--repeats", "2", "--seed", "17", "--num-packets", "50", "--quiet", "--json",
    ]);
    assert!(
        output.status.success(),
        "fs_sim failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let v: Value = serde_json::from_slice(&output.stdout).expect("parse summary json");
    assert_eq!(v["base_seed"], 17);
    assert_eq!(v["fs_enabled"], true);
    let runs = v["runs"].as_array().expect("runs must be an array");
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0]["stats"]["packet_counter"], 50);
    assert!(v["avg_delivery_ratio"].as_f64().is_some());
}

#[test]
fn fs_sim_reads_config_file_and_writes_trace() {
    let dir = unique_temp_dir("fs-sim-trace");
    let config = dir.join("config.json");
    fs::write(
        &config,
        r#"{
    "num_packets": 20,
    "repeats": 1,
    "fs_enabled": false,
    "topology": { "kind": "grid", "num_routers": 9 }
}"#,
    )
    .expect("write config");
    let trace = dir.join("trace.json");

    let output = run_fs_sim(&[
        "--config",
        config.to_str().unwrap(),
        "--seed",
        "3",
        "--quiet",
        "--trace-json",
        trace.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "fs_sim failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("routers=9"));
    assert!(stdout.contains("Avg. PDR:"));

    let raw = fs::read_to_string(&trace).expect("read trace.json");
    let v: Value = serde_json::from_str(&raw).expect("parse trace.json");
    let arr = v.as_array().expect("trace.json must be a JSON array");
    assert_eq!(arr[0]["kind"], "new");
    assert!(arr.iter().all(|e| e["kind"] != "schedule"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn fs_sim_fails_on_bad_topology() {
    let output = run_fs_sim(&["--gateways", "99", "--quiet", "--seed", "1"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("error"));
}
