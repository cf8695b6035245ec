//! CLI integration tests against a snapshot-backed configuration.

mod support;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use support::fixture::Workspace;

fn trustgrade() -> Command {
    cargo_bin_cmd!("trustgrade")
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}):\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

#[test]
fn test_help_lists_commands() {
    trustgrade()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("score"))
        .stdout(predicate::str::contains("assets"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn score_json_prints_the_result() {
    let workspace = Workspace::reference();
    let output = trustgrade()
        .args(["--json", "score", "tbtc-mint", "--config"])
        .arg(&workspace.config)
        .output()
        .expect("run trustgrade");

    assert!(output.status.success(), "{output:?}");
    let result = stdout_json(&output);
    assert_eq!(result["asset_id"], "tbtc-mint");
    assert_eq!(result["symbol"], "tBTC");
    assert_eq!(result["total_score"], 98);
    assert_eq!(result["grade"], "A");
    assert_eq!(result["label"], "Excellent");
    assert_eq!(result["breakdown"]["trading_activity"], 15);
    assert_eq!(result["degraded"], Value::Array(Vec::new()));
}

#[test]
fn missing_snapshot_values_degrade_without_failing() {
    let workspace = Workspace::with_snapshot("[[asset]]\nid = \"tbtc-mint\"\n");
    let output = trustgrade()
        .args(["--json", "score", "tbtc-mint", "--config"])
        .arg(&workspace.config)
        .output()
        .expect("run trustgrade");

    assert!(output.status.success(), "{output:?}");
    let result = stdout_json(&output);
    assert_eq!(result["breakdown"]["liquidity_depth"], 0);
    assert_eq!(result["breakdown"]["peg_stability"], 5);
    assert_eq!(
        result["degraded"],
        serde_json::json!(["liquidity", "holders", "trading", "peg"])
    );
    assert_eq!(result["total_score"], 38);
}

#[test]
fn score_all_returns_every_asset() {
    let workspace = Workspace::reference();
    let output = trustgrade()
        .args(["--json", "score", "--all", "--config"])
        .arg(&workspace.config)
        .output()
        .expect("run trustgrade");

    assert!(output.status.success(), "{output:?}");
    let body = stdout_json(&output);
    let ids: Vec<&str> = body["results"]
        .as_array()
        .expect("results array")
        .iter()
        .filter_map(|r| r["asset_id"].as_str())
        .collect();
    assert_eq!(ids, vec!["tbtc-mint", "wbtc-mint"]);
}

#[test]
fn human_output_shows_grade_and_breakdown() {
    let workspace = Workspace::reference();
    trustgrade()
        .args(["--color", "never", "score", "tbtc-mint", "--config"])
        .arg(&workspace.config)
        .assert()
        .success()
        .stdout(predicate::str::contains("98/100"))
        .stdout(predicate::str::contains("A Excellent"))
        .stdout(predicate::str::contains("liquidity"))
        .stdout(predicate::str::contains("degraded").not());
}

#[test]
fn unknown_asset_exits_nonzero() {
    let workspace = Workspace::reference();
    trustgrade()
        .args(["score", "nope-mint", "--config"])
        .arg(&workspace.config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no asset profile registered for nope-mint"));
}

#[test]
fn assets_lists_registered_profiles() {
    let workspace = Workspace::reference();
    let output = trustgrade()
        .args(["--json", "assets", "--config"])
        .arg(&workspace.config)
        .output()
        .expect("run trustgrade");

    assert!(output.status.success(), "{output:?}");
    let body = stdout_json(&output);
    let assets = body["assets"].as_array().expect("assets array");
    assert_eq!(assets.len(), 2);
    assert_eq!(assets[0]["id"], "tbtc-mint");
    assert_eq!(assets[1]["custody"], "centralized");
}

#[test]
fn config_validate_accepts_reference_config() {
    let workspace = Workspace::reference();
    trustgrade()
        .args(["config", "validate", "--config"])
        .arg(&workspace.config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn cli_returns_nonzero_on_config_error() {
    let workspace = Workspace::reference();
    let path = workspace.write_config(
        "bad.toml",
        "[scoring]\nvolume_window_days = 3\n\n[provider]\ntype = \"snapshot\"\npath = \"x.toml\"\n",
    );

    let output = trustgrade()
        .args(["config", "validate", "--config"])
        .arg(&path)
        .output()
        .expect("run trustgrade");

    assert!(!output.status.success(), "Expected nonzero exit code");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid value for volume_window_days"),
        "Expected error message about invalid config.\nstderr: {stderr}"
    );
}

#[test]
fn missing_config_file_exits_nonzero() {
    trustgrade()
        .args(["assets", "--config", "/nonexistent/trustgrade.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn demo_snapshot_scores_every_asset() {
    let output = trustgrade()
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["--json", "--config", "demos/trustgrade.toml", "score", "--all"])
        .output()
        .expect("run trustgrade");

    assert!(output.status.success(), "{output:?}");
    let body = stdout_json(&output);
    let results = body["results"].as_array().expect("results array");
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["total_score"], 98);
}
