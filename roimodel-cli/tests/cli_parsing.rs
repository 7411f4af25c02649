//! End-to-end tests of the `roimodel` binary.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

fn roimodel(root: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("roimodel").expect("roimodel binary");
    cmd.current_dir(root.path());
    cmd
}

#[test]
fn test_templates_lists_every_department() {
    let temp = tempfile::tempdir().expect("tempdir");

    roimodel(&temp)
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("Template registry 2024.1"))
        .stdout(predicate::str::contains("ticketsPerMonth"))
        .stdout(predicate::str::contains("complianceCost"));
}

#[test]
fn test_templates_json_single_department() {
    let temp = tempfile::tempdir().expect("tempdir");

    let out = roimodel(&temp)
        .args(["templates", "--department", "sales", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let doc: serde_json::Value = serde_json::from_slice(&out).expect("json");
    assert_eq!(doc["templates"].as_array().map(Vec::len), Some(1));
    assert_eq!(doc["templates"][0]["department"], "sales");
}

#[test]
fn test_calc_support_benchmarks() {
    let temp = tempfile::tempdir().expect("tempdir");

    let out = roimodel(&temp)
        .args(["calc", "--department", "support", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let result: serde_json::Value = serde_json::from_slice(&out).expect("json");
    assert_eq!(result["savings"], -35000.0);
    assert_eq!(result["roi"], -70.0);
}

#[test]
fn test_calc_corrected_cost_model() {
    let temp = tempfile::tempdir().expect("tempdir");

    let out = roimodel(&temp)
        .args([
            "calc",
            "--department",
            "support",
            "--cost-model",
            "corrected",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let result: serde_json::Value = serde_json::from_slice(&out).expect("json");
    assert_eq!(result["aiTotalCost"], 50000.0);
}

#[test]
fn test_calc_monthly_cost_entry() {
    let temp = tempfile::tempdir().expect("tempdir");

    let out = roimodel(&temp)
        .args([
            "calc",
            "--department",
            "support",
            "--monthly",
            "humanAnnualCost",
            "--set",
            "humanAnnualCost=6000",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let result: serde_json::Value = serde_json::from_slice(&out).expect("json");
    assert_eq!(result["humanTotalCost"], 72000.0);
}

#[test]
fn test_calc_rejects_field_outside_template() {
    let temp = tempfile::tempdir().expect("tempdir");

    roimodel(&temp)
        .args(["calc", "--department", "support", "--set", "leadsPerMonth=10"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_calc_rejects_unknown_department() {
    let temp = tempfile::tempdir().expect("tempdir");

    roimodel(&temp)
        .args(["calc", "--department", "legal"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown department"));
}

#[test]
fn test_calc_warns_on_zero_inputs() {
    let temp = tempfile::tempdir().expect("tempdir");

    roimodel(&temp)
        .args([
            "calc",
            "--department",
            "hr",
            "--set",
            "aiImplementationCost=0",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("aiImplementationCost"))
        .stdout(predicate::str::contains("roi"));
}

#[test]
fn test_sensitivity_volume_sweep() {
    let temp = tempfile::tempdir().expect("tempdir");

    let out = roimodel(&temp)
        .args([
            "sensitivity",
            "--department",
            "finance",
            "--axis",
            "volume",
            "--from",
            "1000",
            "--to",
            "5000",
            "--steps",
            "3",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let doc: serde_json::Value = serde_json::from_slice(&out).expect("json");
    assert_eq!(doc["field"], "invoicesPerMonth");
    assert_eq!(doc["points"].as_array().map(Vec::len), Some(3));
    assert_eq!(doc["points"][1]["value"], 3000.0);
}

#[test]
fn test_sensitivity_custom_has_no_volume_axis() {
    let temp = tempfile::tempdir().expect("tempdir");

    roimodel(&temp)
        .args([
            "sensitivity",
            "--department",
            "custom",
            "--axis",
            "volume",
            "--from",
            "0",
            "--to",
            "10",
        ])
        .assert()
        .failure();
}

#[test]
fn test_scenario_lifecycle() {
    let temp = tempfile::tempdir().expect("tempdir");

    roimodel(&temp)
        .args([
            "scenario",
            "save",
            "Q1",
            "--department",
            "sales",
            "--set",
            "leadsPerMonth=700",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("saved Q1"));

    assert!(
        temp.path()
            .join(".roimodel")
            .join("scenarios")
            .join("roi-scenario-Q1.json")
            .exists()
    );

    roimodel(&temp)
        .args(["scenario", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Q1").and(predicate::str::contains("sales")));

    let out = roimodel(&temp)
        .args(["scenario", "load", "Q1", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let snapshot: serde_json::Value = serde_json::from_slice(&out).expect("json");
    assert_eq!(snapshot["department"], "sales");
    assert_eq!(snapshot["fields"]["leadsPerMonth"]["value"], 700.0);

    roimodel(&temp)
        .args(["scenario", "compare", "--department", "support"])
        .assert()
        .success()
        .stdout(predicate::str::contains("recalculated as support"));

    roimodel(&temp)
        .args(["scenario", "delete", "Q1"])
        .assert()
        .success();

    roimodel(&temp)
        .args(["scenario", "load", "Q1"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_calc_from_missing_scenario_exits_2() {
    let temp = tempfile::tempdir().expect("tempdir");

    roimodel(&temp)
        .args(["calc", "--scenario", "nope"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_scenario_store_dir_from_config() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(
        temp.path().join("roimodel.toml"),
        "[store]\ndir = \"saved\"\n",
    )
    .expect("write config");

    roimodel(&temp)
        .args(["scenario", "save", "base", "--department", "hr"])
        .assert()
        .success();

    assert!(temp.path().join("saved").join("roi-scenario-base.json").exists());
}

#[test]
fn test_export_writes_requested_formats() {
    let temp = tempfile::tempdir().expect("tempdir");

    roimodel(&temp)
        .args([
            "export",
            "--department",
            "mortgage",
            "--format",
            "csv",
            "--format",
            "email",
            "--out-dir",
            "out",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("mortgage_roi_results.csv"))
        .stdout(predicate::str::contains("mortgage_roi_share.txt"));

    let csv = fs::read_to_string(temp.path().join("out").join("mortgage_roi_results.csv"))
        .expect("csv");
    assert_eq!(csv.lines().count(), 2);
    assert!(!temp.path().join("out").join("mortgage_roi_report.pdf").exists());
}

#[test]
fn test_export_missing_logo_is_skipped_by_default() {
    let temp = tempfile::tempdir().expect("tempdir");

    roimodel(&temp)
        .args([
            "export",
            "--department",
            "support",
            "--format",
            "pdf",
            "--logo",
            "missing.jpg",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("without logo"));

    assert!(
        temp.path()
            .join("artifacts")
            .join("roimodel")
            .join("support_roi_report.pdf")
            .exists()
    );
}

#[test]
fn test_export_missing_logo_fails_when_configured() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(
        temp.path().join("roimodel.toml"),
        "[export]\nlogo = \"missing.jpg\"\non_logo_failure = \"fail\"\n",
    )
    .expect("write config");

    roimodel(&temp)
        .args(["export", "--department", "support", "--format", "pdf"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_export_reports_each_degenerate_input_once() {
    let temp = tempfile::tempdir().expect("tempdir");

    let out = roimodel(&temp)
        .args([
            "export",
            "--department",
            "hr",
            "--set",
            "aiImplementationCost=0",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .get_output()
        .clone();
    let stderr = String::from_utf8(out.stderr).expect("utf8 stderr");
    assert_eq!(stderr.matches("aiImplementationCost").count(), 1, "{stderr}");
}

#[test]
fn test_scenario_list_skips_corrupt_entries() {
    let temp = tempfile::tempdir().expect("tempdir");

    roimodel(&temp)
        .args(["scenario", "save", "good", "--department", "hr"])
        .assert()
        .success();
    fs::write(
        temp.path()
            .join(".roimodel")
            .join("scenarios")
            .join("roi-scenario-bad.json"),
        "{oops",
    )
    .expect("write corrupt entry");

    roimodel(&temp)
        .args(["scenario", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("good"))
        .stderr(predicate::str::contains("bad"));
}

#[cfg(unix)]
#[test]
fn test_export_does_not_hang_on_unreadable_logo() {
    let temp = tempfile::tempdir().expect("tempdir");
    let status = std::process::Command::new("mkfifo")
        .arg(temp.path().join("logo.jpg"))
        .status()
        .expect("run mkfifo");
    assert!(status.success());

    roimodel(&temp)
        .args([
            "export",
            "--department",
            "support",
            "--format",
            "pdf",
            "--logo",
            "logo.jpg",
            "--logo-timeout-ms",
            "200",
            "--out-dir",
            "out",
        ])
        .timeout(Duration::from_secs(10))
        .assert()
        .success()
        .stderr(predicate::str::contains("without logo"));

    assert!(temp.path().join("out").join("support_roi_report.pdf").exists());
}
