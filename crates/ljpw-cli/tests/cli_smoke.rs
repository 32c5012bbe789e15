use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

fn ljpw(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ljpw"))
        .args(args)
        .output()
        .expect("spawn ljpw")
}

fn read_json(path: &Path) -> Value {
    serde_json::from_slice(&fs::read(path).expect("read output")).expect("json output")
}

#[test]
fn diagnose_coordinate_to_stdout() {
    let output = ljpw(&["diagnose", "--coordinate", "0.3,0.85,0.9,0.4"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let value: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["diagnosis"]["bottleneck"], "L");
    assert_eq!(value["diagnosis"]["suggestions"][0]["kind"], "raise_amplifier");
    assert_eq!(value["diagnosis"]["color"]["hex"], "#899f92");
    assert_eq!(value["priorities"][0]["axis"], "L");
}

#[test]
fn diagnose_rejects_out_of_range_coordinate() {
    let output = ljpw(&["diagnose", "--coordinate", "1.2,0.5,0.5,0.5"]);
    assert!(!output.status.success());
    let output = ljpw(&["diagnose", "--coordinate", "0.5,0.5,0.5"]);
    assert!(!output.status.success());
}

#[test]
fn calibrate_yaml_bundle() {
    let dir = tempdir().expect("tempdir");
    let metrics = dir.path().join("team.yaml");
    fs::write(
        &metrics,
        "cross_review_rate: 0.85\napi_error_rate: 0.08\ndoc_coverage: 0.65\npsych_safety_score: 5.5\n\
line_coverage: 0.82\nbranch_coverage: 0.78\narchitecture_violations: 0.06\ncode_standards_compliance: 0.88\n\
tech_debt_time_ratio: 0.25\nvelocity_achievement: 0.95\np95_response_time_ms: 450\nsla_target_ms: 500\n\
cpu_utilization: 0.79\ndoc_to_code_ratio: 0.30\nonboarding_days: 4\nbaseline_onboarding_days: 10\n\
change_isolation_rate: 0.88\nknowledge_retention_score: 5.0\n",
    )
    .expect("write metrics");
    let out = dir.path().join("report.json");
    let output = ljpw(&[
        "calibrate",
        "--metrics",
        metrics.to_str().expect("utf8"),
        "--out",
        out.to_str().expect("utf8"),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let report = read_json(&out);
    let love = report["coordinate"]["L"].as_f64().expect("love");
    assert!((love - (0.85 + 0.92 + 0.65 + 0.75) / 4.0).abs() < 1e-9);
    assert!(report["axes"]["W"]["sub_metrics"].is_array());
}

#[test]
fn calibrate_reports_missing_metric() {
    let dir = tempdir().expect("tempdir");
    let metrics = dir.path().join("partial.json");
    fs::write(&metrics, r#"{"cross_review_rate": 0.5}"#).expect("write");
    let output = ljpw(&["calibrate", "--metrics", metrics.to_str().expect("utf8")]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing"));
}

#[test]
fn synth_then_validate() {
    let dir = tempdir().expect("tempdir");
    let mut domain_args = Vec::new();
    for name in ["software", "healthcare", "education"] {
        let csv = dir.path().join(format!("{name}.csv"));
        let csv_str = csv.to_str().expect("utf8").to_string();
        let output = ljpw(&[
            "synth", "--domain", name, "--noise", "0.02", "--seed", "3", "--out", csv_str.as_str(),
        ]);
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        domain_args.push(format!("{name}={csv_str}"));
    }

    let out = dir.path().join("validation.json");
    let out_str = out.to_str().expect("utf8").to_string();
    let mut args = vec!["validate"];
    for domain in &domain_args {
        args.push("--domain");
        args.push(domain);
    }
    args.extend(["--install", "L:J", "--out", out_str.as_str()]);
    let output = ljpw(&args);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let value = read_json(&out);
    let fits = value["report"]["fits"].as_array().expect("fits");
    let names: Vec<&str> = fits.iter().map(|f| f["domain"].as_str().expect("name")).collect();
    assert_eq!(names, ["software", "healthcare", "education"]);
    assert_eq!(value["report"]["verdict"], "validated");
    assert!(value["fitted_coupling"].is_array());
}

#[test]
fn simulate_feedback_loop() {
    let output = ljpw(&[
        "simulate", "--love", "0.5", "--wisdom", "0.3", "--delta-wisdom", "0.4", "--justice",
        "0.9",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let value: Value = serde_json::from_slice(&output.stdout).expect("json");
    let trajectory = value["trajectory"].as_array().expect("trajectory");
    assert_eq!(trajectory.len(), 7);
    let observed = value["observed_delta_love"].as_f64().expect("observed");
    assert!((observed - 0.082126304).abs() < 1e-9);
    assert!(value["justice"]["bureaucracy"].is_number());

    let output = ljpw(&["simulate", "--love", "1.5", "--wisdom", "0.3"]);
    assert!(!output.status.success());
}
