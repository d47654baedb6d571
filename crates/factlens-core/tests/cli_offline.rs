//! Drives the `factlens` binary without any network access: the classifier is
//! overridden on the command line and no fact-check API key is configured, so
//! retrieval degrades to empty evidence before any request is made.

use std::fs;
use std::process::{Command, Output};

use serde_json::Value;

fn factlens(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_factlens"))
        .args(args)
        .env_remove("GOOGLE_FACT_CHECK_API_KEY")
        .env_remove("FACTLENS_CONFIG")
        .env_remove("FACTLENS_CLASSIFIER_URL")
        .env_remove("ENVIRONMENT")
        .env("FACTLENS_LOG", "factlens=warn")
        .output()
        .expect("failed to run factlens binary")
}

fn stdout_json(output: &Output) -> Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        output.status.success(),
        "factlens failed.\nstdout:\n{stdout}\nstderr:\n{stderr}"
    );
    serde_json::from_str(&stdout).unwrap_or_else(|error| panic!("bad JSON ({error}):\n{stdout}"))
}

#[test]
fn synthesize_single_false_rating() {
    let output = factlens(&[
        "synthesize",
        "--ml-label",
        "fake",
        "--ml-confidence",
        "0.9",
        "--rating",
        "False",
    ]);
    let verdict = stdout_json(&output);
    assert_eq!(verdict["verdict"], "FAKE");
    assert_eq!(verdict["confidence"], 0.8);
    assert_eq!(verdict["false_count"], 1);
    assert_eq!(verdict["rule"], "fact_check_false");
}

#[test]
fn synthesize_split_ratings_with_unsure_model() {
    let output = factlens(&[
        "synthesize",
        "--ml-label",
        "real",
        "--ml-confidence",
        "0.6",
        "--rating",
        "True",
        "--rating",
        "False",
    ]);
    let verdict = stdout_json(&output);
    assert_eq!(verdict["verdict"], "UNCERTAIN");
    assert_eq!(verdict["confidence"], 0.5);
}

#[test]
fn synthesize_without_ratings_uses_the_model() {
    let output = factlens(&["synthesize", "--ml-label", "fake", "--ml-confidence", "0.5"]);
    let verdict = stdout_json(&output);
    assert_eq!(verdict["verdict"], "UNCERTAIN");
    assert_eq!(verdict["confidence"], 0.5);
    assert_eq!(verdict["rule"], "inconclusive");
}

#[test]
fn analyze_without_fact_check_key_degrades_to_model_only() {
    let output = factlens(&[
        "analyze",
        "Breaking: city council approves new bike lanes downtown.",
        "--ml-label",
        "real",
        "--ml-confidence",
        "0.7",
    ]);
    let report = stdout_json(&output);
    assert_eq!(report["verdict"], "REAL");
    assert_eq!(report["confidence"], 0.7);
    assert_eq!(report["ml_prediction"], "REAL");
    assert_eq!(report["fact_checks"], Value::Array(Vec::new()));
    assert!(report["reasoning"]
        .as_str()
        .unwrap()
        .starts_with("No fact-checks found."));
    assert!(report["processing_time_ms"].is_number());
}

#[test]
fn analyze_rejects_short_text() {
    let output = factlens(&["analyze", "  too short ", "--ml-label", "fake", "--ml-confidence", "0.9"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("text is too short"), "stderr:\n{stderr}");
}

#[test]
fn analyze_without_classifier_explains_the_setup() {
    let output = factlens(&["analyze", "A sufficiently long piece of text to analyze."]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no classifier configured"), "stderr:\n{stderr}");
}

#[test]
fn batch_reports_each_line_in_order() {
    let path = std::env::temp_dir().join(format!("factlens-batch-{}.txt", std::process::id()));
    fs::write(
        &path,
        "The first article body is long enough.\n\nshort\nThe third article body is long enough too.\n",
    )
    .expect("failed to write batch input");

    let output = factlens(&[
        "batch",
        path.to_string_lossy().as_ref(),
        "--ml-label",
        "fake",
        "--ml-confidence",
        "0.95",
    ]);
    let _ = fs::remove_file(&path);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stdout:\n{stdout}");
    let lines: Vec<Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("batch line is JSON"))
        .collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["line"], 1);
    assert_eq!(lines[0]["report"]["verdict"], "FAKE");
    assert_eq!(lines[1]["line"], 3);
    assert!(lines[1]["error"].as_str().unwrap().contains("too short"));
    assert_eq!(lines[2]["line"], 4);
    assert_eq!(lines[2]["report"]["confidence"], 0.95);
}
