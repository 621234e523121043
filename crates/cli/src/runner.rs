//! Conformance suite runner.
//!
//! Convention:
//!   positive/            -- *.yaml + *.expected.json (no error expected)
//!   negative/resolve/    -- *.yaml + *.expected-error.json (resolver error expected)
//!   negative/validate/   -- *.yaml + *.expected-error.json (validator error expected)
//!   lex/                 -- *.chart + *.expected-tokens.json (tokens and lex errors)

use crate::tap::Tap;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

const NEGATIVE_STAGES: &[&str] = &["resolve", "validate"];

pub struct RunResult {
    pub failed: usize,
}

/// Run every fixture under `suite_dir` and print TAP. With `quiet` only
/// failing points are printed.
pub fn run_suite(suite_dir: &Path, quiet: bool) -> RunResult {
    let mut tap = Tap::new();

    // Positive tests
    run_positive_dir(suite_dir, &mut tap);

    // Negative tests by stage
    for stage in NEGATIVE_STAGES {
        run_negative_tests(suite_dir, stage, &mut tap);
    }

    // Scanner tests
    run_lex_tests(suite_dir, &mut tap);

    let failed = tap.failure_count();
    debug!(failed, "conformance suite finished");
    tap.finish(quiet);

    RunResult { failed }
}

fn run_positive_dir(suite_dir: &Path, tap: &mut Tap) {
    let dir = suite_dir.join("positive");
    if !dir.exists() {
        return;
    }
    for yaml_path in &glob_files(&dir, "yaml") {
        let stem = stem(yaml_path);
        let expected_path = dir.join(format!("{}.expected.json", stem));
        if !expected_path.exists() {
            tap.not_ok(
                format!("positive/{}", stem),
                format!("missing expected file: {}", expected_path.display()),
            );
            continue;
        }
        run_positive_test(yaml_path, &expected_path, &stem, tap);
    }
}

fn run_negative_tests(suite_dir: &Path, stage: &str, tap: &mut Tap) {
    let dir = suite_dir.join(format!("negative/{}", stage));
    if !dir.exists() {
        return;
    }
    for yaml_path in &glob_files(&dir, "yaml") {
        let stem = stem(yaml_path);
        let expected_path = dir.join(format!("{}.expected-error.json", stem));
        if !expected_path.exists() {
            tap.not_ok(
                format!("negative/{}/{}", stage, stem),
                format!("missing expected-error file: {}", expected_path.display()),
            );
            continue;
        }
        run_negative_test(yaml_path, &expected_path, &stem, stage, tap);
    }
}

fn run_lex_tests(suite_dir: &Path, tap: &mut Tap) {
    let dir = suite_dir.join("lex");
    if !dir.exists() {
        return;
    }
    for chart_path in &glob_files(&dir, "chart") {
        let stem = stem(chart_path);
        let test_name = format!("lex/{}", stem);
        let expected_path = dir.join(format!("{}.expected-tokens.json", stem));

        let expected = match read_json(&expected_path) {
            Ok(v) => v,
            Err(e) => {
                tap.not_ok(&test_name, format!("failed to read expected file: {}", e));
                continue;
            }
        };
        let src = match std::fs::read_to_string(chart_path) {
            Ok(s) => s,
            Err(e) => {
                tap.not_ok(&test_name, format!("cannot read {}: {}", chart_path.display(), e));
                continue;
            }
        };

        let got = chartc_core::scan(&src).to_json_value();
        if json_equal(&got, &expected) {
            tap.ok(&test_name);
        } else {
            let diff = json_diff(&expected, &got);
            tap.not_ok(&test_name, format!("token mismatch:\n{}", diff));
        }
    }
}

fn run_positive_test(yaml_path: &Path, expected_path: &Path, name: &str, tap: &mut Tap) {
    let test_name = format!("positive/{}", name);

    let expected_json = match read_json(expected_path) {
        Ok(v) => v,
        Err(e) => {
            tap.not_ok(&test_name, format!("failed to read expected file: {}", e));
            return;
        }
    };

    match chartc_core::elaborate_path(yaml_path) {
        Ok(chart) => {
            let got = chartc_core::serialize(&chart);
            if json_equal(&got, &expected_json) {
                tap.ok(&test_name);
            } else {
                let diff = json_diff(&expected_json, &got);
                tap.not_ok(&test_name, format!("output mismatch:\n{}", diff));
            }
        }
        Err(e) => {
            tap.not_ok(
                &test_name,
                format!("unexpected {} error: {}", e.stage(), e),
            );
        }
    }
}

fn run_negative_test(
    yaml_path: &Path,
    expected_error_path: &Path,
    name: &str,
    stage: &str,
    tap: &mut Tap,
) {
    let test_name = format!("negative/{}/{}", stage, name);

    let expected_error = match read_json(expected_error_path) {
        Ok(v) => v,
        Err(e) => {
            tap.not_ok(
                &test_name,
                format!("failed to read expected-error file: {}", e),
            );
            return;
        }
    };

    match chartc_core::elaborate_path(yaml_path) {
        Err(got_error) => {
            let got_json = got_error.to_json_value();
            if json_equal(&got_json, &expected_error) {
                tap.ok(&test_name);
            } else {
                let diff = json_diff(&expected_error, &got_json);
                tap.not_ok(&test_name, format!("error mismatch:\n{}", diff));
            }
        }
        Ok(_) => {
            tap.not_ok(
                &test_name,
                format!("expected {} error but elaboration succeeded", stage),
            );
        }
    }
}

// -- Helpers --

/// Files in `dir` with extension `ext`, sorted by path.
fn glob_files(dir: &Path, ext: &str) -> Vec<PathBuf> {
    let mut results = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some(ext) {
                results.push(path);
            }
        }
    }
    results.sort();
    results
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

fn read_json(path: &Path) -> Result<Value, String> {
    let src = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    serde_json::from_str(&src).map_err(|e| format!("invalid JSON in {}: {}", path.display(), e))
}

/// Deep equality of two JSON values, normalizing number types.
fn json_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Object(am), Value::Object(bm)) => {
            if am.len() != bm.len() {
                return false;
            }
            am.iter()
                .all(|(k, v)| bm.get(k).is_some_and(|bv| json_equal(v, bv)))
        }
        (Value::Array(av), Value::Array(bv)) => {
            av.len() == bv.len() && av.iter().zip(bv).all(|(a, b)| json_equal(a, b))
        }
        (Value::Number(an), Value::Number(bn)) => an.as_f64() == bn.as_f64(),
        _ => a == b,
    }
}

fn json_diff(expected: &Value, got: &Value) -> String {
    let exp_str = serde_json::to_string_pretty(expected).unwrap_or_default();
    let got_str = serde_json::to_string_pretty(got).unwrap_or_default();
    format!("--- expected\n{}\n+++ got\n{}", exp_str, got_str)
}
