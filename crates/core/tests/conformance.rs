//! Runs the fixture suite under conformance/ directly against the library.

use serde_json::Value;
use std::path::{Path, PathBuf};

fn conformance_dir(sub: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../conformance")
        .join(sub)
}

fn inputs(dir: &Path, ext: &str) -> Vec<PathBuf> {
    let mut paths: Vec<_> = std::fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("reading {}: {}", dir.display(), e))
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|e| e == ext))
        .collect();
    paths.sort();
    paths
}

fn read_json(path: &Path) -> Value {
    let src = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("reading {}: {}", path.display(), e));
    serde_json::from_str(&src).unwrap_or_else(|e| panic!("parsing {}: {}", path.display(), e))
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let stem = path.file_stem().unwrap().to_string_lossy();
    path.with_file_name(format!("{}{}", stem, suffix))
}

#[test]
fn positive_fixtures_serialize_to_expected_json() {
    let cases = inputs(&conformance_dir("positive"), "yaml");
    assert!(!cases.is_empty());
    for path in cases {
        let chart = chartc_core::elaborate_path(&path)
            .unwrap_or_else(|e| panic!("{}: {}", path.display(), e));
        let got = chartc_core::serialize(&chart);
        let want = read_json(&sibling(&path, ".expected.json"));
        assert_eq!(got, want, "{}", path.display());
    }
}

#[test]
fn negative_fixtures_fail_with_expected_error() {
    let mut tested = 0;
    for stage in ["resolve", "validate"] {
        for path in inputs(&conformance_dir(&format!("negative/{}", stage)), "yaml") {
            let err = match chartc_core::elaborate_path(&path) {
                Ok(_) => panic!("{}: expected an error", path.display()),
                Err(e) => e,
            };
            assert_eq!(err.stage(), stage, "{}", path.display());
            let want = read_json(&sibling(&path, ".expected-error.json"));
            assert_eq!(err.to_json_value(), want, "{}", path.display());
            tested += 1;
        }
    }
    assert!(tested > 0);
}

#[test]
fn lex_fixtures_produce_expected_tokens() {
    let cases = inputs(&conformance_dir("lex"), "chart");
    assert!(!cases.is_empty());
    for path in cases {
        let src = std::fs::read_to_string(&path).unwrap();
        let got = chartc_core::scan(&src).to_json_value();
        let want = read_json(&sibling(&path, ".expected-tokens.json"));
        assert_eq!(got, want, "{}", path.display());
    }
}
