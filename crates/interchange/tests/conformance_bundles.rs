//! Every positive conformance output must load through `from_interchange`.

use chartc_interchange::from_interchange;
use std::path::Path;

#[test]
fn positive_expected_outputs_deserialize() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../conformance/positive");
    let mut paths: Vec<_> = std::fs::read_dir(&dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.to_string_lossy().ends_with(".expected.json"))
        .collect();
    paths.sort();
    assert!(!paths.is_empty(), "no fixtures under {}", dir.display());

    for path in paths {
        let src = std::fs::read_to_string(&path).unwrap();
        let bundle: serde_json::Value = serde_json::from_str(&src).unwrap();
        let chart = from_interchange(&bundle)
            .unwrap_or_else(|e| panic!("{}: {}", path.display(), e));
        assert!(
            chart.initial_root().is_some(),
            "{}: no initial root",
            path.display()
        );
        for state in &chart.states {
            if state.is_composite() {
                assert!(
                    chart.initial_child(&state.name).is_some(),
                    "{}: {} has no initial child",
                    path.display(),
                    state.name
                );
            }
        }
    }
}

#[test]
fn nested_fixture_preserves_declaration_order() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../conformance/positive/nested_hierarchy.expected.json");
    let bundle: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    let chart = from_interchange(&bundle).unwrap();
    let names: Vec<&str> = chart.states.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Buffering", "Playing", "Active", "Idle", "Streaming"]
    );
    assert_eq!(
        chart.state("Active").unwrap().children,
        vec!["Buffering", "Playing"]
    );
    assert_eq!(chart.initial_child("Playing").unwrap().name, "Streaming");
}
