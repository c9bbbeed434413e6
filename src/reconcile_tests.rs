//! Tests for index reconciliation

use crate::booster::IndexManifest;
use crate::reconcile::{
    check_booster_type_coverage, check_collector_supersets, check_index_exists, ReconcileConfig,
};
use crate::report::Report;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn manifest(json: &str) -> IndexManifest {
    serde_json::from_str(json).unwrap()
}

fn write_booster(dir: &Path, set: &str, booster_type: &str, ranges: &[&str]) {
    let ranges_json = serde_json::to_string(ranges).unwrap();
    let content = format!(
        r#"{{
            "set": "{set}",
            "setName": "Test Set",
            "boosterType": "{booster_type}",
            "slots": [ {{ "name": "main", "count": 6, "pool": {{ "nonfoil": {ranges_json} }} }} ]
        }}"#
    );
    fs::write(dir.join(format!("{set}-{booster_type}.json")), content).unwrap();
}

#[test]
fn manifest_entry_without_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    write_booster(dir.path(), "tst", "play", &["1-100"]);
    let manifest = manifest(r#"{"boosters": {"tst": ["play", "collector"]}}"#);

    let mut report = Report::new();
    check_index_exists(&manifest, dir.path(), &mut report);

    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0]
        .contains("References \"tst-collector.json\" but file doesn't exist"));
    assert!(report.warnings.is_empty());
}

#[test]
fn unlisted_file_is_a_warning_never_an_error() {
    let dir = TempDir::new().unwrap();
    write_booster(dir.path(), "tst", "play", &["1-100"]);
    write_booster(dir.path(), "tst", "draft", &["1-100"]);
    let manifest = manifest(r#"{"boosters": {"tst": ["play"]}}"#);

    let mut report = Report::new();
    check_index_exists(&manifest, dir.path(), &mut report);

    assert!(report.errors.is_empty());
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("tst-draft.json: Not listed in index.json"));
}

#[test]
fn non_array_manifest_entry_is_an_error() {
    let dir = TempDir::new().unwrap();
    let manifest = manifest(r#"{"boosters": {"tst": "play"}}"#);

    let mut report = Report::new();
    check_index_exists(&manifest, dir.path(), &mut report);

    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("\"tst\" should have an array of types"));
}

#[test]
fn superset_gap_outside_land_window_is_a_warning() {
    let dir = TempDir::new().unwrap();
    // CN 150 is in the draft pool but not the collector pool.
    write_booster(dir.path(), "tst", "draft", &["1-200"]);
    write_booster(dir.path(), "tst", "collector", &["1-149", "151-200"]);
    let manifest = manifest(r#"{"boosters": {"tst": ["draft", "collector"]}}"#);

    let mut report = Report::new();
    check_collector_supersets(&manifest, dir.path(), &ReconcileConfig::default(), &mut report);

    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("tst: Draft CNs 150-150 not in collector booster"));
}

#[test]
fn superset_gap_inside_land_window_is_suppressed() {
    let dir = TempDir::new().unwrap();
    // CNs 270-285 look like basic lands; collector boosters omit those.
    write_booster(dir.path(), "tst", "play", &["1-269", "270-285"]);
    write_booster(dir.path(), "tst", "collector", &["1-269"]);
    let manifest = manifest(r#"{"boosters": {"tst": ["play", "collector"]}}"#);

    let mut report = Report::new();
    check_collector_supersets(&manifest, dir.path(), &ReconcileConfig::default(), &mut report);

    assert!(report.warnings.is_empty());
}

#[test]
fn land_window_is_configurable() {
    let dir = TempDir::new().unwrap();
    write_booster(dir.path(), "tst", "draft", &["1-100", "280"]);
    write_booster(dir.path(), "tst", "collector", &["1-100"]);
    let manifest = manifest(r#"{"boosters": {"tst": ["draft", "collector"]}}"#);

    // With a window that does not cover 280, the gap is reported.
    let config = ReconcileConfig {
        basic_land_window: (400, 450),
    };
    let mut report = Report::new();
    check_collector_supersets(&manifest, dir.path(), &config, &mut report);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("280-280"));
}

#[test]
fn superset_check_excludes_bonus_set_slots() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tst-draft.json"),
        r#"{
            "set": "tst", "setName": "Test Set", "boosterType": "draft",
            "slots": [
                { "name": "main", "count": 6, "pool": { "nonfoil": ["1-100"] } },
                { "name": "bonus", "count": 1, "bonusSet": "spg", "pool": { "nonfoil": ["1-64"] } }
            ]
        }"#,
    )
    .unwrap();
    write_booster(dir.path(), "tst", "collector", &["1-100"]);
    let manifest = manifest(r#"{"boosters": {"tst": ["draft", "collector"]}}"#);

    let mut report = Report::new();
    check_collector_supersets(&manifest, dir.path(), &ReconcileConfig::default(), &mut report);

    // The bonus-set slot's 1-64 is tracked under its own numbering and must
    // not be compared against the main-set collector pool.
    assert!(report.warnings.is_empty());
}

#[test]
fn superset_check_pairs_first_limited_type_by_priority() {
    let dir = TempDir::new().unwrap();
    // Both draft and play exist; draft should be the one compared.
    write_booster(dir.path(), "tst", "draft", &["1-100"]);
    write_booster(dir.path(), "tst", "play", &["1-500"]);
    write_booster(dir.path(), "tst", "collector", &["1-100"]);
    let manifest = manifest(r#"{"boosters": {"tst": ["play", "draft", "collector"]}}"#);

    let mut report = Report::new();
    check_collector_supersets(&manifest, dir.path(), &ReconcileConfig::default(), &mut report);

    // Draft (1-100) is fully covered; play's 101-500 is never consulted.
    assert!(report.warnings.is_empty());
}

#[test]
fn modern_set_without_collector_booster_is_a_warning() {
    let manifest = manifest(r#"{"boosters": {"dsk": ["play"], "tst": ["draft"]}}"#);

    let mut report = Report::new();
    check_booster_type_coverage(&manifest, &mut report);

    // dsk is a modern set, tst is not tracked.
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("dsk: Modern set missing collector booster file"));
}

#[test]
fn collector_booster_without_limited_counterpart_is_a_warning() {
    let manifest = manifest(r#"{"boosters": {"tst": ["collector"]}}"#);

    let mut report = Report::new();
    check_booster_type_coverage(&manifest, &mut report);

    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("tst: Has collector booster but no draft/play/set booster"));
}
