//! Tests for the Scryfall range audit

use crate::audit::{audit_document, is_collector_exclusive, run_audit};
use crate::booster::BoosterDoc;
use crate::report::Report;
use crate::scryfall::{ScryfallCard, ScryfallClient};
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn card(cn: &str, promos: &[&str], frames: &[&str]) -> ScryfallCard {
    serde_json::from_value(json!({
        "collector_number": cn,
        "name": format!("Card {}", cn),
        "rarity": "rare",
        "promo_types": promos,
        "frame_effects": frames
    }))
    .unwrap()
}

fn doc_with_ranges(ranges: &[&str]) -> BoosterDoc {
    serde_json::from_value(json!({
        "set": "tst",
        "setName": "Test Set",
        "boosterType": "play",
        "slots": [ { "name": "main", "count": 6, "pool": { "nonfoil": ranges } } ]
    }))
    .unwrap()
}

#[test]
fn exclusion_tables_match_promos_and_frames() {
    assert!(is_collector_exclusive(&card("400", &["surgefoil"], &[])));
    assert!(is_collector_exclusive(&card("400", &[], &["extendedart"])));
    assert!(is_collector_exclusive(&card("400", &["serialized"], &["etched"])));
    assert!(!is_collector_exclusive(&card("400", &[], &[])));
    assert!(!is_collector_exclusive(&card("400", &["boosterfun"], &["showcase"])));
}

#[test]
fn in_range_cards_are_ignored() {
    let doc = doc_with_ranges(&["1-100"]);
    let audit = audit_document(&doc, &[card("50", &[], &[]), card("100", &["surgefoil"], &[])]);
    assert_eq!(audit.filtered_count, 0);
    assert!(audit.issue.is_none());
}

#[test]
fn out_of_range_card_with_exclusion_tag_is_filtered_not_suspicious() {
    let doc = doc_with_ranges(&["1-100"]);
    let audit = audit_document(&doc, &[card("150", &["surgefoil"], &[])]);
    assert_eq!(audit.filtered_count, 1);
    assert!(audit.issue.is_none());
}

#[test]
fn out_of_range_card_without_exclusion_tag_is_suspicious() {
    let doc = doc_with_ranges(&["1-100"]);
    let audit = audit_document(
        &doc,
        &[
            card("150", &[], &[]),
            card("160", &["halofoil"], &[]),
            card("90", &[], &[]),
        ],
    );

    assert_eq!(audit.filtered_count, 1);
    let issue = audit.issue.expect("suspicious card should produce an issue");
    assert_eq!(issue.set, "TST");
    assert_eq!(issue.name, "Test Set");
    assert_eq!(issue.ranges, vec!["1-100"]);
    assert_eq!(issue.filtered_count, 1);
    assert_eq!(issue.cards.len(), 1);
    assert_eq!(issue.cards[0].cn, "150");
    assert_eq!(issue.cards[0].rarity, "rare");
}

#[test]
fn non_numeric_collector_numbers_are_never_flagged() {
    let doc = doc_with_ranges(&["1-100"]);
    let audit = audit_document(&doc, &[card("150a", &[], &[]), card("★5", &[], &[])]);
    assert_eq!(audit.filtered_count, 0);
    assert!(audit.issue.is_none());
}

#[test]
fn issue_card_records_treatment_tags() {
    let doc = doc_with_ranges(&["1-100"]);
    let audit = audit_document(&doc, &[card("150", &["boosterfun", "showcase"], &["legendary"])]);
    let issue = audit.issue.unwrap();
    assert_eq!(issue.cards[0].promos, "boosterfun,showcase");
    assert_eq!(issue.cards[0].frames, "legendary");
}

#[test]
fn set_issue_serializes_with_camel_case_keys() {
    let doc = doc_with_ranges(&["1-100"]);
    let audit = audit_document(&doc, &[card("150", &[], &[])]);
    let json = serde_json::to_value(audit.issue.unwrap()).unwrap();
    assert!(json.get("filteredCount").is_some());
    assert!(json.get("cards").unwrap()[0].get("cn").is_some());
}

#[tokio::test]
async fn run_audit_writes_results_and_records_fetch_failures() {
    let server = MockServer::start().await;

    // tst: one suspicious card outside 1-100.
    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .and(query_param("q", "set:tst booster:true lang:en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "collector_number": "150",
                "name": "Stray Card",
                "rarity": "mythic",
                "promo_types": [],
                "frame_effects": []
            }],
            "has_more": false
        })))
        .mount(&server)
        .await;

    // bad: persistent server error.
    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .and(query_param("q", "set:bad booster:true lang:en"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tst-play.json"),
        r#"{"set": "tst", "setName": "Test Set", "boosterType": "play",
            "slots": [ { "name": "main", "count": 6, "pool": { "nonfoil": ["1-100"] } } ]}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("bad-draft.json"),
        r#"{"set": "bad", "setName": "Broken Set", "boosterType": "draft",
            "slots": [ { "name": "main", "count": 6, "pool": { "nonfoil": ["1-50"] } } ]}"#,
    )
    .unwrap();
    // Collector files are not audited.
    fs::write(
        dir.path().join("tst-collector.json"),
        r#"{"set": "tst", "setName": "Test Set", "boosterType": "collector",
            "slots": [ { "name": "main", "count": 6, "pool": { "nonfoil": ["1-100"] } } ]}"#,
    )
    .unwrap();

    let output = dir.path().join("audit-results.json");
    let client = ScryfallClient::with_base_url(server.uri());
    let mut report = Report::new();

    let issues = run_audit(dir.path(), &client, &output, &mut report)
        .await
        .unwrap();

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].set, "TST");
    assert_eq!(issues[0].cards[0].name, "Stray Card");

    // The failing set is an error for that unit only, not a process abort.
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("bad: Failed to fetch Scryfall cards"));

    let written: Vec<serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0]["set"], "TST");
}
