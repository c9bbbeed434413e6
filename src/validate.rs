//! Top-level validation driver: schema pass over every booster document,
//! index reconciliation, and the optional URL / Scryfall passes.

use crate::booster::{list_booster_files, BoosterDoc, IndexManifest};
use crate::reconcile::{
    check_booster_type_coverage, check_collector_supersets, check_index_exists, ReconcileConfig,
};
use crate::report::Report;
use crate::schema;
use crate::scryfall::{ScryfallClient, UrlCheck, REQUEST_PACING};
use std::collections::HashMap;
use std::path::Path;
use tokio::time::sleep;

/// Schema-validate every booster document and reconcile the index manifest.
///
/// A manifest that fails to parse is an error, but the per-file schema
/// findings stand on their own.
pub fn run_validation(
    boosters_dir: &Path,
    index_path: &Path,
    config: &ReconcileConfig,
    report: &mut Report,
) {
    let files = match list_booster_files(boosters_dir) {
        Ok(files) => files,
        Err(e) => {
            report.error(format!("Cannot list boosters directory: {}", e));
            return;
        }
    };

    log::info!("Validating {} booster files...", files.len());
    for path in &files {
        schema::validate_file(path, report);
    }

    match IndexManifest::load(index_path) {
        Ok(manifest) => {
            check_index_exists(&manifest, boosters_dir, report);
            check_collector_supersets(&manifest, boosters_dir, config, report);
            check_booster_type_coverage(&manifest, report);
        }
        Err(e) => {
            report.error(format!("index.json: Invalid JSON - {}", e));
        }
    }
}

/// HEAD-check every distinct provenance URL in the dataset.
///
/// Results are cached per URL for the run; many files share one "Collecting
/// ..." article.
pub async fn check_source_urls(boosters_dir: &Path, client: &ScryfallClient, report: &mut Report) {
    log::info!("Checking source URLs (this may take a while)...");

    let files = match list_booster_files(boosters_dir) {
        Ok(files) => files,
        Err(e) => {
            report.error(format!("Cannot list boosters directory: {}", e));
            return;
        }
    };

    let mut url_cache: HashMap<String, UrlCheck> = HashMap::new();

    for path in &files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        // Unreadable documents were already reported by the schema pass.
        let Ok(doc) = BoosterDoc::load(path) else { continue };
        let Some(source) = doc.source else { continue };

        // Cache hits re-warn per file, but the OK confirmation is only
        // recorded for the first file sharing a URL.
        let (check, cached) = match url_cache.get(&source) {
            Some(check) => (*check, true),
            None => {
                sleep(REQUEST_PACING).await;
                let check = client.check_url(&source).await;
                url_cache.insert(source.clone(), check);
                (check, false)
            }
        };

        if !check.ok {
            let status = if check.status == 0 {
                "timeout".to_string()
            } else {
                check.status.to_string()
            };
            report.warning(format!("{}: Source URL unreachable ({})", file_name, status));
        } else if !cached {
            report.info(format!("{}: Source URL OK", file_name));
        }
    }
}

/// Cross-check each document's highest declared CN against Scryfall's card
/// count for the set.
///
/// Set metadata is cached per set code; multiple booster-type files of the
/// same set cost one request.
pub async fn check_scryfall_counts(
    boosters_dir: &Path,
    client: &ScryfallClient,
    report: &mut Report,
) {
    log::info!("Checking CN ranges against Scryfall (this may take a while)...");

    let files = match list_booster_files(boosters_dir) {
        Ok(files) => files,
        Err(e) => {
            report.error(format!("Cannot list boosters directory: {}", e));
            return;
        }
    };

    let mut set_cache: HashMap<String, u32> = HashMap::new();

    for path in &files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let Ok(doc) = BoosterDoc::load(path) else { continue };
        if doc.set.is_empty() {
            continue;
        }

        let card_count = match set_cache.get(&doc.set) {
            Some(count) => *count,
            None => {
                sleep(REQUEST_PACING).await;
                match client.fetch_set(&doc.set).await {
                    Ok(Some(set)) => {
                        set_cache.insert(doc.set.clone(), set.card_count);
                        set.card_count
                    }
                    Ok(None) | Err(_) => {
                        report.warning(format!(
                            "{}: Could not fetch Scryfall data for set {}",
                            file_name, doc.set
                        ));
                        continue;
                    }
                }
            }
        };

        let max_cn = doc.max_collector_number();
        if max_cn > card_count {
            report.error(format!(
                "{}: Max CN {} exceeds Scryfall card_count {}",
                file_name, max_cn, card_count
            ));
        } else {
            report.info(format!(
                "{}: Max CN {} within Scryfall count {}",
                file_name, max_cn, card_count
            ));
        }
    }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
