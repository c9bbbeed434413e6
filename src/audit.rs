//! Audit declared CN ranges against Scryfall's booster-flagged card data.
//!
//! Scryfall marks every printing that can appear in any booster of a set
//! with `booster: true`, including treatments only found in collector
//! boosters. For each draft/play document we fetch those printings, drop the
//! ones our ranges already cover, filter out known collector-exclusive
//! treatments, and report whatever is left for manual review.

use crate::booster::{list_booster_files, BoosterDoc};
use crate::error::Result;
use crate::range::CnRange;
use crate::report::Report;
use crate::scryfall::{ScryfallCard, ScryfallClient, REQUEST_PACING};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tokio::time::sleep;

lazy_static! {
    /// Promo types never found in draft/play boosters. Curated by hand and
    /// expected to drift as new treatments ship; the filtered count is always
    /// reported so drift shows up in the numbers.
    static ref COLLECTOR_ONLY_PROMOS: HashSet<&'static str> = [
        "fracturefoil", "texturedfoil", "ripplefoil", "halofoil",
        "confettifoil", "galaxyfoil", "surgefoil", "raisedfoil",
        "headliner", "serialized", "buyabox", "bundle",
        "planeswalkerdeck", "starterdeck", "prerelease",
        "datestamped", "playerrewards", "gameday", "release",
        "promostamped", "startercollection", "beginnerbox",
        "promopack", "themepack", "brawldeck", "playtest",
        "manafoil", "invisibleink",
    ]
    .into_iter()
    .collect();

    /// Frame effects exclusive to collector boosters.
    static ref COLLECTOR_ONLY_FRAMES: HashSet<&'static str> =
        ["extendedart", "inverted", "etched"].into_iter().collect();
}

/// Whether a card's treatments mark it as collector-exclusive.
pub fn is_collector_exclusive(card: &ScryfallCard) -> bool {
    card.promo_types
        .iter()
        .any(|p| COLLECTOR_ONLY_PROMOS.contains(p.as_str()))
        || card
            .frame_effects
            .iter()
            .any(|f| COLLECTOR_ONLY_FRAMES.contains(f.as_str()))
}

/// A suspicious card in the audit output.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IssueCard {
    pub cn: String,
    pub name: String,
    pub rarity: String,
    pub promos: String,
    pub frames: String,
}

/// Per-set audit findings, written to the results file.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SetIssue {
    pub set: String,
    pub name: String,
    pub ranges: Vec<String>,
    pub cards: Vec<IssueCard>,
    pub filtered_count: usize,
}

/// Outcome of auditing one document against its fetched cards.
#[derive(Debug)]
pub struct DocumentAudit {
    /// Cards outside the ranges but carrying a known collector-exclusive tag.
    pub filtered_count: usize,
    /// Present iff any card outside the ranges had no exclusion tag.
    pub issue: Option<SetIssue>,
}

/// Partition fetched cards against a document's declared ranges.
///
/// Cards with non-numeric collector numbers are never flagged. Range strings
/// that don't parse simply match nothing; the schema validator owns
/// complaining about them.
pub fn audit_document(doc: &BoosterDoc, cards: &[ScryfallCard]) -> DocumentAudit {
    let range_strings = doc.all_range_strings();
    let ranges: Vec<CnRange> = range_strings
        .iter()
        .filter_map(|r| r.parse().ok())
        .collect();

    let outside: Vec<&ScryfallCard> = cards
        .iter()
        .filter(|card| card.collector_number.parse::<u32>().is_ok())
        .filter(|card| !ranges.iter().any(|r| r.contains_str(&card.collector_number)))
        .collect();

    let (filtered, suspicious): (Vec<&ScryfallCard>, Vec<&ScryfallCard>) =
        outside.into_iter().partition(|c| is_collector_exclusive(c));

    for card in &filtered {
        log::debug!(
            "{}: CN {} {} filtered as collector-exclusive",
            doc.set,
            card.collector_number,
            card.name
        );
    }

    let issue = if suspicious.is_empty() {
        None
    } else {
        Some(SetIssue {
            set: doc.set.to_uppercase(),
            name: doc.set_name.clone(),
            ranges: range_strings,
            cards: suspicious
                .iter()
                .map(|c| IssueCard {
                    cn: c.collector_number.clone(),
                    name: c.name.clone(),
                    rarity: c.rarity.clone(),
                    promos: c.promo_types.join(","),
                    frames: c.frame_effects.join(","),
                })
                .collect(),
            filtered_count: filtered.len(),
        })
    };

    DocumentAudit {
        filtered_count: filtered.len(),
        issue,
    }
}

/// Audit every draft/play booster document in a directory and write the
/// accumulated issues to `output_path` as JSON.
///
/// A fetch failure for one set is recorded in the report and the run
/// continues with the next file.
pub async fn run_audit(
    boosters_dir: &Path,
    client: &ScryfallClient,
    output_path: &Path,
    report: &mut Report,
) -> Result<Vec<SetIssue>> {
    let files: Vec<_> = list_booster_files(boosters_dir)?
        .into_iter()
        .filter(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .is_some_and(|n| n.ends_with("-play.json") || n.ends_with("-draft.json"))
        })
        .collect();

    log::info!("Auditing {} booster files against Scryfall...", files.len());

    let mut issues = Vec::new();
    let mut total_suspicious = 0;
    let mut total_filtered = 0;

    for path in &files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let doc = match BoosterDoc::load(path) {
            Ok(doc) => doc,
            Err(e) => {
                report.error(format!("{}: Cannot load booster document - {}", file_name, e));
                continue;
            }
        };

        if doc.all_range_strings().is_empty() {
            continue;
        }

        sleep(REQUEST_PACING).await;
        let cards = match client.fetch_booster_cards(&doc.set).await {
            Ok(cards) => cards,
            Err(e) => {
                report.error(format!("{}: Failed to fetch Scryfall cards - {}", doc.set, e));
                continue;
            }
        };
        if cards.is_empty() {
            continue;
        }

        let audit = audit_document(&doc, &cards);
        total_filtered += audit.filtered_count;

        if let Some(issue) = audit.issue {
            total_suspicious += issue.cards.len();
            log::info!(
                "{} ({}) - {} suspicious ({} filtered) [ranges: {}]",
                issue.set,
                issue.name,
                issue.cards.len(),
                issue.filtered_count,
                issue.ranges.join(", ")
            );
            for card in &issue.cards {
                log::info!("  CN {} {} ({})", card.cn, card.name, card.rarity);
            }
            issues.push(issue);
        }
    }

    log::info!(
        "{} suspicious cards outside ranges (need review), {} filtered as likely collector-exclusive",
        total_suspicious,
        total_filtered
    );

    fs::write(output_path, serde_json::to_string_pretty(&issues)?)?;
    log::info!("Detailed results written to {}", output_path.display());

    Ok(issues)
}

#[cfg(test)]
#[path = "audit_tests.rs"]
mod tests;
