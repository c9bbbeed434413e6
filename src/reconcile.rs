//! Index reconciliation: manifest vs files on disk, collector-booster
//! supersets, and booster-type coverage.

use crate::booster::{booster_file_name, list_booster_files, load_booster, IndexManifest};
use crate::report::Report;
use log::debug;
use std::collections::HashSet;
use std::path::Path;

/// Booster types with a limited ("draftable") card pool, in the priority
/// order used when pairing one against a collector booster.
const LIMITED_TYPES: [&str; 3] = ["draft", "play", "set"];

/// Sets released after collector boosters were introduced (2019+). A manifest
/// entry for one of these without a collector booster is a coverage gap.
const MODERN_SETS: [&str; 35] = [
    "eld", "thb", "iko", "m21", "znr", "khm", "stx", "afr", "mid", "vow", "neo", "snc", "dmu",
    "bro", "one", "mom", "woe", "lci", "mkm", "otj", "mh3", "blb", "dsk", "fdn", "acr", "dft",
    "tdm", "fin", "inr", "tla", "eoe", "spm", "ecl", "ltr", "mh2",
];

/// Tunable knobs for reconciliation.
#[derive(Debug, Clone)]
pub struct ReconcileConfig {
    /// Collector numbers in this inclusive window are assumed to be basic
    /// lands, which play boosters carry but collector boosters legitimately
    /// omit. A heuristic tied to typical set sizes, hence configurable.
    pub basic_land_window: (u32, u32),
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            basic_land_window: (250, 320),
        }
    }
}

/// Every manifest-listed `(set, type)` must resolve to a file on disk
/// (error), and every file on disk should be manifest-listed (warning).
pub fn check_index_exists(manifest: &IndexManifest, boosters_dir: &Path, report: &mut Report) {
    let mut indexed_files = HashSet::new();

    for (set, types) in manifest.entries() {
        let Some(types) = types else {
            report.error(format!("index.json: \"{}\" should have an array of types", set));
            continue;
        };
        for booster_type in types {
            let file_name = booster_file_name(set, booster_type);
            if !boosters_dir.join(&file_name).exists() {
                report.error(format!(
                    "index.json: References \"{}\" but file doesn't exist",
                    file_name
                ));
            }
            indexed_files.insert(file_name);
        }
    }

    let actual_files = match list_booster_files(boosters_dir) {
        Ok(files) => files,
        Err(e) => {
            report.error(format!("Cannot list boosters directory: {}", e));
            return;
        }
    };

    for path in actual_files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !indexed_files.contains(&file_name) {
            report.warning(format!("{}: Not listed in index.json", file_name));
        }
    }
}

/// For each set with both a collector booster and a limited booster, the
/// collector pool must be a superset of the limited pool. Missing spans that
/// fall entirely inside the basic-land window are suppressed.
pub fn check_collector_supersets(
    manifest: &IndexManifest,
    boosters_dir: &Path,
    config: &ReconcileConfig,
    report: &mut Report,
) {
    for (set, types) in manifest.entries() {
        let Some(types) = types else { continue };
        if !types.contains(&"collector") {
            continue;
        }
        let Some(limited_type) = LIMITED_TYPES.iter().find(|t| types.contains(t)) else {
            continue;
        };

        let collector = match load_booster(boosters_dir, set, "collector") {
            Ok(Some(doc)) => doc,
            Ok(None) => continue,
            Err(e) => {
                debug!("{}: skipping superset check, collector doc unreadable: {}", set, e);
                continue;
            }
        };
        let limited = match load_booster(boosters_dir, set, limited_type) {
            Ok(Some(doc)) => doc,
            Ok(None) => continue,
            Err(e) => {
                debug!("{}: skipping superset check, {} doc unreadable: {}", set, limited_type, e);
                continue;
            }
        };

        let collector_cns = collector.collector_number_set();
        let limited_cns = limited.collector_number_set();

        let missing: Vec<u32> = limited_cns
            .iter()
            .filter(|cn| !collector_cns.contains(cn))
            .copied()
            .collect();

        if let (Some(&min), Some(&max)) = (missing.iter().min(), missing.iter().max()) {
            let (land_lo, land_hi) = config.basic_land_window;
            let likely_basic_lands = min >= land_lo && max <= land_hi;
            if !likely_basic_lands {
                report.warning(format!(
                    "{}: Draft CNs {}-{} not in collector booster",
                    set, min, max
                ));
            }
        }
    }
}

/// Coverage checks: modern sets should have collector boosters, and a
/// collector booster with no limited counterpart is suspicious.
pub fn check_booster_type_coverage(manifest: &IndexManifest, report: &mut Report) {
    for set in MODERN_SETS {
        if let Some(types) = manifest.types(set) {
            if !types.contains(&"collector") {
                report.warning(format!("{}: Modern set missing collector booster file", set));
            }
        }
    }

    for (set, types) in manifest.entries() {
        let Some(types) = types else { continue };
        if types.contains(&"collector") && !LIMITED_TYPES.iter().any(|t| types.contains(t)) {
            report.warning(format!(
                "{}: Has collector booster but no draft/play/set booster",
                set
            ));
        }
    }
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
