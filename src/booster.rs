//! Booster document model and pool membership.
//!
//! One JSON file per `(set, boosterType)` pair, e.g. `dsk-play.json`, listing
//! the slots a pack is assembled from. Each slot carries a pool: treatment
//! name (nonfoil, foil, etched, ...) mapped to collector-number range
//! strings. The typed model is deliberately lenient — every field optional or
//! defaulted — so that documents with schema findings can still be loaded for
//! membership and reconciliation work; strict checking lives in `schema`.

use crate::error::Result;
use crate::range::CnRange;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Treatment name mapped to range strings, iteration order stable.
pub type Pool = BTreeMap<String, Vec<String>>;

/// A single draw position within a booster.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub count: Option<f64>,
    #[serde(default)]
    pub pool: Option<Pool>,
    #[serde(default)]
    pub rarities: Option<Vec<String>>,
    #[serde(default)]
    pub mythic_rate: Option<f64>,
    #[serde(default)]
    pub pull_rate: Option<f64>,
    /// Marks the slot as drawing from a bonus sub-set with its own numbering;
    /// such slots are excluded from main-set cross-checks.
    #[serde(default)]
    pub bonus_set: Option<String>,
}

/// A booster document for one `(set, boosterType)` pair.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BoosterDoc {
    #[serde(default)]
    pub set: String,
    #[serde(default)]
    pub set_name: String,
    #[serde(default)]
    pub booster_type: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub slots: Vec<Slot>,
}

impl BoosterDoc {
    /// Load and deserialize a booster document.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Highest collector number declared in any non-bonus pool range.
    ///
    /// Unparseable range strings are skipped; they are reported by the
    /// schema validator, not here.
    pub fn max_collector_number(&self) -> u32 {
        let mut max = 0;
        for slot in &self.slots {
            if slot.bonus_set.is_some() {
                continue;
            }
            let Some(pool) = &slot.pool else { continue };
            for ranges in pool.values() {
                for range in ranges {
                    if let Ok(r) = range.parse::<CnRange>() {
                        max = max.max(r.end);
                    }
                }
            }
        }
        max
    }

    /// Enumerated collector-number membership across all non-bonus slots.
    ///
    /// Used for collector-superset comparisons only.
    pub fn collector_number_set(&self) -> HashSet<u32> {
        let mut cns = HashSet::new();
        for slot in &self.slots {
            if slot.bonus_set.is_some() {
                continue;
            }
            let Some(pool) = &slot.pool else { continue };
            for ranges in pool.values() {
                for range in ranges {
                    if let Ok(r) = range.parse::<CnRange>() {
                        r.expand_into(&mut cns);
                    }
                }
            }
        }
        cns
    }

    /// All pool range strings across every slot and treatment, deduplicated,
    /// first-seen order preserved.
    pub fn all_range_strings(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut ranges = Vec::new();
        for slot in &self.slots {
            let Some(pool) = &slot.pool else { continue };
            for slot_ranges in pool.values() {
                for range in slot_ranges {
                    if seen.insert(range.clone()) {
                        ranges.push(range.clone());
                    }
                }
            }
        }
        ranges
    }
}

/// Check whether a collector number appears in any pool of a booster.
///
/// Absent documents, empty slot lists, missing pools and non-numeric
/// collector numbers all yield `false` — callers probe arbitrary external
/// card numbers that may not exist in the dataset at all.
pub fn is_in_any_pool(doc: Option<&BoosterDoc>, collector_number: &str) -> bool {
    let Some(doc) = doc else { return false };

    for slot in &doc.slots {
        let Some(pool) = &slot.pool else { continue };
        for ranges in pool.values() {
            for range in ranges {
                if let Ok(r) = range.parse::<CnRange>() {
                    if r.contains_str(collector_number) {
                        return true;
                    }
                }
            }
        }
    }

    false
}

/// Canonical file name for a `(set, boosterType)` pair.
pub fn booster_file_name(set: &str, booster_type: &str) -> String {
    format!("{}-{}.json", set, booster_type)
}

/// List booster document paths in a directory, sorted by file name.
pub fn list_booster_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load a booster document by set code and type, `None` if the file does not
/// exist.
pub fn load_booster(dir: &Path, set: &str, booster_type: &str) -> Result<Option<BoosterDoc>> {
    let path = dir.join(booster_file_name(set, booster_type));
    if !path.exists() {
        return Ok(None);
    }
    BoosterDoc::load(&path).map(Some)
}

/// The index manifest: set code mapped to the booster types available for it.
///
/// Types are kept as raw JSON so reconciliation can report manifest entries
/// whose value is not an array instead of failing to load the whole file.
#[derive(Debug, Deserialize, Default)]
pub struct IndexManifest {
    #[serde(default)]
    pub boosters: BTreeMap<String, serde_json::Value>,
}

impl IndexManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Booster types listed for a set, `None` if the entry is missing or not
    /// an array.
    pub fn types(&self, set: &str) -> Option<Vec<&str>> {
        let value = self.boosters.get(set)?;
        let arr = value.as_array()?;
        Some(arr.iter().filter_map(|v| v.as_str()).collect())
    }

    /// Iterate manifest entries as `(set, types)`; `types` is `None` when the
    /// entry value is not an array.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Option<Vec<&str>>)> {
        self.boosters
            .iter()
            .map(|(set, value)| {
                let types = value
                    .as_array()
                    .map(|arr| arr.iter().filter_map(|v| v.as_str()).collect());
                (set.as_str(), types)
            })
    }
}

#[cfg(test)]
#[path = "booster_tests.rs"]
mod tests;
