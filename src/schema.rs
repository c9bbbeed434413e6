//! Structural validation of a single booster document.
//!
//! Works on raw `serde_json::Value` rather than the typed model: documents
//! under validation may be arbitrarily malformed, and every field-level
//! finding must be reported, not just the first deserialization failure.
//! Findings accumulate into the caller's `Report`; only a missing or invalid
//! `slots` array is fatal for a document (slot-level checks are skipped).

use crate::range::CnRange;
use crate::report::Report;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// The fixed rarity enum. Unknown values are warnings, not errors — the
/// schema is expected to grow new rarities over time.
const VALID_RARITIES: [&str; 6] = ["common", "uncommon", "rare", "mythic", "special", "bonus"];

/// Read, parse and validate one booster document file.
///
/// Malformed JSON is an unrecoverable per-file error; the parsed value is
/// returned for files that at least parse, so callers can run further
/// cross-checks on them.
pub fn validate_file(path: &Path, report: &mut Report) -> Option<Value> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            report.error(format!("{}: Cannot read file - {}", file_name, e));
            return None;
        }
    };

    let value: Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) => {
            report.error(format!("{}: Invalid JSON - {}", file_name, e));
            return None;
        }
    };

    validate_document(&file_name, &value, report);
    Some(value)
}

/// Validate a parsed booster document against the expected structure.
pub fn validate_document(file_name: &str, doc: &Value, report: &mut Report) {
    for field in ["set", "setName", "boosterType"] {
        if doc.get(field).and_then(Value::as_str).is_none() {
            report.error(format!("{}: Missing \"{}\" field", file_name, field));
        }
    }

    let Some(slots) = doc.get("slots").and_then(Value::as_array) else {
        report.error(format!("{}: Missing or invalid \"slots\" array", file_name));
        return;
    };

    if doc.get("source").and_then(Value::as_str).is_none() {
        report.warning(format!("{}: Missing \"source\" field", file_name));
    }

    // Naming convention is what lookup by (set, type) relies on.
    if let (Some(set), Some(booster_type)) = (
        doc.get("set").and_then(Value::as_str),
        doc.get("boosterType").and_then(Value::as_str),
    ) {
        let expected = format!("{}-{}.json", set, booster_type);
        if file_name != expected {
            report.error(format!(
                "{}: Filename doesn't match content (expected {})",
                file_name, expected
            ));
        }
    }

    let mut slot_names: Vec<&str> = Vec::new();
    for (i, slot) in slots.iter().enumerate() {
        validate_slot(file_name, i, slot, &mut slot_names, report);
    }
}

fn validate_slot<'a>(
    file_name: &str,
    index: usize,
    slot: &'a Value,
    seen_names: &mut Vec<&'a str>,
    report: &mut Report,
) {
    let name = slot.get("name").and_then(Value::as_str);
    match name {
        None => report.error(format!("{}: Slot {} missing \"name\"", file_name, index)),
        // Register the name before any early return below, so later slots
        // reusing it still get the duplicate warning.
        Some(name) => {
            if seen_names.contains(&name) {
                report.warning(format!("{}: Duplicate slot name \"{}\"", file_name, name));
            }
            seen_names.push(name);
        }
    }

    // Slots without a name are identified by index in messages.
    let label = name.map(str::to_string).unwrap_or_else(|| index.to_string());

    match slot.get("count") {
        None => report.error(format!("{}: Slot \"{}\" missing \"count\"", file_name, label)),
        Some(count) => {
            if !count.as_f64().is_some_and(|n| n >= 0.0) {
                report.error(format!(
                    "{}: Slot \"{}\" count should be a positive number",
                    file_name, label
                ));
            }
        }
    }

    let pool = slot.get("pool").and_then(Value::as_object);
    match pool {
        None => {
            report.error(format!("{}: Slot \"{}\" missing \"pool\"", file_name, label));
            return;
        }
        Some(pool) => {
            for (treatment, ranges) in pool {
                let Some(ranges) = ranges.as_array() else {
                    report.error(format!(
                        "{}: Slot \"{}\" pool.{} should be an array",
                        file_name, label, treatment
                    ));
                    continue;
                };

                for range in ranges {
                    let Some(range) = range.as_str() else {
                        report.error(format!(
                            "{}: Slot \"{}\" invalid range format: {}",
                            file_name, label, range
                        ));
                        continue;
                    };
                    if let Err(e) = range.parse::<CnRange>() {
                        report.error(format!("{}: Slot \"{}\" {}", file_name, label, e));
                    }
                }
            }
        }
    }

    if let Some(rarities) = slot.get("rarities") {
        match rarities.as_array() {
            None => report.error(format!(
                "{}: Slot \"{}\" rarities should be an array",
                file_name, label
            )),
            Some(rarities) => {
                for rarity in rarities {
                    let known = rarity
                        .as_str()
                        .is_some_and(|r| VALID_RARITIES.contains(&r));
                    if !known {
                        report.warning(format!(
                            "{}: Slot \"{}\" unknown rarity {}",
                            file_name, label, rarity
                        ));
                    }
                }
            }
        }
    }

    if let Some(rate) = slot.get("mythicRate") {
        if !rate.as_f64().is_some_and(|n| (0.0..=1.0).contains(&n)) {
            report.error(format!(
                "{}: Slot \"{}\" mythicRate should be between 0 and 1",
                file_name, label
            ));
        }
        let has_mythic = slot
            .get("rarities")
            .and_then(Value::as_array)
            .is_some_and(|r| r.iter().any(|v| v.as_str() == Some("mythic")));
        if !has_mythic {
            report.warning(format!(
                "{}: Slot \"{}\" has mythicRate but no mythic rarity",
                file_name, label
            ));
        }
    }

    if let Some(rate) = slot.get("pullRate") {
        if !rate.as_f64().is_some_and(|n| (0.0..=1.0).contains(&n)) {
            report.error(format!(
                "{}: Slot \"{}\" pullRate should be between 0 and 1",
                file_name, label
            ));
        }
    }

    if let Some(bonus_set) = slot.get("bonusSet") {
        if !bonus_set.is_string() {
            report.error(format!(
                "{}: Slot \"{}\" bonusSet should be a string",
                file_name, label
            ));
        }
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
