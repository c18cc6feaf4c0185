//! Metadata record parser
//!
//! Converts the isolated trailer block into one raw record per dependency,
//! using the human-readable summary lines of the commit message to fill in
//! versions the trailer omits. When no trailer is usable at all, the
//! summary lines themselves (and as a last resort the PR body) are scanned
//! for the bot's `Bumps X from A to B` phrasing.
//!
//! Parsing is purely textual and deterministic; malformed units are
//! skipped, never fatal.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::{DependencyType, UpdateType};
use crate::parser::grammar::{self, TrailerEntry};
use crate::parser::RawRecord;

// "Bumps [left-pad](https://...) from 1.2.0 to 1.3.0." and the grouped
// variant "Updates `left-pad` from 1.2.0 to 1.3.0"
static BUMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^(?:Bumps?|Updates?) `?\[?([^\]\s`]+)\]?`?(?:\([^)]*\))? from `?(v?\d[^\s`]*?)`? to `?(v?\d[^\s`]*?)`?\.?$",
    )
    .unwrap()
});

// "Update rake requirement from ~> 12.0 to ~> 13.0"
static REQUIREMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^Updates? `?\[?([^\]\s`]+)\]?`?(?:\([^)]*\))? requirement from `?([^\s`]+?)`? to `?([^\s`]+?)`?\.?$",
    )
    .unwrap()
});

/// Parse per-dependency raw records from a commit message and PR body
///
/// Precedence: a usable trailer wins; otherwise the commit message summary
/// lines; otherwise the PR body. Source order is preserved throughout.
pub fn parse_records(trailer: Option<&str>, commit_message: &str, body: &str) -> Vec<RawRecord> {
    if let Some(block) = trailer {
        if let Some(entries) = grammar::parse_trailer(block) {
            let records = from_trailer_entries(entries, commit_message);
            if !records.is_empty() {
                tracing::debug!(count = records.len(), "parsed records from trailer");
                return records;
            }
        }
        tracing::debug!("trailer unusable, falling back to free text");
    }

    let mut records = scan_free_text(commit_message);
    if records.is_empty() {
        records = scan_free_text(body);
        if !records.is_empty() {
            tracing::debug!(count = records.len(), "parsed records from PR body");
        }
    } else {
        tracing::debug!(count = records.len(), "parsed records from summary lines");
    }
    records
}

/// Convert trailer entries into raw records, filling missing versions from
/// the commit message's human-readable bump lines
fn from_trailer_entries(entries: Vec<TrailerEntry>, commit_message: &str) -> Vec<RawRecord> {
    let bump_lines = scan_free_text(commit_message);

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let mut record = RawRecord {
                name: entry.dependency_name,
                previous_version: entry.previous_version,
                new_version: entry.new_version,
                dependency_type: entry.dependency_type.as_deref().and_then(DependencyType::parse),
                update_type: entry.update_type.as_deref().and_then(UpdateType::parse),
                directory: entry.directory,
                ecosystem: entry.ecosystem,
                dependency_group: entry.dependency_group,
            };

            if record.previous_version.is_none() || record.new_version.is_none() {
                // Prefer the bump line naming this dependency; the first
                // entry may also claim the first bump line, since a
                // single-dependency message often abbreviates the name
                let matched = record
                    .name
                    .as_deref()
                    .and_then(|name| {
                        bump_lines.iter().find(|b| b.name.as_deref() == Some(name))
                    })
                    .or_else(|| if index == 0 { bump_lines.first() } else { None });
                if let Some(bump) = matched {
                    if record.previous_version.is_none() {
                        record.previous_version = bump.previous_version.clone();
                    }
                    if record.new_version.is_none() {
                        record.new_version = bump.new_version.clone();
                    }
                }
            }
            record
        })
        .collect()
}

/// Scan free text for bump/requirement lines, one record per matching line
fn scan_free_text(text: &str) -> Vec<RawRecord> {
    let mut records: Vec<(usize, RawRecord)> = Vec::new();

    for caps in BUMP_RE.captures_iter(text) {
        records.push((caps.get(0).map(|m| m.start()).unwrap_or(0), bare_record(&caps)));
    }
    for caps in REQUIREMENT_RE.captures_iter(text) {
        records.push((caps.get(0).map(|m| m.start()).unwrap_or(0), bare_record(&caps)));
    }

    // Two pattern passes over the same text; re-establish line order
    records.sort_by_key(|(offset, _)| *offset);
    records.dedup_by(|(a, _), (b, _)| a == b);
    records.into_iter().map(|(_, record)| record).collect()
}

fn bare_record(caps: &regex::Captures<'_>) -> RawRecord {
    RawRecord {
        name: caps.get(1).map(|m| m.as_str().to_string()),
        previous_version: caps.get(2).map(|m| m.as_str().to_string()),
        new_version: caps.get(3).map(|m| m.as_str().to_string()),
        ..RawRecord::default()
    }
}
