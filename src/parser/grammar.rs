//! Versioned trailer grammar
//!
//! The trailer block is a YAML fragment with a single top-level
//! `updated-dependencies` sequence, one mapping per dependency:
//!
//! ```yaml
//! updated-dependencies:
//! - dependency-name: left-pad
//!   previous-version: 1.2.0
//!   new-version: 1.3.0
//!   dependency-type: direct:production
//!   update-type: version-update:semver-patch
//!   directory: /api
//!   ecosystem: npm_and_yarn
//!   dependency-group: dev-dependencies
//! ```
//!
//! The grammar is owned by this crate and versioned explicitly: unknown
//! keys are ignored for forward compatibility, missing keys leave fields
//! absent, and a malformed sequence entry is skipped without failing the
//! entries around it. The module also owns the inverse direction, rendering
//! a synthetic commit message from a list of records, so the grammar stays
//! round-trip tested.

use serde::{Deserialize, Serialize};

use crate::domain::DependencyUpdate;

/// Version of the trailer grammar this module reads and writes
pub const GRAMMAR_VERSION: u32 = 1;

/// Key holding the per-dependency sequence in the trailer YAML
const UPDATED_DEPENDENCIES_KEY: &str = "updated-dependencies";

/// One `updated-dependencies` entry, all fields optional
///
/// Every field deserializes through [`scalar_string`], so an unquoted
/// version the YAML reader sees as a number (`new-version: 1.2`) still
/// comes back as the string the bot wrote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TrailerEntry {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar_string")]
    pub dependency_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar_string")]
    pub previous_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar_string")]
    pub new_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar_string")]
    pub dependency_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar_string")]
    pub update_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar_string")]
    pub directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar_string")]
    pub ecosystem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar_string")]
    pub dependency_group: Option<String>,
}

/// Deserialize any YAML scalar as an optional string
///
/// Non-scalar values (sequences, mappings) yield `None` rather than failing
/// the whole entry.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }))
}

/// Parse a raw trailer block into its entries, skipping malformed ones
///
/// Returns `None` when the block as a whole is not valid YAML or has no
/// `updated-dependencies` sequence; returns the well-formed entries
/// otherwise, even when some entries had to be skipped.
pub fn parse_trailer(block: &str) -> Option<Vec<TrailerEntry>> {
    let doc: serde_yaml::Value = match serde_yaml::from_str(block) {
        Ok(doc) => doc,
        Err(err) => {
            tracing::warn!(error = %err, "trailer block is not valid YAML");
            return None;
        }
    };
    let entries = doc.get(UPDATED_DEPENDENCIES_KEY)?.as_sequence()?;

    let mut parsed = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().cloned().enumerate() {
        match serde_yaml::from_value::<TrailerEntry>(entry) {
            Ok(entry) => parsed.push(entry),
            Err(err) => {
                tracing::warn!(index, error = %err, "skipping malformed trailer entry");
            }
        }
    }
    Some(parsed)
}

impl From<&DependencyUpdate> for TrailerEntry {
    fn from(update: &DependencyUpdate) -> Self {
        TrailerEntry {
            dependency_name: Some(update.name.clone()),
            previous_version: Some(update.previous_version.clone()),
            new_version: Some(update.new_version.clone()),
            dependency_type: Some(update.dependency_type.as_str().to_string()),
            update_type: Some(update.update_type.as_str().to_string()),
            directory: Some(update.directory.clone()),
            ecosystem: if update.ecosystem.is_empty() {
                None
            } else {
                Some(update.ecosystem.clone())
            },
            dependency_group: update.dependency_group.clone(),
        }
    }
}

#[derive(Serialize)]
struct TrailerDocument {
    #[serde(rename = "updated-dependencies")]
    updated_dependencies: Vec<TrailerEntry>,
}

/// Render a synthetic bot-style commit message for a list of updates
///
/// The output carries a human-readable bump line per dependency followed by
/// a grammar-v1 trailer, and parses back to the same records for every
/// field the grammar encodes.
pub fn render_commit_message(updates: &[DependencyUpdate]) -> String {
    let mut message = String::new();
    for update in updates {
        message.push_str(&format!(
            "Bumps {} from {} to {}.\n",
            update.name, update.previous_version, update.new_version
        ));
    }
    message.push('\n');

    let doc = TrailerDocument {
        updated_dependencies: updates.iter().map(TrailerEntry::from).collect(),
    };
    let yaml = serde_yaml::to_string(&doc).unwrap_or_default();

    message.push_str("---\n");
    message.push_str(&yaml);
    if !yaml.ends_with('\n') {
        message.push('\n');
    }
    message.push_str("...\n");
    message.push_str("\nSigned-off-by: dependabot[bot] <support@github.com>\n");
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_entry() {
        let block = "\
updated-dependencies:
- dependency-name: left-pad
  previous-version: 1.2.0
  new-version: 1.3.0
  dependency-type: direct:production
  update-type: version-update:semver-patch
";
        let entries = parse_trailer(block).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].dependency_name.as_deref(), Some("left-pad"));
        assert_eq!(entries[0].previous_version.as_deref(), Some("1.2.0"));
        assert_eq!(entries[0].new_version.as_deref(), Some("1.3.0"));
        assert_eq!(entries[0].directory, None);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let block = "\
updated-dependencies:
- dependency-name: chalk
  new-version: 4.1.0
  shiny-future-field: whatever
";
        let entries = parse_trailer(block).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].dependency_name.as_deref(), Some("chalk"));
    }

    #[test]
    fn test_malformed_entry_is_skipped() {
        let block = "\
updated-dependencies:
- dependency-name: left-pad
  new-version: 1.3.0
- not a mapping at all
- dependency-name: chalk
  new-version: 4.1.0
";
        let entries = parse_trailer(block).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].dependency_name.as_deref(), Some("left-pad"));
        assert_eq!(entries[1].dependency_name.as_deref(), Some("chalk"));
    }

    #[test]
    fn test_non_scalar_field_becomes_absent() {
        let block = "\
updated-dependencies:
- dependency-name: [not, a, scalar]
  new-version: 1.3.0
";
        let entries = parse_trailer(block).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].dependency_name, None);
        assert_eq!(entries[0].new_version.as_deref(), Some("1.3.0"));
    }

    #[test]
    fn test_invalid_yaml_yields_nothing() {
        assert!(parse_trailer("updated-dependencies: [unclosed").is_none());
        assert!(parse_trailer("just some prose").is_none());
    }

    #[test]
    fn test_missing_sequence_yields_nothing() {
        assert!(parse_trailer("other-key: 1").is_none());
    }

    #[test]
    fn test_version_numbers_parse_as_strings() {
        // "1.2" without quoting is a YAML float; the grammar still reads it
        // back as the version string the bot wrote
        let block = "\
updated-dependencies:
- dependency-name: left-pad
  previous-version: 1.2
  new-version: 1.3.0
";
        let entries = parse_trailer(block).unwrap();
        assert_eq!(entries[0].previous_version.as_deref(), Some("1.2"));
        assert_eq!(entries[0].new_version.as_deref(), Some("1.3.0"));
    }

    #[test]
    fn test_rendered_message_reparses() {
        let block = "\
updated-dependencies:
- dependency-name: left-pad
  previous-version: 1.2.0
  new-version: 1.3.0
  dependency-type: direct:production
  update-type: version-update:semver-patch
";
        let entries = parse_trailer(block).unwrap();
        let doc = TrailerDocument {
            updated_dependencies: entries.clone(),
        };
        let yaml = serde_yaml::to_string(&doc).unwrap();
        let reparsed = parse_trailer(&yaml).unwrap();
        assert_eq!(reparsed, entries);
    }
}
