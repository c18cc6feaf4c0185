//! Central update record types
//!
//! This module contains the `DependencyUpdate` record produced by the
//! pipeline, along with the closed `UpdateType` and `DependencyType`
//! enumerations it carries.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::AlertState;

/// Root directory used when no directory information is available
pub const ROOT_DIRECTORY: &str = "/";

/// Kind of version change, qualified by semver scope
///
/// Ordered by severity so that the highest update type across a grouped
/// commit can be computed with `Iterator::max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UpdateType {
    /// Version change that does not fit the semver scopes (e.g. equal or
    /// non-numeric versions)
    #[serde(rename = "version-update:semver-other")]
    Other,
    /// Patch-level version change
    #[serde(rename = "version-update:semver-patch")]
    Patch,
    /// Minor-level version change
    #[serde(rename = "version-update:semver-minor")]
    Minor,
    /// Major-level version change
    #[serde(rename = "version-update:semver-major")]
    Major,
}

impl UpdateType {
    /// Parse the qualified update-type string used in commit trailers
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "version-update:semver-major" => Some(UpdateType::Major),
            "version-update:semver-minor" => Some(UpdateType::Minor),
            "version-update:semver-patch" => Some(UpdateType::Patch),
            "version-update:semver-other" => Some(UpdateType::Other),
            _ => None,
        }
    }

    /// Returns the qualified string form used in commit trailers
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateType::Major => "version-update:semver-major",
            UpdateType::Minor => "version-update:semver-minor",
            UpdateType::Patch => "version-update:semver-patch",
            UpdateType::Other => "version-update:semver-other",
        }
    }
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the dependency relates to the project declaring it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DependencyType {
    /// Declared dependency used in production
    #[serde(rename = "direct:production")]
    DirectProduction,
    /// Declared dependency used only for development
    #[serde(rename = "direct:development")]
    DirectDevelopment,
    /// Transitive dependency
    #[serde(rename = "indirect")]
    Indirect,
    /// Relationship not stated in the metadata
    #[serde(rename = "unknown")]
    #[default]
    Unknown,
}

impl DependencyType {
    /// Parse the dependency-type string used in commit trailers
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "direct:production" => Some(DependencyType::DirectProduction),
            "direct:development" => Some(DependencyType::DirectDevelopment),
            "indirect" => Some(DependencyType::Indirect),
            "unknown" => Some(DependencyType::Unknown),
            _ => None,
        }
    }

    /// Returns the string form used in commit trailers
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyType::DirectProduction => "direct:production",
            DependencyType::DirectDevelopment => "direct:development",
            DependencyType::Indirect => "indirect",
            DependencyType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single parsed, reconciled and (optionally) enriched dependency update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyUpdate {
    /// Package name, never empty
    pub name: String,
    /// Version before the update, never empty, not necessarily strict semver
    pub previous_version: String,
    /// Version after the update, never empty
    pub new_version: String,
    /// Kind of version change
    pub update_type: UpdateType,
    /// Relationship of the dependency to the project
    pub dependency_type: DependencyType,
    /// Directory of the manifest that declares the dependency
    pub directory: String,
    /// Package-manager identifier; empty when unknown
    pub ecosystem: String,
    /// Base branch the pull request targets
    pub target_branch: String,
    /// Named update group the dependency was bumped as part of, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_group: Option<String>,
    /// Whether the pull request body announces maintainer changes
    pub maintainer_changes: bool,
    /// Compatibility score in percent (0-100), set by the score lookup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compatibility_score: Option<f64>,
    /// Security alert summary, set by the alert lookup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_state: Option<AlertState>,
}

impl DependencyUpdate {
    /// Checks the validity invariant: name and both versions non-empty
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.previous_version.is_empty() && !self.new_version.is_empty()
    }
}

impl fmt::Display for DependencyUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} [{}]",
            self.name, self.previous_version, self.new_version, self.update_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(name: &str, prev: &str, next: &str) -> DependencyUpdate {
        DependencyUpdate {
            name: name.to_string(),
            previous_version: prev.to_string(),
            new_version: next.to_string(),
            update_type: UpdateType::Patch,
            dependency_type: DependencyType::Unknown,
            directory: ROOT_DIRECTORY.to_string(),
            ecosystem: String::new(),
            target_branch: "main".to_string(),
            dependency_group: None,
            maintainer_changes: false,
            compatibility_score: None,
            alert_state: None,
        }
    }

    #[test]
    fn test_update_type_severity_order() {
        assert!(UpdateType::Major > UpdateType::Minor);
        assert!(UpdateType::Minor > UpdateType::Patch);
        assert!(UpdateType::Patch > UpdateType::Other);
    }

    #[test]
    fn test_update_type_parse_roundtrip() {
        for ty in [
            UpdateType::Major,
            UpdateType::Minor,
            UpdateType::Patch,
            UpdateType::Other,
        ] {
            assert_eq!(UpdateType::parse(ty.as_str()), Some(ty));
        }
        assert_eq!(UpdateType::parse("semver-major"), None);
    }

    #[test]
    fn test_dependency_type_parse() {
        assert_eq!(
            DependencyType::parse("direct:production"),
            Some(DependencyType::DirectProduction)
        );
        assert_eq!(
            DependencyType::parse("direct:development"),
            Some(DependencyType::DirectDevelopment)
        );
        assert_eq!(DependencyType::parse("indirect"), Some(DependencyType::Indirect));
        assert_eq!(DependencyType::parse("peer"), None);
    }

    #[test]
    fn test_validity_invariant() {
        assert!(update("left-pad", "1.2.0", "1.3.0").is_valid());
        assert!(!update("", "1.2.0", "1.3.0").is_valid());
        assert!(!update("left-pad", "", "1.3.0").is_valid());
        assert!(!update("left-pad", "1.2.0", "").is_valid());
    }

    #[test]
    fn test_serialized_field_forms() {
        let json = serde_json::to_value(update("left-pad", "1.2.0", "1.3.0")).unwrap();
        assert_eq!(json["update_type"], "version-update:semver-patch");
        assert_eq!(json["dependency_type"], "unknown");
        assert!(json.get("compatibility_score").is_none());
        assert!(json.get("alert_state").is_none());
    }
}
