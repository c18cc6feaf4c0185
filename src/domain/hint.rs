//! Branch-derived hint data
//!
//! A `BranchHint` is a read-only view of the information the update bot
//! encodes in its branch names. It only ever fills gaps left by the commit
//! metadata; an explicitly parsed field always wins over a hint.

use serde::{Deserialize, Serialize};

use super::update::ROOT_DIRECTORY;

/// Hints decoded from an automation-generated head branch name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchHint {
    /// Package-manager identifier encoded as the second branch segment
    pub ecosystem: String,
    /// Delimiter the branch name uses between segments
    pub delimiter: char,
    /// Branch segments after the ecosystem, including the final
    /// name-version (or group-name) segment
    pub segments: Vec<String>,
    /// Candidate update-group name decoded from the final segment; may
    /// coincide with a dependency name on single-dependency branches, so
    /// consumers must cross-check before trusting it
    pub group_candidate: Option<String>,
}

impl BranchHint {
    /// Directory of the manifest for a given dependency name
    ///
    /// Dependency names may themselves contain the branch delimiter (scoped
    /// npm packages such as `@types/node`), so the number of trailing
    /// segments occupied by the name depends on the name being resolved.
    pub fn directory_for(&self, dependency_name: &str) -> String {
        let name_segments = 1 + dependency_name.matches('/').count();
        let take = self.segments.len().saturating_sub(name_segments);
        if take == 0 {
            return ROOT_DIRECTORY.to_string();
        }
        let mut dir = String::from(ROOT_DIRECTORY);
        for (i, segment) in self.segments[..take].iter().enumerate() {
            if i > 0 {
                dir.push(self.delimiter);
            }
            dir.push_str(segment);
        }
        dir
    }
}
