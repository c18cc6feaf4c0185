//! Parsing stages for bot-generated pull request metadata
//!
//! This module provides:
//! - Branch-name hint derivation from the bot's branch convention
//! - Trailer extraction from commit messages
//! - The versioned trailer grammar (parse and render directions)
//! - Record parsing with a free-text fallback path

mod branch;
pub mod grammar;
mod record;
mod trailer;

pub use branch::derive_hints;
pub use grammar::{render_commit_message, TrailerEntry, GRAMMAR_VERSION};
pub use record::parse_records;
pub use trailer::extract_trailer;

use crate::domain::{DependencyType, UpdateType};

/// Untyped per-dependency record as parsed, before reconciliation
///
/// Every field is optional: "not found" is an explicit absence, distinct
/// from an empty string, so the reconciler can tell a missing field from a
/// present-but-empty one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    /// Dependency name
    pub name: Option<String>,
    /// Version before the update
    pub previous_version: Option<String>,
    /// Version after the update
    pub new_version: Option<String>,
    /// Relationship of the dependency to the project, when stated
    pub dependency_type: Option<DependencyType>,
    /// Kind of version change, when stated
    pub update_type: Option<UpdateType>,
    /// Manifest directory, when stated
    pub directory: Option<String>,
    /// Package-manager identifier, when stated
    pub ecosystem: Option<String>,
    /// Named update group, when stated
    pub dependency_group: Option<String>,
}
