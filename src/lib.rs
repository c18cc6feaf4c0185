//! bump-metadata - Update metadata parser and enrichment engine
//!
//! This library extracts machine-readable dependency-update facts from the
//! commit message and description of a pull request opened by an automated
//! dependency-update bot:
//! - Branch-name hints (ecosystem, directory, update group)
//! - The structured trailer block embedded in commit messages
//! - A free-text fallback for trailer-less messages
//! - Reconciliation of parsed records against branch hints
//! - Optional asynchronous enrichment with security alerts and
//!   compatibility scores through caller-injected lookups

pub mod aggregate;
pub mod domain;
pub mod enrich;
pub mod engine;
pub mod error;
pub mod parser;
pub mod reconcile;

pub use domain::{AlertState, BranchHint, DependencyType, DependencyUpdate, UpdateType};
pub use engine::{parse, MetadataEngine};
pub use enrich::{AlertLookup, ScoreLookup};
pub use error::LookupError;
