//! Core domain models for bump-metadata
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - The central `DependencyUpdate` record with its type enumerations
//! - Security alert summaries attached during enrichment
//! - Branch-derived hints used for gap filling

mod alert;
mod hint;
mod update;

pub use alert::AlertState;
pub use hint::BranchHint;
pub use update::{DependencyType, DependencyUpdate, UpdateType, ROOT_DIRECTORY};
