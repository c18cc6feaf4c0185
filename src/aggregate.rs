//! Aggregator: final ordering and cross-record aggregates
//!
//! The last pipeline stage. Record content passes through unchanged; this
//! is the single place that computes anything spanning the whole group,
//! such as the combined update type a caller reports for a grouped commit.

use crate::domain::{DependencyUpdate, UpdateType};

/// Finalize the ordered record list
///
/// Identity on record content; kept as an explicit stage so cross-record
/// aggregates have exactly one home.
pub fn finalize(records: Vec<DependencyUpdate>) -> Vec<DependencyUpdate> {
    records
}

/// Highest-severity update type across a group of records
///
/// `None` for an empty group.
pub fn combined_update_type(records: &[DependencyUpdate]) -> Option<UpdateType> {
    records.iter().map(|record| record.update_type).max()
}
