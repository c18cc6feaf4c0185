//! Metadata engine: the single-pass parsing pipeline
//!
//! Wires the stages in fixed order:
//! branch hints -> trailer extraction -> record parsing -> reconciliation
//! -> enrichment -> aggregation. Each invocation is independent and keeps
//! all intermediate state local, so concurrent invocations in one hosting
//! process do not interfere.

use crate::aggregate;
use crate::domain::DependencyUpdate;
use crate::enrich::{self, AlertLookup, ScoreLookup};
use crate::parser;
use crate::reconcile;

/// Marker text in a PR body announcing dependency maintainer changes
const MAINTAINER_CHANGES_MARKER: &str = "Maintainer changes";

/// Parsing pipeline with optionally injected enrichment capabilities
///
/// Stateless across calls; build one per configuration and reuse it freely.
///
/// ```
/// use bump_metadata::MetadataEngine;
///
/// # async fn demo() {
/// let engine = MetadataEngine::new();
/// let updates = engine
///     .parse(
///         "Bumps left-pad from 1.2.0 to 1.3.0.",
///         "",
///         "dependabot/npm_and_yarn/left-pad-1.3.0",
///         "main",
///     )
///     .await;
/// assert_eq!(updates.len(), 1);
/// # }
/// ```
#[derive(Default)]
pub struct MetadataEngine {
    alert_lookup: Option<Box<dyn AlertLookup>>,
    score_lookup: Option<Box<dyn ScoreLookup>>,
}

impl MetadataEngine {
    /// Create an engine without enrichment capabilities
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject a security-alert lookup (builder pattern)
    pub fn with_alert_lookup(mut self, lookup: impl AlertLookup + 'static) -> Self {
        self.alert_lookup = Some(Box::new(lookup));
        self
    }

    /// Inject a compatibility-score lookup (builder pattern)
    pub fn with_score_lookup(mut self, lookup: impl ScoreLookup + 'static) -> Self {
        self.score_lookup = Some(Box::new(lookup));
        self
    }

    /// Parse update records from a pull request's commit message and body
    ///
    /// Best-effort by design: unrecognized input yields an empty list, and
    /// a failing lookup leaves its field absent on the affected record.
    /// The returned order is the order of appearance in the source text.
    pub async fn parse(
        &self,
        commit_message: &str,
        body: &str,
        head_branch: &str,
        base_branch: &str,
    ) -> Vec<DependencyUpdate> {
        let hint = parser::derive_hints(head_branch, base_branch);
        let trailer = parser::extract_trailer(commit_message);
        let raw_records = parser::parse_records(trailer, commit_message, body);
        if raw_records.is_empty() {
            tracing::debug!("no dependency metadata recognized");
            return Vec::new();
        }

        let maintainer_changes = body.contains(MAINTAINER_CHANGES_MARKER);
        let records = reconcile::reconcile(raw_records, hint.as_ref(), base_branch, maintainer_changes);
        let records = enrich::enrich(
            records,
            self.alert_lookup.as_deref(),
            self.score_lookup.as_deref(),
        )
        .await;

        tracing::debug!(count = records.len(), "parsed dependency updates");
        aggregate::finalize(records)
    }
}

/// Parse update records without enrichment capabilities
///
/// Convenience wrapper around [`MetadataEngine`] for the common no-lookup
/// configuration.
pub async fn parse(
    commit_message: &str,
    body: &str,
    head_branch: &str,
    base_branch: &str,
) -> Vec<DependencyUpdate> {
    MetadataEngine::new()
        .parse(commit_message, body, head_branch, base_branch)
        .await
}
