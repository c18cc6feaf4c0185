//! Enrichment coordinator
//!
//! Augments reconciled records with externally sourced data through two
//! optional, caller-injected capabilities: a security-alert lookup and a
//! compatibility-score lookup. The coordinator owns no transport; it only
//! awaits whatever the capability returns. A failing lookup leaves the
//! corresponding field absent on that record and never disturbs the other
//! records, and the output order always equals the input order regardless
//! of lookup completion timing.

use async_trait::async_trait;
use futures::future::join_all;

use crate::domain::{AlertState, DependencyUpdate};
use crate::error::LookupError;

/// Capability resolving the security alert a dependency update addresses
#[async_trait]
pub trait AlertLookup: Send + Sync {
    /// Look up the alert for a dependency at its updated version
    ///
    /// `Ok(None)` means the lookup ran and found nothing; `Err` means it
    /// could not answer. Both leave the record's `alert_state` absent.
    async fn alert(
        &self,
        name: &str,
        version: &str,
        directory: &str,
    ) -> Result<Option<AlertState>, LookupError>;
}

/// Capability resolving a compatibility score for an update record
#[async_trait]
pub trait ScoreLookup: Send + Sync {
    /// Look up the compatibility score (0-100) for the given update
    async fn score(&self, update: &DependencyUpdate) -> Result<Option<f64>, LookupError>;
}

/// Enrich records through the supplied lookups
///
/// An absent capability is a valid configuration: the corresponding field
/// stays absent on every record and no call is made. Per-record lookups run
/// concurrently; results are reassembled by input index.
pub async fn enrich(
    records: Vec<DependencyUpdate>,
    alert_lookup: Option<&dyn AlertLookup>,
    score_lookup: Option<&dyn ScoreLookup>,
) -> Vec<DependencyUpdate> {
    if alert_lookup.is_none() && score_lookup.is_none() {
        return records;
    }

    let tasks = records.into_iter().map(|record| async move {
        enrich_one(record, alert_lookup, score_lookup).await
    });
    join_all(tasks).await
}

async fn enrich_one(
    mut record: DependencyUpdate,
    alert_lookup: Option<&dyn AlertLookup>,
    score_lookup: Option<&dyn ScoreLookup>,
) -> DependencyUpdate {
    if let Some(lookup) = alert_lookup {
        match lookup
            .alert(&record.name, &record.new_version, &record.directory)
            .await
        {
            Ok(state) => record.alert_state = state,
            Err(err) => {
                tracing::warn!(dependency = %record.name, error = %err, "alert lookup failed");
            }
        }
    }
    if let Some(lookup) = score_lookup {
        match lookup.score(&record).await {
            Ok(score) => record.compatibility_score = score,
            Err(err) => {
                tracing::warn!(dependency = %record.name, error = %err, "score lookup failed");
            }
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DependencyType, UpdateType};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn update(name: &str) -> DependencyUpdate {
        DependencyUpdate {
            name: name.to_string(),
            previous_version: "1.0.0".to_string(),
            new_version: "1.0.1".to_string(),
            update_type: UpdateType::Patch,
            dependency_type: DependencyType::Unknown,
            directory: "/".to_string(),
            ecosystem: String::new(),
            target_branch: "main".to_string(),
            dependency_group: None,
            maintainer_changes: false,
            compatibility_score: None,
            alert_state: None,
        }
    }

    struct CountingAlertLookup {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AlertLookup for CountingAlertLookup {
        async fn alert(
            &self,
            _name: &str,
            _version: &str,
            _directory: &str,
        ) -> Result<Option<AlertState>, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(AlertState::new("FIXED", "GHSA-test", 5.0)))
        }
    }

    /// Scores every dependency except "chalk", which it rejects
    struct PartialScoreLookup;

    #[async_trait]
    impl ScoreLookup for PartialScoreLookup {
        async fn score(&self, update: &DependencyUpdate) -> Result<Option<f64>, LookupError> {
            if update.name == "chalk" {
                Err(LookupError::rejected("chalk", "HTTP 500"))
            } else {
                Ok(Some(96.0))
            }
        }
    }

    /// Completes later for earlier records, to exercise order stability
    struct SlowFirstScoreLookup;

    #[async_trait]
    impl ScoreLookup for SlowFirstScoreLookup {
        async fn score(&self, update: &DependencyUpdate) -> Result<Option<f64>, LookupError> {
            let delay = if update.name == "left-pad" { 30 } else { 1 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(Some(delay as f64))
        }
    }

    #[tokio::test]
    async fn test_no_lookups_is_identity() {
        let records = vec![update("left-pad"), update("chalk")];
        let enriched = enrich(records.clone(), None, None).await;
        assert_eq!(enriched, records);
    }

    #[tokio::test]
    async fn test_alert_lookup_called_once_per_record() {
        let lookup = CountingAlertLookup {
            calls: AtomicUsize::new(0),
        };
        let enriched = enrich(
            vec![update("left-pad"), update("chalk")],
            Some(&lookup),
            None,
        )
        .await;
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 2);
        assert!(enriched.iter().all(|u| u.alert_state.is_some()));
        assert!(enriched.iter().all(|u| u.compatibility_score.is_none()));
    }

    #[tokio::test]
    async fn test_failing_lookup_is_isolated_per_record() {
        let enriched = enrich(
            vec![update("left-pad"), update("chalk")],
            None,
            Some(&PartialScoreLookup),
        )
        .await;
        assert_eq!(enriched[0].compatibility_score, Some(96.0));
        assert_eq!(enriched[1].compatibility_score, None);
    }

    #[tokio::test]
    async fn test_output_order_independent_of_completion_order() {
        let enriched = enrich(
            vec![update("left-pad"), update("chalk")],
            None,
            Some(&SlowFirstScoreLookup),
        )
        .await;
        assert_eq!(enriched[0].name, "left-pad");
        assert_eq!(enriched[0].compatibility_score, Some(30.0));
        assert_eq!(enriched[1].name, "chalk");
        assert_eq!(enriched[1].compatibility_score, Some(1.0));
    }
}
