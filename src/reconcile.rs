//! Reconciler: raw records + branch hints -> validated update records
//!
//! Fills gaps left by the parser from the branch hint, computes the update
//! type when the metadata did not state one, and drops records that fail
//! the validity invariant (non-empty name and versions). A hint never
//! overrides an explicitly parsed field.

use semver::Version;

use crate::domain::{
    BranchHint, DependencyType, DependencyUpdate, UpdateType, ROOT_DIRECTORY,
};
use crate::parser::RawRecord;

/// Reconcile parsed records against branch-derived hints
///
/// `target_branch` and `maintainer_changes` are pass-through context from
/// the pull request, stamped onto every surviving record.
pub fn reconcile(
    records: Vec<RawRecord>,
    hint: Option<&BranchHint>,
    target_branch: &str,
    maintainer_changes: bool,
) -> Vec<DependencyUpdate> {
    records
        .into_iter()
        .filter_map(|record| resolve(record, hint, target_branch, maintainer_changes))
        .collect()
}

fn resolve(
    record: RawRecord,
    hint: Option<&BranchHint>,
    target_branch: &str,
    maintainer_changes: bool,
) -> Option<DependencyUpdate> {
    let name = record.name.filter(|n| !n.is_empty())?;
    let previous_version = record.previous_version.filter(|v| !v.is_empty())?;
    let new_version = record.new_version.filter(|v| !v.is_empty())?;

    let directory = record
        .directory
        .filter(|d| !d.is_empty())
        .or_else(|| hint.map(|h| h.directory_for(&name)))
        .unwrap_or_else(|| ROOT_DIRECTORY.to_string());

    let ecosystem = record
        .ecosystem
        .filter(|e| !e.is_empty())
        .or_else(|| hint.map(|h| h.ecosystem.clone()))
        .unwrap_or_default();

    // The branch-derived group candidate is only trusted when it is not
    // simply this dependency's own name (single-dependency branches encode
    // name-version in the same position a group name would occupy); for
    // names containing '/' the branch only carries the last path component
    let name_tail = name.rsplit('/').next().unwrap_or(&name);
    let dependency_group = record.dependency_group.filter(|g| !g.is_empty()).or_else(|| {
        hint.and_then(|h| h.group_candidate.clone())
            .filter(|candidate| candidate != &name && candidate != name_tail)
    });

    let update_type = record
        .update_type
        .unwrap_or_else(|| update_type_between(&previous_version, &new_version));

    Some(DependencyUpdate {
        name,
        previous_version,
        new_version,
        update_type,
        dependency_type: record.dependency_type.unwrap_or(DependencyType::Unknown),
        directory,
        ecosystem,
        target_branch: target_branch.to_string(),
        dependency_group,
        maintainer_changes,
        compatibility_score: None,
        alert_state: None,
    })
}

/// Classify the version change between two version strings
///
/// Strict semver versions are compared field by field; anything else falls
/// back to a lenient comparison of numeric segments, so ecosystem-specific
/// strings like `v2.1` or `1.2.3.4` still classify. Equal or non-numeric
/// versions classify as `Other`.
pub fn update_type_between(previous: &str, next: &str) -> UpdateType {
    let prev = previous.strip_prefix('v').unwrap_or(previous);
    let next = next.strip_prefix('v').unwrap_or(next);

    if let (Ok(a), Ok(b)) = (Version::parse(prev), Version::parse(next)) {
        return if a.major != b.major {
            UpdateType::Major
        } else if a.minor != b.minor {
            UpdateType::Minor
        } else if a.patch != b.patch || a.pre != b.pre {
            UpdateType::Patch
        } else {
            UpdateType::Other
        };
    }

    let parts = |s: &str| -> Vec<u64> {
        s.split(['.', '-']).map_while(|p| p.parse().ok()).collect()
    };
    let a = parts(prev);
    let b = parts(next);
    if a.is_empty() || b.is_empty() {
        return UpdateType::Other;
    }

    for (index, (pa, pb)) in a.iter().zip(b.iter()).enumerate() {
        if pa != pb {
            return match index {
                0 => UpdateType::Major,
                1 => UpdateType::Minor,
                _ => UpdateType::Patch,
            };
        }
    }
    if a.len() != b.len() {
        // One version carries extra segments, e.g. 1.2 -> 1.2.1
        return match a.len().min(b.len()) {
            0 => UpdateType::Major,
            1 => UpdateType::Minor,
            _ => UpdateType::Patch,
        };
    }
    UpdateType::Other
}
