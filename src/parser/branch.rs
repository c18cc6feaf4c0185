//! Branch-name hint deriver
//!
//! The update bot encodes ecosystem and manifest directory in its branch
//! names: the branch starts with the literal `dependabot`, followed by a
//! one-character delimiter (normally `/`, but configurable in the bot),
//! followed by delimiter-separated segments:
//!
//! - `dependabot/npm_and_yarn/left-pad-1.3.0`
//! - `dependabot/cargo/api/serde-1.0.200`
//! - `dependabot|bundler|rails-7.1.3` (custom delimiter)
//!
//! Not every triggering event carries a bot-shaped branch name, so a
//! non-matching name is not an error; it simply yields no hint.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::BranchHint;

/// Prefix every automation branch starts with
const BRANCH_PREFIX: &str = "dependabot";

// Version-like suffix on the final branch segment, e.g. "-1.3.0" or
// "-0d3f4b5c6d" on group branches
static VERSION_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-v?\d[\w.+]*$").unwrap());

/// Derive ecosystem/directory/group hints from the PR branch names
///
/// Only the head branch carries encoded information; the base branch is
/// accepted for interface completeness and to reject the degenerate case of
/// a PR whose head equals its base. Returns `None` whenever the head branch
/// does not follow the bot's naming convention.
pub fn derive_hints(head_branch: &str, base_branch: &str) -> Option<BranchHint> {
    if head_branch == base_branch {
        return None;
    }
    let rest = head_branch.strip_prefix(BRANCH_PREFIX)?;
    let delimiter = rest.chars().next()?;
    if delimiter.is_alphanumeric() {
        return None;
    }
    let mut chunks = rest[delimiter.len_utf8()..].split(delimiter);

    let ecosystem = chunks.next().filter(|c| !c.is_empty())?.to_string();
    let segments: Vec<String> = chunks.map(str::to_string).collect();
    if segments.iter().any(String::is_empty) {
        return None;
    }

    let group_candidate = group_candidate(segments.last()?);

    tracing::debug!(
        ecosystem = %ecosystem,
        segments = segments.len(),
        "derived branch hint"
    );

    Some(BranchHint {
        ecosystem,
        delimiter,
        segments,
        group_candidate,
    })
}

/// Final branch segment with its trailing version-like chunk stripped
///
/// Group branches end in a generated id (`dev-dependencies-0d3f4b5c6d`),
/// single-dependency branches in a version (`left-pad-1.3.0`). Both are
/// stripped the same way; the reconciler cross-checks the candidate against
/// the dependency name before trusting it as a group.
fn group_candidate(last_segment: &str) -> Option<String> {
    let stripped = VERSION_SUFFIX_RE.replace(last_segment, "");
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.into_owned())
    }
}
