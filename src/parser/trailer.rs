//! Trailer extractor
//!
//! The update bot appends a machine-readable block near the end of its
//! commit messages, fenced by YAML document markers:
//!
//! ```text
//! Bumps left-pad from 1.2.0 to 1.3.0.
//!
//! ---
//! updated-dependencies:
//! - dependency-name: left-pad
//!   ...fields...
//! ...
//!
//! Signed-off-by: dependabot[bot] <support@github.com>
//! ```
//!
//! This module only isolates the fenced block from the human-readable
//! summary; parsing its internal structure is `parser::record`'s job.

use regex::Regex;
use std::sync::LazyLock;

// Opening "---" line through closing "..." line; tolerant of trailing
// whitespace on the marker lines, CRLF endings, and a missing final newline
static TRAILER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^-{3}[ \t]*\r?\n([\s\S]*?)\r?\n\.{3}[ \t]*(?:\r?\n|$)").unwrap()
});

/// Extract the raw trailer block from a commit message
///
/// Returns the text between the `---` and `...` marker lines, exclusive of
/// the markers, or `None` when the message carries no trailer. The trailer
/// sits near the end of the message, so when the summary itself contains a
/// fenced block the last match wins.
pub fn extract_trailer(commit_message: &str) -> Option<&str> {
    let found = TRAILER_RE
        .captures_iter(commit_message)
        .last()
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str());
    if found.is_none() {
        tracing::debug!("commit message carries no metadata trailer");
    }
    found
}
