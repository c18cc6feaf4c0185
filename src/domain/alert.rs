//! Security alert summary attached to an update record

use serde::{Deserialize, Serialize};
use std::fmt;

/// Summary of the security alert resolved by an update, as reported by the
/// alert lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertState {
    /// Alert lifecycle state (e.g. "OPEN", "FIXED", "DISMISSED")
    pub state: String,
    /// GHSA advisory identifier, empty when the lookup found none
    pub ghsa_id: String,
    /// CVSS base score (0.0 when unscored)
    pub cvss: f64,
}

impl AlertState {
    /// Create a new alert summary
    pub fn new(state: impl Into<String>, ghsa_id: impl Into<String>, cvss: f64) -> Self {
        Self {
            state: state.into(),
            ghsa_id: ghsa_id.into(),
            cvss,
        }
    }
}

impl fmt::Display for AlertState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} (cvss {})", self.state, self.ghsa_id, self.cvss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let alert = AlertState::new("FIXED", "GHSA-xxxx-yyyy-zzzz", 7.5);
        assert_eq!(alert.state, "FIXED");
        assert_eq!(alert.ghsa_id, "GHSA-xxxx-yyyy-zzzz");
        assert_eq!(alert.cvss, 7.5);
    }

    #[test]
    fn test_display() {
        let alert = AlertState::new("OPEN", "GHSA-abcd-1234-efgh", 9.8);
        assert_eq!(alert.to_string(), "OPEN GHSA-abcd-1234-efgh (cvss 9.8)");
    }
}
