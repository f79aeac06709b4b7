// ── Shared identity types ──

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Anything stored in a keyed collection: has a stable string id,
/// unique within its collection.
pub trait Entity {
    fn id(&self) -> &str;
}

/// MAC address, normalized to lowercase colon-separated form
/// (`aa:bb:cc:dd:ee:ff`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MacAddress(String);

impl MacAddress {
    /// Create a normalized MAC address from any common format.
    /// Accepts colon-separated, dash-separated, or mixed case.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let normalized = raw.as_ref().to_lowercase().replace('-', ":");
        Self(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last three octets, handy as a short display fallback.
    pub fn suffix(&self) -> &str {
        let s = self.0.as_str();
        s.get(s.len().saturating_sub(8)..).unwrap_or(s)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MacAddress {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn mac_normalizes_dashes_and_case() {
        let mac = MacAddress::new("AA-BB-CC-DD-EE-FF");
        assert_eq!(mac.as_str(), "aa:bb:cc:dd:ee:ff");
    }

    #[test]
    fn mac_suffix() {
        let mac = MacAddress::new("aa:bb:cc:dd:ee:ff");
        assert_eq!(mac.suffix(), "dd:ee:ff");
    }

    #[test]
    fn mac_from_str() {
        let mac: MacAddress = "AA:BB:CC:01:07:13".parse().unwrap();
        assert_eq!(mac.to_string(), "aa:bb:cc:01:07:13");
    }
}
