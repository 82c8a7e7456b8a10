//! Structured cache keys for panel content.

use std::fmt;

use serde::{Deserialize, Serialize};

use fanhub_cache::Fingerprint;
use fanhub_core::error::Result;
use fanhub_core::types::{Esport, ResourceKind};

/// Identifies one provider call: resource, esport and item count.
///
/// Every parameter that changes the provider's answer is a field, so two
/// different requests can never share an entry. Resources without a count
/// (roster, stats) leave it empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentKey {
    /// Which resource
    pub kind: ResourceKind,
    /// Which esport
    pub esport: Esport,
    /// How many items, for list resources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl ContentKey {
    /// Key for a list resource.
    pub fn list(kind: ResourceKind, esport: Esport, count: usize) -> Self {
        Self {
            kind,
            esport,
            count: Some(count),
        }
    }

    /// Key for a resource that takes no count.
    pub fn single(kind: ResourceKind, esport: Esport) -> Self {
        Self {
            kind,
            esport,
            count: None,
        }
    }

    /// Flat string form, e.g. `news_csgo_6` or `team_lol`.
    pub fn fingerprint(&self) -> Result<Fingerprint> {
        match self.count {
            Some(count) => Fingerprint::from_parts([
                self.kind.as_str(),
                self.esport.as_str(),
                count.to_string().as_str(),
            ]),
            None => Fingerprint::from_parts([self.kind.as_str(), self.esport.as_str()]),
        }
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.count {
            Some(count) => write!(f, "{}_{}_{}", self.kind, self.esport, count),
            None => write!(f, "{}_{}", self.kind, self.esport),
        }
    }
}
