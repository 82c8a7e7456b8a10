//! Esport and social platform identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FanhubError;

// ═══════════════════════════════════════════════════════════════════════════════
// ESPORT
// ═══════════════════════════════════════════════════════════════════════════════

/// A game the organization fields a team in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Esport {
    /// Counter-Strike
    #[default]
    Csgo,
    /// Valorant
    Valorant,
    /// League of Legends
    Lol,
}

impl Esport {
    /// Every supported esport, in display order.
    pub const ALL: [Esport; 3] = [Esport::Csgo, Esport::Valorant, Esport::Lol];

    /// Short lowercase identifier used in URLs and cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Esport::Csgo => "csgo",
            Esport::Valorant => "valorant",
            Esport::Lol => "lol",
        }
    }

    /// Category label shown on news cards.
    pub fn label(&self) -> &'static str {
        match self {
            Esport::Csgo => "CSGO",
            Esport::Valorant => "VALORANT",
            Esport::Lol => "LOL",
        }
    }
}

impl fmt::Display for Esport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Esport {
    type Err = FanhubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csgo" | "cs2" | "cs" => Ok(Esport::Csgo),
            "valorant" => Ok(Esport::Valorant),
            "lol" => Ok(Esport::Lol),
            other => Err(FanhubError::UnknownEsport(other.to_string())),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PLATFORM
// ═══════════════════════════════════════════════════════════════════════════════

/// Social platform a trending topic was picked up from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Twitter / X
    Twitter,
    /// Reddit
    Reddit,
    /// Google Trends
    Google,
}

impl Platform {
    /// Every platform trends are sampled from.
    pub const ALL: [Platform; 3] = [Platform::Twitter, Platform::Reddit, Platform::Google];

    /// Lowercase identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Reddit => "reddit",
            Platform::Google => "google",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = FanhubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "twitter" | "x" => Ok(Platform::Twitter),
            "reddit" => Ok(Platform::Reddit),
            "google" => Ok(Platform::Google),
            other => Err(FanhubError::UnknownPlatform(other.to_string())),
        }
    }
}
