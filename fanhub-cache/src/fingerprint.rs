//! Flat string keys built from a resource name and its parameters.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use fanhub_core::error::{FanhubError, Result};

const SEPARATOR: char = '_';
const ESCAPE: char = '\\';

/// A non-empty cache key.
///
/// [`Fingerprint::from_parts`] joins parts with `_` and escapes `_` and `\`
/// inside each part, so two different part lists never produce the same
/// fingerprint: `["news", "csgo", "6"]` is `news_csgo_6`, while
/// `["news_csgo", "6"]` is `news\_csgo_6`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Wraps a raw key. Empty or whitespace-only keys are rejected.
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(FanhubError::ValidationError(
                "cache key must not be empty".into(),
            ));
        }
        Ok(Self(raw))
    }

    /// Builds a key from a resource name followed by its parameters.
    pub fn from_parts<I, S>(parts: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = String::new();
        for (i, part) in parts.into_iter().enumerate() {
            if i > 0 {
                out.push(SEPARATOR);
            }
            for c in part.as_ref().chars() {
                if c == SEPARATOR || c == ESCAPE {
                    out.push(ESCAPE);
                }
                out.push(c);
            }
        }
        Self::new(out)
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Derived Hash on a single-field struct hashes exactly like the inner String,
// which keeps lookups by &str consistent with lookups by Fingerprint.
impl Borrow<str> for Fingerprint {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = FanhubError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Fingerprint> for String {
    fn from(value: Fingerprint) -> Self {
        value.0
    }
}
