//! Ad groups: the unit every forecast row is keyed by.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::AdGroupId;

/// Advertising platform an ad group runs on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Google,
    Tiktok,
    #[default]
    Other,
}

impl Platform {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Google => "google",
            Self::Tiktok => "tiktok",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "facebook" => Ok(Self::Facebook),
            "google" => Ok(Self::Google),
            "tiktok" => Ok(Self::Tiktok),
            "other" => Ok(Self::Other),
            _ => Err(DomainError::UnknownVariant {
                kind: "platform",
                value: s.to_string(),
            }),
        }
    }
}

/// A registered ad group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdGroup {
    pub id: AdGroupId,
    pub name: String,
    #[serde(default)]
    pub platform: Platform,
}

impl AdGroup {
    /// Check invariants not enforced by the type system.
    ///
    /// # Errors
    /// Returns [`DomainError::EmptyName`] for a blank name.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::EmptyName);
        }
        Ok(())
    }
}
