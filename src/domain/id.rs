//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Ad group identifier - newtype for type safety.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors. Deserialization validates like [`AdGroupId::parse`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AdGroupId(String);

impl AdGroupId {
    /// Create a new `AdGroupId` without validation.
    ///
    /// Intended for values read back from storage.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse user input, trimming whitespace and rejecting empty ids.
    ///
    /// # Errors
    /// Returns [`DomainError::EmptyId`] if nothing remains after trimming.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyId { kind: "ad group" });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the ad group ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AdGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AdGroupId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<AdGroupId> for String {
    fn from(id: AdGroupId) -> Self {
        id.0
    }
}

impl From<&str> for AdGroupId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Order identifier - newtype for type safety.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderId(String);

impl OrderId {
    /// Create a new `OrderId` without validation.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse user input, trimming whitespace and rejecting empty ids.
    ///
    /// # Errors
    /// Returns [`DomainError::EmptyId`] if nothing remains after trimming.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyId { kind: "order" });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the order ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for OrderId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<OrderId> for String {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let id = AdGroupId::parse("  AG1 ").unwrap();
        assert_eq!(id.as_str(), "AG1");
    }

    #[test]
    fn parse_rejects_blank() {
        assert_eq!(
            AdGroupId::parse("   "),
            Err(DomainError::EmptyId { kind: "ad group" })
        );
        assert_eq!(OrderId::parse(""), Err(DomainError::EmptyId { kind: "order" }));
    }

    #[test]
    fn deserialize_validates() {
        let ok: AdGroupId = serde_json::from_str("\"AG7\"").unwrap();
        assert_eq!(ok, AdGroupId::new("AG7"));

        let err = serde_json::from_str::<AdGroupId>("\"  \"");
        assert!(err.is_err());
    }

    #[test]
    fn ids_order_lexicographically() {
        let mut ids = vec![AdGroupId::new("b"), AdGroupId::new("a")];
        ids.sort();
        assert_eq!(ids[0].as_str(), "a");
    }
}
