//! Daily advertising spend per ad group.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::AdGroupId;

/// Where a spend figure came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpendSource {
    /// Typed in by an operator.
    #[default]
    Manual,
    /// Pulled from the ad platform.
    Platform,
}

impl SpendSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Platform => "platform",
        }
    }
}

impl fmt::Display for SpendSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpendSource {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(Self::Manual),
            "platform" => Ok(Self::Platform),
            _ => Err(DomainError::UnknownVariant {
                kind: "spend source",
                value: s.to_string(),
            }),
        }
    }
}

/// Spend for one ad group on one day. Keyed by `(date, ad_group_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdSpendRecord {
    pub date: NaiveDate,
    pub ad_group_id: AdGroupId,
    pub spend: Decimal,
    #[serde(default)]
    pub source: SpendSource,
}

impl AdSpendRecord {
    /// # Errors
    /// Returns [`DomainError::NegativeSpend`] for negative spend.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.spend < Decimal::ZERO {
            return Err(DomainError::NegativeSpend { spend: self.spend });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn negative_spend_is_invalid() {
        let record = AdSpendRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            ad_group_id: AdGroupId::new("AG1"),
            spend: dec!(-0.01),
            source: SpendSource::Manual,
        };
        assert_eq!(
            record.validate(),
            Err(DomainError::NegativeSpend { spend: dec!(-0.01) })
        );
    }

    #[test]
    fn source_defaults_to_manual() {
        let record: AdSpendRecord =
            serde_json::from_str(r#"{"date":"2024-01-10","adGroupId":"AG1","spend":"150000"}"#)
                .unwrap();
        assert_eq!(record.source, SpendSource::Manual);
        assert_eq!(record.spend, dec!(150000));
    }
}
