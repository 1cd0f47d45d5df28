//! Projection models: how much of a day's pending revenue is expected to mature.
//!
//! The model is a pluggable strategy. Each implementation carries a monotonic
//! version that is stamped onto every row it produces, so snapshots computed by
//! different models can be told apart.

use std::fmt::Debug;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::DomainError;
use super::id::AdGroupId;

/// Clamp a value into `[0, 1]`.
#[must_use]
pub fn clamp_unit(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO).min(Decimal::ONE)
}

/// Historical accuracy of past projections for one ad group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Calibration {
    /// `Σ|predicted − actual| / Σactual`, clamped to `[0, 1]`.
    pub error: Decimal,
    /// Number of historical `(date, ad group)` samples behind `error`.
    pub samples: usize,
}

impl Calibration {
    /// Compare past predictions with what actually matured.
    ///
    /// With no samples the error is zero. When nothing matured but something
    /// was predicted the projection was entirely wrong, so the error is one.
    #[must_use]
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Decimal, Decimal)>,
    {
        let mut deviation = Decimal::ZERO;
        let mut predicted_total = Decimal::ZERO;
        let mut actual_total = Decimal::ZERO;
        let mut samples = 0;

        for (predicted, actual) in pairs {
            deviation += (predicted - actual).abs();
            predicted_total += predicted;
            actual_total += actual;
            samples += 1;
        }

        let error = if samples == 0 {
            Decimal::ZERO
        } else if actual_total.is_zero() {
            if predicted_total.is_zero() {
                Decimal::ZERO
            } else {
                Decimal::ONE
            }
        } else {
            clamp_unit(deviation.checked_div(actual_total).unwrap_or(Decimal::ONE))
        };

        Self {
            error: error.round_dp(4),
            samples,
        }
    }
}

/// Input to a projection for one forecast key.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionInput<'a> {
    pub date: NaiveDate,
    pub ad_group_id: &'a AdGroupId,
    pub calibration: Calibration,
}

/// Output of a projection model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    pub confidence: Decimal,
    pub calibration_error: Decimal,
}

/// Strategy for estimating the confidence applied to pending orders.
pub trait ProjectionModel: Send + Sync + Debug {
    /// Short stable name, used in logs and snapshot reports.
    fn name(&self) -> &'static str;

    /// Monotonic version stamped on every row this model produces.
    fn version(&self) -> u32;

    /// Whether the model consumes historical calibration data.
    fn uses_calibration(&self) -> bool {
        false
    }

    fn estimate(&self, input: &ProjectionInput<'_>) -> Projection;
}

/// Applies one constant confidence everywhere.
#[derive(Debug, Clone)]
pub struct FixedConfidenceModel {
    confidence: Decimal,
}

impl FixedConfidenceModel {
    pub const VERSION: u32 = 1;

    /// # Errors
    /// Returns [`DomainError::OutOfUnitRange`] unless `confidence` is in `[0, 1]`.
    pub fn try_new(confidence: Decimal) -> Result<Self, DomainError> {
        ensure_unit("confidence", confidence)?;
        Ok(Self { confidence })
    }
}

impl ProjectionModel for FixedConfidenceModel {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn version(&self) -> u32 {
        Self::VERSION
    }

    fn estimate(&self, _input: &ProjectionInput<'_>) -> Projection {
        Projection {
            confidence: self.confidence,
            calibration_error: Decimal::ZERO,
        }
    }
}

/// Scales a base confidence down by each ad group's calibration error.
///
/// `confidence = base × (1 − calibration_error)`.
#[derive(Debug, Clone)]
pub struct CalibratedConfidenceModel {
    base_confidence: Decimal,
}

impl CalibratedConfidenceModel {
    pub const VERSION: u32 = 2;

    /// # Errors
    /// Returns [`DomainError::OutOfUnitRange`] unless `base_confidence` is in `[0, 1]`.
    pub fn try_new(base_confidence: Decimal) -> Result<Self, DomainError> {
        ensure_unit("base_confidence", base_confidence)?;
        Ok(Self { base_confidence })
    }
}

impl ProjectionModel for CalibratedConfidenceModel {
    fn name(&self) -> &'static str {
        "calibrated"
    }

    fn version(&self) -> u32 {
        Self::VERSION
    }

    fn uses_calibration(&self) -> bool {
        true
    }

    fn estimate(&self, input: &ProjectionInput<'_>) -> Projection {
        let error = clamp_unit(input.calibration.error);
        let confidence = clamp_unit(self.base_confidence * (Decimal::ONE - error)).round_dp(4);
        Projection {
            confidence,
            calibration_error: error,
        }
    }
}

fn ensure_unit(field: &'static str, value: Decimal) -> Result<(), DomainError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(DomainError::OutOfUnitRange { field, value });
    }
    Ok(())
}
