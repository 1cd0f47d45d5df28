//! Forecast model configuration.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::application::forecast::CalibrationWindow;
use crate::domain::{CalibratedConfidenceModel, FixedConfidenceModel, ProjectionModel};
use crate::error::{ConfigError, Result};

/// Which projection model computes confidence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Constant confidence (model version 1).
    Fixed,
    /// Confidence discounted by historical calibration error (version 2).
    #[default]
    Calibrated,
}

impl ModelKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Calibrated => "calibrated",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastConfig {
    #[serde(default)]
    pub model: ModelKind,
    /// Fixed confidence, or the base that calibration discounts.
    #[serde(default = "default_base_confidence")]
    pub base_confidence: Decimal,
    /// Days after which a pending order has settled either way.
    #[serde(default = "default_maturation_days")]
    pub maturation_days: u32,
    /// Settled days compared when calibrating; 0 disables calibration.
    #[serde(default = "default_calibration_lookback_days")]
    pub calibration_lookback_days: u32,
    /// Longest accepted query range, in days.
    #[serde(default = "default_max_range_days")]
    pub max_range_days: u32,
}

fn default_base_confidence() -> Decimal {
    Decimal::new(8, 1) // 0.8
}

const fn default_maturation_days() -> u32 {
    14
}

const fn default_calibration_lookback_days() -> u32 {
    60
}

const fn default_max_range_days() -> u32 {
    366
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            model: ModelKind::default(),
            base_confidence: default_base_confidence(),
            maturation_days: default_maturation_days(),
            calibration_lookback_days: default_calibration_lookback_days(),
            max_range_days: default_max_range_days(),
        }
    }
}

impl ForecastConfig {
    /// Instantiate the configured projection model.
    ///
    /// # Errors
    /// Returns a config error when `base_confidence` is outside `[0, 1]`.
    pub fn build_model(&self) -> Result<Arc<dyn ProjectionModel>> {
        let model: Arc<dyn ProjectionModel> = match self.model {
            ModelKind::Fixed => Arc::new(
                FixedConfidenceModel::try_new(self.base_confidence).map_err(invalid_confidence)?,
            ),
            ModelKind::Calibrated => Arc::new(
                CalibratedConfidenceModel::try_new(self.base_confidence)
                    .map_err(invalid_confidence)?,
            ),
        };
        Ok(model)
    }

    #[must_use]
    pub fn calibration_window(&self) -> CalibrationWindow {
        CalibrationWindow {
            maturation_days: self.maturation_days,
            lookback_days: self.calibration_lookback_days,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.base_confidence < Decimal::ZERO || self.base_confidence > Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                field: "base_confidence",
                reason: "must be between 0 and 1".to_string(),
            }
            .into());
        }
        if self.max_range_days == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_range_days",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

fn invalid_confidence(err: crate::domain::error::DomainError) -> ConfigError {
    ConfigError::InvalidValue {
        field: "base_confidence",
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn default_model_is_calibrated_version_two() {
        let model = ForecastConfig::default().build_model().unwrap();
        assert_eq!(model.name(), "calibrated");
        assert_eq!(model.version(), 2);
    }

    #[test]
    fn fixed_model_is_version_one() {
        let config = ForecastConfig {
            model: ModelKind::Fixed,
            ..ForecastConfig::default()
        };
        assert_eq!(config.build_model().unwrap().version(), 1);
    }

    #[test]
    fn confidence_above_one_is_rejected() {
        let config = ForecastConfig {
            base_confidence: dec!(1.2),
            ..ForecastConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(config.build_model().is_err());
    }
}
