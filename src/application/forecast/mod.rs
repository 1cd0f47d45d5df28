//! Blended profit forecasting.
//!
//! ```text
//! OrderRepository ─┐
//!                  ├─> Aggregator ──> ProjectionEstimator ──> blender ──> rows / summary
//! AdSpendRepository┘    (baselines)    (model + calibration)
//! ```

pub mod aggregator;
pub mod blender;
pub mod projection;
pub mod service;

pub use aggregator::{Aggregator, Baseline, ForecastKey};
pub use projection::{CalibrationWindow, ProjectionEstimator};
pub use service::{ForecastQuery, ForecastService, Today};
