//! Storage-agnostic forecast domain.

pub mod ad_group;
pub mod error;
pub mod forecast;
pub mod id;
pub mod order;
pub mod projection;
pub mod range;
pub mod snapshot;
pub mod spend;
pub mod summary;

pub use ad_group::{AdGroup, Platform};
pub use forecast::{BlendedRow, DailyAdGroupForecastRow};
pub use id::{AdGroupId, OrderId};
pub use order::{Maturity, Order, OrderStatus};
pub use projection::{
    Calibration, CalibratedConfidenceModel, FixedConfidenceModel, Projection, ProjectionInput,
    ProjectionModel,
};
pub use range::DateRange;
pub use snapshot::{ForecastSnapshot, SnapshotOutcome, SnapshotRunReport};
pub use spend::{AdSpendRecord, SpendSource};
pub use summary::{ForecastReport, ForecastSummary};
