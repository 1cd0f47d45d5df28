//! Forecast snapshots: on-demand runs, history queries and the periodic job.

pub mod persister;
pub mod scheduler;

pub use persister::SnapshotPersister;
pub use scheduler::{SnapshotScheduleConfig, SnapshotScheduler, SnapshotSchedulerHandle};
