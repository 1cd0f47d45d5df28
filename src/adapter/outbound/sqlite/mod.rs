//! SQLite persistence adapters.
//!
//! Provides SQLite-backed implementations of the ad group, order, spend and
//! snapshot repository ports using Diesel ORM.

pub mod ad_group;
pub mod database;
pub mod order;
pub mod snapshot;
pub mod spend;

pub use ad_group::SqliteAdGroupRepository;
pub use database::{connect, create_pool, run_migrations, DbPool};
pub use order::SqliteOrderRepository;
pub use snapshot::SqliteSnapshotRepository;
pub use spend::SqliteSpendRepository;
