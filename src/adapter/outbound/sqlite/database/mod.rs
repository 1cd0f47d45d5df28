//! SQLite database modules.
//!
//! Provides database connection management, schema definitions, and
//! Diesel model types for SQLite persistence.

pub mod connection;
pub mod model;
pub mod schema;

pub use connection::{connect, create_pool, run_migrations, DbPool};
