//! Outbound adapters (driven side).

pub mod sheets;
pub mod sqlite;
