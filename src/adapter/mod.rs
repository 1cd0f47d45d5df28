//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`]: driving adapters (REST server, CLI).
//! - [`outbound`]: driven adapters (SQLite repositories, sheet webhook).

pub mod inbound;
pub mod outbound;
