//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases.

pub mod forecast;
pub mod ledger;
pub mod snapshot;
pub mod sync;
