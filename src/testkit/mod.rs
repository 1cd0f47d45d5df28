//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`store`]: `InMemoryStore`, implementing every repository port.
//! - [`sink`]: recording [`SheetPublisher`](crate::port::outbound::SheetPublisher)
//!   and [`ChangeNotifier`](crate::port::outbound::ChangeNotifier) doubles.
//! - [`domain`]: builders for orders, spend and ad groups.

pub mod domain;
pub mod sink;
pub mod store;

pub use sink::{CountingNotifier, RecordingPublisher};
pub use store::InMemoryStore;
