//! Profitcast - blended profit and ROAS forecasting for ad groups.
//!
//! Orders placed through ad campaigns settle days after they are placed, so
//! recent revenue is a mix of matured money and pending money that may still
//! be cancelled or refunded. Profitcast blends the two: matured figures count
//! in full, pending figures are scaled by a confidence that a pluggable
//! projection model supplies, and the result is compared against ad spend.
//!
//! # Architecture
//!
//! - [`domain`] - Ad groups, orders, spend, forecast rows, projection models
//! - [`port`] - Repository, publisher and notifier traits
//! - [`application`] - Aggregation, blending, snapshots and sheet sync
//! - [`adapter`] - REST API, CLI, SQLite storage and the sheet webhook
//! - [`infrastructure`] - Configuration and runtime wiring
//!
//! # Example
//!
//! ```no_run
//! use profitcast::application::forecast::ForecastQuery;
//! use profitcast::domain::DateRange;
//! use profitcast::infrastructure::bootstrap::Services;
//! use profitcast::infrastructure::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_or_default("config.toml")?;
//!     let services = Services::open(&config)?;
//!     let range = DateRange::trailing(services.forecast.today(), 7);
//!     let summary = services.forecast.summary(&ForecastQuery::new(range, None))?;
//!     println!("blended ROAS {}", summary.blended_roas);
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
