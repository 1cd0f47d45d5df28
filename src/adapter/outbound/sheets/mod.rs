//! Spreadsheet sync adapters.
//!
//! The webhook publisher posts each report as JSON to a receiver (an Apps
//! Script web app or any HTTP endpoint) that writes it into the sheet.

pub mod webhook;

pub use webhook::WebhookSheetPublisher;
