//! Infrastructure configuration modules.

pub mod forecast;
pub mod logging;
pub mod service;
pub mod settings;

pub use settings::Config;
