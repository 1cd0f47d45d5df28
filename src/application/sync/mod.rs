//! Outbound sync of forecast reports to external spreadsheets.

mod debounce;

pub use debounce::{SheetSyncConfig, SheetSyncHandle, SheetSyncScheduler};
