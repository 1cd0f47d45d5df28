//! Terminal output helpers shared by CLI handlers.

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::error::Result;

/// Print `value` as pretty JSON on stdout.
///
/// # Errors
/// Returns an error if the value cannot be serialized.
pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print rows as a table, or a placeholder when there are none.
pub fn table<T: Tabled>(rows: Vec<T>, empty: &str) {
    if rows.is_empty() {
        println!("{empty}");
        return;
    }
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{table}");
}

/// Print a `label: value` line with aligned labels.
pub fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {label:<16} {value}");
}

/// Print a section heading.
pub fn section(title: &str) {
    println!();
    println!("{title}");
}
