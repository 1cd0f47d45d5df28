//! `snapshot`: materialize forecast rows for a day or range.

use tokio::task;

use super::{output, SnapshotArgs};
use crate::domain::DateRange;
use crate::error::Result;
use crate::infrastructure::bootstrap::Services;
use crate::infrastructure::config::settings::Config;

/// Snapshot the day or range in `args`, defaulting to yesterday.
///
/// # Errors
/// Returns an error for an invalid range or when persistence fails.
pub async fn execute(config: &Config, args: &SnapshotArgs, json: bool) -> Result<()> {
    let config = config.clone();
    let (date, from, to) = (args.date, args.from, args.to);

    let report = task::spawn_blocking(move || {
        let services = Services::open(&config)?;
        let range = match (date, from, to) {
            (Some(day), _, _) => DateRange::single(day),
            (None, Some(from), Some(to)) => DateRange::new(from, to)?,
            _ => DateRange::single(services.persister.default_date()),
        };
        services.persister.run(range)
    })
    .await??;

    if json {
        return output::json(&report);
    }

    println!(
        "Snapshot {} .. {} with {} v{}",
        report.range.from(),
        report.range.to(),
        report.model_name,
        report.model_version
    );
    output::field("run", report.run_id);
    output::field("inserted", report.inserted);
    output::field("updated", report.updated);
    output::field("unchanged", report.unchanged);
    output::field("skipped", report.skipped);
    Ok(())
}
