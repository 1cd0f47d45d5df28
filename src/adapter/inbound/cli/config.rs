//! `check-config`: validate a configuration file and show what it resolves to.

use std::path::Path;

use serde_json::json;

use super::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Load and validate the file at `path`.
///
/// Unlike the other commands a missing file is an error here.
///
/// # Errors
/// Returns an error if the file is missing, malformed or invalid.
pub fn execute(path: &Path, json: bool) -> Result<()> {
    let config = Config::load(path)?;

    if json {
        return output::json(&json!({
            "command": "check-config",
            "path": path.display().to_string(),
            "valid": true,
            "database": config.database,
            "server": {
                "bind": config.server.bind,
                "defaultRangeDays": config.server.default_range_days,
            },
            "forecast": {
                "model": config.forecast.model.as_str(),
                "baseConfidence": config.forecast.base_confidence,
                "maturationDays": config.forecast.maturation_days,
                "calibrationLookbackDays": config.forecast.calibration_lookback_days,
                "maxRangeDays": config.forecast.max_range_days,
            },
            "snapshot": {
                "enabled": config.snapshot.enabled,
                "intervalSecs": config.snapshot.interval_secs,
                "lookbackDays": config.snapshot.lookback_days,
            },
            "sheets": {
                "enabled": config.sheets.enabled,
                "webhookConfigured": config.sheets.webhook_url.is_some(),
                "debounceMs": config.sheets.debounce_ms,
                "windowDays": config.sheets.window_days,
            },
        }));
    }

    println!("{} is valid", path.display());
    output::section("Storage");
    output::field("database", &config.database);
    output::section("Server");
    output::field("bind", &config.server.bind);
    output::field("default range", format!("{} days", config.server.default_range_days));
    output::section("Forecast");
    output::field("model", config.forecast.model.as_str());
    output::field("base confidence", config.forecast.base_confidence);
    output::field("maturation", format!("{} days", config.forecast.maturation_days));
    output::field(
        "calibration",
        format!("{} days", config.forecast.calibration_lookback_days),
    );
    output::field("max range", format!("{} days", config.forecast.max_range_days));
    output::section("Jobs");
    output::field(
        "snapshots",
        if config.snapshot.enabled {
            format!(
                "every {}s, last {} days",
                config.snapshot.interval_secs, config.snapshot.lookback_days
            )
        } else {
            "disabled".to_string()
        },
    );
    output::field(
        "sheet sync",
        if config.sheets.enabled {
            format!(
                "{}ms debounce, last {} days",
                config.sheets.debounce_ms, config.sheets.window_days
            )
        } else {
            "disabled".to_string()
        },
    );
    Ok(())
}
