//! `forecast`: print blended rows and totals for a date range.

use rust_decimal::Decimal;
use tabled::Tabled;
use tokio::task;

use super::{output, ForecastArgs};
use crate::application::forecast::ForecastQuery;
use crate::domain::{AdGroupId, BlendedRow, DateRange, ForecastReport, ForecastSummary};
use crate::error::Result;
use crate::infrastructure::bootstrap::Services;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct ForecastLine {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Ad group")]
    ad_group: String,
    #[tabled(rename = "Matured")]
    matured: String,
    #[tabled(rename = "Projected")]
    projected: String,
    #[tabled(rename = "Blended")]
    blended: String,
    #[tabled(rename = "Spend")]
    spend: String,
    #[tabled(rename = "ROAS")]
    roas: String,
    #[tabled(rename = "Margin")]
    margin: String,
    #[tabled(rename = "Net profit")]
    net_profit: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
}

fn money(value: Decimal) -> String {
    value.round_dp(0).to_string()
}

fn ratio(value: Decimal) -> String {
    value.round_dp(2).to_string()
}

fn percent(value: Decimal) -> String {
    format!("{}%", (value * Decimal::ONE_HUNDRED).round_dp(1))
}

impl From<&BlendedRow> for ForecastLine {
    fn from(blended: &BlendedRow) -> Self {
        let row = &blended.row;
        Self {
            date: row.date.to_string(),
            ad_group: row.ad_group_id.to_string(),
            matured: money(row.matured_revenue),
            projected: money(row.projected_revenue),
            blended: money(blended.blended_revenue),
            spend: money(row.spend),
            roas: ratio(blended.blended_roas),
            margin: percent(blended.blended_margin),
            net_profit: money(blended.net_profit),
            confidence: percent(row.confidence),
        }
    }
}

fn print_summary(summary: &ForecastSummary) {
    output::section(&format!(
        "Summary {} .. {} ({} rows)",
        summary.range.from(),
        summary.range.to(),
        summary.row_count
    ));
    output::field("matured revenue", money(summary.matured_revenue));
    output::field("projected revenue", money(summary.projected_revenue));
    output::field("blended revenue", money(summary.blended_revenue));
    output::field("blended profit", money(summary.blended_profit));
    output::field("spend", money(summary.spend));
    output::field("blended ROAS", ratio(summary.blended_roas));
    output::field("blended margin", percent(summary.blended_margin));
    output::field("net profit", money(summary.net_profit));
}

/// Compute and print the forecast selected by `args`.
///
/// # Errors
/// Returns an error for an invalid range or ad group, or when storage fails.
pub async fn execute(config: &Config, args: &ForecastArgs, json: bool) -> Result<()> {
    let ad_group = args.ad_group.as_deref().map(AdGroupId::parse).transpose()?;
    let (from, to) = (args.from, args.to);
    let default_days = config.server.default_range_days;
    let config = config.clone();

    let report: ForecastReport = task::spawn_blocking(move || {
        let services = Services::open(&config)?;
        let today = services.forecast.today();
        let range = DateRange::with_defaults(from, to, today, default_days)?;
        services
            .forecast
            .report(&ForecastQuery::new(range, ad_group))
    })
    .await??;

    if json {
        return if args.summary {
            output::json(&report.summary)
        } else {
            output::json(&report)
        };
    }

    println!(
        "Forecast {} .. {} (model {} v{})",
        report.range.from(),
        report.range.to(),
        report.model_name,
        report.model_version
    );
    if !args.summary {
        println!();
        output::table(
            report.rows.iter().map(ForecastLine::from).collect(),
            "No orders or spend in range",
        );
    }
    print_summary(&report.summary);
    Ok(())
}
