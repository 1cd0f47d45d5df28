//! `/profit-forecast` report handlers.

use axum::extract::{Query, State};
use axum::Json;

use crate::application::forecast::ForecastQuery;
use crate::domain::{BlendedRow, ForecastReport, ForecastSummary};

use super::error::ApiError;
use super::query::RangeParams;
use super::state::{blocking, AppState};

fn query(state: &AppState, params: &RangeParams) -> Result<ForecastQuery, ApiError> {
    let (range, ad_group) = params.resolve(state.forecast.today(), state.default_range_days)?;
    Ok(ForecastQuery::new(range, ad_group))
}

/// `GET /profit-forecast/ad-group-with-cost`: one blended row per
/// `(date, adGroupId)`.
#[tracing::instrument(name = "GET /profit-forecast/ad-group-with-cost", skip(state))]
pub async fn ad_group_with_cost(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> Result<Json<Vec<BlendedRow>>, ApiError> {
    let query = query(&state, &params)?;
    let forecast = state.forecast.clone();
    let rows = blocking(move || forecast.rows(&query)).await?;
    Ok(Json(rows))
}

/// `GET /profit-forecast/summary`.
#[tracing::instrument(name = "GET /profit-forecast/summary", skip(state))]
pub async fn summary(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> Result<Json<ForecastSummary>, ApiError> {
    let query = query(&state, &params)?;
    let forecast = state.forecast.clone();
    let summary = blocking(move || forecast.summary(&query)).await?;
    Ok(Json(summary))
}

/// `GET /profit-forecast/report`: rows and summary in one payload.
#[tracing::instrument(name = "GET /profit-forecast/report", skip(state))]
pub async fn report(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> Result<Json<ForecastReport>, ApiError> {
    let query = query(&state, &params)?;
    let forecast = state.forecast.clone();
    let report = blocking(move || forecast.report(&query)).await?;
    Ok(Json(report))
}
