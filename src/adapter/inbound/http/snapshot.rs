//! `/profit-forecast/snapshot` handlers.

use axum::extract::{Query, State};
use axum::Json;

use crate::domain::{ForecastSnapshot, SnapshotRunReport};

use super::error::ApiError;
use super::query::{RangeParams, RunParams};
use super::state::{blocking, AppState};

/// `GET /profit-forecast/snapshot/run?date|from&to`.
#[tracing::instrument(name = "GET /profit-forecast/snapshot/run", skip(state))]
pub async fn run(
    State(state): State<AppState>,
    Query(params): Query<RunParams>,
) -> Result<Json<SnapshotRunReport>, ApiError> {
    let range = params.resolve(state.forecast.today())?;
    let persister = state.persister.clone();
    let report = blocking(move || persister.run(range)).await?;
    Ok(Json(report))
}

/// `GET /profit-forecast/snapshot/history?from&to&adGroupId`.
#[tracing::instrument(name = "GET /profit-forecast/snapshot/history", skip(state))]
pub async fn history(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> Result<Json<Vec<ForecastSnapshot>>, ApiError> {
    let (range, ad_group) = params.resolve(state.forecast.today(), state.default_range_days)?;
    let persister = state.persister.clone();
    let snapshots = blocking(move || persister.history(&range, ad_group.as_ref())).await?;
    Ok(Json(snapshots))
}
