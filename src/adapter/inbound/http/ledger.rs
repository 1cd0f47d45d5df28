//! Write endpoints for ad groups, orders and spend.
//!
//! Each accepted body is echoed back; the ledger service announces the edit
//! to the sheet sync.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::domain::{AdGroup, AdSpendRecord, Order, SpendSource};

use super::error::ApiError;
use super::state::{blocking, AppState};

/// `PUT /ad-groups`.
#[tracing::instrument(name = "PUT /ad-groups", skip_all)]
pub async fn put_ad_group(
    State(state): State<AppState>,
    body: Result<Json<AdGroup>, JsonRejection>,
) -> Result<Json<AdGroup>, ApiError> {
    let Json(group) = body?;
    let ledger = state.ledger.clone();
    let saved = group.clone();
    blocking(move || ledger.upsert_ad_group(&saved)).await?;
    Ok(Json(group))
}

/// `GET /ad-groups`.
#[tracing::instrument(name = "GET /ad-groups", skip_all)]
pub async fn list_ad_groups(State(state): State<AppState>) -> Result<Json<Vec<AdGroup>>, ApiError> {
    let ledger = state.ledger.clone();
    Ok(Json(blocking(move || ledger.ad_groups()).await?))
}

/// `PUT /orders`.
#[tracing::instrument(name = "PUT /orders", skip_all)]
pub async fn put_order(
    State(state): State<AppState>,
    body: Result<Json<Order>, JsonRejection>,
) -> Result<Json<Order>, ApiError> {
    let Json(order) = body?;
    let ledger = state.ledger.clone();
    let saved = order.clone();
    blocking(move || ledger.upsert_order(&saved)).await?;
    Ok(Json(order))
}

/// `PUT /ad-spend`: manual spend entry for one `(date, adGroupId)`.
///
/// The stored source is always `manual`, whatever the body says.
#[tracing::instrument(name = "PUT /ad-spend", skip_all)]
pub async fn put_spend(
    State(state): State<AppState>,
    body: Result<Json<AdSpendRecord>, JsonRejection>,
) -> Result<Json<AdSpendRecord>, ApiError> {
    let Json(mut record) = body?;
    record.source = SpendSource::Manual;
    let ledger = state.ledger.clone();
    let saved = record.clone();
    blocking(move || ledger.upsert_spend(&saved)).await?;
    Ok(Json(record))
}
