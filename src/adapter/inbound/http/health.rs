use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: &'static str,
    pub model_version: u32,
}

#[tracing::instrument(name = "GET /health", skip_all)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: state.forecast.model_name(),
        model_version: state.forecast.model_version(),
    })
}
