use axum::{extract::State, response::IntoResponse, routing::post, Json, Router};
use std::sync::Arc;

use crate::error::AppError;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/reset", post(reset_reference_data))
}

// POST /api/reset - replace seat and price reference data from the CSVs
async fn reset_reference_data(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let summary = state.dataset.reset().await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "details": summary,
    })))
}
