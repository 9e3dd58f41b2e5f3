//! Catalog seeding API route handler.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use tracing::instrument;

use crate::services::seed::seed_catalog;
use crate::state::AppState;

/// JSON body for `GET /api/seed`.
#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

/// Seed the sample catalog.
///
/// Safe to call repeatedly: a non-empty store reports success without
/// writing. A store failure returns 500 with `success: false`.
#[instrument(skip(state))]
pub async fn seed(State(state): State<AppState>) -> impl IntoResponse {
    match seed_catalog(state.catalog().directory().as_ref()).await {
        Ok(report) => (
            StatusCode::OK,
            Json(SeedResponse {
                success: true,
                message: report.message(),
                count: Some(report.count),
            }),
        ),
        Err(err) => {
            tracing::error!(error = %err, "Seeding failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SeedResponse {
                    success: false,
                    message: "Seeding failed".to_string(),
                    count: None,
                }),
            )
        }
    }
}
