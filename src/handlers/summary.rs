use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use crate::errors::ServiceError;
use crate::AppState;

/// Dashboard summary: counts by status and upcoming maintenance alerts
#[utoipa::path(
    get,
    path = "/api/v1/summary",
    responses(
        (status = 200, description = "Dashboard summary returned", body = crate::services::summary::Summary),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "summary"
)]
pub async fn get_summary(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let summary = state
        .summary_service
        .summary(Utc::now(), state.config.alert_window())
        .await?;
    Ok((StatusCode::OK, Json(summary)))
}

/// Marker records for every item carrying a complete coordinate pair
#[utoipa::path(
    get,
    path = "/api/v1/map/items",
    responses(
        (status = 200, description = "Map markers returned", body = [crate::services::summary::MapMarker]),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "summary"
)]
pub async fn get_map_items(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let markers = state.summary_service.items_with_coordinates().await?;
    Ok((StatusCode::OK, Json(markers)))
}

/// Distinct category names for autocomplete
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "Category names returned", body = [String]),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "summary"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let names = state.summary_service.category_names().await?;
    Ok((StatusCode::OK, Json(names)))
}

/// Distinct location names for autocomplete
#[utoipa::path(
    get,
    path = "/api/v1/locations",
    responses(
        (status = 200, description = "Location names returned", body = [String]),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "summary"
)]
pub async fn list_locations(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let names = state.summary_service.location_names().await?;
    Ok((StatusCode::OK, Json(names)))
}
