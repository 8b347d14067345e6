use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::services::items::{ItemFilter, ItemPatch, NewItem};
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ScheduleMaintenanceRequest {
    /// Date the maintenance is due
    pub due: NaiveDate,
    pub notes: Option<String>,
}

/// List items with optional filtering
#[utoipa::path(
    get,
    path = "/api/v1/items",
    params(ItemFilter),
    responses(
        (status = 200, description = "Item list returned", body = [crate::entities::inventory_item::Model]),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn list_items(
    State(state): State<AppState>,
    Query(filter): Query<ItemFilter>,
) -> Result<impl IntoResponse, ServiceError> {
    let items = state.item_service.list(filter).await?;
    Ok((StatusCode::OK, Json(items)))
}

/// Create a new item
#[utoipa::path(
    post,
    path = "/api/v1/items",
    request_body = NewItem,
    responses(
        (status = 201, description = "Item created", body = crate::entities::inventory_item::Model),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<NewItem>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.item_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Get a specific item
#[utoipa::path(
    get,
    path = "/api/v1/items/{id}",
    params(("id" = Uuid, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item returned", body = crate::entities::inventory_item::Model),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.item_service.get(id).await?;
    Ok((StatusCode::OK, Json(item)))
}

/// Partially update an item. Lifecycle status cannot be changed here.
#[utoipa::path(
    put,
    path = "/api/v1/items/{id}",
    params(("id" = Uuid, Path, description = "Item ID")),
    request_body = ItemPatch,
    responses(
        (status = 200, description = "Item updated", body = crate::entities::inventory_item::Model),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ItemPatch>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.item_service.update(id, patch).await?;
    Ok((StatusCode::OK, Json(item)))
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/api/v1/items/{id}",
    params(("id" = Uuid, Path, description = "Item ID")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.item_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Check an item out of the yard
#[utoipa::path(
    post,
    path = "/api/v1/items/{id}/checkout",
    params(("id" = Uuid, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item checked out", body = crate::entities::inventory_item::Model),
        (status = 400, description = "Invalid transition", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn check_out_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.item_service.check_out(id).await?;
    Ok((StatusCode::OK, Json(item)))
}

/// Check an item back in
#[utoipa::path(
    post,
    path = "/api/v1/items/{id}/checkin",
    params(("id" = Uuid, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item checked in", body = crate::entities::inventory_item::Model),
        (status = 400, description = "Invalid transition", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn check_in_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.item_service.check_in(id).await?;
    Ok((StatusCode::OK, Json(item)))
}

/// Schedule maintenance, moving the item into maintenance status
#[utoipa::path(
    post,
    path = "/api/v1/items/{id}/maintenance",
    params(("id" = Uuid, Path, description = "Item ID")),
    request_body = ScheduleMaintenanceRequest,
    responses(
        (status = 200, description = "Maintenance scheduled", body = crate::entities::inventory_item::Model),
        (status = 400, description = "Invalid transition", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn schedule_maintenance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ScheduleMaintenanceRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state
        .item_service
        .schedule_maintenance(id, payload.due, payload.notes)
        .await?;
    Ok((StatusCode::OK, Json(item)))
}

/// Complete maintenance, returning the item to available
#[utoipa::path(
    post,
    path = "/api/v1/items/{id}/maintenance/complete",
    params(("id" = Uuid, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Maintenance completed", body = crate::entities::inventory_item::Model),
        (status = 400, description = "Invalid transition", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn complete_maintenance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.item_service.complete_maintenance(id).await?;
    Ok((StatusCode::OK, Json(item)))
}

/// Retire an item permanently
#[utoipa::path(
    post,
    path = "/api/v1/items/{id}/retire",
    params(("id" = Uuid, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item retired", body = crate::entities::inventory_item::Model),
        (status = 400, description = "Invalid transition", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn retire_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.item_service.retire(id).await?;
    Ok((StatusCode::OK, Json(item)))
}
