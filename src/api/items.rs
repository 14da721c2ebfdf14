//! Catalog ("barang") endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::barang::{Barang, BarangQuery, CreateBarang, UpdateBarang},
};

use super::{ApiMessage, ApiResponse, Paginated};

/// List catalog items with search and pagination
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    params(
        ("search" = Option<String>, Query, description = "Match item name or description"),
        ("kategori" = Option<String>, Query, description = "Filter by category"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Page of catalog items", body = Vec<Barang>)
    )
)]
pub async fn list_items(
    State(state): State<crate::AppState>,
    Query(query): Query<BarangQuery>,
) -> AppResult<Json<ApiResponse<Paginated<Barang>>>> {
    let (items, total) = state.services.catalog.search(&query).await?;
    let (page, limit, _) = crate::repository::paginate(query.page, query.limit);

    Ok(Json(ApiResponse::new(Paginated { items, total, page, limit })))
}

/// Get catalog item by ID
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Catalog item", body = Barang),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_item(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Barang>>> {
    let item = state.services.catalog.get(id).await?;
    Ok(Json(ApiResponse::new(item)))
}

/// Create a catalog item
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = CreateBarang,
    responses(
        (status = 201, description = "Item created", body = Barang),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_item(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateBarang>,
) -> AppResult<(StatusCode, Json<ApiResponse<Barang>>)> {
    let created = state.services.catalog.create(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(created))))
}

/// Update a catalog item
#[utoipa::path(
    put,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    request_body = UpdateBarang,
    responses(
        (status = 200, description = "Item updated", body = Barang),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn update_item(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBarang>,
) -> AppResult<Json<ApiResponse<Barang>>> {
    let updated = state.services.catalog.update(id, request).await?;
    Ok(Json(ApiResponse::new(updated)))
}

/// Delete a catalog item
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item deleted", body = ApiMessage),
        (status = 404, description = "Item not found"),
        (status = 409, description = "Item has active loans")
    )
)]
pub async fn delete_item(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiMessage>> {
    state.services.catalog.delete(id).await?;
    Ok(Json(ApiMessage::new("Barang dihapus")))
}
