//! Loan request endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::peminjaman::{
        CreatePeminjaman, PeminjamanDetail, PeminjamanQuery, PeminjamanStats, UpdateStatus,
    },
};

use super::{ApiMessage, ApiResponse, Paginated};

/// Submit a new loan request
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    request_body = CreatePeminjaman,
    responses(
        (status = 201, description = "Loan request created", body = PeminjamanDetail),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Barang not found")
    )
)]
pub async fn create_loan(
    State(state): State<crate::AppState>,
    Json(request): Json<CreatePeminjaman>,
) -> AppResult<(StatusCode, Json<ApiResponse<PeminjamanDetail>>)> {
    let loan = state.services.loans.create(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(loan, "Permintaan peminjaman berhasil dibuat")),
    ))
}

/// List loan requests with search, status filter, and pagination
#[utoipa::path(
    get,
    path = "/loans",
    tag = "loans",
    params(
        ("search" = Option<String>, Query, description = "Match requester name, nim, or item name"),
        ("status" = Option<String>, Query, description = "Exact status; 'semua' or absent for all"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Page of loan requests", body = Vec<PeminjamanDetail>),
        (status = 400, description = "Invalid status filter")
    )
)]
pub async fn list_loans(
    State(state): State<crate::AppState>,
    Query(query): Query<PeminjamanQuery>,
) -> AppResult<Json<ApiResponse<Paginated<PeminjamanDetail>>>> {
    let (items, total) = state.services.loans.list(&query).await?;
    let (page, limit, _) = crate::repository::paginate(query.page, query.limit);

    Ok(Json(ApiResponse::new(Paginated { items, total, page, limit })))
}

/// Active-loan counts partitioned by status
#[utoipa::path(
    get,
    path = "/loans/stats",
    tag = "loans",
    responses(
        (status = 200, description = "Status counts", body = PeminjamanStats)
    )
)]
pub async fn loan_stats(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ApiResponse<PeminjamanStats>>> {
    let stats = state.services.loans.stats().await?;
    Ok(Json(ApiResponse::new(stats)))
}

/// Get one loan request by ID
#[utoipa::path(
    get,
    path = "/loans/{id}",
    tag = "loans",
    params(
        ("id" = Uuid, Path, description = "Loan ID")
    ),
    responses(
        (status = 200, description = "Loan details", body = PeminjamanDetail),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn get_loan(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<PeminjamanDetail>>> {
    let loan = state.services.loans.get(id).await?;
    Ok(Json(ApiResponse::new(loan)))
}

/// Transition a loan to a new status
#[utoipa::path(
    patch,
    path = "/loans/{id}/status",
    tag = "loans",
    params(
        ("id" = Uuid, Path, description = "Loan ID")
    ),
    request_body = UpdateStatus,
    responses(
        (status = 200, description = "Updated loan", body = PeminjamanDetail),
        (status = 400, description = "Invalid status value"),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn update_loan_status(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatus>,
) -> AppResult<Json<ApiResponse<PeminjamanDetail>>> {
    let loan = state.services.loans.update_status(id, &request.status).await?;
    Ok(Json(ApiResponse::with_message(loan, "Status berhasil diperbarui")))
}

/// Delete a loan request
#[utoipa::path(
    delete,
    path = "/loans/{id}",
    tag = "loans",
    params(
        ("id" = Uuid, Path, description = "Loan ID")
    ),
    responses(
        (status = 200, description = "Loan deleted", body = ApiMessage),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn delete_loan(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiMessage>> {
    state.services.loans.delete(id).await?;
    Ok(Json(ApiMessage::new("Permintaan peminjaman dihapus")))
}
