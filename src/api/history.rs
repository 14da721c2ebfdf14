//! History and timeline endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::riwayat::{
        AppendTimeline, CompleteLoan, ExportQuery, Riwayat, RiwayatQuery, RiwayatStats,
        TimelineEvent,
    },
};

use super::{ApiResponse, Paginated};

/// List history records with filters and pagination
#[utoipa::path(
    get,
    path = "/history",
    tag = "history",
    params(
        ("search" = Option<String>, Query, description = "Match requester name, nim, or item name"),
        ("startDate" = Option<String>, Query, description = "Completion date lower bound (YYYY-MM-DD)"),
        ("endDate" = Option<String>, Query, description = "Completion date upper bound (YYYY-MM-DD)"),
        ("status_akhir" = Option<String>, Query, description = "Final status filter (selesai, dibatalkan)"),
        ("kondisi_kembali" = Option<String>, Query, description = "Return condition filter"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Page of history records", body = Vec<Riwayat>)
    )
)]
pub async fn list_history(
    State(state): State<crate::AppState>,
    Query(query): Query<RiwayatQuery>,
) -> AppResult<Json<ApiResponse<Paginated<Riwayat>>>> {
    let (items, total) = state.services.history.list(&query).await?;
    let (page, limit, _) = crate::repository::paginate(query.page, query.limit);

    Ok(Json(ApiResponse::new(Paginated { items, total, page, limit })))
}

/// Aggregate statistics over the history table
#[utoipa::path(
    get,
    path = "/history/stats",
    tag = "history",
    responses(
        (status = 200, description = "History aggregation", body = RiwayatStats)
    )
)]
pub async fn history_stats(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ApiResponse<RiwayatStats>>> {
    let stats = state.services.history.stats().await?;
    Ok(Json(ApiResponse::new(stats)))
}

/// Archive an active loan into history
#[utoipa::path(
    post,
    path = "/history/complete",
    tag = "history",
    request_body = CompleteLoan,
    responses(
        (status = 201, description = "Loan archived", body = Riwayat),
        (status = 400, description = "Invalid return condition or fine"),
        (status = 404, description = "Loan not found"),
        (status = 409, description = "Loan already archived")
    )
)]
pub async fn complete_loan(
    State(state): State<crate::AppState>,
    Json(request): Json<CompleteLoan>,
) -> AppResult<(StatusCode, Json<ApiResponse<Riwayat>>)> {
    let record = state.services.history.complete_loan(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(record, "Peminjaman selesai dan diarsipkan")),
    ))
}

/// Append a timeline event for a loan
#[utoipa::path(
    post,
    path = "/history/timeline",
    tag = "history",
    request_body = AppendTimeline,
    responses(
        (status = 201, description = "Event appended", body = TimelineEvent)
    )
)]
pub async fn append_timeline(
    State(state): State<crate::AppState>,
    Json(request): Json<AppendTimeline>,
) -> AppResult<(StatusCode, Json<ApiResponse<TimelineEvent>>)> {
    let event = state.services.history.append_timeline(&request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(event))))
}

/// Ordered timeline for a loan id
#[utoipa::path(
    get,
    path = "/history/timeline/{loan_id}",
    tag = "history",
    params(
        ("loan_id" = Uuid, Path, description = "Loan ID (active or archived)")
    ),
    responses(
        (status = 200, description = "Events ascending by creation time", body = Vec<TimelineEvent>)
    )
)]
pub async fn get_timeline(
    State(state): State<crate::AppState>,
    Path(loan_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<TimelineEvent>>>> {
    let events = state.services.history.timeline(loan_id).await?;
    Ok(Json(ApiResponse::new(events)))
}

/// Bulk export of history records filtered by date range
#[utoipa::path(
    get,
    path = "/history/export",
    tag = "history",
    params(
        ("startDate" = Option<String>, Query, description = "Completion date lower bound (YYYY-MM-DD)"),
        ("endDate" = Option<String>, Query, description = "Completion date upper bound (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "All matching history records", body = Vec<Riwayat>)
    )
)]
pub async fn export_history(
    State(state): State<crate::AppState>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Json<ApiResponse<Vec<Riwayat>>>> {
    let records = state
        .services
        .history
        .export(query.start_date, query.end_date)
        .await?;
    Ok(Json(ApiResponse::new(records)))
}

/// Get one history record by ID
#[utoipa::path(
    get,
    path = "/history/{id}",
    tag = "history",
    params(
        ("id" = Uuid, Path, description = "History record ID")
    ),
    responses(
        (status = 200, description = "History record", body = Riwayat),
        (status = 404, description = "Record not found")
    )
)]
pub async fn get_history(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Riwayat>>> {
    let record = state.services.history.get(id).await?;
    Ok(Json(ApiResponse::new(record)))
}
