//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, history, items, loans};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pinjam API",
        version = "0.1.0",
        description = "Equipment Loan Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Items
        items::list_items,
        items::get_item,
        items::create_item,
        items::update_item,
        items::delete_item,
        // Loans
        loans::create_loan,
        loans::list_loans,
        loans::loan_stats,
        loans::get_loan,
        loans::update_loan_status,
        loans::delete_loan,
        // History
        history::list_history,
        history::history_stats,
        history::complete_loan,
        history::append_timeline,
        history::get_timeline,
        history::export_history,
        history::get_history,
    ),
    components(
        schemas(
            // Items
            crate::models::barang::Barang,
            crate::models::barang::CreateBarang,
            crate::models::barang::UpdateBarang,
            // Loans
            crate::models::peminjaman::PeminjamanDetail,
            crate::models::peminjaman::CreatePeminjaman,
            crate::models::peminjaman::UpdateStatus,
            crate::models::peminjaman::PeminjamanStats,
            // History
            crate::models::riwayat::Riwayat,
            crate::models::riwayat::CompleteLoan,
            crate::models::riwayat::RiwayatStats,
            crate::models::riwayat::TimelineEvent,
            crate::models::riwayat::AppendTimeline,
            // Enums
            crate::models::enums::LoanStatus,
            crate::models::enums::FinalStatus,
            crate::models::enums::ReturnCondition,
            // Health
            health::HealthResponse,
            // Envelope
            crate::api::ApiMessage,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "items", description = "Equipment catalog"),
        (name = "loans", description = "Active loan requests"),
        (name = "history", description = "Archived loans and timeline")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router with Swagger UI
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
