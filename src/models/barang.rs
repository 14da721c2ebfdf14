//! Catalog item ("barang") model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Catalog item from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Barang {
    pub id: Uuid,
    pub nama: String,
    pub deskripsi: Option<String>,
    pub kategori: Option<String>,
    /// Image URL (object storage, managed elsewhere)
    pub gambar: Option<String>,
    /// Per-day price
    pub harga: Decimal,
    /// Advisory stock count; never enforced against loan quantity
    pub stok: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create catalog item request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBarang {
    #[validate(length(min = 1, message = "nama is required"))]
    pub nama: String,
    pub deskripsi: Option<String>,
    pub kategori: Option<String>,
    pub gambar: Option<String>,
    pub harga: Option<Decimal>,
    pub stok: Option<i32>,
}

/// Update catalog item request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBarang {
    #[validate(length(min = 1, message = "nama must not be empty"))]
    pub nama: Option<String>,
    pub deskripsi: Option<String>,
    pub kategori: Option<String>,
    pub gambar: Option<String>,
    pub harga: Option<Decimal>,
    pub stok: Option<i32>,
}

/// Catalog list query parameters
#[derive(Debug, Deserialize)]
pub struct BarangQuery {
    pub search: Option<String>,
    pub kategori: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
