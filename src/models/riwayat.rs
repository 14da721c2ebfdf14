//! History ("riwayat") and timeline models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::enums::{FinalStatus, ReturnCondition};

/// Archived loan. Written exactly once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Riwayat {
    pub id: Uuid,
    /// Id of the consumed peminjaman row (deleted on archival)
    pub peminjaman_id: Uuid,
    pub barang_id: Option<Uuid>,
    pub nama_barang: String,
    pub gambar_barang: Option<String>,
    pub nama_lengkap: String,
    pub nim: String,
    pub jurusan: Option<String>,
    pub instansi: Option<String>,
    pub telepon: String,
    pub email: Option<String>,
    pub jumlah: i32,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_selesai: NaiveDate,
    pub lama_pinjam: i32,
    pub total_biaya: Decimal,
    pub catatan: Option<String>,
    pub status_akhir: FinalStatus,
    pub kondisi_kembali: ReturnCondition,
    pub denda: Decimal,
    pub catatan_admin: Option<String>,
    pub completed_at: DateTime<Utc>,
}

/// Archival request: move an active loan into history
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteLoan {
    pub loan_id: Uuid,
    /// Returned-item condition, default "baik"
    pub return_condition: Option<String>,
    /// Admin remarks, default empty
    pub admin_notes: Option<String>,
    /// Late/damage fine, default 0
    pub fine: Option<Decimal>,
    /// Final status, default "selesai"
    pub final_status: Option<FinalStatus>,
}

/// History list query parameters
#[derive(Debug, Default, Deserialize)]
pub struct RiwayatQuery {
    /// Substring match on nama_lengkap, nim, or nama_barang
    pub search: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "endDate")]
    pub end_date: Option<NaiveDate>,
    pub status_akhir: Option<FinalStatus>,
    pub kondisi_kembali: Option<ReturnCondition>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Date-range filter for bulk export
#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    #[serde(rename = "startDate")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "endDate")]
    pub end_date: Option<NaiveDate>,
}

/// Full scan-and-reduce aggregation over history
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiwayatStats {
    pub total_loans: i64,
    pub total_revenue: Decimal,
    pub total_fines: Decimal,
    pub completed_count: i64,
    pub cancelled_count: i64,
}

/// Append-only audit entry for a loan's status changes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TimelineEvent {
    pub id: Uuid,
    pub peminjaman_id: Uuid,
    pub status: String,
    pub keterangan: String,
    pub created_at: DateTime<Utc>,
}

/// Append a timeline event
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppendTimeline {
    pub loan_id: Uuid,
    pub status: String,
    pub note: Option<String>,
}
