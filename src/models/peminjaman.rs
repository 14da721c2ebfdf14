//! Active loan ("peminjaman") model and related types

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::enums::LoanStatus;

/// E.164-like: optional leading '+', 2-15 digits, first digit 1-9.
static TELEPON_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9]\d{1,14}$").unwrap());

/// Normalize a phone number by stripping internal whitespace and check it
/// against the E.164-like pattern. Returns the stripped number.
pub fn normalize_telepon(telepon: &str) -> Option<String> {
    let stripped: String = telepon.chars().filter(|c| !c.is_whitespace()).collect();
    TELEPON_RE.is_match(&stripped).then_some(stripped)
}

/// Active loan joined with its catalog item, for display
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PeminjamanDetail {
    pub id: Uuid,
    pub barang_id: Uuid,
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
    pub status: LoanStatus,
    pub metode_konfirmasi: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub nama_barang: String,
    pub gambar_barang: Option<String>,
    pub harga_barang: Decimal,
}

/// Create loan request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePeminjaman {
    #[validate(length(min = 1, message = "nama_lengkap is required"))]
    pub nama_lengkap: String,
    #[validate(length(min = 1, message = "nim is required"))]
    pub nim: String,
    pub jurusan: Option<String>,
    pub instansi: Option<String>,
    /// E.164-like; checked by [`normalize_telepon`] before any write
    #[validate(length(min = 1, message = "telepon is required"))]
    pub telepon: String,
    #[validate(email(message = "invalid email format"))]
    pub email: Option<String>,
    pub barang_id: Uuid,
    pub jumlah: Option<i32>,
    /// Start date, "YYYY-MM-DD"
    #[validate(length(min = 1, message = "tanggal_mulai is required"))]
    pub tanggal_mulai: String,
    /// End date, "YYYY-MM-DD"
    #[validate(length(min = 1, message = "tanggal_selesai is required"))]
    pub tanggal_selesai: String,
    /// Loan duration in days; defaulted from the date range if absent
    pub lama_pinjam: Option<i32>,
    pub total_biaya: Option<Decimal>,
    pub catatan: Option<String>,
    /// Submission channel, e.g. "whatsapp"
    pub metode_konfirmasi: Option<String>,
}

/// Status transition request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatus {
    pub status: String,
}

/// Loan list query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PeminjamanQuery {
    /// Substring match on nama_lengkap, nim, or barang nama
    pub search: Option<String>,
    /// Exact status; "semua" or absent means no filter
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Active-loan counts partitioned by status
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct PeminjamanStats {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn telepon_accepts_e164_like_numbers() {
        assert_eq!(
            normalize_telepon("+628123456789").as_deref(),
            Some("+628123456789")
        );
        assert!(normalize_telepon("628123456789").is_some());
        // internal whitespace is stripped before matching
        assert_eq!(
            normalize_telepon("+62 812 3456 789").as_deref(),
            Some("+628123456789")
        );
        // literal regex allows any non-zero leading digit
        assert!(normalize_telepon("123456789").is_some());
        // boundaries: 2 and 15 digits total
        assert!(normalize_telepon("12").is_some());
        assert!(normalize_telepon("123456789012345").is_some());
    }

    #[test]
    fn telepon_rejects_malformed_numbers() {
        assert!(normalize_telepon("0812345").is_none());
        assert!(normalize_telepon("+0812345").is_none());
        assert!(normalize_telepon("1").is_none());
        assert!(normalize_telepon("1234567890123456").is_none());
        assert!(normalize_telepon("").is_none());
        assert!(normalize_telepon("+62abc123").is_none());
    }
}
