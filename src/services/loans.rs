//! Loan request lifecycle service

use chrono::NaiveDate;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::LoanStatus,
        peminjaman::{
            normalize_telepon, CreatePeminjaman, PeminjamanDetail, PeminjamanQuery, PeminjamanStats,
        },
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Submit a new loan request. Validation fails fast, before any write;
    /// the record enters the workflow as `pending`.
    pub async fn create(&self, request: CreatePeminjaman) -> AppResult<PeminjamanDetail> {
        request.validate()?;

        let telepon = normalize_telepon(&request.telepon).ok_or_else(|| {
            AppError::Validation(
                "telepon must match E.164 format (optional +, 2-15 digits)".to_string(),
            )
        })?;

        let tanggal_mulai = parse_date("tanggal_mulai", &request.tanggal_mulai)?;
        let tanggal_selesai = parse_date("tanggal_selesai", &request.tanggal_selesai)?;

        if tanggal_selesai < tanggal_mulai {
            return Err(AppError::Validation(
                "tanggal_selesai must not be before tanggal_mulai".to_string(),
            ));
        }

        if let Some(jumlah) = request.jumlah {
            if jumlah < 1 {
                return Err(AppError::Validation("jumlah must be positive".to_string()));
            }
        }

        if let Some(total) = request.total_biaya {
            if total.is_sign_negative() {
                return Err(AppError::Validation("total_biaya must not be negative".to_string()));
            }
        }

        let lama_pinjam = match request.lama_pinjam {
            Some(days) if days < 1 => {
                return Err(AppError::Validation("lama_pinjam must be positive".to_string()));
            }
            Some(days) => days,
            // default: day span of the requested range, at least one day
            None => ((tanggal_selesai - tanggal_mulai).num_days() as i32).max(1),
        };

        // Stock is advisory and deliberately not checked against jumlah.
        self.repository.barang.get_by_id(request.barang_id).await?;

        let loan = self
            .repository
            .peminjaman
            .create(&request, &telepon, tanggal_mulai, tanggal_selesai, lama_pinjam)
            .await?;

        tracing::info!(loan_id = %loan.id, barang = %loan.nama_barang, "Loan request created");
        self.append_timeline(loan.id, "pending", "Permintaan peminjaman dibuat").await;

        Ok(loan)
    }

    /// Transition a loan between pending/approved/rejected. Any other status
    /// value is refused before touching the store.
    pub async fn update_status(&self, id: Uuid, status: &str) -> AppResult<PeminjamanDetail> {
        let status = LoanStatus::parse(status).ok_or_else(|| {
            AppError::Validation(format!(
                "Invalid status '{}': must be one of pending, approved, rejected",
                status
            ))
        })?;

        let loan = self.repository.peminjaman.update_status(id, status).await?;

        tracing::info!(loan_id = %id, status = %status, "Loan status updated");
        if status == LoanStatus::Rejected {
            tracing::debug!(loan_id = %id, "Rejected loan will be purged by the sweeper");
        }

        self.append_timeline(id, status.as_str(), "Status diperbarui oleh admin").await;

        Ok(loan)
    }

    /// Fetch one loan with its catalog item
    pub async fn get(&self, id: Uuid) -> AppResult<PeminjamanDetail> {
        self.repository.peminjaman.get_detail(id).await
    }

    /// Remove a loan request outright
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.peminjaman.delete(id).await?;
        tracing::info!(loan_id = %id, "Loan request deleted");
        Ok(())
    }

    /// List active loans. A status filter of "semua" (all) or empty means
    /// no filter; any other non-status value is a validation error.
    pub async fn list(&self, query: &PeminjamanQuery) -> AppResult<(Vec<PeminjamanDetail>, i64)> {
        let status = match query.status.as_deref() {
            None | Some("") | Some("semua") => None,
            Some(value) => Some(LoanStatus::parse(value).ok_or_else(|| {
                AppError::Validation(format!("Invalid status filter '{}'", value))
            })?),
        };

        self.repository.peminjaman.search(query, status).await
    }

    /// Status-count aggregation over the active-loan set
    pub async fn stats(&self) -> AppResult<PeminjamanStats> {
        self.repository.peminjaman.stats().await
    }

    /// Timeline entries are an informational audit trail; a failed append
    /// is logged and never propagated to the caller.
    async fn append_timeline(&self, loan_id: Uuid, status: &str, note: &str) {
        if let Err(e) = self
            .repository
            .riwayat
            .append_timeline(loan_id, status, note)
            .await
        {
            tracing::warn!(loan_id = %loan_id, status, "Failed to append timeline event: {}", e);
        }
    }
}

fn parse_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("{} must be a YYYY-MM-DD date", field)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_dates_only() {
        assert_eq!(
            parse_date("tanggal_mulai", "2024-01-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert!(parse_date("tanggal_mulai", "01/01/2024").is_err());
        assert!(parse_date("tanggal_mulai", "").is_err());
    }
}
