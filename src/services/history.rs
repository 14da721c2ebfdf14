//! History archival and timeline service

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{FinalStatus, ReturnCondition},
        riwayat::{AppendTimeline, CompleteLoan, Riwayat, RiwayatQuery, RiwayatStats, TimelineEvent},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct HistoryService {
    repository: Repository,
}

impl HistoryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Complete a loan: snapshot it into history and remove the active row,
    /// in one transaction. Afterwards the loan exists in exactly one table.
    pub async fn complete_loan(&self, request: CompleteLoan) -> AppResult<Riwayat> {
        let kondisi = match request.return_condition.as_deref() {
            None | Some("") => ReturnCondition::Baik,
            Some(value) => ReturnCondition::parse(value).ok_or_else(|| {
                AppError::Validation(format!(
                    "Invalid return condition '{}': must be one of baik, rusak_ringan, rusak_berat",
                    value
                ))
            })?,
        };

        let denda = request.fine.unwrap_or_default();
        if denda.is_sign_negative() {
            return Err(AppError::Validation("fine must not be negative".to_string()));
        }

        let final_status = request.final_status.unwrap_or(FinalStatus::Selesai);
        let catatan_admin = request.admin_notes.as_deref().unwrap_or("");

        let record = self
            .repository
            .riwayat
            .archive(request.loan_id, final_status, kondisi, denda, catatan_admin)
            .await?;

        tracing::info!(
            loan_id = %request.loan_id,
            status_akhir = %final_status,
            kondisi_kembali = %kondisi,
            "Loan archived to history"
        );

        // Audit trail only; archival already committed, so a timeline
        // failure is logged and swallowed.
        if let Err(e) = self
            .repository
            .riwayat
            .append_timeline(
                request.loan_id,
                final_status.as_str(),
                &format!("Peminjaman {} (kondisi: {})", final_status, kondisi),
            )
            .await
        {
            tracing::warn!(loan_id = %request.loan_id, "Failed to append timeline event: {}", e);
        }

        Ok(record)
    }

    /// Fetch one history record
    pub async fn get(&self, id: Uuid) -> AppResult<Riwayat> {
        self.repository.riwayat.get_by_id(id).await
    }

    /// List history with filters and pagination
    pub async fn list(&self, query: &RiwayatQuery) -> AppResult<(Vec<Riwayat>, i64)> {
        self.repository.riwayat.search(query).await
    }

    /// Bulk export by completion date range
    pub async fn export(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> AppResult<Vec<Riwayat>> {
        self.repository.riwayat.export(start_date, end_date).await
    }

    /// Aggregation over the full history table
    pub async fn stats(&self) -> AppResult<RiwayatStats> {
        self.repository.riwayat.stats().await
    }

    /// Append a timeline event for a loan id (active, archived, or gone)
    pub async fn append_timeline(&self, request: &AppendTimeline) -> AppResult<TimelineEvent> {
        self.repository
            .riwayat
            .append_timeline(
                request.loan_id,
                &request.status,
                request.note.as_deref().unwrap_or(""),
            )
            .await
    }

    /// Ordered timeline for a loan id
    pub async fn timeline(&self, loan_id: Uuid) -> AppResult<Vec<TimelineEvent>> {
        self.repository.riwayat.timeline(loan_id).await
    }
}
