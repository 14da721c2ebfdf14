//! History ("riwayat") and timeline repository.
//!
//! Archival moves a loan from the active table into history inside a single
//! transaction, so a loan is always in exactly one of the two tables.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{FinalStatus, ReturnCondition},
        peminjaman::PeminjamanDetail,
        riwayat::{Riwayat, RiwayatQuery, RiwayatStats, TimelineEvent},
    },
};

use super::{escape_like, paginate};

#[derive(Clone)]
pub struct RiwayatRepository {
    pool: Pool<Postgres>,
}

impl RiwayatRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Archive an active loan: snapshot it into riwayat and delete the
    /// active row, atomically. The UNIQUE constraint on peminjaman_id turns
    /// a concurrent double-archive into a Conflict instead of a duplicate.
    pub async fn archive(
        &self,
        loan_id: Uuid,
        final_status: FinalStatus,
        kondisi_kembali: ReturnCondition,
        denda: Decimal,
        catatan_admin: &str,
    ) -> AppResult<Riwayat> {
        let mut tx = self.pool.begin().await?;

        let loan = sqlx::query_as::<_, PeminjamanDetail>(
            r#"
            SELECT p.id, p.barang_id, p.nama_lengkap, p.nim, p.jurusan, p.instansi,
                   p.telepon, p.email, p.jumlah, p.tanggal_mulai, p.tanggal_selesai,
                   p.lama_pinjam, p.total_biaya, p.catatan, p.status, p.metode_konfirmasi,
                   p.created_at, p.updated_at,
                   b.nama AS nama_barang, b.gambar AS gambar_barang, b.harga AS harga_barang
            FROM peminjaman p
            JOIN barang b ON p.barang_id = b.id
            WHERE p.id = $1
            FOR UPDATE OF p
            "#,
        )
        .bind(loan_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", loan_id)))?;

        let record = sqlx::query_as::<_, Riwayat>(
            r#"
            INSERT INTO riwayat (
                peminjaman_id, barang_id, nama_barang, gambar_barang,
                nama_lengkap, nim, jurusan, instansi, telepon, email,
                jumlah, tanggal_mulai, tanggal_selesai, lama_pinjam, total_biaya,
                catatan, status_akhir, kondisi_kembali, denda, catatan_admin, completed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                    $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, now())
            RETURNING *
            "#,
        )
        .bind(loan.id)
        .bind(loan.barang_id)
        .bind(&loan.nama_barang)
        .bind(&loan.gambar_barang)
        .bind(&loan.nama_lengkap)
        .bind(&loan.nim)
        .bind(&loan.jurusan)
        .bind(&loan.instansi)
        .bind(&loan.telepon)
        .bind(&loan.email)
        .bind(loan.jumlah)
        .bind(loan.tanggal_mulai)
        .bind(loan.tanggal_selesai)
        .bind(loan.lama_pinjam)
        .bind(loan.total_biaya)
        .bind(&loan.catatan)
        .bind(final_status)
        .bind(kondisi_kembali)
        .bind(denda)
        .bind(catatan_admin)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Loan {} is already archived", loan_id))
            }
            _ => AppError::from(e),
        })?;

        sqlx::query("DELETE FROM peminjaman WHERE id = $1")
            .bind(loan_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(record)
    }

    /// Get history record by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Riwayat> {
        sqlx::query_as::<_, Riwayat>("SELECT * FROM riwayat WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("History record with id {} not found", id)))
    }

    /// Search history with filters and pagination
    pub async fn search(&self, query: &RiwayatQuery) -> AppResult<(Vec<Riwayat>, i64)> {
        let (_, limit, offset) = paginate(query.page, query.limit);

        let mut conditions = vec!["1=1".to_string()];

        if let Some(ref search) = query.search {
            let term = escape_like(&search.to_lowercase());
            conditions.push(format!(
                "(LOWER(nama_lengkap) LIKE '%{t}%' OR LOWER(nim) LIKE '%{t}%' \
                 OR LOWER(nama_barang) LIKE '%{t}%')",
                t = term
            ));
        }

        if let Some(start) = query.start_date {
            conditions.push(format!("completed_at::date >= '{}'", start));
        }

        if let Some(end) = query.end_date {
            conditions.push(format!("completed_at::date <= '{}'", end));
        }

        if let Some(status) = query.status_akhir {
            conditions.push(format!("status_akhir = '{}'", status.as_str()));
        }

        if let Some(kondisi) = query.kondisi_kembali {
            conditions.push(format!("kondisi_kembali = '{}'", kondisi.as_str()));
        }

        let where_clause = conditions.join(" AND ");

        let count_query = format!("SELECT COUNT(*) FROM riwayat WHERE {}", where_clause);
        let total: i64 = sqlx::query_scalar(&count_query)
            .fetch_one(&self.pool)
            .await?;

        let select_query = format!(
            "SELECT * FROM riwayat WHERE {} ORDER BY completed_at DESC LIMIT {} OFFSET {}",
            where_clause, limit, offset
        );
        let records = sqlx::query_as::<_, Riwayat>(&select_query)
            .fetch_all(&self.pool)
            .await?;

        Ok((records, total))
    }

    /// Bulk export filtered by completion date range, no pagination
    pub async fn export(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> AppResult<Vec<Riwayat>> {
        let mut conditions = vec!["1=1".to_string()];

        if let Some(start) = start_date {
            conditions.push(format!("completed_at::date >= '{}'", start));
        }
        if let Some(end) = end_date {
            conditions.push(format!("completed_at::date <= '{}'", end));
        }

        let query = format!(
            "SELECT * FROM riwayat WHERE {} ORDER BY completed_at DESC",
            conditions.join(" AND ")
        );

        let records = sqlx::query_as::<_, Riwayat>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    /// Full scan-and-reduce aggregation, recomputed on every call
    pub async fn stats(&self) -> AppResult<RiwayatStats> {
        let stats = sqlx::query_as::<_, RiwayatStats>(
            r#"
            SELECT COUNT(*) AS total_loans,
                   COALESCE(SUM(total_biaya), 0) AS total_revenue,
                   COALESCE(SUM(denda), 0) AS total_fines,
                   COUNT(*) FILTER (WHERE status_akhir = 'selesai') AS completed_count,
                   COUNT(*) FILTER (WHERE status_akhir = 'dibatalkan') AS cancelled_count
            FROM riwayat
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    /// Append a timeline event. Pure insert; the loan id may reference an
    /// archived or even deleted loan.
    pub async fn append_timeline(
        &self,
        loan_id: Uuid,
        status: &str,
        keterangan: &str,
    ) -> AppResult<TimelineEvent> {
        let event = sqlx::query_as::<_, TimelineEvent>(
            r#"
            INSERT INTO riwayat_timeline (peminjaman_id, status, keterangan)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(loan_id)
        .bind(status)
        .bind(keterangan)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Timeline events for a loan, ascending by creation time
    pub async fn timeline(&self, loan_id: Uuid) -> AppResult<Vec<TimelineEvent>> {
        let events = sqlx::query_as::<_, TimelineEvent>(
            "SELECT * FROM riwayat_timeline WHERE peminjaman_id = $1 ORDER BY created_at ASC",
        )
        .bind(loan_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }
}
