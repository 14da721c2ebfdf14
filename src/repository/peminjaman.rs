//! Active-loan ("peminjaman") repository for database operations

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::LoanStatus,
        peminjaman::{CreatePeminjaman, PeminjamanDetail, PeminjamanQuery, PeminjamanStats},
    },
};

use super::{escape_like, paginate};

const DETAIL_SELECT: &str = r#"
    SELECT p.id, p.barang_id, p.nama_lengkap, p.nim, p.jurusan, p.instansi,
           p.telepon, p.email, p.jumlah, p.tanggal_mulai, p.tanggal_selesai,
           p.lama_pinjam, p.total_biaya, p.catatan, p.status, p.metode_konfirmasi,
           p.created_at, p.updated_at,
           b.nama AS nama_barang, b.gambar AS gambar_barang, b.harga AS harga_barang
    FROM peminjaman p
    JOIN barang b ON p.barang_id = b.id
"#;

#[derive(Clone)]
pub struct PeminjamanRepository {
    pool: Pool<Postgres>,
}

impl PeminjamanRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get loan joined with its catalog item
    pub async fn get_detail(&self, id: Uuid) -> AppResult<PeminjamanDetail> {
        let query = format!("{} WHERE p.id = $1", DETAIL_SELECT);
        sqlx::query_as::<_, PeminjamanDetail>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", id)))
    }

    /// Persist a new loan request. Inputs were validated by the service;
    /// dates and duration arrive already parsed and defaulted.
    pub async fn create(
        &self,
        request: &CreatePeminjaman,
        telepon: &str,
        tanggal_mulai: NaiveDate,
        tanggal_selesai: NaiveDate,
        lama_pinjam: i32,
    ) -> AppResult<PeminjamanDetail> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO peminjaman (
                barang_id, nama_lengkap, nim, jurusan, instansi, telepon, email,
                jumlah, tanggal_mulai, tanggal_selesai, lama_pinjam, total_biaya,
                catatan, status, metode_konfirmasi
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, 'pending', $14)
            RETURNING id
            "#,
        )
        .bind(request.barang_id)
        .bind(&request.nama_lengkap)
        .bind(&request.nim)
        .bind(&request.jurusan)
        .bind(&request.instansi)
        .bind(telepon)
        .bind(&request.email)
        .bind(request.jumlah.unwrap_or(1))
        .bind(tanggal_mulai)
        .bind(tanggal_selesai)
        .bind(lama_pinjam)
        .bind(request.total_biaya.unwrap_or_default())
        .bind(&request.catatan)
        .bind(request.metode_konfirmasi.as_deref().unwrap_or("whatsapp"))
        .fetch_one(&self.pool)
        .await?;

        self.get_detail(id).await
    }

    /// Transition a loan to a new status and return the updated record
    pub async fn update_status(&self, id: Uuid, status: LoanStatus) -> AppResult<PeminjamanDetail> {
        let result = sqlx::query(
            "UPDATE peminjaman SET status = $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(status)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Loan with id {} not found", id)));
        }

        self.get_detail(id).await
    }

    /// Delete a loan. NotFound when absent, so a second delete is a clean 404.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM peminjaman WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Loan with id {} not found", id)));
        }

        Ok(())
    }

    /// Search active loans with filters and pagination.
    /// Filtering happens before pagination; out-of-range pages come back empty.
    pub async fn search(
        &self,
        query: &PeminjamanQuery,
        status: Option<LoanStatus>,
    ) -> AppResult<(Vec<PeminjamanDetail>, i64)> {
        let (_, limit, offset) = paginate(query.page, query.limit);

        let mut conditions = vec!["1=1".to_string()];

        if let Some(status) = status {
            conditions.push(format!("p.status = '{}'", status.as_str()));
        }

        if let Some(ref search) = query.search {
            let term = escape_like(&search.to_lowercase());
            conditions.push(format!(
                "(LOWER(p.nama_lengkap) LIKE '%{t}%' OR LOWER(p.nim) LIKE '%{t}%' \
                 OR LOWER(b.nama) LIKE '%{t}%')",
                t = term
            ));
        }

        let where_clause = conditions.join(" AND ");

        let count_query = format!(
            "SELECT COUNT(*) FROM peminjaman p JOIN barang b ON p.barang_id = b.id WHERE {}",
            where_clause
        );
        let total: i64 = sqlx::query_scalar(&count_query)
            .fetch_one(&self.pool)
            .await?;

        let select_query = format!(
            "{} WHERE {} ORDER BY p.created_at DESC LIMIT {} OFFSET {}",
            DETAIL_SELECT, where_clause, limit, offset
        );
        let loans = sqlx::query_as::<_, PeminjamanDetail>(&select_query)
            .fetch_all(&self.pool)
            .await?;

        Ok((loans, total))
    }

    /// Count active loans partitioned by status
    pub async fn stats(&self) -> AppResult<PeminjamanStats> {
        let stats = sqlx::query_as::<_, PeminjamanStats>(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                   COUNT(*) FILTER (WHERE status = 'approved') AS approved,
                   COUNT(*) FILTER (WHERE status = 'rejected') AS rejected
            FROM peminjaman
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    /// Purge rejected loans last touched before the cutoff.
    /// Idempotent; returns the number of rows removed.
    pub async fn purge_rejected_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM peminjaman WHERE status = 'rejected' AND updated_at < $1",
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
