//! Catalog ("barang") repository for database operations

use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::barang::{Barang, BarangQuery, CreateBarang, UpdateBarang},
};

use super::{escape_like, paginate};

#[derive(Clone)]
pub struct BarangRepository {
    pool: Pool<Postgres>,
}

impl BarangRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get catalog item by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Barang> {
        sqlx::query_as::<_, Barang>("SELECT * FROM barang WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Barang with id {} not found", id)))
    }

    /// Search the catalog with pagination
    pub async fn search(&self, query: &BarangQuery) -> AppResult<(Vec<Barang>, i64)> {
        let (_, limit, offset) = paginate(query.page, query.limit);

        let mut conditions = vec!["1=1".to_string()];

        if let Some(ref search) = query.search {
            let term = escape_like(&search.to_lowercase());
            conditions.push(format!(
                "(LOWER(nama) LIKE '%{t}%' OR LOWER(COALESCE(deskripsi, '')) LIKE '%{t}%')",
                t = term
            ));
        }

        if let Some(ref kategori) = query.kategori {
            conditions.push(format!("kategori = '{}'", kategori.replace('\'', "''")));
        }

        let where_clause = conditions.join(" AND ");

        let count_query = format!("SELECT COUNT(*) FROM barang WHERE {}", where_clause);
        let total: i64 = sqlx::query_scalar(&count_query)
            .fetch_one(&self.pool)
            .await?;

        let select_query = format!(
            "SELECT * FROM barang WHERE {} ORDER BY nama LIMIT {} OFFSET {}",
            where_clause, limit, offset
        );
        let items = sqlx::query_as::<_, Barang>(&select_query)
            .fetch_all(&self.pool)
            .await?;

        Ok((items, total))
    }

    /// Create a new catalog item
    pub async fn create(&self, barang: &CreateBarang) -> AppResult<Barang> {
        let created = sqlx::query_as::<_, Barang>(
            r#"
            INSERT INTO barang (nama, deskripsi, kategori, gambar, harga, stok)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&barang.nama)
        .bind(&barang.deskripsi)
        .bind(&barang.kategori)
        .bind(&barang.gambar)
        .bind(barang.harga.unwrap_or(Decimal::ZERO))
        .bind(barang.stok.unwrap_or(0))
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update a catalog item (partial update, unset fields keep their value)
    pub async fn update(&self, id: Uuid, barang: &UpdateBarang) -> AppResult<Barang> {
        sqlx::query_as::<_, Barang>(
            r#"
            UPDATE barang
            SET nama = COALESCE($2, nama),
                deskripsi = COALESCE($3, deskripsi),
                kategori = COALESCE($4, kategori),
                gambar = COALESCE($5, gambar),
                harga = COALESCE($6, harga),
                stok = COALESCE($7, stok),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&barang.nama)
        .bind(&barang.deskripsi)
        .bind(&barang.kategori)
        .bind(&barang.gambar)
        .bind(barang.harga)
        .bind(barang.stok)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Barang with id {} not found", id)))
    }

    /// Delete a catalog item. Refused while active loans reference it.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        // Let the FK constraint arbitrate instead of a separate EXISTS probe,
        // so a loan created concurrently still maps to a conflict.
        let result = sqlx::query("DELETE FROM barang WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => AppError::Conflict(
                    "Barang has active loans and cannot be deleted".to_string(),
                ),
                _ => AppError::from(e),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Barang with id {} not found", id)));
        }

        Ok(())
    }
}
