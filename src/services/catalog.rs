//! Catalog ("barang") service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::barang::{Barang, BarangQuery, CreateBarang, UpdateBarang},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search the catalog
    pub async fn search(&self, query: &BarangQuery) -> AppResult<(Vec<Barang>, i64)> {
        self.repository.barang.search(query).await
    }

    /// Get catalog item by ID
    pub async fn get(&self, id: Uuid) -> AppResult<Barang> {
        self.repository.barang.get_by_id(id).await
    }

    /// Create a catalog item
    pub async fn create(&self, barang: CreateBarang) -> AppResult<Barang> {
        barang.validate()?;

        if let Some(harga) = barang.harga {
            if harga.is_sign_negative() {
                return Err(AppError::Validation("harga must not be negative".to_string()));
            }
        }
        if let Some(stok) = barang.stok {
            if stok < 0 {
                return Err(AppError::Validation("stok must not be negative".to_string()));
            }
        }

        let created = self.repository.barang.create(&barang).await?;
        tracing::info!(barang_id = %created.id, nama = %created.nama, "Catalog item created");
        Ok(created)
    }

    /// Update a catalog item
    pub async fn update(&self, id: Uuid, barang: UpdateBarang) -> AppResult<Barang> {
        barang.validate()?;

        if let Some(harga) = barang.harga {
            if harga.is_sign_negative() {
                return Err(AppError::Validation("harga must not be negative".to_string()));
            }
        }
        if let Some(stok) = barang.stok {
            if stok < 0 {
                return Err(AppError::Validation("stok must not be negative".to_string()));
            }
        }

        self.repository.barang.update(id, &barang).await
    }

    /// Delete a catalog item (refused while loans reference it)
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.barang.delete(id).await?;
        tracing::info!(barang_id = %id, "Catalog item deleted");
        Ok(())
    }
}
