//! Pinjam Equipment Loan Management System
//!
//! A Rust REST API server for managing equipment loan requests
//! ("peminjaman barang"): a public catalog, a pending/approved/rejected
//! loan workflow, archival of completed loans into an immutable history
//! table, and an append-only timeline log.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
