//! Repository layer for database operations

pub mod barang;
pub mod peminjaman;
pub mod riwayat;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub barang: barang::BarangRepository,
    pub peminjaman: peminjaman::PeminjamanRepository,
    pub riwayat: riwayat::RiwayatRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            barang: barang::BarangRepository::new(pool.clone()),
            peminjaman: peminjaman::PeminjamanRepository::new(pool.clone()),
            riwayat: riwayat::RiwayatRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Normalize 1-based pagination parameters into (page, limit, offset).
/// Out-of-range pages are left alone so they yield an empty slice.
pub(crate) fn paginate(page: Option<i64>, limit: Option<i64>) -> (i64, i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(10).clamp(1, 100);
    (page, limit, (page - 1) * limit)
}

/// Escape a user-supplied term for interpolation into a LIKE pattern.
pub(crate) fn escape_like(term: &str) -> String {
    term.replace('\'', "''")
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginate_defaults_and_offsets() {
        assert_eq!(paginate(None, None), (1, 10, 0));
        assert_eq!(paginate(Some(2), Some(10)), (2, 10, 10));
        assert_eq!(paginate(Some(99), Some(10)), (99, 10, 980));
        // nonsense input is normalized, not an error
        assert_eq!(paginate(Some(0), Some(0)), (1, 1, 0));
        assert_eq!(paginate(Some(-3), Some(1000)), (1, 100, 0));
    }

    #[test]
    fn escape_like_neutralizes_wildcards_and_quotes() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("o'brien"), "o''brien");
    }
}
