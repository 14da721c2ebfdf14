//! Domain models

pub mod barang;
pub mod enums;
pub mod peminjaman;
pub mod riwayat;
