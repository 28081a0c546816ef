pub mod combined;
pub mod platform;
