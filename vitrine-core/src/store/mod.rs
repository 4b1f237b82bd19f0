//! Content store: ports and backends for album and photo rows.

pub mod memory;
pub mod ports;
pub mod postgres;

pub use memory::MemoryStore;
pub use ports::{AlbumStore, PhotoStore};
pub use postgres::PostgresDatabase;
