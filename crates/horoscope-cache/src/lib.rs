pub mod error;
pub mod memory;
pub mod shared;
pub mod sqlite;

pub use error::CacheError;
pub use shared::HoroscopeCache;
pub use sqlite::SqliteStore;
