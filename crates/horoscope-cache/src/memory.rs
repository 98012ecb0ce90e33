use std::time::Duration;

use horoscope_models::HoroscopeRecord;
use moka::future::Cache;

/// In-memory hot cache backed by moka.
///
/// Holds recently displayed records so re-picking a sign within a session
/// does not go back to SQLite. Entries are evicted after TTL.
pub struct MemoryCache {
    inner: Cache<String, HoroscopeRecord>,
}

impl MemoryCache {
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    pub async fn get(&self, key: &str) -> Option<HoroscopeRecord> {
        self.inner.get(key).await
    }

    pub async fn insert(&self, key: String, value: HoroscopeRecord) {
        self.inner.insert(key, value).await;
    }

    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}
