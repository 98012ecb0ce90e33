use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::NaiveDate;
use horoscope_models::cache_schema::{key_patterns, FreshnessStamp};
use horoscope_models::{HoroscopeRecord, Sign};

use crate::error::CacheError;
use crate::memory::MemoryCache;
use crate::sqlite::SqliteStore;

/// The shared horoscope cache: moka (hot) in front of SQLite (shared).
///
/// Record reads go moka → SQLite and promote SQLite hits. The freshness stamp
/// and user preferences are always read from SQLite since other sessions may
/// change them at any time.
///
/// SQLite access is synchronized via `Mutex` since `rusqlite::Connection` is not `Sync`.
pub struct HoroscopeCache {
    memory: MemoryCache,
    sqlite: Mutex<SqliteStore>,
}

impl HoroscopeCache {
    pub fn new(sqlite: SqliteStore, max_capacity: u64, memory_ttl: Duration) -> Self {
        Self {
            memory: MemoryCache::new(max_capacity, memory_ttl),
            sqlite: Mutex::new(sqlite),
        }
    }

    fn store(&self) -> Result<MutexGuard<'_, SqliteStore>, CacheError> {
        self.sqlite
            .lock()
            .map_err(|e| CacheError::Unavailable(format!("SQLite mutex poisoned: {e}")))
    }

    pub fn freshness(&self) -> Result<FreshnessStamp, CacheError> {
        self.store()?.freshness()
    }

    /// Get the record for `sign` as of the refresh stamped `date`.
    pub async fn record(
        &self,
        sign: Sign,
        date: NaiveDate,
    ) -> Result<Option<HoroscopeRecord>, CacheError> {
        let hot_key = key_patterns::hot(date, sign);
        if let Some(record) = self.memory.get(&hot_key).await {
            return Ok(Some(record));
        }

        let record = self.store()?.record(sign)?;

        if let Some(record) = &record {
            self.memory.insert(hot_key, record.clone()).await;
        }
        Ok(record)
    }

    /// Atomically replace every record and stamp the cache with `date`.
    /// Clears the hot cache on success.
    pub fn replace_all(
        &self,
        records: &[(Sign, HoroscopeRecord)],
        date: NaiveDate,
    ) -> Result<(), CacheError> {
        self.store()?.replace_all(records, date)?;
        self.memory.invalidate_all();
        Ok(())
    }

    pub fn user_sign(&self, handle: &str) -> Result<Option<Sign>, CacheError> {
        self.store()?.user_sign(handle)
    }

    pub fn set_user_sign(&self, handle: &str, sign: Sign) -> Result<(), CacheError> {
        self.store()?.set_user_sign(handle, sign)
    }

    /// Run `f` against the underlying store. Used for seeding and inspection.
    pub fn with_store<T>(
        &self,
        f: impl FnOnce(&mut SqliteStore) -> Result<T, CacheError>,
    ) -> Result<T, CacheError> {
        let mut store = self.store()?;
        f(&mut store)
    }
}
