use std::path::Path;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use horoscope_models::cache_schema::{key_patterns, CacheRow, FreshnessStamp, CACHE_TABLE_DDL};
use horoscope_models::{HoroscopeRecord, Sign};
use rusqlite::{Connection, OptionalExtension};

use crate::error::CacheError;

/// SQLite-backed key-value store with two tables: `users` (handle → sign)
/// and `horoscope` (sign → record, plus the freshness stamp).
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the cache database at `path`.
    /// Creates missing parent directories and the schema. Enables WAL mode.
    pub fn open(path: &str) -> Result<Self, CacheError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(CACHE_TABLE_DDL)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        // Other sessions may be mid-refresh on the same file.
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(Self { conn })
    }

    /// Open an in-memory database for testing.
    pub fn open_in_memory() -> Result<Self, CacheError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(CACHE_TABLE_DDL)?;
        Ok(Self { conn })
    }

    /// The sign stored for `handle`, if any.
    ///
    /// A stored value that no longer parses as a sign is treated as absent so
    /// the user is simply asked again.
    pub fn user_sign(&self, handle: &str) -> Result<Option<Sign>, CacheError> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT sign FROM users WHERE handle = ?1",
                rusqlite::params![handle],
                |row| row.get(0),
            )
            .optional()?;

        Ok(stored.and_then(|value| match value.parse::<Sign>() {
            Ok(sign) => Some(sign),
            Err(e) => {
                tracing::warn!(handle, error = %e, "Ignoring unreadable stored sign");
                None
            }
        }))
    }

    /// Store (or overwrite) the sign for `handle`.
    pub fn set_user_sign(&self, handle: &str, sign: Sign) -> Result<(), CacheError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO users (handle, sign, updated_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![handle, sign.as_str(), Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Get a raw row of the `horoscope` table.
    pub fn get(&self, key: &str) -> Result<Option<CacheRow>, CacheError> {
        let row = self
            .conn
            .prepare_cached("SELECT key, value_json, updated_at FROM horoscope WHERE key = ?1")?
            .query_row(rusqlite::params![key], |row| {
                Ok(CacheRow {
                    key: row.get(0)?,
                    value_json: row.get(1)?,
                    updated_at: row.get(2)?,
                })
            })
            .optional()?;
        Ok(row)
    }

    /// The stored freshness stamp; an empty stamp when none was ever written.
    pub fn freshness(&self) -> Result<FreshnessStamp, CacheError> {
        match self.get(key_patterns::FRESHNESS)? {
            Some(row) => Ok(serde_json::from_str(&row.value_json)?),
            None => Ok(FreshnessStamp::default()),
        }
    }

    /// The cached record for `sign`, if present.
    pub fn record(&self, sign: Sign) -> Result<Option<HoroscopeRecord>, CacheError> {
        match self.get(&key_patterns::record(sign))? {
            Some(row) => Ok(Some(serde_json::from_str(&row.value_json)?)),
            None => Ok(None),
        }
    }

    /// Upsert a single record without touching the freshness stamp.
    pub fn put_record(&self, sign: Sign, record: &HoroscopeRecord) -> Result<(), CacheError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO horoscope (key, value_json, updated_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![
                key_patterns::record(sign),
                serde_json::to_string(record)?,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Overwrite the freshness stamp.
    pub fn set_freshness(&self, stamp: FreshnessStamp) -> Result<(), CacheError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO horoscope (key, value_json, updated_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![
                key_patterns::FRESHNESS,
                serde_json::to_string(&stamp)?,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Replace every per-sign record and stamp the cache with `date`, all in
    /// one transaction. Records not in `records` are dropped. Any error rolls
    /// the whole replacement back.
    pub fn replace_all(
        &mut self,
        records: &[(Sign, HoroscopeRecord)],
        date: NaiveDate,
    ) -> Result<(), CacheError> {
        let now = Utc::now().to_rfc3339();
        let stamp = serde_json::to_string(&FreshnessStamp { date: Some(date) })?;

        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM horoscope", [])?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR REPLACE INTO horoscope (key, value_json, updated_at) \
                 VALUES (?1, ?2, ?3)",
            )?;
            for (sign, record) in records {
                stmt.execute(rusqlite::params![
                    key_patterns::record(*sign),
                    serde_json::to_string(record)?,
                    now,
                ])?;
            }
            stmt.execute(rusqlite::params![key_patterns::FRESHNESS, stamp, now])?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Number of per-sign records (the freshness stamp is not counted).
    pub fn record_count(&self) -> Result<usize, CacheError> {
        let count: usize = self.conn.query_row(
            "SELECT COUNT(*) FROM horoscope WHERE key != ?1",
            rusqlite::params![key_patterns::FRESHNESS],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
