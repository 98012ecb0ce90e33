use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The SQLite schema shared by every process that reads or refreshes the cache.
///
/// ```sql
/// CREATE TABLE IF NOT EXISTS users (
///     handle      TEXT PRIMARY KEY,
///     sign        TEXT NOT NULL,
///     updated_at  TEXT NOT NULL
/// );
///
/// CREATE TABLE IF NOT EXISTS horoscope (
///     key         TEXT PRIMARY KEY,
///     value_json  TEXT NOT NULL,
///     updated_at  TEXT NOT NULL
/// );
/// ```
///
/// `users` maps a handle to a sign name. `horoscope` maps a sign name to a
/// JSON-encoded `HoroscopeRecord`, plus the meta key `horoscope` holding a
/// `FreshnessStamp`.
pub const CACHE_TABLE_DDL: &str = "\
CREATE TABLE IF NOT EXISTS users (
    handle      TEXT PRIMARY KEY,
    sign        TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS horoscope (
    key         TEXT PRIMARY KEY,
    value_json  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);
";

/// Key conventions for the `horoscope` table.
///
/// - Per-sign record: the sign's display name (e.g., `Leo`)
/// - Freshness stamp: `horoscope`
pub mod key_patterns {
    use crate::sign::Sign;

    pub const FRESHNESS: &str = "horoscope";

    pub fn record(sign: Sign) -> String {
        sign.as_str().to_string()
    }

    /// Hot-cache key. Scoped by freshness date so a refresh committed by
    /// another process on a new day never hits yesterday's entry.
    pub fn hot(date: chrono::NaiveDate, sign: Sign) -> String {
        format!("{date}:{}", sign.as_str())
    }
}

/// Value stored under the freshness key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FreshnessStamp {
    pub date: Option<NaiveDate>,
}

impl FreshnessStamp {
    pub fn is_fresh(&self, today: NaiveDate) -> bool {
        self.date == Some(today)
    }
}

/// A raw row of the `horoscope` table.
#[derive(Debug, Clone)]
pub struct CacheRow {
    pub key: String,
    pub value_json: String,
    pub updated_at: String,
}
