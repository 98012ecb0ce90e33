//! Horoscope - pick a zodiac sign, read today's horoscope in the terminal.
//!
//! The shared feed is fetched at most once per calendar day into a SQLite
//! cache that every session reads from.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use horoscope::{build_cache, Session};
//! use horoscope::models::HoroscopeConfig;
//! use horoscope::loader::HttpFeedSource;
//! ```

pub use horoscope_cache as cache;
pub use horoscope_loader as loader;
pub use horoscope_models as models;

pub mod error;
pub mod pager;
pub mod selector;
pub mod session;
pub mod style;
pub mod terminal;
pub mod text;

pub mod test_support;

use std::time::Duration;

use horoscope_cache::{CacheError, HoroscopeCache, SqliteStore};
use horoscope_models::config::CacheConfig;

pub use error::AppError;
pub use session::{Session, State};
pub use style::{Palette, Role};
pub use terminal::{CrosstermTerminal, Key, Terminal};

/// Open the shared cache described by `config`.
pub fn build_cache(config: &CacheConfig) -> Result<HoroscopeCache, CacheError> {
    let store = SqliteStore::open(&config.sqlite_path)?;
    Ok(HoroscopeCache::new(
        store,
        config.memory_max_capacity,
        Duration::from_secs(config.memory_ttl_seconds),
    ))
}
