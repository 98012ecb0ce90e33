pub mod cache_schema;
pub mod config;
pub mod feed;
pub mod record;
pub mod sign;

pub use cache_schema::{CacheRow, FreshnessStamp};
pub use config::{CacheConfig, ColorConfig, DisplayConfig, FeedConfig, HoroscopeConfig};
pub use feed::{FeedEntry, FeedEnvelope};
pub use record::{HoroscopeRecord, Section};
pub use sign::{Sign, UnknownSign};
