pub mod config;
pub mod error;
pub mod parser;
pub mod refresh;
pub mod source;

pub mod test_support;

pub use error::LoaderError;
pub use refresh::{ensure_fresh, load_horoscope, today, RefreshOutcome};
pub use source::{FeedSource, HttpFeedSource};
