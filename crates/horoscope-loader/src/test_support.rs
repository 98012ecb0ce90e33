//! Test support: canned feed bodies and a feed source that never touches the
//! network. Used by this crate's tests and by the session tests downstream.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use horoscope_models::Sign;

use crate::error::LoaderError;
use crate::source::FeedSource;

/// One well-formed feed entry whose texts are `"{Sign} daily"`,
/// `"{Sign} weekly"` and so on.
pub fn entry_json(sign: Sign) -> serde_json::Value {
    let name = sign.as_str();
    serde_json::json!({
        "Sign": name,
        "Daily_Horoscope": format!("{name} daily"),
        "Weekly_Horoscope": format!("{name} weekly"),
        "Monthly_Horoscope": format!("{name} monthly"),
        "Love": format!("{name} love"),
        "Career": format!("{name} career"),
        "Wellness": format!("{name} wellness"),
    })
}

/// A feed response body covering `signs`.
pub fn feed_body(signs: &[Sign]) -> String {
    let data: Vec<_> = signs.iter().map(|s| entry_json(*s)).collect();
    serde_json::json!({ "data": data }).to_string()
}

/// What a `StaticFeedSource` answers with.
#[derive(Debug, Clone)]
pub enum Canned {
    Body(String),
    NetworkFailure,
}

/// A feed source returning a canned answer and counting calls.
pub struct StaticFeedSource {
    canned: Canned,
    calls: AtomicUsize,
}

impl StaticFeedSource {
    pub fn body(body: impl Into<String>) -> Self {
        Self {
            canned: Canned::Body(body.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// A source answering with a complete, well-formed feed.
    pub fn complete() -> Self {
        Self::body(feed_body(&Sign::ALL))
    }

    pub fn failing() -> Self {
        Self {
            canned: Canned::NetworkFailure,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedSource for StaticFeedSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self) -> Result<String, LoaderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.canned {
            Canned::Body(body) => Ok(body.clone()),
            Canned::NetworkFailure => Err(LoaderError::Network("connection refused".to_string())),
        }
    }
}
