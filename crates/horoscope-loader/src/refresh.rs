use chrono::NaiveDate;
use horoscope_cache::HoroscopeCache;
use horoscope_models::{HoroscopeRecord, Sign};
use tracing::{debug, info, warn};

use crate::error::LoaderError;
use crate::parser::parse_feed;
use crate::source::FeedSource;

/// Result of a freshness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The cache was already stamped with today's date; nothing was fetched.
    AlreadyFresh,
    /// The feed was fetched and `records` records were committed.
    Refreshed { records: usize },
}

/// The local calendar date.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Make sure the cache holds today's horoscopes.
///
/// If the stored freshness date equals `today` (and `force` is not set) this
/// returns without any network traffic. Otherwise the feed is fetched once,
/// fully validated, and committed with the date stamp in a single
/// transaction. Any failure leaves the cache exactly as it was.
pub async fn ensure_fresh(
    cache: &HoroscopeCache,
    source: &dyn FeedSource,
    today: NaiveDate,
    force: bool,
) -> Result<RefreshOutcome, LoaderError> {
    let stamp = cache.freshness()?;
    if stamp.is_fresh(today) && !force {
        debug!(%today, "Horoscope cache already fresh");
        return Ok(RefreshOutcome::AlreadyFresh);
    }

    info!(
        source = source.name(),
        stored = ?stamp.date,
        %today,
        "Refreshing horoscope cache"
    );

    let body = source.fetch().await.inspect_err(|e| {
        warn!(error = %e, "Horoscope feed request failed");
    })?;

    let records = parse_feed(&body).inspect_err(|e| {
        warn!(error = %e, "Rejected horoscope feed");
    })?;

    cache.replace_all(&records, today)?;

    info!(records = records.len(), %today, "Horoscope cache refreshed");
    Ok(RefreshOutcome::Refreshed {
        records: records.len(),
    })
}

/// Today's horoscope for `sign`, refreshing the shared cache first if needed.
pub async fn load_horoscope(
    cache: &HoroscopeCache,
    source: &dyn FeedSource,
    sign: Sign,
    today: NaiveDate,
) -> Result<HoroscopeRecord, LoaderError> {
    ensure_fresh(cache, source, today, false).await?;
    cache
        .record(sign, today)
        .await?
        .ok_or(LoaderError::MissingRecord(sign))
}
