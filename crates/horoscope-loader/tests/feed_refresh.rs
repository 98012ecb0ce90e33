//! Daily refresh against a real HTTP server and a file-backed cache.
//!
//! Run with:
//! ```bash
//! cargo test -p horoscope-loader --test feed_refresh
//! ```

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use chrono::NaiveDate;
use horoscope_cache::{HoroscopeCache, SqliteStore};
use horoscope_loader::test_support::feed_body;
use horoscope_loader::{ensure_fresh, load_horoscope, HttpFeedSource, LoaderError, RefreshOutcome};
use horoscope_models::Sign;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn file_cache(path: &str) -> HoroscopeCache {
    HoroscopeCache::new(SqliteStore::open(path).unwrap(), 16, Duration::from_secs(60))
}

async fn feed_server(status: u16, body: String, expected_calls: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/horoscope.php"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .expect(expected_calls)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn one_request_per_day_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("cache").join("horoscope.db");
    let db = db.to_str().unwrap();

    // Day 1 and day 2 each fetch once.
    let server = feed_server(200, feed_body(&Sign::ALL), 2).await;
    let source = HttpFeedSource::new(format!("{}/horoscope.php", server.uri())).unwrap();

    let first = file_cache(db);
    let record = load_horoscope(&first, &source, Sign::Aquarius, day(1))
        .await
        .unwrap();
    assert_eq!(record.daily, "Aquarius daily");

    // A second connection (another session) reuses the stamp.
    let second = file_cache(db);
    let outcome = ensure_fresh(&second, &source, day(1), false).await.unwrap();
    assert_eq!(outcome, RefreshOutcome::AlreadyFresh);
    let record = load_horoscope(&second, &source, Sign::Taurus, day(1))
        .await
        .unwrap();
    assert_eq!(record.health, "Taurus wellness");

    let outcome = ensure_fresh(&second, &source, day(2), false).await.unwrap();
    assert_eq!(outcome, RefreshOutcome::Refreshed { records: 12 });
    assert_eq!(first.freshness().unwrap().date, Some(day(2)));
}

#[tokio::test]
async fn server_error_keeps_yesterdays_cache() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("horoscope.db");
    let db = db.to_str().unwrap();
    let cache = file_cache(db);

    let good = feed_server(200, feed_body(&Sign::ALL), 1).await;
    let source = HttpFeedSource::new(format!("{}/horoscope.php", good.uri())).unwrap();
    ensure_fresh(&cache, &source, day(4), false).await.unwrap();

    let broken = feed_server(500, "oops".to_string(), 1).await;
    let source = HttpFeedSource::new(format!("{}/horoscope.php", broken.uri())).unwrap();
    let err = load_horoscope(&cache, &source, Sign::Leo, day(5))
        .await
        .unwrap_err();

    assert!(matches!(err, LoaderError::Network(_)));
    assert_eq!(err.user_message(), "Error retrieving horoscope.");
    assert_eq!(cache.freshness().unwrap().date, Some(day(4)));
    assert_eq!(
        cache.with_store(|s| s.record_count()).unwrap(),
        12,
        "failed refresh must not touch existing records"
    );
}

#[tokio::test]
async fn partial_feed_is_rejected_over_http() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("horoscope.db");
    let cache = file_cache(db.to_str().unwrap());

    let server = feed_server(200, feed_body(&Sign::ALL[..11]), 1).await;
    let source = HttpFeedSource::new(format!("{}/horoscope.php", server.uri())).unwrap();
    let err = ensure_fresh(&cache, &source, day(6), false)
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Invalid response.");
    assert_eq!(cache.freshness().unwrap().date, None);
}

/// Readers on other connections never see a half-replaced cache: either
/// the old day's full set or the new day's full set.
#[test]
fn readers_see_whole_refreshes_only() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("horoscope.db");
    let db = db.to_str().unwrap().to_string();

    let records: Vec<_> = horoscope_loader::parser::parse_feed(&feed_body(&Sign::ALL)).unwrap();
    let mut writer = SqliteStore::open(&db).unwrap();
    writer.replace_all(&records, day(1)).unwrap();

    let readers = 4;
    let barrier = Arc::new(Barrier::new(1 + readers));

    let writer_barrier = barrier.clone();
    let writer_records = records.clone();
    let writer_handle = thread::spawn(move || {
        writer_barrier.wait();
        for d in 2..=28 {
            writer.replace_all(&writer_records, day(d)).unwrap();
        }
    });

    let reader_handles: Vec<_> = (0..readers)
        .map(|_| {
            let b = barrier.clone();
            let path = db.clone();
            thread::spawn(move || {
                let reader = SqliteStore::open(&path).unwrap();
                b.wait();
                for _ in 0..100 {
                    assert_eq!(reader.record_count().unwrap(), 12);
                    assert!(reader.freshness().unwrap().date.is_some());
                }
            })
        })
        .collect();

    writer_handle.join().unwrap();
    for handle in reader_handles {
        handle.join().unwrap();
    }

    let reader = SqliteStore::open(&db).unwrap();
    assert_eq!(reader.freshness().unwrap().date, Some(day(28)));
}
