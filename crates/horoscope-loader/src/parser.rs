use std::collections::BTreeMap;

use horoscope_models::{FeedEntry, FeedEnvelope, HoroscopeRecord, Sign};

use crate::error::LoaderError;

/// Parse a feed response body into one record per sign, in `Sign::ALL` order.
///
/// The whole body is validated before anything is returned: a bad envelope,
/// a bad entry, an unknown sign or a sign missing from the feed all fail.
/// When a sign appears twice the later entry wins.
pub fn parse_feed(body: &str) -> Result<Vec<(Sign, HoroscopeRecord)>, LoaderError> {
    let envelope: FeedEnvelope =
        serde_json::from_str(body).map_err(|e| LoaderError::Parse(e.to_string()))?;

    let mut by_sign = BTreeMap::new();
    for (index, value) in envelope.data.into_iter().enumerate() {
        let entry: FeedEntry = serde_json::from_value(value).map_err(|e| {
            LoaderError::InvalidEntry {
                index,
                reason: e.to_string(),
            }
        })?;
        let sign: Sign = entry.sign.parse().map_err(|e: horoscope_models::UnknownSign| {
            LoaderError::InvalidEntry {
                index,
                reason: e.to_string(),
            }
        })?;
        by_sign.insert(sign, entry.into_record());
    }

    let missing: Vec<Sign> = Sign::ALL
        .iter()
        .copied()
        .filter(|sign| !by_sign.contains_key(sign))
        .collect();
    if !missing.is_empty() {
        return Err(LoaderError::MissingSigns(missing));
    }

    Ok(by_sign.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{entry_json, feed_body};

    #[test]
    fn parse_complete_feed() {
        let records = parse_feed(&feed_body(&Sign::ALL)).unwrap();
        assert_eq!(records.len(), 12);

        let signs: Vec<Sign> = records.iter().map(|(s, _)| *s).collect();
        assert_eq!(signs, Sign::ALL.to_vec());

        let (_, leo) = &records[Sign::Leo.index()];
        assert_eq!(leo.daily, "Leo daily");
        assert_eq!(leo.health, "Leo wellness");
    }

    #[test]
    fn feed_sign_names_are_case_insensitive() {
        let data: Vec<_> = Sign::ALL
            .iter()
            .map(|s| {
                let mut entry = entry_json(*s);
                entry["Sign"] = serde_json::json!(s.as_str().to_lowercase());
                entry
            })
            .collect();
        let body = serde_json::json!({ "data": data }).to_string();
        assert_eq!(parse_feed(&body).unwrap().len(), 12);
    }

    #[test]
    fn not_json_is_parse_error() {
        let err = parse_feed("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, LoaderError::Parse(_)));
    }

    #[test]
    fn wrong_envelope_is_parse_error() {
        let err = parse_feed(r#"{"result": []}"#).unwrap_err();
        assert!(matches!(err, LoaderError::Parse(_)));
    }

    #[test]
    fn missing_field_is_invalid_entry() {
        let mut data: Vec<_> = Sign::ALL.iter().map(|s| entry_json(*s)).collect();
        data[4].as_object_mut().unwrap().remove("Career");
        let body = serde_json::json!({ "data": data }).to_string();

        match parse_feed(&body).unwrap_err() {
            LoaderError::InvalidEntry { index, reason } => {
                assert_eq!(index, 4);
                assert!(reason.contains("Career"));
            }
            other => panic!("expected InvalidEntry, got {other:?}"),
        }
    }

    #[test]
    fn unknown_sign_is_invalid_entry() {
        let mut data: Vec<_> = Sign::ALL.iter().map(|s| entry_json(*s)).collect();
        data[0]["Sign"] = serde_json::json!("Ophiuchus");
        let body = serde_json::json!({ "data": data }).to_string();

        assert!(matches!(
            parse_feed(&body).unwrap_err(),
            LoaderError::InvalidEntry { index: 0, .. }
        ));
    }

    #[test]
    fn incomplete_feed_lists_missing_signs() {
        let body = feed_body(&[Sign::Aries, Sign::Taurus]);
        match parse_feed(&body).unwrap_err() {
            LoaderError::MissingSigns(missing) => {
                assert_eq!(missing.len(), 10);
                assert!(missing.contains(&Sign::Leo));
                assert!(!missing.contains(&Sign::Aries));
            }
            other => panic!("expected MissingSigns, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_sign_keeps_last_entry() {
        let mut data: Vec<_> = Sign::ALL.iter().map(|s| entry_json(*s)).collect();
        let mut again = entry_json(Sign::Leo);
        again["Daily_Horoscope"] = serde_json::json!("second opinion");
        data.push(again);
        let body = serde_json::json!({ "data": data }).to_string();

        let records = parse_feed(&body).unwrap();
        assert_eq!(records.len(), 12);
        assert_eq!(records[Sign::Leo.index()].1.daily, "second opinion");
    }
}
