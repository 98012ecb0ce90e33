use serde::Deserialize;

use crate::record::HoroscopeRecord;

/// Top-level shape of the horoscope feed response.
///
/// Entries are kept as raw JSON so that a malformed entry can be reported
/// separately from a malformed envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedEnvelope {
    pub data: Vec<serde_json::Value>,
}

/// One per-sign entry of the feed. Every field is required.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FeedEntry {
    #[serde(rename = "Sign")]
    pub sign: String,
    #[serde(rename = "Daily_Horoscope")]
    pub daily: String,
    #[serde(rename = "Weekly_Horoscope")]
    pub weekly: String,
    #[serde(rename = "Monthly_Horoscope")]
    pub monthly: String,
    #[serde(rename = "Love")]
    pub love: String,
    #[serde(rename = "Career")]
    pub career: String,
    #[serde(rename = "Wellness")]
    pub wellness: String,
}

impl FeedEntry {
    pub fn into_record(self) -> HoroscopeRecord {
        HoroscopeRecord {
            daily: self.daily,
            weekly: self.weekly,
            monthly: self.monthly,
            love: self.love,
            career: self.career,
            health: self.wellness,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_maps_wellness_to_health() {
        let entry: FeedEntry = serde_json::from_value(serde_json::json!({
            "Sign": "Leo",
            "Daily_Horoscope": "daily",
            "Weekly_Horoscope": "weekly",
            "Monthly_Horoscope": "monthly",
            "Love": "love",
            "Career": "career",
            "Wellness": "wellness",
        }))
        .unwrap();
        assert_eq!(entry.sign, "Leo");

        let record = entry.into_record();
        assert_eq!(record.health, "wellness");
        assert_eq!(record.daily, "daily");
    }

    #[test]
    fn entry_missing_field_names_it() {
        let err = serde_json::from_value::<FeedEntry>(serde_json::json!({
            "Sign": "Leo",
            "Daily_Horoscope": "daily",
            "Weekly_Horoscope": "weekly",
            "Monthly_Horoscope": "monthly",
            "Love": "love",
            "Career": "career",
        }))
        .unwrap_err();
        assert!(err.to_string().contains("Wellness"));
    }

    #[test]
    fn envelope_requires_data_array() {
        assert!(serde_json::from_str::<FeedEnvelope>(r#"{"data": []}"#).is_ok());
        assert!(serde_json::from_str::<FeedEnvelope>(r#"{"items": []}"#).is_err());
        assert!(serde_json::from_str::<FeedEnvelope>(r#"{"data": "nope"}"#).is_err());
    }
}
