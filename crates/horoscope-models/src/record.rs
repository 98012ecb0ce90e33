use serde::{Deserialize, Serialize};

/// The six-field text bundle cached for one sign.
///
/// Text is stored exactly as received from the feed; cleanup happens at
/// display time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct HoroscopeRecord {
    pub daily: String,
    pub weekly: String,
    pub monthly: String,
    pub love: String,
    pub career: String,
    pub health: String,
}

/// The labeled sections of a horoscope, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Daily,
    Weekly,
    Monthly,
    Love,
    Career,
    Health,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Daily,
        Section::Weekly,
        Section::Monthly,
        Section::Love,
        Section::Career,
        Section::Health,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Daily => "Today:",
            Section::Weekly => "This week:",
            Section::Monthly => "This month:",
            Section::Love => "Love:",
            Section::Career => "Career:",
            Section::Health => "Health:",
        }
    }
}

impl HoroscopeRecord {
    pub fn section(&self, section: Section) -> &str {
        match section {
            Section::Daily => &self.daily,
            Section::Weekly => &self.weekly,
            Section::Monthly => &self.monthly,
            Section::Love => &self.love,
            Section::Career => &self.career,
            Section::Health => &self.health,
        }
    }

    /// Iterate `(section, text)` pairs in display order.
    pub fn sections(&self) -> impl Iterator<Item = (Section, &str)> {
        Section::ALL.into_iter().map(move |s| (s, self.section(s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HoroscopeRecord {
        HoroscopeRecord {
            daily: "d".to_string(),
            weekly: "w".to_string(),
            monthly: "m".to_string(),
            love: "l".to_string(),
            career: "c".to_string(),
            health: "h".to_string(),
        }
    }

    #[test]
    fn sections_in_display_order() {
        let record = sample();
        let collected: Vec<_> = record.sections().map(|(s, t)| (s.label(), t)).collect();
        assert_eq!(
            collected,
            vec![
                ("Today:", "d"),
                ("This week:", "w"),
                ("This month:", "m"),
                ("Love:", "l"),
                ("Career:", "c"),
                ("Health:", "h"),
            ]
        );
    }

    #[test]
    fn record_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 6);
        assert_eq!(obj["health"], "h");
    }
}
