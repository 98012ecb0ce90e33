use horoscope_models::Sign;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Feed request failed: {0}")]
    Network(String),

    #[error("Feed response is not valid JSON of the expected shape: {0}")]
    Parse(String),

    #[error("Feed entry {index} is invalid: {reason}")]
    InvalidEntry { index: usize, reason: String },

    #[error("Feed is missing signs: {0:?}")]
    MissingSigns(Vec<Sign>),

    #[error("No cached horoscope for {0}")]
    MissingRecord(Sign),

    #[error("Cache error: {0}")]
    Cache(#[from] horoscope_cache::CacheError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl LoaderError {
    /// Short message suitable for showing to the person at the terminal.
    pub fn user_message(&self) -> &'static str {
        match self {
            LoaderError::Network(_) => "Error retrieving horoscope.",
            LoaderError::Parse(_) => "Error parsing response.",
            LoaderError::InvalidEntry { .. } | LoaderError::MissingSigns(_) => "Invalid response.",
            LoaderError::MissingRecord(_) => "Horoscope not available.",
            LoaderError::Cache(_) => "Horoscope cache unavailable.",
            LoaderError::Config(_) => "Horoscope is misconfigured.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_by_category() {
        assert_eq!(
            LoaderError::Network("refused".into()).user_message(),
            "Error retrieving horoscope."
        );
        assert_eq!(
            LoaderError::Parse("eof".into()).user_message(),
            "Error parsing response."
        );
        assert_eq!(
            LoaderError::InvalidEntry {
                index: 3,
                reason: "missing field `Love`".into()
            }
            .user_message(),
            "Invalid response."
        );
        assert_eq!(
            LoaderError::MissingSigns(vec![Sign::Leo]).user_message(),
            "Invalid response."
        );
    }

    #[test]
    fn display_includes_detail() {
        let err = LoaderError::InvalidEntry {
            index: 3,
            reason: "missing field `Love`".into(),
        };
        assert_eq!(err.to_string(), "Feed entry 3 is invalid: missing field `Love`");
    }
}
