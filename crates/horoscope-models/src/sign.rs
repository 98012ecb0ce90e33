use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the twelve zodiac signs, in calendar order starting with Aries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl Sign {
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }

    /// Position in `Sign::ALL`.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name one of the twelve signs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSign(pub String);

impl fmt::Display for UnknownSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sign: {:?}", self.0)
    }
}

impl std::error::Error for UnknownSign {}

impl FromStr for Sign {
    type Err = UnknownSign;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Sign::ALL
            .iter()
            .copied()
            .find(|sign| sign.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownSign(s.to_string()))
    }
}

impl TryFrom<String> for Sign {
    type Error = UnknownSign;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Sign> for String {
    fn from(sign: Sign) -> Self {
        sign.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_calendar_order() {
        assert_eq!(Sign::ALL.len(), 12);
        assert_eq!(Sign::ALL[0], Sign::Aries);
        assert_eq!(Sign::ALL[11], Sign::Pisces);
        for (i, sign) in Sign::ALL.iter().enumerate() {
            assert_eq!(sign.index(), i);
        }
    }

    #[test]
    fn parse_ignores_case_and_whitespace() {
        assert_eq!("leo".parse::<Sign>().unwrap(), Sign::Leo);
        assert_eq!("SAGITTARIUS".parse::<Sign>().unwrap(), Sign::Sagittarius);
        assert_eq!(" Pisces\n".parse::<Sign>().unwrap(), Sign::Pisces);
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "Ophiuchus".parse::<Sign>().unwrap_err();
        assert_eq!(err, UnknownSign("Ophiuchus".to_string()));
        assert!("".parse::<Sign>().is_err());
    }

    #[test]
    fn serde_uses_display_name() {
        let json = serde_json::to_string(&Sign::Capricorn).unwrap();
        assert_eq!(json, r#""Capricorn""#);

        let parsed: Sign = serde_json::from_str(r#""capricorn""#).unwrap();
        assert_eq!(parsed, Sign::Capricorn);

        assert!(serde_json::from_str::<Sign>(r#""Unicorn""#).is_err());
    }
}
