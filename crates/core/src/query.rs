//! Request-scoped query values: what is being asked about, in which language, for whom.

use crate::profile::Profile;
use crate::{RelayError, RelayResult};
use std::fmt;
use std::str::FromStr;

/// Kind of question being asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QueryType {
    Medicine,
    Food,
    #[default]
    General,
}

impl QueryType {
    /// Maps a raw `type` parameter onto a query type.
    ///
    /// Matching is trimmed and case-insensitive. Anything unrecognised is `General`, never an
    /// error.
    pub fn from_param(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "medicine" => Self::Medicine,
            "food" => Self::Food,
            _ => Self::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Medicine => "medicine",
            Self::Food => "food",
            Self::General => "general",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language the prompt is written in, and so the language the model answers in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    Hi,
}

impl Language {
    /// Parses a language code (`en`, `hi`), trimmed and case-insensitive.
    ///
    /// Returns `None` for anything else so the caller can apply its configured default.
    pub fn from_code(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Self::En),
            "hi" => Some(Self::Hi),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = RelayError;

    fn from_str(s: &str) -> RelayResult<Self> {
        Self::from_code(s).ok_or_else(|| {
            RelayError::InvalidConfig(format!("unknown language '{s}' (expected 'en' or 'hi')"))
        })
    }
}

/// Everything the prompt renderer needs for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub query_type: QueryType,
    pub item: String,
    pub language: Language,
    pub profile: Profile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_types_fall_through_to_general() {
        assert_eq!(QueryType::from_param("medicine"), QueryType::Medicine);
        assert_eq!(QueryType::from_param(" Food "), QueryType::Food);
        assert_eq!(QueryType::from_param("general"), QueryType::General);
        assert_eq!(QueryType::from_param("surgery"), QueryType::General);
        assert_eq!(QueryType::from_param(""), QueryType::General);
    }

    #[test]
    fn language_codes_are_optional() {
        assert_eq!(Language::from_code("en"), Some(Language::En));
        assert_eq!(Language::from_code("HI"), Some(Language::Hi));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::from_code(""), None);
    }

    #[test]
    fn language_from_str_rejects_unknown_codes() {
        assert_eq!("hi".parse::<Language>().unwrap(), Language::Hi);
        assert!(matches!(
            "de".parse::<Language>(),
            Err(RelayError::InvalidConfig(_))
        ));
    }
}
