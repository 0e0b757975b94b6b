//! Health profile used to personalise prompts.

use crate::constants::{DEFAULT_PROFILE_AGE, EMPTY_LIST_TEXT};
use crate::{RelayError, RelayResult};
use std::str::FromStr;

/// Age, allergies and conditions of the person asking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub age: u32,
    pub allergies: Vec<String>,
    pub conditions: Vec<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            age: DEFAULT_PROFILE_AGE,
            allergies: Vec::new(),
            conditions: Vec::new(),
        }
    }
}

impl Profile {
    /// Allergies joined with `", "`, or `"None"` when there are none.
    pub fn allergy_list(&self) -> String {
        join_or_none(&self.allergies)
    }

    /// Conditions joined with `", "`, or `"None"` when there are none.
    pub fn condition_list(&self) -> String {
        join_or_none(&self.conditions)
    }
}

fn join_or_none(entries: &[String]) -> String {
    if entries.is_empty() {
        EMPTY_LIST_TEXT.to_string()
    } else {
        entries.join(", ")
    }
}

/// Where the profile for a request comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileSource {
    /// Caller-supplied fields win; anything missing comes from the configured default profile.
    #[default]
    Caller,
    /// The configured default profile is always used and caller fields are ignored.
    Fixed,
}

impl FromStr for ProfileSource {
    type Err = RelayError;

    fn from_str(s: &str) -> RelayResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "caller" => Ok(Self::Caller),
            "fixed" => Ok(Self::Fixed),
            other => Err(RelayError::InvalidConfig(format!(
                "unknown profile source '{other}' (expected 'caller' or 'fixed')"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_thirty_with_no_history() {
        let profile = Profile::default();
        assert_eq!(profile.age, 30);
        assert_eq!(profile.allergy_list(), "None");
        assert_eq!(profile.condition_list(), "None");
    }

    #[test]
    fn lists_are_comma_joined_in_order() {
        let profile = Profile {
            age: 42,
            allergies: vec!["Ibuprofen".into(), "Shellfish".into()],
            conditions: vec!["Asthma".into(), "High Cholesterol".into()],
        };
        assert_eq!(profile.allergy_list(), "Ibuprofen, Shellfish");
        assert_eq!(profile.condition_list(), "Asthma, High Cholesterol");
    }

    #[test]
    fn parses_profile_source() {
        assert_eq!("caller".parse::<ProfileSource>().unwrap(), ProfileSource::Caller);
        assert_eq!(" FIXED ".parse::<ProfileSource>().unwrap(), ProfileSource::Fixed);

        let err = "sometimes".parse::<ProfileSource>().expect_err("should reject");
        match err {
            RelayError::InvalidConfig(msg) => assert!(msg.contains("sometimes")),
            other => panic!("expected InvalidConfig error, got {other:?}"),
        }
    }
}
