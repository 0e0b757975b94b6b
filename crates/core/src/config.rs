//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the fulfilment
//! service. Request handling never reads process-wide environment variables; the default
//! profile in particular is an injected value rather than a global.

use crate::constants::{
    DEFAULT_GEMINI_API_URL, DEFAULT_MAX_ITEM_CHARS, DEFAULT_PORT, DEFAULT_PROFILE_AGE,
    DEFAULT_UPSTREAM_TIMEOUT,
};
use crate::profile::{Profile, ProfileSource};
use crate::query::Language;
use crate::{RelayError, RelayResult};
use std::fmt;
use std::time::Duration;

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_API_URL: &str = "GEMINI_API_URL";
pub const ENV_REST_ADDR: &str = "VAIDYA_REST_ADDR";
pub const ENV_PORT: &str = "PORT";
pub const ENV_UPSTREAM_TIMEOUT_MS: &str = "VAIDYA_UPSTREAM_TIMEOUT_MS";
pub const ENV_DEFAULT_LANGUAGE: &str = "VAIDYA_DEFAULT_LANGUAGE";
pub const ENV_PROFILE_SOURCE: &str = "VAIDYA_PROFILE_SOURCE";
pub const ENV_DEFAULT_AGE: &str = "VAIDYA_DEFAULT_AGE";
pub const ENV_DEFAULT_ALLERGIES: &str = "VAIDYA_DEFAULT_ALLERGIES";
pub const ENV_DEFAULT_CONDITIONS: &str = "VAIDYA_DEFAULT_CONDITIONS";
pub const ENV_MAX_ITEM_CHARS: &str = "VAIDYA_MAX_ITEM_CHARS";

/// Core configuration resolved at startup.
#[derive(Clone)]
pub struct CoreConfig {
    api_key: String,
    api_url: String,
    upstream_timeout: Duration,
    default_language: Language,
    profile_source: ProfileSource,
    default_profile: Profile,
    max_item_chars: usize,
}

impl CoreConfig {
    /// Create a new `CoreConfig` with defaults for everything but the upstream.
    ///
    /// # Errors
    /// Returns `RelayError::MissingApiKey` if `api_key` is blank, or
    /// `RelayError::InvalidEndpoint` if `api_url` is not an absolute URL.
    pub fn new(api_key: String, api_url: String) -> RelayResult<Self> {
        if api_key.trim().is_empty() {
            return Err(RelayError::MissingApiKey);
        }
        reqwest::Url::parse(&api_url)
            .map_err(|e| RelayError::InvalidEndpoint(format!("{api_url}: {e}")))?;

        Ok(Self {
            api_key,
            api_url,
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
            default_language: Language::En,
            profile_source: ProfileSource::default(),
            default_profile: Profile::default(),
            max_item_chars: DEFAULT_MAX_ITEM_CHARS,
        })
    }

    /// Resolve the whole configuration through `lookup`, which maps a variable name to its value.
    ///
    /// Passing `|key| std::env::var(key).ok()` reads the process environment; tests pass a map.
    pub fn from_env_lookup<F>(lookup: F) -> RelayResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = api_key_from_env_value(lookup(ENV_API_KEY))?;
        let api_url = api_url_from_env_value(lookup(ENV_API_URL));

        let default_profile = Profile {
            age: age_from_env_value(lookup(ENV_DEFAULT_AGE))?,
            allergies: list_from_env_value(lookup(ENV_DEFAULT_ALLERGIES)),
            conditions: list_from_env_value(lookup(ENV_DEFAULT_CONDITIONS)),
        };

        Self::new(api_key, api_url)?
            .with_upstream_timeout(timeout_from_env_value(lookup(ENV_UPSTREAM_TIMEOUT_MS))?)?
            .with_default_language(language_from_env_value(lookup(ENV_DEFAULT_LANGUAGE))?)
            .with_profile_source(profile_source_from_env_value(lookup(ENV_PROFILE_SOURCE))?)
            .with_default_profile(default_profile)?
            .with_max_item_chars(max_item_chars_from_env_value(lookup(ENV_MAX_ITEM_CHARS))?)
    }

    pub fn with_upstream_timeout(mut self, timeout: Duration) -> RelayResult<Self> {
        if timeout.is_zero() {
            return Err(RelayError::InvalidConfig(
                "upstream timeout must be greater than zero".into(),
            ));
        }
        self.upstream_timeout = timeout;
        Ok(self)
    }

    pub fn with_default_language(mut self, language: Language) -> Self {
        self.default_language = language;
        self
    }

    pub fn with_profile_source(mut self, source: ProfileSource) -> Self {
        self.profile_source = source;
        self
    }

    pub fn with_default_profile(mut self, profile: Profile) -> RelayResult<Self> {
        if profile.age == 0 {
            return Err(RelayError::InvalidConfig(
                "default profile age must be greater than zero".into(),
            ));
        }
        self.default_profile = profile;
        Ok(self)
    }

    pub fn with_max_item_chars(mut self, max: usize) -> RelayResult<Self> {
        if max == 0 {
            return Err(RelayError::InvalidConfig(
                "max item length must be greater than zero".into(),
            ));
        }
        self.max_item_chars = max;
        Ok(self)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn upstream_timeout(&self) -> Duration {
        self.upstream_timeout
    }

    pub fn default_language(&self) -> Language {
        self.default_language
    }

    pub fn profile_source(&self) -> ProfileSource {
        self.profile_source
    }

    pub fn default_profile(&self) -> &Profile {
        &self.default_profile
    }

    pub fn max_item_chars(&self) -> usize {
        self.max_item_chars
    }
}

// The API key must never reach the logs.
impl fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoreConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("default_language", &self.default_language)
            .field("profile_source", &self.profile_source)
            .field("default_profile", &self.default_profile)
            .field("max_item_chars", &self.max_item_chars)
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_positive<T>(name: &str, value: Option<String>, default: T) -> RelayResult<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let Some(raw) = non_blank(value) else {
        return Ok(default);
    };
    match raw.parse::<T>() {
        Ok(parsed) if parsed > T::default() => Ok(parsed),
        _ => Err(RelayError::InvalidConfig(format!(
            "{name} must be a positive integer, got '{raw}'"
        ))),
    }
}

/// Parse the upstream API key. It is required.
pub fn api_key_from_env_value(value: Option<String>) -> RelayResult<String> {
    non_blank(value).ok_or(RelayError::MissingApiKey)
}

/// Parse the upstream endpoint, falling back to the Gemini 2.0 Flash endpoint.
pub fn api_url_from_env_value(value: Option<String>) -> String {
    non_blank(value).unwrap_or_else(|| DEFAULT_GEMINI_API_URL.to_string())
}

/// Parse the upstream timeout in milliseconds.
pub fn timeout_from_env_value(value: Option<String>) -> RelayResult<Duration> {
    let default_ms = DEFAULT_UPSTREAM_TIMEOUT.as_millis() as u64;
    parse_positive(ENV_UPSTREAM_TIMEOUT_MS, value, default_ms).map(Duration::from_millis)
}

/// Parse the default language. Unset means English.
pub fn language_from_env_value(value: Option<String>) -> RelayResult<Language> {
    non_blank(value)
        .map(|v| v.parse::<Language>())
        .transpose()
        .map(|parsed| parsed.unwrap_or(Language::En))
}

pub fn profile_source_from_env_value(value: Option<String>) -> RelayResult<ProfileSource> {
    non_blank(value)
        .map(|v| v.parse::<ProfileSource>())
        .transpose()
        .map(Option::unwrap_or_default)
}

pub fn age_from_env_value(value: Option<String>) -> RelayResult<u32> {
    parse_positive(ENV_DEFAULT_AGE, value, DEFAULT_PROFILE_AGE)
}

/// Split a comma-separated list, dropping blank entries.
pub fn list_from_env_value(value: Option<String>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn max_item_chars_from_env_value(value: Option<String>) -> RelayResult<usize> {
    parse_positive(ENV_MAX_ITEM_CHARS, value, DEFAULT_MAX_ITEM_CHARS)
}

/// Resolve the REST listen address.
///
/// An explicit address wins; otherwise the server binds all interfaces on `port`, or on 3000.
pub fn rest_addr_from_env_values(
    addr: Option<String>,
    port: Option<String>,
) -> RelayResult<String> {
    if let Some(addr) = non_blank(addr) {
        return Ok(addr);
    }
    let port = match non_blank(port) {
        Some(raw) => raw.parse::<u16>().map_err(|_| {
            RelayError::InvalidConfig(format!("{ENV_PORT} must be a port number, got '{raw}'"))
        })?,
        None => DEFAULT_PORT,
    };
    Ok(format!("0.0.0.0:{port}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn minimal_environment_uses_defaults() {
        let cfg = CoreConfig::from_env_lookup(lookup_from(&[(ENV_API_KEY, "secret")]))
            .expect("config");

        assert_eq!(cfg.api_key(), "secret");
        assert_eq!(cfg.api_url(), DEFAULT_GEMINI_API_URL);
        assert_eq!(cfg.upstream_timeout(), Duration::from_secs(7));
        assert_eq!(cfg.default_language(), Language::En);
        assert_eq!(cfg.profile_source(), ProfileSource::Caller);
        assert_eq!(cfg.default_profile(), &Profile::default());
        assert_eq!(cfg.max_item_chars(), 500);
    }

    #[test]
    fn full_environment_is_honoured() {
        let cfg = CoreConfig::from_env_lookup(lookup_from(&[
            (ENV_API_KEY, "secret"),
            (ENV_API_URL, "http://127.0.0.1:9999/generate"),
            (ENV_UPSTREAM_TIMEOUT_MS, "4500"),
            (ENV_DEFAULT_LANGUAGE, "hi"),
            (ENV_PROFILE_SOURCE, "fixed"),
            (ENV_DEFAULT_AGE, "65"),
            (ENV_DEFAULT_ALLERGIES, "Penicillin, , Peanuts"),
            (ENV_DEFAULT_CONDITIONS, "Diabetes"),
            (ENV_MAX_ITEM_CHARS, "120"),
        ]))
        .expect("config");

        assert_eq!(cfg.api_url(), "http://127.0.0.1:9999/generate");
        assert_eq!(cfg.upstream_timeout(), Duration::from_millis(4500));
        assert_eq!(cfg.default_language(), Language::Hi);
        assert_eq!(cfg.profile_source(), ProfileSource::Fixed);
        assert_eq!(
            cfg.default_profile(),
            &Profile {
                age: 65,
                allergies: vec!["Penicillin".into(), "Peanuts".into()],
                conditions: vec!["Diabetes".into()],
            }
        );
        assert_eq!(cfg.max_item_chars(), 120);
    }

    #[test]
    fn blank_api_key_is_rejected() {
        let err = CoreConfig::from_env_lookup(lookup_from(&[(ENV_API_KEY, "   ")]))
            .expect_err("should reject blank key");
        assert!(matches!(err, RelayError::MissingApiKey));
    }

    #[test]
    fn relative_endpoint_is_rejected() {
        let err = CoreConfig::new("secret".into(), "not a url".into())
            .expect_err("should reject endpoint");
        assert!(matches!(err, RelayError::InvalidEndpoint(_)));
    }

    #[test]
    fn zero_and_garbage_numbers_are_rejected() {
        assert!(timeout_from_env_value(Some("0".into())).is_err());
        assert!(timeout_from_env_value(Some("soon".into())).is_err());
        assert!(age_from_env_value(Some("-4".into())).is_err());
        assert!(max_item_chars_from_env_value(Some("0".into())).is_err());
        assert_eq!(
            timeout_from_env_value(Some("  ".into())).unwrap(),
            DEFAULT_UPSTREAM_TIMEOUT
        );
    }

    #[test]
    fn unknown_default_language_is_a_config_error() {
        let err = language_from_env_value(Some("fr".into())).expect_err("should reject");
        assert!(matches!(err, RelayError::InvalidConfig(_)));
    }

    #[test]
    fn rest_addr_prefers_explicit_address() {
        assert_eq!(
            rest_addr_from_env_values(Some("127.0.0.1:8080".into()), Some("9000".into())).unwrap(),
            "127.0.0.1:8080"
        );
        assert_eq!(
            rest_addr_from_env_values(None, Some("9000".into())).unwrap(),
            "0.0.0.0:9000"
        );
        assert_eq!(rest_addr_from_env_values(None, None).unwrap(), "0.0.0.0:3000");
        assert!(rest_addr_from_env_values(None, Some("http".into())).is_err());
    }

    #[test]
    fn debug_output_redacts_the_api_key() {
        let cfg = CoreConfig::new("super-secret".into(), DEFAULT_GEMINI_API_URL.into())
            .expect("config");
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
