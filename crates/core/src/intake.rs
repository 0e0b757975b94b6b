//! Request intake.
//!
//! Turns an arbitrary inbound webhook payload into a [`PromptRequest`]. Intake is total: a
//! missing, blank or wrongly typed field falls back to its default and nothing here can fail.

use crate::config::CoreConfig;
use crate::constants::PLACEHOLDER_ITEM;
use crate::profile::{Profile, ProfileSource};
use crate::query::{Language, PromptRequest, QueryType};
use serde_json::Value;

/// Extract a prompt request from a webhook payload.
///
/// Field sources, in priority order:
/// - `type`: `queryResult.parameters.type`, else `general`
/// - `item`: `parameters.item`, else `queryResult.queryText`, else a fixed placeholder
/// - `language`: `parameters.language`, else the configured default language
/// - `profile`: caller fields over the configured default profile, or the default profile
///   alone when the configured source is [`ProfileSource::Fixed`]
///
/// The item is cut to `max_item_chars` chars. Its content is passed through untouched.
pub fn extract(payload: &Value, cfg: &CoreConfig) -> PromptRequest {
    let query_result = payload.get("queryResult");
    let parameters = query_result.and_then(|q| q.get("parameters"));
    let param = |key: &str| parameters.and_then(|p| p.get(key));

    let query_type = param("type")
        .and_then(Value::as_str)
        .map(QueryType::from_param)
        .unwrap_or_default();

    let item = param("item")
        .and_then(non_blank_str)
        .or_else(|| query_result.and_then(|q| q.get("queryText")).and_then(non_blank_str))
        .unwrap_or(PLACEHOLDER_ITEM);

    let language = param("language")
        .and_then(Value::as_str)
        .and_then(Language::from_code)
        .unwrap_or(cfg.default_language());

    let profile = match cfg.profile_source() {
        ProfileSource::Fixed => cfg.default_profile().clone(),
        ProfileSource::Caller => Profile {
            age: param("age")
                .and_then(age_from_value)
                .unwrap_or(cfg.default_profile().age),
            allergies: param("allergies")
                .and_then(list_from_value)
                .unwrap_or_else(|| cfg.default_profile().allergies.clone()),
            conditions: param("conditions")
                .and_then(list_from_value)
                .unwrap_or_else(|| cfg.default_profile().conditions.clone()),
        },
    };

    PromptRequest {
        query_type,
        item: truncate_chars(item, cfg.max_item_chars()),
        language,
        profile,
    }
}

fn non_blank_str(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}

/// Accepts positive integers, positive floats (truncated) and numeric strings.
fn age_from_value(value: &Value) -> Option<u32> {
    let age = match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(whole_years))?,
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole_years))?
        }
        _ => return None,
    };
    u32::try_from(age).ok().filter(|age| *age > 0)
}

fn whole_years(years: f64) -> Option<u64> {
    (years.is_finite() && years >= 1.0).then(|| years.trunc() as u64)
}

/// Accepts an array of strings (other entries skipped) or one string.
///
/// An array may legitimately be empty, meaning "none"; a blank single string is treated as
/// absent.
fn list_from_value(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(entries) => Some(
            entries
                .iter()
                .filter_map(non_blank_str)
                .map(str::to_string)
                .collect(),
        ),
        Value::String(_) => non_blank_str(value).map(|s| vec![s.to_string()]),
        _ => None,
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}
