//! Constants used throughout the Vaidya core crate.
//!
//! Defaults for configuration and the fixed reply strings live here so that the REST server,
//! the CLI and the tests agree on them.

use std::time::Duration;

/// Gemini `generateContent` endpoint used when no override is configured.
pub const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Default listen port for the REST server.
pub const DEFAULT_PORT: u16 = 3000;

/// Wall-clock budget for one upstream call.
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_millis(7_000);

/// Age used when neither the caller nor the configuration supplies one.
pub const DEFAULT_PROFILE_AGE: u32 = 30;

/// Upper bound on the item text interpolated into a prompt, in chars.
pub const DEFAULT_MAX_ITEM_CHARS: usize = 500;

/// Item used when the payload carries neither `item` nor `queryText`.
pub const PLACEHOLDER_ITEM: &str = "general health advice";

/// Substituted when the upstream answered without any candidate text.
pub const NO_ANSWER_TEXT: &str = "Unable to generate a response.";

/// Returned when the upstream call fails or times out.
pub const FALLBACK_TEXT: &str = "Unable to generate a response. Please try again.";

/// Rendered in place of an empty allergy or condition list.
pub const EMPTY_LIST_TEXT: &str = "None";
