//! Webhook wire types.
//!
//! These mirror the request body sent by the conversational-agent platform and the reply it
//! expects back. Inbound parsing in `vaidya-core` works on raw JSON so that a wrongly typed field
//! degrades to its default instead of rejecting the request; [`WebhookReq`] describes the shape
//! for documentation and for callers that build payloads in Rust.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Inbound webhook body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WebhookReq {
    #[serde(default)]
    pub query_result: QueryResult,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    /// Raw text the user typed or said.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_text: Option<String>,
    #[serde(default)]
    pub parameters: Parameters,
}

/// Parameters extracted by the agent platform. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Parameters {
    /// `medicine`, `food` or `general`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub query_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    /// `en` or `hi`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Age in years. Intake also accepts a float (truncated to whole years) or a numeric
    /// string; anything else falls back to the default profile age.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Intake also accepts a single string as a one-entry list. Blank entries are dropped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Vec<String>>,
    /// Same forms as `allergies`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<String>>,
}

/// Reply body. Always sent with HTTP 200.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WebhookRes {
    #[serde(rename = "fulfillmentText")]
    pub fulfillment_text: String,
}

impl WebhookRes {
    pub fn new(fulfillment_text: impl Into<String>) -> Self {
        Self {
            fulfillment_text: fulfillment_text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_uses_fulfillment_text_key() {
        let json = serde_json::to_value(WebhookRes::new("1 Rest 2 Hydrate")).expect("serialise");
        assert_eq!(json, serde_json::json!({ "fulfillmentText": "1 Rest 2 Hydrate" }));
    }

    #[test]
    fn request_omits_unset_parameters() {
        let req = WebhookReq {
            query_result: QueryResult {
                query_text: Some("headache".into()),
                parameters: Parameters {
                    query_type: Some("general".into()),
                    language: Some("en".into()),
                    ..Parameters::default()
                },
            },
        };

        let json = serde_json::to_value(&req).expect("serialise");
        assert_eq!(
            json,
            serde_json::json!({
                "queryResult": {
                    "queryText": "headache",
                    "parameters": { "type": "general", "language": "en" }
                }
            })
        );
    }

    #[test]
    fn request_tolerates_missing_query_result() {
        let req: WebhookReq = serde_json::from_str("{}").expect("deserialise");
        assert_eq!(req, WebhookReq::default());
    }
}
