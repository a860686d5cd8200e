use serde::Deserialize;

use super::common;

/// Error envelope returned by MessageMedia with non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiErrorBody {
    pub message: Option<String>,
    pub details: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorJson {
    message: Option<String>,
    #[serde(default, deserialize_with = "common::null_as_default")]
    details: Vec<serde_json::Value>,
}

/// Best-effort decode; `None` when the body is not a JSON error envelope.
pub fn decode_api_error(body: &str) -> Option<ApiErrorBody> {
    let parsed: ApiErrorJson = serde_json::from_str(body).ok()?;
    let details = parsed
        .details
        .into_iter()
        .map(|detail| match detail {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        })
        .collect();
    Some(ApiErrorBody {
        message: parsed.message.filter(|message| !message.trim().is_empty()),
        details,
    })
}
