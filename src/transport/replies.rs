use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{self, TransportError, VendorAccountIdJson};
use crate::domain::{
    CallbackUrl, CheckRepliesResponse, ConfirmReplies, MessageId, RawPhoneNumber, Reply, ReplyId,
};

#[derive(Debug, Serialize)]
struct ConfirmRepliesJsonRequest<'a> {
    reply_ids: Vec<&'a str>,
}

#[derive(Debug, Clone, Deserialize)]
struct CheckRepliesJsonResponse {
    #[serde(default, deserialize_with = "common::null_as_default")]
    replies: Vec<ReplyJson>,
}

#[derive(Debug, Clone, Deserialize)]
struct ReplyJson {
    reply_id: String,
    message_id: Option<String>,
    #[serde(default, deserialize_with = "common::null_as_default")]
    content: String,
    source_number: Option<String>,
    destination_number: Option<String>,
    date_received: Option<DateTime<Utc>>,
    vendor_account_id: Option<VendorAccountIdJson>,
    callback_url: Option<String>,
    metadata: Option<BTreeMap<String, String>>,
}

impl TryFrom<ReplyJson> for Reply {
    type Error = TransportError;

    fn try_from(value: ReplyJson) -> Result<Self, Self::Error> {
        Ok(Self {
            reply_id: common::required("reply_id", value.reply_id, ReplyId::new)?,
            message_id: common::optional(MessageId::FIELD, value.message_id, MessageId::new)?,
            content: value.content,
            source_number: common::optional(
                "source_number",
                value.source_number,
                RawPhoneNumber::new,
            )?,
            destination_number: common::optional(
                "destination_number",
                value.destination_number,
                RawPhoneNumber::new,
            )?,
            date_received: value.date_received,
            vendor_account_id: value.vendor_account_id.map(Into::into),
            callback_url: common::optional(
                CallbackUrl::FIELD,
                value.callback_url,
                CallbackUrl::new,
            )?,
            metadata: common::metadata(value.metadata),
        })
    }
}

pub fn encode_confirm_replies_body(request: &ConfirmReplies) -> Result<String, TransportError> {
    let body = ConfirmRepliesJsonRequest {
        reply_ids: request.ids().iter().map(ReplyId::as_str).collect(),
    };
    Ok(serde_json::to_string(&body)?)
}

pub fn decode_check_replies_response(json: &str) -> Result<CheckRepliesResponse, TransportError> {
    let parsed: CheckRepliesJsonResponse = serde_json::from_str(json)?;
    let replies = parsed
        .replies
        .into_iter()
        .map(Reply::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CheckRepliesResponse { replies })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_confirm_body() {
        let request =
            ConfirmReplies::one(ReplyId::new("011dcead-6988-4ad6-a1c7-6b6c68ea628d").unwrap());
        assert_eq!(
            encode_confirm_replies_body(&request).unwrap(),
            r#"{"reply_ids":["011dcead-6988-4ad6-a1c7-6b6c68ea628d"]}"#
        );
    }

    #[test]
    fn decode_maps_reply_fields() {
        let json = r#"
        {
          "replies": [
            {
              "metadata": { "key1": "value1" },
              "message_id": "877c19ef-fa2e-4cec-827a-e1df9b5509f7",
              "reply_id": "a175e797-2b54-468b-9850-41a3eab32f74",
              "date_received": "2016-12-07T08:43:00.850Z",
              "callback_url": "https://my.callback.url.com",
              "destination_number": "+61418123456",
              "source_number": "+61491570156",
              "vendor_account_id": {
                "vendor_id": "MessageMedia",
                "account_id": "MyAccount"
              },
              "content": "My first reply!"
            }
          ]
        }
        "#;

        let response = decode_check_replies_response(json).unwrap();
        assert_eq!(response.replies.len(), 1);
        let reply = &response.replies[0];
        assert_eq!(reply.reply_id.as_str(), "a175e797-2b54-468b-9850-41a3eab32f74");
        assert_eq!(
            reply.message_id.as_ref().map(MessageId::as_str),
            Some("877c19ef-fa2e-4cec-827a-e1df9b5509f7")
        );
        assert_eq!(reply.content, "My first reply!");
        assert_eq!(
            reply.destination_number.as_ref().map(RawPhoneNumber::raw),
            Some("+61418123456")
        );
        assert!(reply.date_received.is_some());
        assert_eq!(
            reply.metadata.get("key1").map(String::as_str),
            Some("value1")
        );
        assert_eq!(
            response
                .ids()
                .iter()
                .map(ReplyId::as_str)
                .collect::<Vec<_>>(),
            vec!["a175e797-2b54-468b-9850-41a3eab32f74"]
        );
    }

    #[test]
    fn decode_null_replies_and_content() {
        let response = decode_check_replies_response(r#"{"replies": null}"#).unwrap();
        assert!(response.replies.is_empty());

        let json = r#"{ "replies": [ { "reply_id": "r1", "content": null } ] }"#;
        let response = decode_check_replies_response(json).unwrap();
        assert_eq!(response.replies[0].content, "");
    }

    #[test]
    fn decode_rejects_invalid_callback_url() {
        let json = r#"
        { "replies": [ { "reply_id": "r1", "content": "hi", "callback_url": "nope" } ] }
        "#;
        let err = decode_check_replies_response(json).unwrap_err();
        assert!(matches!(
            err,
            TransportError::InvalidField {
                field: "callback_url",
                ..
            }
        ));
    }
}
