use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{self, TransportError};
use crate::domain::{
    CallbackUrl, MediaUrl, Message, MessageFormat, MessageId, MessageStatus, NewMessage,
    RawPhoneNumber, SendMessages, SendMessagesResponse, SourceNumberType,
};

#[derive(Debug, Serialize)]
struct SendMessagesJsonRequest<'a> {
    messages: Vec<NewMessageJson<'a>>,
}

#[derive(Debug, Serialize)]
struct NewMessageJson<'a> {
    content: &'a str,
    destination_number: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_number: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_number_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    callback_url: Option<&'a str>,
    delivery_report: bool,
    format: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    media: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scheduled: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message_expiry_timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<&'a str, &'a str>,
}

impl<'a> From<&'a NewMessage> for NewMessageJson<'a> {
    fn from(message: &'a NewMessage) -> Self {
        let options = message.options();
        Self {
            content: message.content().as_str(),
            destination_number: message.destination_number().raw(),
            source_number: options.source_number.as_ref().map(RawPhoneNumber::raw),
            source_number_type: options.source_number_type.map(SourceNumberType::as_str),
            callback_url: options.callback_url.as_ref().map(CallbackUrl::as_str),
            delivery_report: options.delivery_report,
            format: options.format.as_str(),
            media: options.media.iter().map(MediaUrl::as_str).collect(),
            scheduled: options.scheduled,
            message_expiry_timestamp: options.message_expiry_timestamp,
            metadata: options
                .metadata
                .as_map()
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str()))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct UpdateMessageJsonRequest<'a> {
    status: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct SendMessagesJsonResponse {
    #[serde(default, deserialize_with = "common::null_as_default")]
    messages: Vec<MessageJson>,
}

#[derive(Debug, Clone, Deserialize)]
struct MessageJson {
    message_id: String,
    status: String,
    content: Option<String>,
    destination_number: Option<String>,
    source_number: Option<String>,
    source_number_type: Option<String>,
    callback_url: Option<String>,
    delivery_report: Option<bool>,
    format: Option<String>,
    #[serde(default, deserialize_with = "common::null_as_default")]
    media: Vec<String>,
    scheduled: Option<DateTime<Utc>>,
    message_expiry_timestamp: Option<DateTime<Utc>>,
    metadata: Option<BTreeMap<String, String>>,
}

impl TryFrom<MessageJson> for Message {
    type Error = TransportError;

    fn try_from(value: MessageJson) -> Result<Self, Self::Error> {
        let media = value
            .media
            .into_iter()
            .map(|url| common::required(MediaUrl::FIELD, url, MediaUrl::new))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            message_id: common::required(MessageId::FIELD, value.message_id, MessageId::new)?,
            status: MessageStatus::from_wire(&value.status),
            content: value.content,
            destination_number: common::optional(
                "destination_number",
                value.destination_number,
                RawPhoneNumber::new,
            )?,
            source_number: common::optional(
                "source_number",
                value.source_number,
                RawPhoneNumber::new,
            )?,
            source_number_type: common::optional_enum(
                SourceNumberType::FIELD,
                value.source_number_type,
                SourceNumberType::from_wire,
            )?,
            callback_url: common::optional(
                CallbackUrl::FIELD,
                value.callback_url,
                CallbackUrl::new,
            )?,
            delivery_report: value.delivery_report,
            format: common::optional_enum(
                MessageFormat::FIELD,
                value.format,
                MessageFormat::from_wire,
            )?,
            media,
            scheduled: value.scheduled,
            message_expiry_timestamp: value.message_expiry_timestamp,
            metadata: common::metadata(value.metadata),
        })
    }
}

pub fn encode_send_messages_body(request: &SendMessages) -> Result<String, TransportError> {
    let body = SendMessagesJsonRequest {
        messages: request.messages().iter().map(NewMessageJson::from).collect(),
    };
    Ok(serde_json::to_string(&body)?)
}

pub fn encode_cancel_message_body() -> Result<String, TransportError> {
    let body = UpdateMessageJsonRequest {
        status: MessageStatus::Cancelled.as_str(),
    };
    Ok(serde_json::to_string(&body)?)
}

pub fn decode_send_messages_response(json: &str) -> Result<SendMessagesResponse, TransportError> {
    let parsed: SendMessagesJsonResponse = serde_json::from_str(json)?;
    let messages = parsed
        .messages
        .into_iter()
        .map(Message::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SendMessagesResponse { messages })
}

pub fn decode_message_response(json: &str) -> Result<Message, TransportError> {
    let parsed: MessageJson = serde_json::from_str(json)?;
    Message::try_from(parsed)
}
