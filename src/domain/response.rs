use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::value::{
    CallbackUrl, DeliveryReportId, MediaUrl, MessageFormat, MessageId, MessageStatus,
    RawPhoneNumber, ReplyId, SourceNumberType,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorAccountId {
    pub vendor_id: String,
    pub account_id: String,
}

/// A message as echoed back by `POST /v1/messages` or `GET /v1/messages/{id}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub message_id: MessageId,
    pub status: MessageStatus,
    pub content: Option<String>,
    pub destination_number: Option<RawPhoneNumber>,
    pub source_number: Option<RawPhoneNumber>,
    pub source_number_type: Option<SourceNumberType>,
    pub callback_url: Option<CallbackUrl>,
    pub delivery_report: Option<bool>,
    pub format: Option<MessageFormat>,
    pub media: Vec<MediaUrl>,
    pub scheduled: Option<DateTime<Utc>>,
    pub message_expiry_timestamp: Option<DateTime<Utc>>,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SendMessagesResponse {
    pub messages: Vec<Message>,
}

/// Notification of a status change of a previously sent message.
///
/// The source number of a delivery report is the destination number of the
/// original message.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryReport {
    pub delivery_report_id: DeliveryReportId,
    pub message_id: MessageId,
    pub status: MessageStatus,
    pub source_number: Option<RawPhoneNumber>,
    pub date_received: Option<DateTime<Utc>>,
    pub submitted_date: Option<DateTime<Utc>>,
    pub delay: Option<u64>,
    pub original_text: Option<String>,
    pub vendor_account_id: Option<VendorAccountId>,
    pub callback_url: Option<CallbackUrl>,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckDeliveryReportsResponse {
    pub delivery_reports: Vec<DeliveryReport>,
}

impl CheckDeliveryReportsResponse {
    /// Ids of every report in this batch, in response order.
    pub fn ids(&self) -> Vec<DeliveryReportId> {
        self.delivery_reports
            .iter()
            .map(|report| report.delivery_report_id.clone())
            .collect()
    }
}

/// An inbound message received in response to a sent message.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub reply_id: ReplyId,
    pub message_id: Option<MessageId>,
    pub content: String,
    pub source_number: Option<RawPhoneNumber>,
    pub destination_number: Option<RawPhoneNumber>,
    pub date_received: Option<DateTime<Utc>>,
    pub vendor_account_id: Option<VendorAccountId>,
    pub callback_url: Option<CallbackUrl>,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckRepliesResponse {
    pub replies: Vec<Reply>,
}

impl CheckRepliesResponse {
    pub fn ids(&self) -> Vec<ReplyId> {
        self.replies
            .iter()
            .map(|reply| reply.reply_id.clone())
            .collect()
    }
}
