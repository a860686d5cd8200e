use chrono::{DateTime, Utc};

use crate::domain::validation::ValidationError;
use crate::domain::value::{
    CallbackUrl, DeliveryReportId, MediaUrl, MessageContent, MessageFormat, Metadata,
    RawPhoneNumber, ReplyId, SourceNumberType,
};

pub const SEND_MESSAGES_MAX: usize = 100;
pub const CONFIRM_DELIVERY_REPORTS_MAX_IDS: usize = 100;
pub const CONFIRM_REPLIES_MAX_IDS: usize = 100;

#[derive(Debug, Clone, Default)]
pub struct MessageOptions {
    pub source_number: Option<RawPhoneNumber>,
    pub source_number_type: Option<SourceNumberType>,
    pub callback_url: Option<CallbackUrl>,
    pub delivery_report: bool,
    pub format: MessageFormat,
    pub media: Vec<MediaUrl>,
    pub scheduled: Option<DateTime<Utc>>,
    pub message_expiry_timestamp: Option<DateTime<Utc>>,
    pub metadata: Metadata,
}

/// One outbound message.
///
/// Invariants checked by [`NewMessage::new`]:
/// - MMS messages carry at least one media URL, other formats carry none;
/// - when both are set, the expiry is later than the scheduled time.
#[derive(Debug, Clone)]
pub struct NewMessage {
    content: MessageContent,
    destination_number: RawPhoneNumber,
    options: MessageOptions,
}

impl NewMessage {
    pub fn new(
        content: MessageContent,
        destination_number: RawPhoneNumber,
        options: MessageOptions,
    ) -> Result<Self, ValidationError> {
        match options.format {
            MessageFormat::Mms if options.media.is_empty() => {
                return Err(ValidationError::MediaRequired);
            }
            MessageFormat::Sms | MessageFormat::Tts if !options.media.is_empty() => {
                return Err(ValidationError::MediaNotAllowed {
                    format: options.format.as_str(),
                });
            }
            _ => {}
        }
        if let (Some(scheduled), Some(expiry)) =
            (options.scheduled, options.message_expiry_timestamp)
        {
            if expiry <= scheduled {
                return Err(ValidationError::ExpiryNotAfterSchedule);
            }
        }

        Ok(Self {
            content,
            destination_number,
            options,
        })
    }

    /// Plain SMS with default options.
    pub fn sms(content: MessageContent, destination_number: RawPhoneNumber) -> Self {
        Self {
            content,
            destination_number,
            options: MessageOptions::default(),
        }
    }

    pub fn content(&self) -> &MessageContent {
        &self.content
    }

    pub fn destination_number(&self) -> &RawPhoneNumber {
        &self.destination_number
    }

    pub fn options(&self) -> &MessageOptions {
        &self.options
    }
}

#[derive(Debug, Clone)]
pub struct SendMessages {
    messages: Vec<NewMessage>,
}

impl SendMessages {
    pub const FIELD: &'static str = "messages";

    pub fn new(messages: Vec<NewMessage>) -> Result<Self, ValidationError> {
        if messages.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if messages.len() > SEND_MESSAGES_MAX {
            return Err(ValidationError::TooMany {
                field: Self::FIELD,
                max: SEND_MESSAGES_MAX,
                actual: messages.len(),
            });
        }
        Ok(Self { messages })
    }

    pub fn one(message: NewMessage) -> Self {
        Self {
            messages: vec![message],
        }
    }

    pub fn messages(&self) -> &[NewMessage] {
        &self.messages
    }
}

/// Ids of processed delivery reports to stop them from being returned again.
#[derive(Debug, Clone)]
pub struct ConfirmDeliveryReports {
    ids: Vec<DeliveryReportId>,
}

impl ConfirmDeliveryReports {
    pub fn new(ids: Vec<DeliveryReportId>) -> Result<Self, ValidationError> {
        if ids.is_empty() {
            return Err(ValidationError::Empty {
                field: DeliveryReportId::FIELD,
            });
        }
        if ids.len() > CONFIRM_DELIVERY_REPORTS_MAX_IDS {
            return Err(ValidationError::TooMany {
                field: DeliveryReportId::FIELD,
                max: CONFIRM_DELIVERY_REPORTS_MAX_IDS,
                actual: ids.len(),
            });
        }
        Ok(Self { ids })
    }

    pub fn one(id: DeliveryReportId) -> Self {
        Self { ids: vec![id] }
    }

    pub fn ids(&self) -> &[DeliveryReportId] {
        &self.ids
    }
}

/// Ids of processed replies to stop them from being returned again.
#[derive(Debug, Clone)]
pub struct ConfirmReplies {
    ids: Vec<ReplyId>,
}

impl ConfirmReplies {
    pub fn new(ids: Vec<ReplyId>) -> Result<Self, ValidationError> {
        if ids.is_empty() {
            return Err(ValidationError::Empty {
                field: ReplyId::FIELD,
            });
        }
        if ids.len() > CONFIRM_REPLIES_MAX_IDS {
            return Err(ValidationError::TooMany {
                field: ReplyId::FIELD,
                max: CONFIRM_REPLIES_MAX_IDS,
                actual: ids.len(),
            });
        }
        Ok(Self { ids })
    }

    pub fn one(id: ReplyId) -> Self {
        Self { ids: vec![id] }
    }

    pub fn ids(&self) -> &[ReplyId] {
        &self.ids
    }
}
