//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{
    CONFIRM_DELIVERY_REPORTS_MAX_IDS, CONFIRM_REPLIES_MAX_IDS, ConfirmDeliveryReports,
    ConfirmReplies, MessageOptions, NewMessage, SEND_MESSAGES_MAX, SendMessages,
};
pub use response::{
    CheckDeliveryReportsResponse, CheckRepliesResponse, DeliveryReport, Message, Reply,
    SendMessagesResponse, VendorAccountId,
};
pub use validation::ValidationError;
pub use value::{
    AccountId, ApiKey, ApiSecret, CallbackUrl, DeliveryReportId, MediaUrl, MessageContent,
    MessageFormat, MessageId, MessageStatus, Metadata, PhoneNumber, RawPhoneNumber, ReplyId,
    SourceNumberType,
};
