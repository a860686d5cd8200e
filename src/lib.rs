//! Typed Rust client for the MessageMedia Messages HTTP API.
//!
//! The crate is split into a domain layer of strong types, a transport layer for
//! the JSON wire format, and a small client layer that executes one HTTP call per
//! operation: send messages, look up or cancel a message, and poll/confirm
//! delivery reports and replies.
//!
//! ```rust,no_run
//! use messagemedia::{
//!     Auth, ConfirmDeliveryReports, MessageContent, MessageMediaClient, NewMessage,
//!     RawPhoneNumber, SendMessages,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), messagemedia::MessageMediaError> {
//!     let client = MessageMediaClient::new(Auth::basic("api-key", "api-secret")?);
//!
//!     let message = NewMessage::sms(
//!         MessageContent::new("hello")?,
//!         RawPhoneNumber::new("+61491570156")?,
//!     );
//!     client.send_messages(SendMessages::one(message)).await?;
//!
//!     // Reports keep coming back until they are confirmed.
//!     let reports = client.check_delivery_reports().await?;
//!     if !reports.delivery_reports.is_empty() {
//!         client
//!             .confirm_delivery_reports(ConfirmDeliveryReports::new(reports.ids())?)
//!             .await?;
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    Auth, HttpContext, HttpHook, HttpMethod, HttpRequest, HttpResponse, MessageMediaClient,
    MessageMediaClientBuilder, MessageMediaError,
};
pub use domain::{
    AccountId, CallbackUrl, CheckDeliveryReportsResponse, CheckRepliesResponse,
    ConfirmDeliveryReports, ConfirmReplies, DeliveryReport, DeliveryReportId, MediaUrl, Message,
    MessageContent, MessageFormat, MessageId, MessageOptions, MessageStatus, Metadata, NewMessage,
    PhoneNumber, RawPhoneNumber, Reply, ReplyId, SendMessages, SendMessagesResponse,
    SourceNumberType, ValidationError,
};
