//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod api_error;
mod common;
mod delivery_reports;
mod messages;
mod replies;

pub use api_error::{ApiErrorBody, decode_api_error};
pub use common::TransportError;
pub use delivery_reports::{
    decode_check_delivery_reports_response, encode_confirm_delivery_reports_body,
};
pub use messages::{
    decode_message_response, decode_send_messages_response, encode_cancel_message_body,
    encode_send_messages_body,
};
pub use replies::{decode_check_replies_response, encode_confirm_replies_body};
