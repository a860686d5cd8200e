use std::collections::BTreeMap;
use std::fmt;

use phonenumber::country;

use crate::domain::validation::ValidationError;

/// Declares a string newtype that is trimmed and must not be empty.
macro_rules! trimmed_string {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("JSON field name used by MessageMedia (`", $field, "`).")]
            pub const FIELD: &'static str = $field;

            #[doc = concat!("Create a validated [`", stringify!($name), "`].")]
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::Empty { field: Self::FIELD });
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Borrow the validated value.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

trimmed_string!(
    /// MessageMedia API key, the user half of HTTP Basic credentials.
    ///
    /// Invariant: non-empty after trimming.
    ApiKey,
    "api_key"
);

trimmed_string!(
    /// Sub-account identifier sent in the `Account` header.
    ///
    /// Invariant: non-empty after trimming.
    AccountId,
    "account"
);

trimmed_string!(
    /// Message id assigned by MessageMedia when a message is accepted.
    MessageId,
    "message_id"
);

trimmed_string!(
    /// Delivery report id, used to confirm a report once processed.
    DeliveryReportId,
    "delivery_report_ids"
);

trimmed_string!(
    /// Reply id, used to confirm a reply once processed.
    ReplyId,
    "reply_ids"
);

#[derive(Clone, PartialEq, Eq, Hash)]
/// MessageMedia API secret, the password half of HTTP Basic credentials.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
/// `Debug` output never contains the secret.
pub struct ApiSecret(String);

impl ApiSecret {
    pub const FIELD: &'static str = "api_secret";

    /// Create a validated [`ApiSecret`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the secret as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiSecret(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Message body (`content`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageContent(String);

impl MessageContent {
    pub const FIELD: &'static str = "content";

    /// Create validated message content.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unvalidated phone number or sender id as sent to MessageMedia.
///
/// Invariant: non-empty after trimming. This type does not normalize; if you want E.164
/// normalization, parse into [`PhoneNumber`] and convert it into [`RawPhoneNumber`].
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    pub const FIELD: &'static str = "destination_number";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent on the wire.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    fn from(value: PhoneNumber) -> Self {
        Self(value.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Phone number normalized to E.164, e.g. `+61491570156`.
///
/// MessageMedia expects E.164 for `destination_number` and for a `source_number`
/// sent with [`SourceNumberType::International`]; parse user input through this type.
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub const FIELD: &'static str = RawPhoneNumber::FIELD;

    /// Parse a destination number.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::parse_field(Self::FIELD, default_region, input)
    }

    /// Like [`PhoneNumber::parse`], reporting a blank input against `field`
    /// (`source_number`, for instance).
    pub fn parse_field(
        field: &'static str,
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field });
        }

        let parsed = phonenumber::parse(default_region, trimmed).map_err(|_| {
            ValidationError::InvalidPhoneNumber {
                input: trimmed.to_owned(),
            }
        })?;
        Ok(Self(
            phonenumber::format(&parsed)
                .mode(phonenumber::Mode::E164)
                .to_string(),
        ))
    }

    pub fn e164(&self) -> &str {
        &self.0
    }

    /// Sender id pair for [`MessageOptions`](crate::domain::MessageOptions):
    /// the number plus `INTERNATIONAL` as its type.
    pub fn into_source(self) -> (RawPhoneNumber, SourceNumberType) {
        (RawPhoneNumber(self.0), SourceNumberType::International)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn parse_web_url(field: &'static str, value: String) -> Result<url::Url, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    let parsed = url::Url::parse(trimmed).map_err(|_| ValidationError::InvalidUrl {
        field,
        input: trimmed.to_owned(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(ValidationError::InvalidUrl {
            field,
            input: trimmed.to_owned(),
        });
    }
    Ok(parsed)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// URL MessageMedia pushes delivery reports and replies to (`callback_url`).
///
/// Invariant: absolute `http`/`https` URL with a host.
pub struct CallbackUrl(url::Url);

impl CallbackUrl {
    pub const FIELD: &'static str = "callback_url";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        parse_web_url(Self::FIELD, value.into()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &url::Url {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Publicly reachable media file attached to an MMS (`media`).
///
/// Invariant: absolute `http`/`https` URL with a host.
pub struct MediaUrl(url::Url);

impl MediaUrl {
    pub const FIELD: &'static str = "media";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        parse_web_url(Self::FIELD, value.into()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Caller-defined key/value pairs echoed back in delivery reports and replies.
///
/// Invariant: at most [`Metadata::MAX_ENTRIES`] entries, keys non-empty after trimming.
pub struct Metadata(BTreeMap<String, String>);

impl Metadata {
    pub const FIELD: &'static str = "metadata";
    pub const MAX_ENTRIES: usize = 10;

    /// Create validated metadata from any key/value iterator.
    pub fn new<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Result<Self, ValidationError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (key, value) in entries {
            let key = key.into();
            let key = key.trim();
            if key.is_empty() {
                return Err(ValidationError::Empty { field: Self::FIELD });
            }
            map.insert(key.to_owned(), value.into());
        }
        if map.len() > Self::MAX_ENTRIES {
            return Err(ValidationError::TooMany {
                field: Self::FIELD,
                max: Self::MAX_ENTRIES,
                actual: map.len(),
            });
        }
        Ok(Self(map))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Message format (`format`).
pub enum MessageFormat {
    #[default]
    Sms,
    Mms,
    /// Text-to-speech voice call.
    Tts,
}

impl MessageFormat {
    pub const FIELD: &'static str = "format";

    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sms => "SMS",
            Self::Mms => "MMS",
            Self::Tts => "TTS",
        }
    }

    /// Parse the wire representation (case-insensitive).
    pub fn from_wire(value: &str) -> Option<Self> {
        Some(match value.trim().to_ascii_uppercase().as_str() {
            "SMS" => Self::Sms,
            "MMS" => Self::Mms,
            "TTS" => Self::Tts,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// How MessageMedia should interpret `source_number` (`source_number_type`).
pub enum SourceNumberType {
    International,
    Alphanumeric,
    Shortcode,
}

impl SourceNumberType {
    pub const FIELD: &'static str = "source_number_type";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::International => "INTERNATIONAL",
            Self::Alphanumeric => "ALPHANUMERIC",
            Self::Shortcode => "SHORTCODE",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        Some(match value.trim().to_ascii_uppercase().as_str() {
            "INTERNATIONAL" => Self::International,
            "ALPHANUMERIC" => Self::Alphanumeric,
            "SHORTCODE" => Self::Shortcode,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Status of a message, as reported by message lookups and delivery reports.
///
/// Unknown values are preserved in [`MessageStatus::Other`].
pub enum MessageStatus {
    Queued,
    Processing,
    Processed,
    Scheduled,
    Cancelled,
    Enroute,
    Held,
    Submitted,
    Delivered,
    Expired,
    Rejected,
    Failed,
    Undeliverable,
    Other(String),
}

impl MessageStatus {
    pub const FIELD: &'static str = "status";

    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "queued" => Self::Queued,
            "processing" => Self::Processing,
            "processed" => Self::Processed,
            "scheduled" => Self::Scheduled,
            "cancelled" => Self::Cancelled,
            "enroute" => Self::Enroute,
            "held" => Self::Held,
            "submitted" => Self::Submitted,
            "delivered" => Self::Delivered,
            "expired" => Self::Expired,
            "rejected" => Self::Rejected,
            "failed" => Self::Failed,
            "undeliverable" => Self::Undeliverable,
            _ => Self::Other(value.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Queued => "queued",
            Self::Processing => "processing",
            Self::Processed => "processed",
            Self::Scheduled => "scheduled",
            Self::Cancelled => "cancelled",
            Self::Enroute => "enroute",
            Self::Held => "held",
            Self::Submitted => "submitted",
            Self::Delivered => "delivered",
            Self::Expired => "expired",
            Self::Rejected => "rejected",
            Self::Failed => "failed",
            Self::Undeliverable => "undeliverable",
            Self::Other(other) => other,
        }
    }

    /// Whether no further status changes are expected for the message.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            Self::Cancelled
                | Self::Delivered
                | Self::Expired
                | Self::Rejected
                | Self::Failed
                | Self::Undeliverable
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_newtypes_trim_or_validate() {
        let key = ApiKey::new("  key ").unwrap();
        assert_eq!(key.as_str(), "key");
        assert!(ApiKey::new("  ").is_err());

        let secret = ApiSecret::new(" secret ").unwrap();
        assert_eq!(secret.as_str(), " secret ");
        assert!(ApiSecret::new("").is_err());

        let content = MessageContent::new(" hi ").unwrap();
        assert_eq!(content.as_str(), " hi ");
        assert!(MessageContent::new("  ").is_err());

        let id = DeliveryReportId::new(" 01e1fa0a-6e27-4945-9cdb-18644b4de043 ").unwrap();
        assert_eq!(id.as_str(), "01e1fa0a-6e27-4945-9cdb-18644b4de043");
        assert!(matches!(
            ReplyId::new(""),
            Err(ValidationError::Empty { field: "reply_ids" })
        ));
    }

    #[test]
    fn api_secret_debug_is_redacted() {
        let secret = ApiSecret::new("hunter2").unwrap();
        assert_eq!(format!("{secret:?}"), "ApiSecret(***)");
    }

    #[test]
    fn phone_number_parsing_and_equality_use_e164() {
        let p1 = PhoneNumber::parse(None, "+61491570156").unwrap();
        let p2 = PhoneNumber::parse(None, "+61 491 570 156").unwrap();
        assert_eq!(p1, p2);
        assert_eq!(p1.e164(), "+61491570156");

        let local = PhoneNumber::parse(Some(country::Id::AU), "0491 570 156").unwrap();
        assert_eq!(local, p1);

        let raw: RawPhoneNumber = p1.into();
        assert_eq!(raw.raw(), "+61491570156");
        assert!(PhoneNumber::parse(None, "not-a-number").is_err());
    }

    #[test]
    fn phone_number_as_international_source() {
        let (number, kind) = PhoneNumber::parse(Some(country::Id::AU), "0491 570 157")
            .unwrap()
            .into_source();
        assert_eq!(number.raw(), "+61491570157");
        assert_eq!(kind, SourceNumberType::International);

        assert_eq!(
            PhoneNumber::parse_field("source_number", None, "  "),
            Err(ValidationError::Empty {
                field: "source_number"
            })
        );
        assert!(matches!(
            PhoneNumber::parse(None, "not-a-number"),
            Err(ValidationError::InvalidPhoneNumber { .. })
        ));
    }

    #[test]
    fn urls_require_http_scheme_and_host() {
        assert!(CallbackUrl::new("https://my.callback.url.com").is_ok());
        assert!(MediaUrl::new("http://example.com/cat.gif").is_ok());
        assert!(matches!(
            CallbackUrl::new("ftp://example.com"),
            Err(ValidationError::InvalidUrl { field: "callback_url", .. })
        ));
        assert!(CallbackUrl::new("not a url").is_err());
        assert!(matches!(
            MediaUrl::new(" "),
            Err(ValidationError::Empty { field: "media" })
        ));
    }

    #[test]
    fn metadata_limits_entries_and_rejects_blank_keys() {
        let ok = Metadata::new([("key1", "value1"), ("key2", "value2")]).unwrap();
        assert_eq!(ok.as_map().get("key1").map(String::as_str), Some("value1"));

        let too_many = (0..=Metadata::MAX_ENTRIES).map(|idx| (format!("k{idx}"), "v"));
        assert!(matches!(
            Metadata::new(too_many),
            Err(ValidationError::TooMany { max: 10, actual: 11, .. })
        ));

        assert!(Metadata::new([(" ", "v")]).is_err());
    }

    #[test]
    fn message_status_preserves_unknown_values() {
        assert_eq!(MessageStatus::from_wire("enroute"), MessageStatus::Enroute);
        assert_eq!(MessageStatus::from_wire("DELIVERED"), MessageStatus::Delivered);
        let other = MessageStatus::from_wire("teleported");
        assert_eq!(other, MessageStatus::Other("teleported".to_owned()));
        assert_eq!(other.as_str(), "teleported");
        assert!(MessageStatus::Delivered.is_final());
        assert!(!MessageStatus::Enroute.is_final());
    }

    #[test]
    fn enums_round_trip_wire_names() {
        assert_eq!(MessageFormat::from_wire("mms"), Some(MessageFormat::Mms));
        assert_eq!(MessageFormat::Tts.as_str(), "TTS");
        assert_eq!(MessageFormat::from_wire("fax"), None);
        assert_eq!(
            SourceNumberType::from_wire("ALPHANUMERIC"),
            Some(SourceNumberType::Alphanumeric)
        );
    }
}
