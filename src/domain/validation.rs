use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty {
        field: &'static str,
    },
    TooMany {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    InvalidPhoneNumber {
        input: String,
    },
    InvalidUrl {
        field: &'static str,
        input: String,
    },
    MediaRequired,
    MediaNotAllowed {
        format: &'static str,
    },
    ExpiryNotAfterSchedule,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::TooMany { field, max, actual } => {
                write!(f, "too many {field}: {actual} (max {max})")
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidUrl { field, input } => {
                write!(f, "{field} must be an absolute http(s) URL: {input}")
            }
            Self::MediaRequired => write!(f, "MMS messages require at least one media URL"),
            Self::MediaNotAllowed { format } => {
                write!(f, "media is only supported for MMS, not {format}")
            }
            Self::ExpiryNotAfterSchedule => {
                write!(f, "message_expiry_timestamp must be later than scheduled")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "content" };
        assert_eq!(err.to_string(), "content must not be empty");

        let err = ValidationError::TooMany {
            field: "messages",
            max: 100,
            actual: 101,
        };
        assert_eq!(err.to_string(), "too many messages: 101 (max 100)");

        let err = ValidationError::InvalidPhoneNumber {
            input: "bad".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid phone number: bad");

        let err = ValidationError::InvalidUrl {
            field: "callback_url",
            input: "ftp://x".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "callback_url must be an absolute http(s) URL: ftp://x"
        );

        let err = ValidationError::MediaNotAllowed { format: "SMS" };
        assert_eq!(err.to_string(), "media is only supported for MMS, not SMS");
    }
}
