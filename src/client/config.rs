//! Environment-driven configuration for [`MessageMediaClientBuilder`].

use std::time::Duration;

use crate::client::{Auth, MessageMediaClientBuilder, MessageMediaError};
use crate::domain::AccountId;

pub const ENV_API_KEY: &str = "MESSAGEMEDIA_API_KEY";
pub const ENV_API_SECRET: &str = "MESSAGEMEDIA_API_SECRET";
pub const ENV_BASE_URI: &str = "MESSAGEMEDIA_BASE_URI";
pub const ENV_ACCOUNT: &str = "MESSAGEMEDIA_ACCOUNT";
pub const ENV_TIMEOUT_SECS: &str = "MESSAGEMEDIA_TIMEOUT_SECS";

impl MessageMediaClientBuilder {
    /// Create a builder from `MESSAGEMEDIA_*` environment variables.
    ///
    /// `MESSAGEMEDIA_API_KEY` and `MESSAGEMEDIA_API_SECRET` are required;
    /// `MESSAGEMEDIA_BASE_URI`, `MESSAGEMEDIA_ACCOUNT` and
    /// `MESSAGEMEDIA_TIMEOUT_SECS` are optional. Blank values count as unset.
    pub fn from_env() -> Result<Self, MessageMediaError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, MessageMediaError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let require = |key: &'static str| {
            var(key).ok_or_else(|| MessageMediaError::Config(format!("{key} is not set")))
        };

        let auth = Auth::basic(require(ENV_API_KEY)?, require(ENV_API_SECRET)?)?;
        let mut builder = Self::new(auth);

        if let Some(base_uri) = var(ENV_BASE_URI) {
            builder = builder.base_uri(base_uri);
        }
        if let Some(account) = var(ENV_ACCOUNT) {
            builder = builder.account(AccountId::new(account)?);
        }
        if let Some(timeout) = var(ENV_TIMEOUT_SECS) {
            let secs = timeout.trim().parse::<u64>().map_err(|err| {
                MessageMediaError::Config(format!("{ENV_TIMEOUT_SECS}={timeout:?}: {err}"))
            })?;
            if secs == 0 {
                return Err(MessageMediaError::Config(format!(
                    "{ENV_TIMEOUT_SECS} must be greater than zero"
                )));
            }
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn reads_required_and_optional_variables() {
        let builder = MessageMediaClientBuilder::from_lookup(lookup(&[
            (ENV_API_KEY, "key"),
            (ENV_API_SECRET, "secret"),
            (ENV_BASE_URI, "https://example.invalid"),
            (ENV_ACCOUNT, "SubAccount"),
            (ENV_TIMEOUT_SECS, "15"),
        ]))
        .unwrap();

        assert_eq!(builder.base_uri, "https://example.invalid");
        assert_eq!(
            builder.account.as_ref().map(AccountId::as_str),
            Some("SubAccount")
        );
        assert_eq!(builder.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn missing_credentials_are_config_errors() {
        let err = MessageMediaClientBuilder::from_lookup(lookup(&[(ENV_API_KEY, "key")]))
            .unwrap_err();
        match err {
            MessageMediaError::Config(message) => {
                assert!(message.contains(ENV_API_SECRET), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blank_optional_variables_are_ignored() {
        let builder = MessageMediaClientBuilder::from_lookup(lookup(&[
            (ENV_API_KEY, "key"),
            (ENV_API_SECRET, "secret"),
            (ENV_ACCOUNT, "   "),
        ]))
        .unwrap();
        assert!(builder.account.is_none());
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let err = MessageMediaClientBuilder::from_lookup(lookup(&[
            (ENV_API_KEY, "key"),
            (ENV_API_SECRET, "secret"),
            (ENV_TIMEOUT_SECS, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, MessageMediaError::Config(_)));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = MessageMediaClientBuilder::from_lookup(lookup(&[
            (ENV_API_KEY, "key"),
            (ENV_API_SECRET, "secret"),
            (ENV_TIMEOUT_SECS, "0"),
        ]))
        .unwrap_err();
        match err {
            MessageMediaError::Config(message) => {
                assert!(message.contains(ENV_TIMEOUT_SECS), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
