//! Client layer: orchestrates transport calls and maps transport ↔ domain.

mod config;
mod hook;
mod http;

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::domain::{
    AccountId, ApiKey, ApiSecret, CheckDeliveryReportsResponse, CheckRepliesResponse,
    ConfirmDeliveryReports, ConfirmReplies, Message, MessageId, SendMessages,
    SendMessagesResponse, ValidationError,
};
use crate::transport::TransportError;

pub use config::{ENV_ACCOUNT, ENV_API_KEY, ENV_API_SECRET, ENV_BASE_URI, ENV_TIMEOUT_SECS};
pub use hook::HttpHook;
pub use http::{HttpContext, HttpMethod, HttpRequest, HttpResponse};

use http::{HttpTransport, ReqwestTransport};

const DEFAULT_BASE_URI: &str = "https://api.messagemedia.com";
const DEFAULT_USER_AGENT: &str = concat!("messagemedia-rs/", env!("CARGO_PKG_VERSION"));
const ACCEPT_JSON: &str = "application/json";
const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

#[derive(Debug, Clone)]
#[non_exhaustive]
/// Authentication credentials for MessageMedia API calls.
pub enum Auth {
    /// HTTP Basic authentication with an API key and secret.
    Basic {
        api_key: ApiKey,
        api_secret: ApiSecret,
    },
}

impl Auth {
    /// Create [`Auth::Basic`]; the key must be non-empty after trimming, the secret non-empty.
    pub fn basic(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::Basic {
            api_key: ApiKey::new(api_key)?,
            api_secret: ApiSecret::new(api_secret)?,
        })
    }

    fn authorization_header(&self) -> String {
        match self {
            Self::Basic {
                api_key,
                api_secret,
            } => {
                let credentials = format!("{}:{}", api_key.as_str(), api_secret.as_str());
                format!("Basic {}", BASE64.encode(credentials))
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`MessageMediaClient`].
///
/// This error preserves:
/// - HTTP-level failures (non-2xx status or transport failures),
/// - validation/parse failures,
/// - invalid client configuration.
pub enum MessageMediaError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    ///
    /// `message` and `details` come from the JSON error envelope when the body has one;
    /// `body` is the raw response body, `None` when blank.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus {
        status: u16,
        message: Option<String>,
        details: Vec<String>,
        body: Option<String>,
    },

    /// Request or response body could not be (de)serialized.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Builder or environment configuration is unusable.
    #[error("configuration error: {0}")]
    Config(String),
}

impl MessageMediaError {
    /// HTTP status code, if the server answered with a non-2xx status.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true` for a 404, e.g. an unknown message id.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    fn from_response(response: &HttpResponse) -> Self {
        let body = if response.body.trim().is_empty() {
            None
        } else {
            Some(response.body.clone())
        };
        let envelope = body
            .as_deref()
            .and_then(crate::transport::decode_api_error)
            .unwrap_or_default();
        Self::HttpStatus {
            status: response.status,
            message: envelope.message,
            details: envelope.details,
            body,
        }
    }
}

#[derive(Clone)]
/// Builder for [`MessageMediaClient`].
///
/// Use this when you need to customize the base URI, timeout, user-agent, sub-account or hook.
pub struct MessageMediaClientBuilder {
    auth: Auth,
    base_uri: String,
    account: Option<AccountId>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    hook: Option<Arc<dyn HttpHook>>,
}

impl fmt::Debug for MessageMediaClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageMediaClientBuilder")
            .field("auth", &self.auth)
            .field("base_uri", &self.base_uri)
            .field("account", &self.account)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

impl MessageMediaClientBuilder {
    /// Create a builder with the default base URI and no timeout/user-agent override.
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            base_uri: DEFAULT_BASE_URI.to_owned(),
            account: None,
            timeout: None,
            user_agent: None,
            hook: None,
        }
    }

    /// Override the API base URI (`https://api.messagemedia.com` by default).
    pub fn base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }

    /// Send every request on behalf of a sub-account (`Account` header).
    pub fn account(mut self, account: AccountId) -> Self {
        self.account = Some(account);
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Observe every request and response.
    pub fn hook(mut self, hook: Arc<dyn HttpHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Build a [`MessageMediaClient`].
    ///
    /// Fails with [`MessageMediaError::Config`] if the base URI is not an absolute
    /// `http`/`https` URL.
    pub fn build(self) -> Result<MessageMediaClient, MessageMediaError> {
        validate_base_uri(&self.base_uri)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|err| MessageMediaError::Transport(Box::new(err)))?;

        Ok(MessageMediaClient {
            auth: self.auth,
            base_uri: self.base_uri,
            account: self.account,
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned()),
            http: Arc::new(ReqwestTransport { client }),
            hook: self.hook,
        })
    }
}

fn validate_base_uri(base_uri: &str) -> Result<(), MessageMediaError> {
    let parsed = url::Url::parse(base_uri)
        .map_err(|err| MessageMediaError::Config(format!("invalid base URI {base_uri:?}: {err}")))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
        return Err(MessageMediaError::Config(format!(
            "base URI must be an absolute http(s) URL: {base_uri:?}"
        )));
    }
    Ok(())
}

/// Join path segments onto the base URI, percent-encoding each segment and
/// collapsing the base's trailing slash.
fn endpoint_url(base_uri: &str, segments: &[&str]) -> Result<String, MessageMediaError> {
    let mut url = url::Url::parse(base_uri)
        .map_err(|err| MessageMediaError::Config(format!("invalid base URI {base_uri:?}: {err}")))?;
    url.path_segments_mut()
        .map_err(|()| {
            MessageMediaError::Config(format!("base URI cannot be a base: {base_uri:?}"))
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url.into())
}

#[derive(Clone)]
/// High-level MessageMedia Messages API client.
///
/// Every call follows the same steps: build the URL, attach `accept`, `user-agent`,
/// `content-type`, `authorization` and (optionally) `account` headers, serialize
/// the body, execute one HTTP request, reject non-2xx statuses, deserialize the
/// response. Nothing is retried and nothing is cached.
///
/// Delivery reports and replies are returned by every check call until they are
/// confirmed. Callers should check, process, then confirm the processed ids.
pub struct MessageMediaClient {
    auth: Auth,
    base_uri: String,
    account: Option<AccountId>,
    user_agent: String,
    http: Arc<dyn HttpTransport>,
    hook: Option<Arc<dyn HttpHook>>,
}

impl fmt::Debug for MessageMediaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageMediaClient")
            .field("base_uri", &self.base_uri)
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}

impl MessageMediaClient {
    /// Create a client using the default base URI.
    ///
    /// For more customization, use [`MessageMediaClient::builder`].
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            base_uri: DEFAULT_BASE_URI.to_owned(),
            account: None,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
            hook: None,
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(auth: Auth) -> MessageMediaClientBuilder {
        MessageMediaClientBuilder::new(auth)
    }

    /// A clone of this client acting on behalf of another sub-account.
    ///
    /// The HTTP connection pool is shared with the original client.
    pub fn with_account(&self, account: AccountId) -> Self {
        Self {
            account: Some(account),
            ..self.clone()
        }
    }

    /// Send up to 100 messages (`POST /v1/messages`).
    ///
    /// Errors:
    /// - [`MessageMediaError::HttpStatus`] for non-2xx HTTP responses (400 for rejected payloads),
    /// - [`MessageMediaError::Parse`] when the response does not decode.
    pub async fn send_messages(
        &self,
        request: SendMessages,
    ) -> Result<SendMessagesResponse, MessageMediaError> {
        const OPERATION: &str = "send_messages";
        tracing::debug!(operation = OPERATION, count = request.messages().len(), "called");

        let body = crate::transport::encode_send_messages_body(&request)
            .map_err(|err| parse_failure(OPERATION, err))?;
        let response = self
            .call(OPERATION, HttpMethod::Post, &["v1", "messages"], Some(body))
            .await?;

        crate::transport::decode_send_messages_response(&response.body)
            .map_err(|err| parse_failure(OPERATION, err))
    }

    /// Look up the current status of a sent message (`GET /v1/messages/{id}`).
    ///
    /// An unknown id yields [`MessageMediaError::HttpStatus`] with status 404.
    pub async fn get_message_status(
        &self,
        message_id: &MessageId,
    ) -> Result<Message, MessageMediaError> {
        const OPERATION: &str = "get_message_status";
        tracing::debug!(operation = OPERATION, message_id = %message_id, "called");

        let response = self
            .call(
                OPERATION,
                HttpMethod::Get,
                &["v1", "messages", message_id.as_str()],
                None,
            )
            .await?;

        crate::transport::decode_message_response(&response.body)
            .map_err(|err| parse_failure(OPERATION, err))
    }

    /// Cancel a message that is still scheduled (`PUT /v1/messages/{id}`).
    ///
    /// Only scheduled messages can be cancelled; anything else is rejected by the
    /// server with a non-2xx status.
    pub async fn cancel_scheduled_message(
        &self,
        message_id: &MessageId,
    ) -> Result<(), MessageMediaError> {
        const OPERATION: &str = "cancel_scheduled_message";
        tracing::debug!(operation = OPERATION, message_id = %message_id, "called");

        let body = crate::transport::encode_cancel_message_body()
            .map_err(|err| parse_failure(OPERATION, err))?;
        self.call(
            OPERATION,
            HttpMethod::Put,
            &["v1", "messages", message_id.as_str()],
            Some(body),
        )
        .await?;
        Ok(())
    }

    /// Fetch unconfirmed delivery reports (`GET /v1/delivery_reports`).
    ///
    /// At most 100 reports are returned per call. The same reports keep coming
    /// back until they are passed to [`MessageMediaClient::confirm_delivery_reports`].
    pub async fn check_delivery_reports(
        &self,
    ) -> Result<CheckDeliveryReportsResponse, MessageMediaError> {
        const OPERATION: &str = "check_delivery_reports";
        tracing::debug!(operation = OPERATION, "called");

        let response = self
            .call(OPERATION, HttpMethod::Get, &["v1", "delivery_reports"], None)
            .await?;

        crate::transport::decode_check_delivery_reports_response(&response.body)
            .map_err(|err| parse_failure(OPERATION, err))
    }

    /// Mark delivery reports as processed (`POST /v1/delivery_reports/confirmed`).
    pub async fn confirm_delivery_reports(
        &self,
        request: ConfirmDeliveryReports,
    ) -> Result<(), MessageMediaError> {
        const OPERATION: &str = "confirm_delivery_reports";
        tracing::debug!(operation = OPERATION, count = request.ids().len(), "called");

        let body = crate::transport::encode_confirm_delivery_reports_body(&request)
            .map_err(|err| parse_failure(OPERATION, err))?;
        self.call(
            OPERATION,
            HttpMethod::Post,
            &["v1", "delivery_reports", "confirmed"],
            Some(body),
        )
        .await?;
        Ok(())
    }

    /// Fetch unconfirmed replies (`GET /v1/replies`).
    ///
    /// Same delivery semantics as [`MessageMediaClient::check_delivery_reports`].
    pub async fn check_replies(&self) -> Result<CheckRepliesResponse, MessageMediaError> {
        const OPERATION: &str = "check_replies";
        tracing::debug!(operation = OPERATION, "called");

        let response = self
            .call(OPERATION, HttpMethod::Get, &["v1", "replies"], None)
            .await?;

        crate::transport::decode_check_replies_response(&response.body)
            .map_err(|err| parse_failure(OPERATION, err))
    }

    /// Mark replies as processed (`POST /v1/replies/confirmed`).
    pub async fn confirm_replies(&self, request: ConfirmReplies) -> Result<(), MessageMediaError> {
        const OPERATION: &str = "confirm_replies";
        tracing::debug!(operation = OPERATION, count = request.ids().len(), "called");

        let body = crate::transport::encode_confirm_replies_body(&request)
            .map_err(|err| parse_failure(OPERATION, err))?;
        self.call(
            OPERATION,
            HttpMethod::Post,
            &["v1", "replies", "confirmed"],
            Some(body),
        )
        .await?;
        Ok(())
    }

    async fn call(
        &self,
        operation: &'static str,
        method: HttpMethod,
        path: &[&str],
        body: Option<String>,
    ) -> Result<HttpResponse, MessageMediaError> {
        tracing::debug!(operation, "preparing query URL");
        let url = endpoint_url(&self.base_uri, path)?;

        tracing::debug!(operation, "preparing headers");
        let mut headers = vec![
            ("accept".to_owned(), ACCEPT_JSON.to_owned()),
            ("user-agent".to_owned(), self.user_agent.clone()),
        ];
        if body.is_some() {
            headers.push(("content-type".to_owned(), CONTENT_TYPE_JSON.to_owned()));
        }
        if let Some(account) = self.account.as_ref() {
            headers.push(("account".to_owned(), account.as_str().to_owned()));
        }
        headers.push(("authorization".to_owned(), self.auth.authorization_header()));

        let request = HttpRequest {
            method,
            url,
            headers,
            body,
        };
        if let Some(hook) = self.hook.as_ref() {
            hook.on_before_request(&request);
        }

        tracing::debug!(
            operation,
            method = method.as_str(),
            url = %request.url,
            "executing request"
        );
        let response = self.http.execute(&request).await.map_err(|err| {
            tracing::error!(operation, error = %err, "request failed");
            MessageMediaError::Transport(err)
        })?;

        if let Some(hook) = self.hook.as_ref() {
            hook.on_after_response(&HttpContext {
                request: &request,
                response: &response,
            });
        }

        tracing::debug!(operation, status = response.status, "validating response");
        if !response.is_success() {
            let err = MessageMediaError::from_response(&response);
            tracing::error!(operation, status = response.status, error = %err, "request rejected");
            return Err(err);
        }

        Ok(response)
    }
}

fn parse_failure(operation: &'static str, err: TransportError) -> MessageMediaError {
    tracing::error!(operation, error = %err, "failed to (de)serialize body");
    MessageMediaError::Parse(Box::new(err))
}
