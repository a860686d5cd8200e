use crate::client::http::{HttpContext, HttpRequest};

/// Observer invoked around every HTTP call the client makes.
///
/// Both methods default to no-ops, so implementors override only what they need.
/// Hooks run on the calling task and must not block.
pub trait HttpHook: Send + Sync {
    /// Called with the fully prepared request, after authentication headers are applied.
    fn on_before_request(&self, _request: &HttpRequest) {}

    /// Called once a response has been received, before its status is validated.
    fn on_after_response(&self, _context: &HttpContext<'_>) {}
}
