//! Per-request context.

use std::collections::HashMap;

use crate::error::Error;
use crate::request::Request;
use crate::response::Response;

/// State threaded through one request's pipeline execution.
///
/// A context is created per inbound request, exclusively owned by that
/// request's execution, and dropped when the response has been handed back
/// to the transport. It carries the inbound [`Request`], the mutable
/// [`Response`] buffer, the path parameters captured during the trie walk,
/// and an optional terminal [`Error`] set by handlers or interceptors to
/// signal failure.
#[derive(Debug)]
pub struct Context {
    request: Request,
    response: Response,
    params: HashMap<String, String>,
    error: Option<Error>,
}

impl Context {
    /// Create a context for an inbound request.
    #[must_use]
    pub fn new(request: Request) -> Self {
        Self {
            request,
            response: Response::new(),
            params: HashMap::new(),
            error: None,
        }
    }

    /// Get the inbound request.
    #[must_use]
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Get the mutable inbound request, e.g. for interceptors that rewrite
    /// headers before the rest of the chain sees them.
    pub fn request_mut(&mut self) -> &mut Request {
        &mut self.request
    }

    /// Get the response buffer.
    #[must_use]
    pub fn response(&self) -> &Response {
        &self.response
    }

    /// Get the mutable response buffer.
    pub fn response_mut(&mut self) -> &mut Response {
        &mut self.response
    }

    /// Look up a captured path parameter by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Get all captured path parameters.
    #[must_use]
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Replace the parameter map (populated by the dispatcher on a match).
    pub fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }

    /// Record a terminal error, replacing any previous one.
    pub fn set_error(&mut self, error: Error) {
        self.error = Some(error);
    }

    /// Inspect the error slot.
    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Clear the error slot, e.g. from an interceptor that recovered.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Consume the context, yielding the finalized response.
    #[must_use]
    pub fn into_response(mut self) -> Response {
        self.response.finalize();
        self.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Method;

    #[test]
    fn params_are_looked_up_by_name() {
        let mut cx = Context::new(Request::new(Method::Get, "/u/10"));
        cx.set_params(HashMap::from([("id".to_string(), "10".to_string())]));
        assert_eq!(cx.param("id"), Some("10"));
        assert_eq!(cx.param("missing"), None);
    }

    #[test]
    fn error_slot_can_be_set_inspected_and_cleared() {
        let mut cx = Context::new(Request::new(Method::Get, "/"));
        assert!(cx.error().is_none());
        cx.set_error(Error::new(1, "first"));
        cx.set_error(Error::new(2, "second"));
        assert_eq!(cx.error().map(Error::code), Some(2));
        cx.clear_error();
        assert!(cx.error().is_none());
    }

    #[test]
    fn into_response_finalizes() {
        let cx = Context::new(Request::new(Method::Get, "/"));
        let response = cx.into_response();
        assert_eq!(response.status_code(), 200);
    }
}
