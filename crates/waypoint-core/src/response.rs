//! HTTP response buffer.

use serde::Serialize;

use crate::header::Header;

/// A buffered HTTP response.
///
/// Handlers and interceptors mutate the response during pipeline execution;
/// the transport adapter writes it to the wire exactly once, after the
/// pipeline completes and [`Response::finalize`] has run.
#[derive(Debug, Default)]
pub struct Response {
    /// Status code; `0` means "not yet set" and finalizes to 200.
    status: u16,
    header: Header,
    body: Option<Vec<u8>>,
}

impl Response {
    /// Create an empty response with an unset status.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the status code (`0` if unset).
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status
    }

    /// Set the status code.
    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    /// Get the response headers.
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Get mutable response headers.
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Get the body bytes, if any.
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Set a plain-text body.
    pub fn text(&mut self, text: impl Into<String>) {
        self.body = Some(text.into().into_bytes());
    }

    /// Set a JSON body serialized from `value`.
    ///
    /// A serialization failure produces an empty body rather than an error;
    /// this is an accepted limitation of the narrow encoder interface.
    pub fn json<T: Serialize>(&mut self, value: &T) {
        self.body = serde_json::to_vec(value).ok();
    }

    /// Set raw body bytes.
    pub fn set_body(&mut self, body: Vec<u8>) {
        self.body = Some(body);
    }

    /// Prepare the response for the single wire write.
    ///
    /// Maps an unset status to 200 and records the `Content-Length` of a
    /// present body.
    pub fn finalize(&mut self) {
        if self.status < 100 {
            self.status = 200;
        }
        if let Some(body) = &self.body {
            self.header.set("Content-Length", body.len().to_string());
        }
    }

    /// Decompose into `(status, header, body)` for the transport adapter.
    #[must_use]
    pub fn into_parts(self) -> (u16, Header, Option<Vec<u8>>) {
        (self.status, self.header, self.body)
    }
}
