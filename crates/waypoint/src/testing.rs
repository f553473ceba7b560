//! Test utilities: build requests, dispatch them against a configured
//! [`Mux`] and assert on the finalized response.

use waypoint_core::{Header, Method, Request, Response};

use crate::mux::Mux;

/// Fluent builder for test requests.
#[derive(Debug)]
pub struct RequestBuilder {
    request: Request,
}

impl RequestBuilder {
    /// Start a request with the given method and path.
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            request: Request::new(method, path),
        }
    }

    /// Shorthand for a GET request.
    #[must_use]
    pub fn get(path: &str) -> Self {
        Self::new(Method::Get, path)
    }

    /// Shorthand for a POST request.
    #[must_use]
    pub fn post(path: &str) -> Self {
        Self::new(Method::Post, path)
    }

    /// Set a request header.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.request.header_mut().set(name, value);
        self
    }

    /// Set the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.request.set_body(body.into());
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Request {
        self.request
    }
}

/// A client that dispatches requests against a borrowed mux.
#[derive(Debug)]
pub struct TestClient<'a> {
    mux: &'a Mux,
}

impl<'a> TestClient<'a> {
    /// Wrap a configured mux.
    #[must_use]
    pub fn new(mux: &'a Mux) -> Self {
        Self { mux }
    }

    /// Dispatch a built request.
    #[must_use]
    pub fn send(&self, builder: RequestBuilder) -> TestResponse {
        TestResponse::from_response(self.mux.dispatch(builder.build()))
    }

    /// Dispatch a bare GET.
    #[must_use]
    pub fn get(&self, path: &str) -> TestResponse {
        self.send(RequestBuilder::get(path))
    }

    /// Dispatch a bare POST.
    #[must_use]
    pub fn post(&self, path: &str) -> TestResponse {
        self.send(RequestBuilder::post(path))
    }
}

/// A finalized response, decomposed for assertions.
#[derive(Debug)]
pub struct TestResponse {
    status: u16,
    header: Header,
    body: Option<Vec<u8>>,
}

impl TestResponse {
    fn from_response(response: Response) -> Self {
        let (status, header, body) = response.into_parts();
        Self {
            status,
            header,
            body,
        }
    }

    /// The final status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Look up a response header (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.header.get(name)
    }

    /// The body as text; empty if absent.
    ///
    /// # Panics
    ///
    /// Panics if the body is not valid UTF-8.
    #[must_use]
    pub fn text(&self) -> &str {
        std::str::from_utf8(self.body.as_deref().unwrap_or_default())
            .expect("response body is not UTF-8")
    }

    /// The body parsed as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is absent or not valid JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(self.body.as_deref().unwrap_or_default())
            .expect("response body is not JSON")
    }
}
