//! Embeddable HTTP request router.
//!
//! waypoint maps an incoming method + path to a registered handler,
//! extracts path parameters, and runs a chain of interceptors around the
//! handler. It owns no sockets and parses no wire protocol: the host's
//! network layer hands over a [`Request`] and writes the returned
//! [`Response`] exactly once.
//!
//! # Quick Start
//!
//! ```
//! use waypoint::prelude::*;
//!
//! let mut mux = Mux::new();
//! mux.use_interceptor(|cx, next| {
//!     cx.response_mut().header_mut().set("X-Server", "waypoint");
//!     next.run(cx);
//! });
//! mux.get("/u1/u2/:id", |cx| {
//!     let id = cx.param("id").unwrap_or_default().to_string();
//!     cx.response_mut().json(&serde_json::json!({ "id": id }));
//! });
//!
//! let response = mux.dispatch(Request::new(Method::Get, "/u1/u2/10"));
//! assert_eq!(response.status_code(), 200);
//! assert_eq!(response.body(), Some(&b"{\"id\":\"10\"}"[..]));
//! ```
//!
//! # Crate Structure
//!
//! - [`waypoint_core`] — Context, Response, pipeline, error and logging
//!   types
//! - [`waypoint_router`] — the segment trie and registration surface
//! - this crate — the [`Mux`] dispatcher, built-in interceptors and test
//!   utilities
//!
//! # Concurrency
//!
//! Registration happens in a single-threaded configuration phase; once
//! serving starts, [`Mux::dispatch`] is `&self` and each request's
//! [`Context`] is exclusively owned by that request. The pipeline is a
//! strictly sequential, synchronous call chain.

#![forbid(unsafe_code)]

pub mod interceptors;
mod mux;
pub mod testing;

// Re-export crates
pub use waypoint_core as core;
pub use waypoint_router as router;

// Re-export commonly used types
pub use mux::Mux;
pub use waypoint_core::{
    CODE_METHOD_NOT_ALLOWED, CODE_PATH_NOT_MATCHED, CODE_ROUTE_NOT_REGISTERED, Context, Error,
    HandlerFn, Header, Interceptor, LogLevel, Logger, Method, Next, Pipeline, Request, Response,
    handler, interceptor,
};
pub use waypoint_router::{Group, Route, RouteLookup, RouteMatch, Router};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        Context, Error, Group, Header, Method, Mux, Next, Request, Response, Route, Router,
    };
}
