//! Core types for the waypoint HTTP router.
//!
//! This crate provides the fundamental building blocks:
//! - [`Request`], [`Response`] and [`Header`] plumbing
//! - [`Context`], the per-request state threaded through the pipeline
//! - [`Pipeline`]/[`Next`], the synchronous middleware composition
//! - [`Error`], the uniform `(code, message)` failure model
//! - [`Logger`], minimal level-filtered logging
//!
//! # Design Principles
//!
//! - One logical execution per request: the pipeline is a strictly
//!   sequential call chain with no suspension points
//! - Per-request state ([`Context`]) is exclusively owned, never shared
//!   across concurrent requests
//! - Every failure degrades to a formatted HTTP response; nothing here is
//!   fatal to the process

#![forbid(unsafe_code)]

mod context;
mod error;
mod header;
pub mod logging;
mod middleware;
mod request;
mod response;

pub use context::Context;
pub use error::{
    CODE_METHOD_NOT_ALLOWED, CODE_PATH_NOT_MATCHED, CODE_ROUTE_NOT_REGISTERED, Error,
};
pub use header::Header;
pub use logging::{LogLevel, Logger};
pub use middleware::{HandlerFn, Interceptor, Next, Pipeline, handler, interceptor};
pub use request::{InvalidMethod, Method, Request};
pub use response::Response;
