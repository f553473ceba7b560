//! Segment-trie HTTP router.
//!
//! This crate provides the routing data structure for waypoint: a trie
//! keyed by path segment with literal and single-segment wildcard edges,
//! plus the registration surface ([`Router`], [`Group`], [`Route`]) and the
//! lookup walk that accumulates interceptors and captured parameters.
//!
//! # Features
//!
//! - Path parameter extraction (`/items/:id`)
//! - Distinguished wildcard edge, kept out of literal-key lookup
//! - Interceptor attachment at root, group and route scope
//! - Last-write-wins re-registration

#![forbid(unsafe_code)]

mod r#match;
mod trie;

pub use r#match::{RouteLookup, RouteMatch};
pub use trie::{Group, Route, Router, Segment, parse_pattern};
