//! Route lookup results.

use std::collections::HashMap;

use waypoint_core::Interceptor;

use crate::trie::Route;

/// A matched route with its captured segments and accumulated chain.
pub struct RouteMatch<'a> {
    /// The matched route.
    pub route: &'a Route,
    /// Runtime values of the wildcard segments, in traversal order.
    pub captured: Vec<String>,
    /// Interceptors collected along the walk, route-scoped ones last.
    pub chain: Vec<Interceptor>,
}

impl RouteMatch<'_> {
    /// Pair captured values with the route's parameter names.
    #[must_use]
    pub fn params(&self) -> HashMap<String, String> {
        self.route
            .param_names()
            .iter()
            .cloned()
            .zip(self.captured.iter().cloned())
            .collect()
    }
}

impl std::fmt::Debug for RouteMatch<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteMatch")
            .field("route", &self.route)
            .field("captured", &self.captured)
            .field("chain", &self.chain.len())
            .finish()
    }
}

/// Result of resolving a method + path against the trie.
pub enum RouteLookup<'a> {
    /// A route matched by path and method.
    Match(RouteMatch<'a>),
    /// Path matched, but no binding exists for the method.
    MethodNotAllowed {
        /// Interceptors collected along the full walk.
        chain: Vec<Interceptor>,
    },
    /// No trie path matched the request path.
    NotFound {
        /// Interceptors collected up to the point of failure.
        chain: Vec<Interceptor>,
    },
    /// Nothing was ever registered; no walk happened.
    Unrouted,
}

impl std::fmt::Debug for RouteLookup<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match(m) => f.debug_tuple("Match").field(m).finish(),
            Self::MethodNotAllowed { chain } => f
                .debug_struct("MethodNotAllowed")
                .field("chain", &chain.len())
                .finish(),
            Self::NotFound { chain } => f
                .debug_struct("NotFound")
                .field("chain", &chain.len())
                .finish(),
            Self::Unrouted => f.write_str("Unrouted"),
        }
    }
}
