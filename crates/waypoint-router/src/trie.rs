//! Segment trie, route registration and lookup.
//!
//! Each trie edge represents one path segment. Literal edges live in a
//! per-node child table; the parameter edge is a distinguished slot kept
//! separate from literal lookup, so a literal segment that happens to be
//! spelled like a wildcard marker can never collide with the capture
//! mechanism. Nodes are created lazily on first registration and never
//! deleted.
//!
//! Registration and [`Group::use_interceptor`] are expected to happen in a
//! single-threaded configuration phase before dispatching begins; no
//! locking is provided around trie mutation.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use waypoint_core::{Context, HandlerFn, Interceptor, Method, Next, handler, interceptor};

use crate::r#match::{RouteLookup, RouteMatch};

/// One parsed edge of a path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches exactly this segment value (the empty string is valid).
    Literal(String),
    /// Matches any single segment and binds its value to the named
    /// parameter.
    Param(String),
}

/// Split a registration pattern on `/` into tagged segments.
///
/// A segment beginning with `:` becomes a [`Segment::Param`] carrying the
/// name after the marker.
#[must_use]
pub fn parse_pattern(path: &str) -> Vec<Segment> {
    path.split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) => Segment::Param(name.to_string()),
            None => Segment::Literal(segment.to_string()),
        })
        .collect()
}

/// A trie node: literal children, one optional parameter child, per-method
/// bindings and the interceptors attached at this level.
#[derive(Default)]
pub(crate) struct Node {
    children: HashMap<String, Node>,
    wildcard: Option<Box<Node>>,
    bindings: HashMap<Method, Route>,
    interceptors: Vec<Interceptor>,
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("children", &self.children.len())
            .field("wildcard", &self.wildcard.is_some())
            .field("bindings", &self.bindings.len())
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}

impl Node {
    fn child_mut(&mut self, segment: Segment) -> &mut Self {
        match segment {
            Segment::Literal(key) => self.children.entry(key).or_default(),
            Segment::Param(_) => self.wildcard.get_or_insert_with(Box::default),
        }
    }

    /// Descend along verbatim segments, creating nodes as needed.
    fn descend_literal(&mut self, path: &str) -> &mut Self {
        let mut node = self;
        for segment in path.split('/') {
            node = node.children.entry(segment.to_string()).or_default();
        }
        node
    }
}

/// The binding of one (method, path) to a handler, its parameter names and
/// its own scoped interceptors.
pub struct Route {
    handler: HandlerFn,
    param_names: Vec<String>,
    interceptors: Vec<Interceptor>,
}

impl Route {
    /// Append a handler-scoped interceptor.
    ///
    /// Route interceptors run innermost, after everything collected along
    /// the trie walk.
    pub fn with<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut Context, &Next<'_>) + Send + Sync + 'static,
    {
        self.interceptors.push(interceptor(f));
        self
    }

    /// The terminal handler.
    #[must_use]
    pub fn handler(&self) -> &HandlerFn {
        &self.handler
    }

    /// Wildcard parameter names in traversal order.
    #[must_use]
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    pub(crate) fn interceptors(&self) -> &[Interceptor] {
        &self.interceptors
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("param_names", &self.param_names)
            .field("interceptors", &self.interceptors.len())
            .finish_non_exhaustive()
    }
}

fn register<'n>(root: &'n mut Node, method: Method, path: &str, handler: HandlerFn) -> &'n mut Route {
    let mut param_names = Vec::new();
    let mut node = root;
    for segment in parse_pattern(path) {
        if let Segment::Param(name) = &segment {
            param_names.push(name.clone());
        }
        node = node.child_mut(segment);
    }
    let route = Route {
        handler,
        param_names,
        interceptors: Vec::new(),
    };
    // Last registration per (method, path) wins.
    match node.bindings.entry(method) {
        Entry::Occupied(mut occupied) => {
            occupied.insert(route);
            occupied.into_mut()
        }
        Entry::Vacant(vacant) => vacant.insert(route),
    }
}

/// The route registry: owns the trie root.
///
/// The root is created lazily on the first registration or interceptor
/// attachment; a router nothing was ever registered on reports
/// [`RouteLookup::Unrouted`] without walking.
#[derive(Debug, Default)]
pub struct Router {
    root: Option<Node>,
}

impl Router {
    /// Create an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn root_mut(&mut self) -> &mut Node {
        self.root.get_or_insert_with(Node::default)
    }

    /// Bind `method` + `path` to a handler, returning the route for
    /// attaching handler-scoped interceptors.
    pub fn add<H>(&mut self, method: Method, path: &str, handler_fn: H) -> &mut Route
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        register(self.root_mut(), method, path, handler(handler_fn))
    }

    /// Register a GET route.
    pub fn get<H>(&mut self, path: &str, handler_fn: H) -> &mut Route
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(Method::Get, path, handler_fn)
    }

    /// Register a POST route.
    pub fn post<H>(&mut self, path: &str, handler_fn: H) -> &mut Route
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(Method::Post, path, handler_fn)
    }

    /// Register a PUT route.
    pub fn put<H>(&mut self, path: &str, handler_fn: H) -> &mut Route
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(Method::Put, path, handler_fn)
    }

    /// Register a PATCH route.
    pub fn patch<H>(&mut self, path: &str, handler_fn: H) -> &mut Route
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(Method::Patch, path, handler_fn)
    }

    /// Register a DELETE route.
    pub fn delete<H>(&mut self, path: &str, handler_fn: H) -> &mut Route
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(Method::Delete, path, handler_fn)
    }

    /// Register a HEAD route.
    pub fn head<H>(&mut self, path: &str, handler_fn: H) -> &mut Route
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(Method::Head, path, handler_fn)
    }

    /// Register an OPTIONS route.
    pub fn options<H>(&mut self, path: &str, handler_fn: H) -> &mut Route
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(Method::Options, path, handler_fn)
    }

    /// Attach an interceptor at the trie root.
    ///
    /// Root interceptors wrap every dispatch, current and future routes
    /// alike, because interceptor lists are read at dispatch time.
    pub fn use_interceptor<F>(&mut self, f: F)
    where
        F: Fn(&mut Context, &Next<'_>) + Send + Sync + 'static,
    {
        self.root_mut().interceptors.push(interceptor(f));
    }

    /// Open a registration view over the subtree at `prefix`.
    ///
    /// Prefix segments are taken verbatim; wildcard markers are only
    /// interpreted in route patterns registered through the group.
    pub fn group(&mut self, prefix: &str, configure: impl FnOnce(&mut Group<'_>)) {
        let node = self.root_mut().descend_literal(prefix);
        let mut group = Group { node };
        configure(&mut group);
    }

    /// Resolve `method` + `path` against the trie.
    ///
    /// Interceptors are accumulated along the walk before each descent, so
    /// everything above the point of failure is still collected when
    /// resolution fails; the dispatcher runs that partial chain around the
    /// error response. A wildcard edge is only taken when no literal child
    /// matches, and consumes exactly one segment.
    #[must_use]
    pub fn lookup(&self, method: Method, path: &str) -> RouteLookup<'_> {
        let Some(root) = &self.root else {
            return RouteLookup::Unrouted;
        };
        let mut chain: Vec<Interceptor> = root.interceptors.to_vec();
        let mut captured: Vec<String> = Vec::new();
        let mut node = root;
        for segment in path.split('/') {
            node = match node.children.get(segment) {
                Some(child) => child,
                None => match &node.wildcard {
                    Some(child) => {
                        captured.push(segment.to_string());
                        child
                    }
                    None => return RouteLookup::NotFound { chain },
                },
            };
            chain.extend(node.interceptors.iter().cloned());
        }
        let Some(route) = node.bindings.get(&method) else {
            return RouteLookup::MethodNotAllowed { chain };
        };
        chain.extend(route.interceptors().iter().cloned());
        RouteLookup::Match(RouteMatch {
            route,
            captured,
            chain,
        })
    }
}

/// A registration view bound to a subtree root.
///
/// Routes added through a group share the group's path prefix;
/// [`Group::use_interceptor`] attaches to the subtree root node and so
/// applies to every route below it.
#[derive(Debug)]
pub struct Group<'a> {
    node: &'a mut Node,
}

impl Group<'_> {
    /// Bind `method` + `path` (relative to the group prefix) to a handler.
    pub fn add<H>(&mut self, method: Method, path: &str, handler_fn: H) -> &mut Route
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        register(self.node, method, path, handler(handler_fn))
    }

    /// Register a GET route under the group prefix.
    pub fn get<H>(&mut self, path: &str, handler_fn: H) -> &mut Route
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(Method::Get, path, handler_fn)
    }

    /// Register a POST route under the group prefix.
    pub fn post<H>(&mut self, path: &str, handler_fn: H) -> &mut Route
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(Method::Post, path, handler_fn)
    }

    /// Register a PUT route under the group prefix.
    pub fn put<H>(&mut self, path: &str, handler_fn: H) -> &mut Route
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(Method::Put, path, handler_fn)
    }

    /// Register a PATCH route under the group prefix.
    pub fn patch<H>(&mut self, path: &str, handler_fn: H) -> &mut Route
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(Method::Patch, path, handler_fn)
    }

    /// Register a DELETE route under the group prefix.
    pub fn delete<H>(&mut self, path: &str, handler_fn: H) -> &mut Route
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(Method::Delete, path, handler_fn)
    }

    /// Register a HEAD route under the group prefix.
    pub fn head<H>(&mut self, path: &str, handler_fn: H) -> &mut Route
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(Method::Head, path, handler_fn)
    }

    /// Register an OPTIONS route under the group prefix.
    pub fn options<H>(&mut self, path: &str, handler_fn: H) -> &mut Route
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(Method::Options, path, handler_fn)
    }

    /// Attach an interceptor to the subtree root.
    ///
    /// It applies to every route sharing this subtree, including routes
    /// registered after the attachment.
    pub fn use_interceptor<F>(&mut self, f: F)
    where
        F: Fn(&mut Context, &Next<'_>) + Send + Sync + 'static,
    {
        self.node.interceptors.push(interceptor(f));
    }
}
