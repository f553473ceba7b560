//! Top-level request dispatcher.

use serde::Serialize;

use waypoint_core::{
    Context, Error, HandlerFn, LogLevel, Logger, Method, Next, Pipeline, Request, Response, handler,
};
use waypoint_router::{Group, Route, RouteLookup, Router};

/// Default error body, rendered as JSON when the client accepts it.
#[derive(Serialize)]
struct ErrorBody<'a> {
    code: i32,
    error: &'a str,
}

/// The request multiplexer: route registry plus dispatch entry point.
///
/// Registration (`get`, `group`, `use_interceptor`, …) takes `&mut self`
/// and must happen in a single-threaded configuration phase before the mux
/// starts serving; [`Mux::dispatch`] takes `&self` and may then run from
/// many requests concurrently. No locking is provided around the trie, so
/// mutating a mux that is already serving is out of scope.
///
/// # Example
///
/// ```
/// use waypoint::{Method, Mux, Request};
///
/// let mut mux = Mux::new();
/// mux.get("/items/:id", |cx| {
///     let id = cx.param("id").unwrap_or_default().to_string();
///     cx.response_mut().text(id);
/// });
///
/// let response = mux.dispatch(Request::new(Method::Get, "/items/10"));
/// assert_eq!(response.status_code(), 200);
/// ```
#[derive(Default)]
pub struct Mux {
    router: Router,
    not_found: Option<HandlerFn>,
    not_allowed: Option<HandlerFn>,
    logger: Logger,
}

impl Mux {
    /// Create an empty mux with logging off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `method` + `path` to a handler.
    ///
    /// Returns the route so handler-scoped interceptors can be chained on.
    /// Re-registering the same method + path silently replaces the prior
    /// binding.
    pub fn add<H>(&mut self, method: Method, path: &str, handler_fn: H) -> &mut Route
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.router.add(method, path, handler_fn)
    }

    /// Register a GET route.
    pub fn get<H>(&mut self, path: &str, handler_fn: H) -> &mut Route
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.router.get(path, handler_fn)
    }

    /// Register a POST route.
    pub fn post<H>(&mut self, path: &str, handler_fn: H) -> &mut Route
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.router.post(path, handler_fn)
    }

    /// Register a PUT route.
    pub fn put<H>(&mut self, path: &str, handler_fn: H) -> &mut Route
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.router.put(path, handler_fn)
    }

    /// Register a PATCH route.
    pub fn patch<H>(&mut self, path: &str, handler_fn: H) -> &mut Route
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.router.patch(path, handler_fn)
    }

    /// Register a DELETE route.
    pub fn delete<H>(&mut self, path: &str, handler_fn: H) -> &mut Route
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.router.delete(path, handler_fn)
    }

    /// Register a HEAD route.
    pub fn head<H>(&mut self, path: &str, handler_fn: H) -> &mut Route
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.router.head(path, handler_fn)
    }

    /// Register an OPTIONS route.
    pub fn options<H>(&mut self, path: &str, handler_fn: H) -> &mut Route
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.router.options(path, handler_fn)
    }

    /// Open a registration group under a shared path prefix.
    pub fn group(&mut self, prefix: &str, configure: impl FnOnce(&mut Group<'_>)) {
        self.router.group(prefix, configure);
    }

    /// Attach a global interceptor at the trie root.
    ///
    /// Global interceptors wrap every dispatch and still run when
    /// resolution fails, so response-formatting concerns apply to error
    /// pages too.
    pub fn use_interceptor<F>(&mut self, f: F)
    where
        F: Fn(&mut Context, &Next<'_>) + Send + Sync + 'static,
    {
        self.router.use_interceptor(f);
    }

    /// Replace the default 404 formatting with a custom handler.
    pub fn set_not_found<H>(&mut self, handler_fn: H)
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.not_found = Some(handler(handler_fn));
    }

    /// Replace the default 405 formatting with a custom handler.
    pub fn set_not_allowed<H>(&mut self, handler_fn: H)
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.not_allowed = Some(handler(handler_fn));
    }

    /// Replace the logger (off by default).
    pub fn set_logger(&mut self, logger: Logger) {
        self.logger = logger;
    }

    /// Resolve and execute one request, yielding the finalized response.
    ///
    /// The walk accumulates interceptors top-down; on a match they wrap the
    /// handler (route-scoped ones innermost), on a resolution failure the
    /// partial chain wraps a no-op terminal around the error state. If an
    /// [`Error`] remains on the context afterwards it is rendered by the
    /// matching custom handler or the default formatter.
    #[must_use]
    pub fn dispatch(&self, request: Request) -> Response {
        let mut cx = Context::new(request);
        let method = cx.request().method();
        match self.router.lookup(method, cx.request().path()) {
            RouteLookup::Match(found) => {
                cx.set_params(found.params());
                let terminal = found.route.handler().clone();
                cx.response_mut().set_status(200);
                cx.response_mut().header_mut().set("Content-Type", "text/plain");
                Pipeline::new(found.chain, terminal).run(&mut cx);
                // A handler-set error defaults the status to 403 unless the
                // handler picked its own status.
                if cx.error().is_some() && cx.response().status_code() == 200 {
                    cx.response_mut().set_status(403);
                }
            }
            RouteLookup::MethodNotAllowed { chain } => {
                cx.response_mut().set_status(405);
                cx.set_error(Error::method_not_allowed());
                Pipeline::new(chain, handler(|_cx| {})).run(&mut cx);
            }
            RouteLookup::NotFound { chain } => {
                cx.response_mut().set_status(404);
                cx.set_error(Error::path_not_matched());
                Pipeline::new(chain, handler(|_cx| {})).run(&mut cx);
            }
            RouteLookup::Unrouted => {
                cx.response_mut().set_status(404);
                cx.set_error(Error::route_not_registered());
            }
        }
        self.render_error(&mut cx);
        if self.logger.enabled(LogLevel::Debug) {
            let message = format!(
                "{method} {} -> {}",
                cx.request().path(),
                cx.response().status_code()
            );
            self.logger.debug("dispatch", &message);
        }
        cx.into_response()
    }

    /// Render a terminal error left on the context after the pipeline.
    ///
    /// Precedence is status-code-driven: a custom NotFound/NotAllowed
    /// handler claims the 404/405 codes whatever produced them; every other
    /// errored response gets the default `{code, error}` formatting, JSON
    /// when the request accepts it.
    fn render_error(&self, cx: &mut Context) {
        let Some(error) = cx.error().cloned() else {
            return;
        };
        let custom = match cx.response().status_code() {
            404 => self.not_found.clone(),
            405 => self.not_allowed.clone(),
            _ => None,
        };
        if let Some(custom) = custom {
            custom(cx);
            return;
        }
        if cx.request().header().get("Accept") == Some("application/json") {
            cx.response_mut()
                .header_mut()
                .set("Content-Type", "application/json");
            cx.response_mut().json(&ErrorBody {
                code: error.code(),
                error: error.message(),
            });
        } else {
            cx.response_mut()
                .header_mut()
                .set("Content-Type", "text/plain");
            cx.response_mut()
                .text(format!("code:{}\nerror:{}", error.code(), error.message()));
        }
    }
}

impl std::fmt::Debug for Mux {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mux")
            .field("router", &self.router)
            .field("not_found", &self.not_found.is_some())
            .field("not_allowed", &self.not_allowed.is_some())
            .finish_non_exhaustive()
    }
}
