//! Built-in interceptors.

use waypoint_core::{Context, Next};

/// Force `Content-Type: application/json` on the response.
///
/// Runs after the rest of the chain, so it also stamps error pages: attach
/// it globally and the default error formatter's output is always consumed
/// as JSON by clients that key off the content type.
pub fn json_strategy(cx: &mut Context, next: &Next<'_>) {
    next.run(cx);
    cx.response_mut()
        .header_mut()
        .set("Content-Type", "application/json");
}

/// Build an interceptor that sets a fixed response header before
/// delegating.
pub fn set_response_header(
    name: impl Into<String>,
    value: impl Into<String>,
) -> impl Fn(&mut Context, &Next<'_>) + Send + Sync + 'static {
    let name = name.into();
    let value = value.into();
    move |cx, next| {
        cx.response_mut()
            .header_mut()
            .set(name.clone(), value.clone());
        next.run(cx);
    }
}
