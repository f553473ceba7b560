//! End-to-end interceptor behavior.

use std::sync::{Arc, Mutex};

use waypoint::interceptors::json_strategy;
use waypoint::testing::{RequestBuilder, TestClient};
use waypoint::{Error, Mux};

#[test]
fn global_and_route_interceptors_both_apply() {
    let mut mux = Mux::new();
    mux.use_interceptor(|cx, next| {
        cx.response_mut().header_mut().set("X-Test", "test");
        next.run(cx);
    });
    mux.get("/u1/u2/:id", |cx| {
        let id = cx.param("id").unwrap_or_default().to_string();
        cx.response_mut().json(&serde_json::json!({ "id": id }));
    })
    .with(|cx, next| {
        next.run(cx);
        cx.response_mut().header_mut().set("X-Test2", "test2");
    });

    let client = TestClient::new(&mux);
    let response = client.get("/u1/u2/10");
    assert_eq!(response.status(), 200);
    assert_eq!(response.text(), "{\"id\":\"10\"}");
    assert_eq!(response.header("X-Test"), Some("test"));
    assert_eq!(response.header("X-Test2"), Some("test2"));
}

#[test]
fn ordering_is_root_then_group_then_route() {
    let trace: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
    let mut mux = Mux::new();

    let root_trace = Arc::clone(&trace);
    mux.use_interceptor(move |cx, next| {
        root_trace.lock().unwrap().push("root:pre");
        next.run(cx);
        root_trace.lock().unwrap().push("root:post");
    });

    let group_trace = Arc::clone(&trace);
    let route_trace = Arc::clone(&trace);
    let handler_trace = Arc::clone(&trace);
    mux.group("/api", move |g| {
        g.use_interceptor(move |cx, next| {
            group_trace.lock().unwrap().push("group:pre");
            next.run(cx);
            group_trace.lock().unwrap().push("group:post");
        });
        g.get("items", move |_cx| {
            handler_trace.lock().unwrap().push("handler");
        })
        .with(move |cx, next| {
            route_trace.lock().unwrap().push("route:pre");
            next.run(cx);
            route_trace.lock().unwrap().push("route:post");
        });
    });

    let client = TestClient::new(&mux);
    let response = client.get("/api/items");
    assert_eq!(response.status(), 200);
    assert_eq!(
        *trace.lock().unwrap(),
        [
            "root:pre",
            "group:pre",
            "route:pre",
            "handler",
            "route:post",
            "group:post",
            "root:post",
        ]
    );
}

#[test]
fn short_circuit_skips_handler_but_unwinds_upstream() {
    let trace: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
    let mut mux = Mux::new();
    {
        let trace = Arc::clone(&trace);
        mux.use_interceptor(move |cx, next| {
            trace.lock().unwrap().push("outer:pre");
            next.run(cx);
            trace.lock().unwrap().push("outer:post");
        });
    }
    {
        let trace = Arc::clone(&trace);
        mux.use_interceptor(move |cx, _next| {
            trace.lock().unwrap().push("gate");
            cx.response_mut().set_status(401);
            cx.response_mut().text("denied");
        });
    }
    {
        let trace = Arc::clone(&trace);
        mux.get("/secret", move |_cx| {
            trace.lock().unwrap().push("handler");
        });
    }

    let client = TestClient::new(&mux);
    let response = client.get("/secret");
    assert_eq!(response.status(), 401);
    assert_eq!(response.text(), "denied");
    assert_eq!(*trace.lock().unwrap(), ["outer:pre", "gate", "outer:post"]);
}

#[test]
fn global_interceptors_run_on_failed_resolution() {
    let mut mux = Mux::new();
    mux.use_interceptor(|cx, next| {
        cx.response_mut().header_mut().set("X-Test", "test");
        next.run(cx);
    });
    mux.get("/u", |_cx| {});

    let client = TestClient::new(&mux);
    let not_found = client.get("/missing");
    assert_eq!(not_found.status(), 404);
    assert_eq!(not_found.header("X-Test"), Some("test"));

    let not_allowed = client.post("/u");
    assert_eq!(not_allowed.status(), 405);
    assert_eq!(not_allowed.header("X-Test"), Some("test"));
}

#[test]
fn formatting_selector_can_force_json_error_bodies() {
    let mut mux = Mux::new();
    mux.use_interceptor(|cx, next| {
        cx.request_mut()
            .header_mut()
            .set("Accept", "application/json");
        next.run(cx);
    });

    let client = TestClient::new(&mux);
    let response = client.get("/missing");
    assert_eq!(response.status(), 404);
    assert_eq!(
        response.json(),
        serde_json::json!({ "code": 101, "error": "route not matched." })
    );
}

#[test]
fn json_strategy_stamps_successful_responses() {
    let mut mux = Mux::new();
    mux.use_interceptor(json_strategy);
    mux.get("/u1/u2/:id", |cx| {
        let id = cx.param("id").unwrap_or_default().to_string();
        cx.response_mut().json(&serde_json::json!({ "id": id }));
    });

    let client = TestClient::new(&mux);
    let response = client.get("/u1/u2/10");
    assert_eq!(response.text(), "{\"id\":\"10\"}");
    assert_eq!(response.header("Content-Type"), Some("application/json"));
}

#[test]
fn interceptor_can_override_a_handler_error() {
    let mut mux = Mux::new();
    mux.get("/u", |cx| cx.set_error(Error::new(7, "inner")))
        .with(|cx, next| {
            next.run(cx);
            cx.set_error(Error::new(8, "outer"));
        });

    let client = TestClient::new(&mux);
    let response = client.get("/u");
    assert_eq!(response.status(), 403);
    assert_eq!(response.text(), "code:8\nerror:outer");
}

#[test]
fn interceptor_can_recover_from_a_handler_error() {
    let mut mux = Mux::new();
    mux.get("/u", |cx| {
        cx.set_error(Error::new(7, "inner"));
    })
    .with(|cx, next| {
        next.run(cx);
        cx.clear_error();
        cx.response_mut().text("recovered");
    });

    let client = TestClient::new(&mux);
    let response = client.get("/u");
    assert_eq!(response.status(), 200);
    assert_eq!(response.text(), "recovered");
}

#[test]
fn route_interceptors_see_path_parameters() {
    let mut mux = Mux::new();
    mux.get("/items/:id", |_cx| {}).with(|cx, next| {
        let id = cx.param("id").unwrap_or_default().to_string();
        cx.response_mut().header_mut().set("X-Item", id);
        next.run(cx);
    });

    let client = TestClient::new(&mux);
    let response = client.get("/items/7");
    assert_eq!(response.header("X-Item"), Some("7"));
}

#[test]
fn custom_not_found_still_sees_interceptor_headers() {
    let mut mux = Mux::new();
    mux.use_interceptor(|cx, next| {
        cx.response_mut().header_mut().set("X-Test", "test");
        next.run(cx);
    });
    mux.set_not_found(|cx| cx.response_mut().text("custom"));
    mux.get("/u", |_cx| {});

    let client = TestClient::new(&mux);
    let response = client.send(RequestBuilder::get("/missing"));
    assert_eq!(response.status(), 404);
    assert_eq!(response.text(), "custom");
    assert_eq!(response.header("X-Test"), Some("test"));
}
