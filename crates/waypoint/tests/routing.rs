//! End-to-end dispatch behavior.

use waypoint::testing::{RequestBuilder, TestClient};
use waypoint::{Method, Mux};

fn id_mux() -> Mux {
    let mut mux = Mux::new();
    mux.get("/u1/u2/:id", |cx| {
        let id = cx.param("id").unwrap_or_default().to_string();
        cx.response_mut().json(&serde_json::json!({ "id": id }));
    });
    mux
}

#[test]
fn get_with_param_returns_json_body() {
    let mux = id_mux();
    let client = TestClient::new(&mux);
    let response = client.get("/u1/u2/10");
    assert_eq!(response.status(), 200);
    assert_eq!(response.text(), "{\"id\":\"10\"}");
}

#[test]
fn post_on_registered_path_is_405() {
    let mux = id_mux();
    let client = TestClient::new(&mux);
    let response = client.post("/u1/u2/10");
    assert_eq!(response.status(), 405);
    assert_eq!(response.text(), "code:102\nerror:method not allowed.");
}

#[test]
fn unknown_path_is_404() {
    let mux = id_mux();
    let client = TestClient::new(&mux);
    let response = client.get("/nope");
    assert_eq!(response.status(), 404);
    assert_eq!(response.text(), "code:101\nerror:route not matched.");
}

#[test]
fn empty_mux_is_404_with_its_own_code() {
    let mux = Mux::new();
    let client = TestClient::new(&mux);
    let response = client.get("/u1/u2/10");
    assert_eq!(response.status(), 404);
    assert_eq!(response.text(), "code:100\nerror:route not registered.");
}

#[test]
fn each_registration_dispatches_to_its_own_handler() {
    let mut mux = Mux::new();
    mux.get("/a", |cx| cx.response_mut().text("a"));
    mux.post("/a", |cx| cx.response_mut().text("a-post"));
    mux.get("/a/b", |cx| cx.response_mut().text("b"));
    let client = TestClient::new(&mux);
    assert_eq!(client.get("/a").text(), "a");
    assert_eq!(client.post("/a").text(), "a-post");
    assert_eq!(client.get("/a/b").text(), "b");
}

#[test]
fn wildcards_substitute_each_literal_segment() {
    let mut mux = Mux::new();
    mux.get("/v/:major/:minor", |cx| {
        let major = cx.param("major").unwrap_or_default().to_string();
        let minor = cx.param("minor").unwrap_or_default().to_string();
        cx.response_mut().text(format!("{major}.{minor}"));
    });
    let client = TestClient::new(&mux);
    assert_eq!(client.get("/v/1/42").text(), "1.42");
    assert_eq!(client.get("/v/0/0").text(), "0.0");
}

#[test]
fn wildcard_does_not_span_segments() {
    let mux = id_mux();
    let client = TestClient::new(&mux);
    assert_eq!(client.get("/u1/u2/10/extra").status(), 404);
}

#[test]
fn group_registration_shares_the_prefix() {
    let mut mux = Mux::new();
    mux.group("/u1", |g| {
        g.get("u2/:id", |cx| {
            let id = cx.param("id").unwrap_or_default().to_string();
            cx.response_mut().json(&serde_json::json!({ "id": id }));
        });
    });
    let client = TestClient::new(&mux);
    let response = client.get("/u1/u2/10");
    assert_eq!(response.status(), 200);
    assert_eq!(response.text(), "{\"id\":\"10\"}");
}

#[test]
fn reregistering_replaces_the_previous_handler() {
    let mut mux = Mux::new();
    mux.get("/u", |cx| cx.response_mut().text("first"));
    mux.get("/u", |cx| cx.response_mut().text("second"));
    let client = TestClient::new(&mux);
    assert_eq!(client.get("/u").text(), "second");
}

#[test]
fn error_body_is_json_when_the_client_accepts_it() {
    let mux = id_mux();
    let client = TestClient::new(&mux);
    let response = client.send(RequestBuilder::get("/nope").header("Accept", "application/json"));
    assert_eq!(response.status(), 404);
    assert_eq!(response.header("Content-Type"), Some("application/json"));
    assert_eq!(
        response.json(),
        serde_json::json!({ "code": 101, "error": "route not matched." })
    );
}

#[test]
fn matched_response_defaults_to_text_plain() {
    let mut mux = Mux::new();
    mux.get("/plain", |cx| cx.response_mut().text("ok"));
    let client = TestClient::new(&mux);
    let response = client.get("/plain");
    assert_eq!(response.header("Content-Type"), Some("text/plain"));
    assert_eq!(response.header("Content-Length"), Some("2"));
}

#[test]
fn custom_error_handlers_take_over_their_status() {
    let mut mux = Mux::new();
    mux.get("/u", |_cx| {});
    mux.set_not_found(|cx| cx.response_mut().text("lost"));
    mux.set_not_allowed(|cx| cx.response_mut().text("blocked"));
    let client = TestClient::new(&mux);
    assert_eq!(client.get("/missing").text(), "lost");
    assert_eq!(client.post("/u").text(), "blocked");
}

#[test]
fn head_and_delete_register_independently() {
    let mut mux = Mux::new();
    mux.head("/res", |cx| cx.response_mut().set_status(204));
    mux.delete("/res", |cx| cx.response_mut().text("deleted"));
    let client = TestClient::new(&mux);
    assert_eq!(
        client
            .send(RequestBuilder::new(Method::Head, "/res"))
            .status(),
        204
    );
    assert_eq!(
        client
            .send(RequestBuilder::new(Method::Delete, "/res"))
            .text(),
        "deleted"
    );
    assert_eq!(
        client
            .send(RequestBuilder::new(Method::Put, "/res"))
            .status(),
        405
    );
}
