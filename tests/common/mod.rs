//! Shared utilities for integration testing.

use std::net::SocketAddr;

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Method, Response, StatusCode, Uri};
use axum::routing::{any, get};
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use storefront_relay::{HttpServer, OriginConfig, RelayConfig, Shutdown};
use tokio::net::TcpListener;

/// Start an upstream serving `router` on an ephemeral port.
pub async fn start_upstream(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    addr
}

/// Upstream that answers every request with a JSON description of it.
pub fn echo_upstream() -> Router {
    Router::new()
        .route("/fixtures/headers", get(header_fixture))
        .route("/fixtures/json", any(json_fixture))
        .route("/fixtures/empty", get(empty_fixture))
        .route("/fixtures/untyped", get(untyped_fixture))
        .route("/fixtures/redirect", get(redirect_fixture))
        .route("/fixtures/zstd", get(zstd_fixture))
        .fallback(echo)
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<Value> {
    let mut seen = Map::new();
    for name in headers.keys() {
        let values: Vec<Value> = headers
            .get_all(name)
            .iter()
            .map(|v| Value::String(v.to_str().unwrap_or_default().to_string()))
            .collect();
        seen.insert(name.as_str().to_string(), Value::Array(values));
    }

    Json(json!({
        "method": method.as_str(),
        "path": uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/"),
        "headers": seen,
        "body": String::from_utf8_lossy(&body),
    }))
}

async fn header_fixture() -> Response<Body> {
    Response::builder()
        .header("set-cookie", "CurrentLanguageId=1; path=/")
        .header("set-cookie", "SetContextLanguageCode=en-us; path=/")
        .header("server", "Microsoft-IIS/10.0")
        .header("x-powered-by", "ASP.NET")
        .header("date", "Thu, 01 Jan 1970 00:00:00 GMT")
        .header("content-type", "text/plain; charset=utf-8")
        .header("x-correlation-id", "upstream-123")
        .body(Body::from("hello"))
        .unwrap()
}

async fn json_fixture() -> Response<Body> {
    Response::builder()
        .status(StatusCode::CREATED)
        .header("content-type", "application/json")
        .body(Body::from(r#"{"cartId":"current","lineCount":2}"#))
        .unwrap()
}

async fn empty_fixture() -> Response<Body> {
    Response::builder()
        .header("content-type", "application/json")
        .header("x-empty", "yes")
        .body(Body::empty())
        .unwrap()
}

async fn untyped_fixture() -> Response<Body> {
    Response::new(Body::from(vec![0x89, b'P', b'N', b'G']))
}

async fn redirect_fixture() -> Response<Body> {
    Response::builder()
        .status(StatusCode::FOUND)
        .header("location", "/identity/login")
        .body(Body::empty())
        .unwrap()
}

/// `hello` as a single raw-block zstd frame.
pub const HELLO_ZSTD: &[u8] = &[
    0x28, 0xb5, 0x2f, 0xfd, // magic
    0x20, 0x05, // single segment, content size 5
    0x29, 0x00, 0x00, // last raw block, 5 bytes
    b'h', b'e', b'l', b'l', b'o',
];

async fn zstd_fixture() -> Response<Body> {
    Response::builder()
        .header("content-type", "text/plain")
        .header("content-encoding", "zstd")
        .body(Body::from(HELLO_ZSTD))
        .unwrap()
}

/// Start the relay host against `origin`, returning its address.
pub async fn start_relay(config: RelayConfig, origin: &str) -> (SocketAddr, Shutdown) {
    let server = HttpServer::new(config, OriginConfig::resolve(Some(origin))).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Client that talks to the relay directly and does not follow redirects.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}
