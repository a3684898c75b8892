//! Shared helpers for the Vindu conformance test suite.
//!
//! Provides [`spawn_store`], a mock SPARQL endpoint answering DESCRIBE
//! queries with canned bodies, and [`spawn_server`], which binds an ephemeral
//! port and runs an in-process Vindu server against a given endpoint.

use vindu_server::{build_router, ServerConfig};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Base IRI used throughout the suite.
pub const BASE: &str = "http://data.deichman.no";

/// Path the mock store serves its SPARQL endpoint on.
pub const SPARQL_PATH: &str = "/sparql/";

/// Start an ephemeral in-process server and return its base URL.
///
/// The server runs in a background `tokio` task bound to an OS-assigned port
/// on `127.0.0.1`, e.g. `http://127.0.0.1:51234`.
///
/// # Panics
///
/// Panics if the TCP listener cannot be bound or the server fails to start.
pub async fn spawn_server(sparql_endpoint: &str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");

    let mut config = ServerConfig::for_endpoint(sparql_endpoint);
    config.bind_addr = addr;
    config.upstream_timeout_secs = 5;
    let router = build_router(config);

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("conformance server error");
    });

    format!("http://{addr}")
}

/// Start a mock SPARQL store with no canned answers.
///
/// Unmatched requests get wiremock's default 404, which the server reports
/// as an upstream failure.
pub async fn spawn_store() -> MockServer {
    MockServer::start().await
}

/// The endpoint URL of a mock store.
pub fn endpoint(store: &MockServer) -> String {
    format!("{}{SPARQL_PATH}", store.uri())
}

/// Answer DESCRIBE queries for `<BASE/resource>` in `format` with `body`.
pub async fn answer(store: &MockServer, resource: &str, format: &str, body: &str) {
    let query = vindu_server::describe_query(&format!("{BASE}/{resource}"));
    Mock::given(method("POST"))
        .and(path(SPARQL_PATH))
        .and(query_param("query", query.as_str()))
        .and(query_param("format", format))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(store)
        .await;
}
