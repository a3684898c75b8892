//! Assembles the Axum [`Router`] from the handler modules.

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use vindu::{Linkifier, PrefixMap};

use crate::{
    config::ServerConfig,
    handlers::{resource, AppState},
    sparql::SparqlClient,
};

/// Build the complete application router with shared state.
pub fn build_router(config: ServerConfig) -> Router {
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.upstream_timeout_secs))
        .build()
        .expect("failed to build HTTP client for the SPARQL endpoint");

    let state = AppState {
        sparql: SparqlClient::new(http_client, &config.sparql_endpoint, &config.graph),
        prefixes: Arc::new(PrefixMap::default()),
        linkifier: Arc::new(Linkifier::new(&config.base)),
    };

    Router::new()
        .route("/favicon.ico", get(resource::favicon))
        .route("/", get(resource::describe))
        .route("/{*path}", get(resource::describe))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
