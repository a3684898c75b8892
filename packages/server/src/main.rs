//! `vindu-server` — browse linked data from a SPARQL store.
//!
//! # Quick start
//!
//! ```sh
//! # Defaults: graph `lsext`, Virtuoso at http://virtuoso:8890/sparql/, port 7777
//! vindu-server
//!
//! # Another store and graph:
//! vindu-server --sparql http://localhost:8890/sparql/ --graph mygraph
//! VINDU_SPARQL=http://localhost:8890/sparql/ vindu-server
//! ```
//!
//! See [`vindu_server::ServerConfig`] for every option.

use clap::Parser;
use vindu_server::{build_router, ServerConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vindu_server=info,tower_http=debug".into()),
        )
        .init();

    let config = ServerConfig::parse();
    tracing::info!(
        endpoint = %config.sparql_endpoint,
        graph = %config.graph,
        base = %config.base,
        "configured"
    );

    let bind_addr = config.bind_addr;
    let app = build_router(config);

    tracing::info!("listening on {bind_addr}");
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {bind_addr}: {e}"));

    axum::serve(listener, app).await.expect("server error");
}
