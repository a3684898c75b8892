//! HTTP request handlers for the Vindu server.
//!
//! Handlers are async functions that receive Axum extractors and return
//! `Result<Response, AppError>`. All state is read-only and shared across
//! requests; every triple set, description and page is request-local.

pub mod resource;

use std::sync::Arc;

use vindu::{Linkifier, PrefixMap};

use crate::sparql::SparqlClient;

/// Shared application state threaded through all Axum handlers via [`axum::extract::State`].
#[derive(Clone)]
pub struct AppState {
    /// Outbound client for the configured endpoint and graph.
    pub sparql: SparqlClient,
    /// Built once at startup; never mutated.
    pub prefixes: Arc<PrefixMap>,
    pub linkifier: Arc<Linkifier>,
}
