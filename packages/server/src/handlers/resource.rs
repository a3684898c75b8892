//! Resource handlers — `GET /`, `GET /{*path}` and `GET /favicon.ico`.
//!
//! A request path is appended to the configured base IRI to form the subject.
//! The subject's CBD is fetched from the store in the serialization picked by
//! content negotiation. Non-HTML formats return the store's bytes unchanged;
//! HTML decodes N-Triples and renders the description page.

use axum::{
    extract::State,
    http::{header, HeaderMap, Uri},
    response::{IntoResponse, Response},
};
use tracing::info;
use vindu::{decode, Node, Renderer};

use crate::{
    error::AppError,
    negotiate::{negotiate, Disposition},
    page::html_page,
};

use super::AppState;

/// `GET /favicon.ico` — always 404, never reaches the store.
pub async fn favicon() -> AppError {
    AppError::NotFound
}

/// `GET /{*path}` — describe `<base>/<path>`. `GET /` describes `<base>/`.
///
/// Returns 404 when the store has no triples for the subject, whatever the
/// negotiated format. Pass-through bodies are buffered so that emptiness can
/// be checked by decoding them; the bytes sent are the store's own.
pub async fn describe(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let path = uri.path().trim_start_matches('/');
    let base = state.linkifier.base();
    let subject = format!("{base}/{path}");

    let format = negotiate(headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()));
    info!(path = uri.path(), format = format.media_type(), "describe");

    let upstream = format.upstream();
    let body = state.sparql.describe(&subject, upstream).await?;
    let triples = decode(upstream, &body)?;
    if triples.is_empty() {
        info!(%subject, "no description");
        return Err(AppError::NotFound);
    }

    match format.disposition() {
        Disposition::PassThrough(rdf) => {
            Ok(([(header::CONTENT_TYPE, rdf.media_type())], body).into_response())
        }
        Disposition::Render => {
            let root = Node::named(&subject);
            let description =
                Renderer::new(&state.prefixes, &state.linkifier).describe(&triples, &root);
            info!(%subject, triples = triples.len(), clauses = description.clauses.len(), "rendered");
            let page = html_page(&state.prefixes, base, path, &description);
            Ok(([(header::CONTENT_TYPE, "text/html; charset=utf-8")], page).into_response())
        }
    }
}
