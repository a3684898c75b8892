//! Outbound CBD DESCRIBE queries against the SPARQL endpoint.
//!
//! Each incoming request performs exactly one POST to the store. There are
//! no retries; the only bound is the client timeout configured in
//! [`crate::router::build_router`].

use bytes::Bytes;
use reqwest::{header, Client, Request, Url};
use tracing::debug;
use vindu::RdfFormat;

/// Errors from building or executing a DESCRIBE request.
#[derive(Debug, thiserror::Error)]
pub enum SparqlError {
    /// The request could not be constructed (bad endpoint URL, etc.).
    #[error("invalid SPARQL request: {0}")]
    InvalidRequest(String),

    /// The request failed in transit (connection refused, timeout, ...).
    #[error("{0}")]
    Transport(reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("SPARQL endpoint returned status {0}")]
    Status(u16),

    /// The response body could not be read.
    #[error("{0}")]
    Body(reqwest::Error),
}

/// The Virtuoso CBD DESCRIBE query for one subject.
pub fn describe_query(iri: &str) -> String {
    format!("DEFINE sql:describe-mode \"CBD\" DESCRIBE <{iri}>")
}

/// A SPARQL endpoint scoped to one default graph.
#[derive(Debug, Clone)]
pub struct SparqlClient {
    client: Client,
    endpoint: String,
    graph: String,
}

impl SparqlClient {
    /// `client` is cheaply clonable and carries the timeout.
    pub fn new(client: Client, endpoint: impl Into<String>, graph: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            graph: graph.into(),
        }
    }

    /// Build the POST request describing `iri` in `format`.
    ///
    /// Query, graph and format travel as URL query parameters with an empty
    /// body, the way Virtuoso's `/sparql/` endpoint accepts them.
    pub fn request(&self, iri: &str, format: RdfFormat) -> Result<Request, SparqlError> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| SparqlError::InvalidRequest(format!("{}: {e}", self.endpoint)))?;
        let query = describe_query(iri);
        self.client
            .post(url)
            .query(&[
                ("query", query.as_str()),
                ("default-graph-uri", self.graph.as_str()),
                ("format", format.media_type()),
            ])
            .header(header::ACCEPT, format.media_type())
            .build()
            .map_err(|e| SparqlError::InvalidRequest(e.to_string()))
    }

    /// Fetch the description of `iri` and return the raw response body.
    pub async fn describe(&self, iri: &str, format: RdfFormat) -> Result<Bytes, SparqlError> {
        let request = self.request(iri, format)?;
        debug!(%iri, format = format.media_type(), "querying SPARQL endpoint");

        let response = self
            .client
            .execute(request)
            .await
            .map_err(SparqlError::Transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(SparqlError::Status(status.as_u16()));
        }
        response.bytes().await.map_err(SparqlError::Body)
    }
}
