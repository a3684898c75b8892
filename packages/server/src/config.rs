//! Server configuration, populated from command-line flags or environment
//! variables.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use clap::Parser;

const DEFAULT_GRAPH: &str = "lsext";
const DEFAULT_SPARQL: &str = "http://virtuoso:8890/sparql/";
const DEFAULT_BASE: &str = "http://data.deichman.no";
const DEFAULT_BIND: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 7777));
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration for a Vindu server.
///
/// Every field has a default, so the server starts with zero configuration
/// against the usual Virtuoso deployment.
///
/// | Flag | Variable | Default |
/// |------|----------|---------|
/// | `--graph` | `VINDU_GRAPH` | `lsext` |
/// | `--sparql` | `VINDU_SPARQL` | `http://virtuoso:8890/sparql/` |
/// | `--base` | `VINDU_BASE` | `http://data.deichman.no` |
/// | `--bind` | `VINDU_BIND` | `0.0.0.0:7777` |
/// | `--upstream-timeout-secs` | `VINDU_UPSTREAM_TIMEOUT_SECS` | `30` |
#[derive(Debug, Clone, Parser)]
#[command(name = "vindu-server", version, about = "Browse linked data from a SPARQL store", long_about = None)]
pub struct ServerConfig {
    /// Named graph passed as `default-graph-uri` on every query.
    #[arg(long, env = "VINDU_GRAPH", default_value = DEFAULT_GRAPH)]
    pub graph: String,

    /// SPARQL endpoint address.
    #[arg(long = "sparql", env = "VINDU_SPARQL", default_value = DEFAULT_SPARQL)]
    pub sparql_endpoint: String,

    /// Base IRI; a request for `/person/p1` describes `<base>/person/p1`.
    #[arg(long, env = "VINDU_BASE", default_value = DEFAULT_BASE)]
    pub base: String,

    /// Socket address the server binds to.
    #[arg(long = "bind", env = "VINDU_BIND", default_value_t = DEFAULT_BIND)]
    pub bind_addr: SocketAddr,

    /// Upper bound on one outbound SPARQL request, in seconds.
    #[arg(long, env = "VINDU_UPSTREAM_TIMEOUT_SECS", default_value_t = DEFAULT_UPSTREAM_TIMEOUT_SECS)]
    pub upstream_timeout_secs: u64,
}

impl ServerConfig {
    /// Configuration for an endpoint with every other field at its built-in
    /// default. Neither flags nor `VINDU_*` variables are consulted.
    pub fn for_endpoint(sparql_endpoint: impl Into<String>) -> Self {
        Self {
            sparql_endpoint: sparql_endpoint.into(),
            ..Self::default()
        }
    }
}

/// The built-in defaults from the table above.
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            graph: DEFAULT_GRAPH.to_string(),
            sparql_endpoint: DEFAULT_SPARQL.to_string(),
            base: DEFAULT_BASE.to_string(),
            bind_addr: DEFAULT_BIND,
            upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
        }
    }
}
