//! Public surface for the `vindu-server` crate.
//!
//! Exposes the router builder and config types so that external crates
//! (e.g. the conformance test suite) can spin up an in-process server
//! without spawning a subprocess.

pub mod config;
pub mod error;
pub mod handlers;
pub mod negotiate;
pub mod page;
pub mod router;
pub mod sparql;

pub use config::ServerConfig;
pub use negotiate::{negotiate, Disposition, Format};
pub use router::build_router;
pub use sparql::{describe_query, SparqlClient, SparqlError};
