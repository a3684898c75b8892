//! Linked-data description rendering for the Vindu resource browser.
//!
//! This crate turns the Concise Bounded Description (CBD) of one resource,
//! as returned by a SPARQL store, into a nested, Turtle-like text tree with
//! links between browsable resources. It performs no I/O; the
//! `vindu-server` HTTP front end and the `vindu` CLI are built on it.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`term`] | Triple model: [`Node`], [`Literal`], [`Triple`] |
//! | [`prefix`] | [`PrefixMap`] namespace compaction for display |
//! | [`linkify`] | [`Linkifier`] deciding which IRIs become links |
//! | [`render`] | [`Renderer`] producing a [`Description`] tree and its layout |
//! | [`decode`] | N-Triples / Turtle / RDF/XML decoding via oxigraph parsers |
//!
//! # Quick start
//!
//! ```rust,ignore
//! use vindu::{decode, Linkifier, Node, PrefixMap, RdfFormat, Renderer};
//!
//! let triples = decode(RdfFormat::NTriples, body)?;
//! let prefixes = PrefixMap::default();
//! let linkifier = Linkifier::new("http://data.deichman.no");
//! let root = Node::named("http://data.deichman.no/person/p1");
//!
//! let description = Renderer::new(&prefixes, &linkifier).describe(&triples, &root);
//! println!("{description} .");
//! ```

pub mod decode;
pub mod linkify;
pub mod prefix;
pub mod render;
pub mod term;

pub use decode::{decode, DecodeError, RdfFormat};
pub use linkify::Linkifier;
pub use prefix::PrefixMap;
pub use render::{escape_html, Clause, Description, Markup, Object, Renderer};
pub use term::{Literal, Node, Triple};
