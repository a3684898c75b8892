//! Prefix compaction for predicate display.
//!
//! A [`PrefixMap`] is built once at startup and shared read-only by every
//! rendering pass. Rewriting is exact-prefix replacement: the first entry (in
//! table order) whose namespace starts the IRI wins. IRIs that match nothing
//! are shown in full angle-bracket form.

/// IRI of the RDF `type` relation, displayed as `a`.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// An ordered namespace → token table.
#[derive(Debug, Clone)]
pub struct PrefixMap {
    entries: Vec<(String, String)>,
}

impl PrefixMap {
    /// Build a map from `(namespace, token)` pairs. Order is significant.
    pub fn new<I, N, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(ns, token)| (ns.into(), token.into()))
                .collect(),
        }
    }

    /// Display form of a predicate (or any IRI): `deich:name`, `a`, or `<iri>`.
    pub fn compact(&self, iri: &str) -> String {
        for (namespace, token) in &self.entries {
            if let Some(rest) = iri.strip_prefix(namespace.as_str()) {
                return format!("{token}{rest}");
            }
        }
        format!("<{iri}>")
    }

    /// Prefixed name for `iri` using namespace entries only, e.g.
    /// `deich:Person`. Whole-IRI aliases such as `a` never apply here.
    pub fn prefixed_name(&self, iri: &str) -> Option<String> {
        self.declarations()
            .find_map(|(token, ns)| iri.strip_prefix(ns).map(|rest| format!("{token}{rest}")))
    }

    /// The `(token, namespace)` pairs that declare a namespace prefix.
    ///
    /// Whole-IRI aliases such as `a` are skipped; only tokens ending in `:`
    /// can be written as `@prefix` lines.
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter(|(_, token)| token.ends_with(':'))
            .map(|(ns, token)| (token.as_str(), ns.as_str()))
    }
}

/// The Deichman table: ontology, `rdf:type`, raw, and migration namespaces.
impl Default for PrefixMap {
    fn default() -> Self {
        Self::new([
            ("http://data.deichman.no/ontology#", "deich:"),
            (RDF_TYPE, "a"),
            ("http://data.deichman.no/raw#", "raw:"),
            ("http://migration.deichman.no/", "migration:"),
        ])
    }
}

// --- tests -------------------------------------------------------------------
