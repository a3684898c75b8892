//! Decides which IRIs point at other browsable resources on this service.
//!
//! The decision is a string match against `^<base>/(<category>)/`; targets are
//! never dereferenced.

use regex::Regex;

/// Resource categories exposed under the base IRI.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "place",
    "publication",
    "work",
    "person",
    "corporation",
    "subject",
    "genre",
    "serial",
];

/// Matches IRIs of browsable resources and turns them into relative paths.
#[derive(Debug, Clone)]
pub struct Linkifier {
    base: String,
    pattern: Regex,
}

impl Linkifier {
    /// A linkifier for `base` using [`DEFAULT_CATEGORIES`].
    pub fn new(base: impl Into<String>) -> Self {
        Self::with_categories(base, DEFAULT_CATEGORIES.iter().copied())
    }

    pub fn with_categories<I, S>(base: impl Into<String>, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let base = base.into().trim_end_matches('/').to_string();
        let alternatives: Vec<String> = categories
            .into_iter()
            .map(|c| regex::escape(c.as_ref()))
            .collect();
        let pattern = format!(
            "^{}/({})/",
            regex::escape(&base),
            alternatives.join("|")
        );
        // Every piece is escaped, so the pattern is always valid.
        let pattern = Regex::new(&pattern).expect("invalid linkify regex");
        Self { base, pattern }
    }

    /// The base IRI, without a trailing slash.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The path below the base (e.g. `person/p123`) if `iri` is a browsable
    /// resource, otherwise `None`.
    pub fn link(&self, iri: &str) -> Option<String> {
        if !self.pattern.is_match(iri) {
            return None;
        }
        iri.strip_prefix(&self.base)
            .and_then(|rest| rest.strip_prefix('/'))
            .map(str::to_string)
    }
}

// --- tests -------------------------------------------------------------------
