//! The triple model: [`Node`], [`Literal`], and [`Triple`].
//!
//! Triples are decoded once per request and never mutated afterwards. Node
//! identity is purely string based: named nodes compare by IRI, blank nodes
//! by their local id. Blank-node ids are only meaningful inside the response
//! they were decoded from.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three RDF node kinds.
///
/// Serialises as `{"kind": "named", "value": "..."}` and so on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Node {
    /// An absolute IRI.
    Named(String),
    /// A blank node, identified by its response-local id (without `_:`).
    Blank(String),
    /// A literal value.
    Literal(Literal),
}

impl Node {
    pub fn named(iri: impl Into<String>) -> Self {
        Node::Named(iri.into())
    }

    pub fn blank(id: impl Into<String>) -> Self {
        Node::Blank(id.into())
    }

    /// A plain literal with neither language tag nor datatype.
    pub fn literal(value: impl Into<String>) -> Self {
        Node::Literal(Literal::new(value))
    }
}

/// Formats the node in N-Triples notation: `<iri>`, `_:id`, or a quoted literal.
///
/// This string form is also the subject sort key used by the renderer.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Named(iri) => write!(f, "<{iri}>"),
            Node::Blank(id) => write!(f, "_:{id}"),
            Node::Literal(lit) => write!(f, "{lit}"),
        }
    }
}

/// A literal's lexical value plus optional language tag or datatype IRI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
}

impl Literal {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: None,
            datatype: None,
        }
    }

    /// A language-tagged literal, e.g. `"Oslo"@no`.
    pub fn lang(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: Some(language.into()),
            datatype: None,
        }
    }

    /// A literal with an explicit datatype IRI.
    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: None,
            datatype: Some(datatype.into()),
        }
    }

    /// The exact lexical value in double quotes.
    ///
    /// Quotes, backslashes and control characters are escaped the way a
    /// Turtle `STRING_LITERAL_QUOTE` expects, so the result unquotes back to
    /// [`Literal::value`] without loss. Every literal in a rendering goes
    /// through this one function.
    pub fn quoted(&self) -> String {
        let mut out = String::with_capacity(self.value.len() + 2);
        out.push('"');
        for c in self.value.chars() {
            match c {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                '\u{8}' => out.push_str("\\b"),
                '\u{c}' => out.push_str("\\f"),
                c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
                c => out.push(c),
            }
        }
        out.push('"');
        out
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.quoted())?;
        if let Some(lang) = &self.language {
            write!(f, "@{lang}")?;
        } else if let Some(dt) = &self.datatype {
            write!(f, "^^<{dt}>")?;
        }
        Ok(())
    }
}

/// A single statement. Subjects are named or blank nodes; predicates are IRIs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Node,
    pub predicate: String,
    pub object: Node,
}

impl Triple {
    pub fn new(subject: Node, predicate: impl Into<String>, object: Node) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> {} .", self.subject, self.predicate, self.object)
    }
}

// --- tests -------------------------------------------------------------------
