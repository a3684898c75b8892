//! Decoding SPARQL DESCRIBE responses into the triple model.
//!
//! Parsing is delegated to the oxigraph parsers; this module only picks the
//! parser for a serialization and converts `oxrdf` terms into [`Node`]s.
//! Input order is preserved, duplicates included.

use oxrdf::Term;
use oxrdfxml::RdfXmlParser;
use oxttl::{NTriplesParser, TurtleParser};

use crate::term::{Literal, Node, Triple};

const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

/// Errors produced while decoding a triple stream.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The body is not valid in the declared serialization.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// The body contains a term the triple model cannot represent
    /// (e.g. an RDF 1.2 triple term).
    #[error("unsupported term: {0}")]
    Unsupported(String),
}

/// RDF serializations the store can answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    /// Line-based N-Triples, requested as `text/plain`.
    NTriples,
    Turtle,
    RdfXml,
}

impl RdfFormat {
    /// The media type used when asking the store for this serialization.
    pub fn media_type(self) -> &'static str {
        match self {
            RdfFormat::NTriples => "text/plain",
            RdfFormat::Turtle => "text/turtle",
            RdfFormat::RdfXml => "application/rdf+xml",
        }
    }
}

/// Decode `bytes` as `format` into triples, in document order.
pub fn decode(format: RdfFormat, bytes: &[u8]) -> Result<Vec<Triple>, DecodeError> {
    match format {
        RdfFormat::NTriples => collect(NTriplesParser::new().for_reader(bytes)),
        RdfFormat::Turtle => collect(TurtleParser::new().for_reader(bytes)),
        RdfFormat::RdfXml => collect(RdfXmlParser::new().for_reader(bytes)),
    }
}

fn collect<E: std::fmt::Display>(
    parsed: impl Iterator<Item = Result<oxrdf::Triple, E>>,
) -> Result<Vec<Triple>, DecodeError> {
    parsed
        .map(|result| {
            result
                .map_err(|e| DecodeError::Syntax(e.to_string()))
                .and_then(convert)
        })
        .collect()
}

fn convert(triple: oxrdf::Triple) -> Result<Triple, DecodeError> {
    let subject = node(triple.subject.into())?;
    let object = node(triple.object)?;
    Ok(Triple::new(subject, triple.predicate.as_str(), object))
}

fn node(term: Term) -> Result<Node, DecodeError> {
    match term {
        Term::NamedNode(n) => Ok(Node::Named(n.as_str().to_string())),
        Term::BlankNode(b) => Ok(Node::Blank(b.as_str().to_string())),
        Term::Literal(l) => {
            let literal = match l.language() {
                Some(lang) => Literal::lang(l.value(), lang),
                None if l.datatype().as_str() == XSD_STRING => Literal::new(l.value()),
                None => Literal::typed(l.value(), l.datatype().as_str()),
            };
            Ok(Node::Literal(literal))
        }
        #[allow(unreachable_patterns)]
        other => Err(DecodeError::Unsupported(other.to_string())),
    }
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_ntriples_in_order() {
        let body = br#"<http://data.deichman.no/person/p1> <http://data.deichman.no/ontology#name> "Alice" .
<http://data.deichman.no/person/p1> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://data.deichman.no/ontology#Person> .
<http://data.deichman.no/person/p1> <http://data.deichman.no/ontology#role> _:b0 .
_:b0 <http://data.deichman.no/ontology#label> "forfatter"@no .
_:b0 <http://data.deichman.no/ontology#year> "1890"^^<http://www.w3.org/2001/XMLSchema#gYear> .
"#;
        let triples = decode(RdfFormat::NTriples, body).unwrap();
        assert_eq!(triples.len(), 5);
        assert_eq!(triples[0].subject, Node::named("http://data.deichman.no/person/p1"));
        assert_eq!(triples[0].object, Node::literal("Alice"));
        assert_eq!(triples[2].object, Node::blank("b0"));
        assert_eq!(triples[3].subject, Node::blank("b0"));
        assert_eq!(
            triples[3].object,
            Node::Literal(Literal::lang("forfatter", "no"))
        );
        assert_eq!(
            triples[4].object,
            Node::Literal(Literal::typed("1890", "http://www.w3.org/2001/XMLSchema#gYear"))
        );
    }

    #[test]
    fn keeps_duplicates() {
        let line = "<http://ex.org/s> <http://ex.org/p> \"o\" .\n";
        let body = format!("{line}{line}");
        assert_eq!(decode(RdfFormat::NTriples, body.as_bytes()).unwrap().len(), 2);
    }

    #[test]
    fn empty_body_decodes_to_nothing() {
        assert!(decode(RdfFormat::NTriples, b"").unwrap().is_empty());
        assert!(decode(RdfFormat::Turtle, b"# Empty TURTLE\n").unwrap().is_empty());
    }

    #[test]
    fn decodes_turtle() {
        let body = br#"@prefix deich: <http://data.deichman.no/ontology#> .
<http://data.deichman.no/work/w1> a deich:Work ; deich:mainTitle "Sult" ."#;
        let triples = decode(RdfFormat::Turtle, body).unwrap();
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[1].object, Node::literal("Sult"));
    }

    #[test]
    fn decodes_rdfxml() {
        let body = br#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:deich="http://data.deichman.no/ontology#">
  <rdf:Description rdf:about="http://data.deichman.no/work/w1">
    <deich:mainTitle>Sult</deich:mainTitle>
  </rdf:Description>
</rdf:RDF>"#;
        let triples = decode(RdfFormat::RdfXml, body).unwrap();
        assert_eq!(triples.len(), 1);
        assert_eq!(triples[0].predicate, "http://data.deichman.no/ontology#mainTitle");
    }

    #[test]
    fn malformed_input_is_a_syntax_error() {
        let err = decode(RdfFormat::NTriples, b"<http://ex.org/s> oops .\n").unwrap_err();
        assert!(matches!(err, DecodeError::Syntax(_)));
    }
}
