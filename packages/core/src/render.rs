//! Turtle-like rendering of one resource's description.
//!
//! [`Renderer::describe`] turns an unordered bag of triples into a
//! [`Description`]: the root's predicate-object clauses, with blank-node
//! objects expanded in place. The description is then laid out as text with
//! [`Description::write`], either plain or as HTML with links between
//! resources.
//!
//! ```text
//!     a             deich:Person ;
//!     deich:name    "Alice" ;
//!     deich:role    [
//!         deich:agent    <a href="/person/p1">&lt;http://data.deichman.no/person/p1&gt;</a>
//!     ]
//! ```
//!
//! Ordering is deterministic: triples are stably sorted once by subject
//! (N-Triples string form) and then by compacted predicate, so objects that
//! share a subject and predicate keep their input order.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::linkify::Linkifier;
use crate::prefix::{PrefixMap, RDF_TYPE};
use crate::term::{Node, Triple};

/// Columns of indentation per nesting level.
const INDENT: usize = 4;

/// Spaces between the widest predicate and the object column.
const GAP: usize = 4;

/// The rendered predicate-object clauses of one subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    pub clauses: Vec<Clause>,
}

/// One predicate with its object list, in rendering order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    /// Compacted predicate, e.g. `a`, `deich:name`, or `<http://...>`.
    pub predicate: String,
    pub objects: Vec<Object>,
}

/// A rendered object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Object {
    /// A browsable resource on this service; `href` is relative to the base.
    Link { href: String, iri: String },
    /// Any other IRI, shown in full.
    Iri(String),
    /// A class IRI shown as a prefixed name (objects of `rdf:type` only).
    Name(String),
    /// A quoted literal, see [`crate::Literal::quoted`].
    Literal(String),
    /// A blank node expanded in place.
    Blank(Description),
    /// A blank node already being expanded further up; not expanded again.
    Cycle(String),
    /// A blank node already expanded under an earlier object.
    Ref(String),
}

/// How text is emitted by [`Description::write`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    Plain,
    /// HTML-escaped text with `<a href="/...">` anchors for links.
    Html,
}

/// Builds [`Description`]s using a shared prefix table and linkifier.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    prefixes: &'a PrefixMap,
    linkifier: &'a Linkifier,
}

// Blank nodes on the current expansion path, and every one expanded so far.
#[derive(Default)]
struct Walk {
    expanding: Vec<String>,
    expanded: HashSet<String>,
}

// A triple with its precomputed sort keys.
struct Entry<'t> {
    subject: String,
    predicate: String,
    triple: &'t Triple,
}

impl<'a> Renderer<'a> {
    pub fn new(prefixes: &'a PrefixMap, linkifier: &'a Linkifier) -> Self {
        Self {
            prefixes,
            linkifier,
        }
    }

    /// Describe `root` using `triples`, which should be its CBD closure.
    ///
    /// Never fails: a blank node with no triples of its own renders as an
    /// empty block, and a blank node that reappears inside its own expansion
    /// renders as [`Object::Cycle`]. Each blank node is expanded at most once;
    /// later references render as [`Object::Ref`], so output stays linear in
    /// the number of triples.
    pub fn describe(&self, triples: &[Triple], root: &Node) -> Description {
        let entries = self.sorted(triples);
        let mut walk = Walk::default();
        if let Node::Blank(id) = root {
            walk.expanding.push(id.clone());
            walk.expanded.insert(id.clone());
        }
        self.describe_node(&entries, root, &mut walk)
    }

    fn sorted<'t>(&self, triples: &'t [Triple]) -> Vec<Entry<'t>> {
        let mut entries: Vec<Entry<'t>> = triples
            .iter()
            .map(|triple| Entry {
                subject: triple.subject.to_string(),
                predicate: self.prefixes.compact(&triple.predicate),
                triple,
            })
            .collect();
        // `sort_by` is stable, which keeps object lists in input order.
        entries.sort_by(|a, b| {
            a.subject
                .cmp(&b.subject)
                .then_with(|| a.predicate.cmp(&b.predicate))
        });
        entries
    }

    fn describe_node(
        &self,
        entries: &[Entry<'_>],
        node: &Node,
        walk: &mut Walk,
    ) -> Description {
        let mut clauses: Vec<Clause> = Vec::new();
        let mut current: Option<&str> = None;

        for entry in entries.iter().filter(|e| &e.triple.subject == node) {
            let object = self.object(entries, entry.triple, walk);
            match clauses.last_mut() {
                Some(clause) if current == Some(entry.triple.predicate.as_str()) => {
                    clause.objects.push(object);
                }
                _ => {
                    current = Some(entry.triple.predicate.as_str());
                    clauses.push(Clause {
                        predicate: entry.predicate.clone(),
                        objects: vec![object],
                    });
                }
            }
        }

        Description { clauses }
    }

    fn object(&self, entries: &[Entry<'_>], triple: &Triple, walk: &mut Walk) -> Object {
        match &triple.object {
            Node::Named(iri) => match self.linkifier.link(iri) {
                Some(href) => Object::Link {
                    href,
                    iri: iri.clone(),
                },
                None if triple.predicate == RDF_TYPE => self
                    .prefixes
                    .prefixed_name(iri)
                    .map(Object::Name)
                    .unwrap_or_else(|| Object::Iri(iri.clone())),
                None => Object::Iri(iri.clone()),
            },
            Node::Blank(id) => {
                if walk.expanding.iter().any(|open| open == id) {
                    return Object::Cycle(id.clone());
                }
                if !walk.expanded.insert(id.clone()) {
                    return Object::Ref(id.clone());
                }
                walk.expanding.push(id.clone());
                let nested = self.describe_node(entries, &triple.object, walk);
                walk.expanding.pop();
                Object::Blank(nested)
            }
            Node::Literal(lit) => Object::Literal(lit.quoted()),
        }
    }
}

impl Description {
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Lay out the clauses, one nesting level deep, without a trailing
    /// terminator. Callers append ` .` themselves.
    pub fn write(&self, out: &mut String, markup: Markup) {
        self.write_block(out, markup, 1);
    }

    fn write_block(&self, out: &mut String, markup: Markup, depth: usize) {
        let indent = " ".repeat(depth * INDENT);
        let column = self
            .clauses
            .iter()
            .map(|c| c.predicate.chars().count())
            .max()
            .unwrap_or(0)
            + GAP;

        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                out.push_str(" ;\n");
            }
            out.push_str(&indent);
            out.push_str(&escape(&clause.predicate, markup));
            let pad = column - clause.predicate.chars().count();
            out.push_str(&" ".repeat(pad));

            for (j, object) in clause.objects.iter().enumerate() {
                if j > 0 {
                    out.push_str(",\n");
                    out.push_str(&indent);
                    out.push_str(&" ".repeat(column));
                }
                object.write(out, markup, depth);
            }
        }
    }
}

impl Object {
    fn write(&self, out: &mut String, markup: Markup, depth: usize) {
        match self {
            Object::Link { href, iri } => match markup {
                Markup::Html => {
                    out.push_str(&format!(
                        "<a href=\"/{}\">&lt;{}&gt;</a>",
                        escape(href, markup),
                        escape(iri, markup)
                    ));
                }
                Markup::Plain => out.push_str(&format!("<{iri}>")),
            },
            Object::Iri(iri) => out.push_str(&escape(&format!("<{iri}>"), markup)),
            Object::Name(name) | Object::Literal(name) => out.push_str(&escape(name, markup)),
            Object::Cycle(id) | Object::Ref(id) => out.push_str(&escape(&format!("_:{id}"), markup)),
            Object::Blank(nested) if nested.is_empty() => out.push_str("[ ]"),
            Object::Blank(nested) => {
                out.push_str("[\n");
                nested.write_block(out, markup, depth + 1);
                out.push('\n');
                out.push_str(&" ".repeat(depth * INDENT));
                out.push(']');
            }
        }
    }
}

/// Plain-text layout.
impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write(&mut out, Markup::Plain);
        f.write_str(&out)
    }
}

fn escape(text: &str, markup: Markup) -> Cow<'_, str> {
    match markup {
        Markup::Plain => Cow::Borrowed(text),
        Markup::Html => escape_html(text),
    }
}

/// Escape `&`, `<`, `>`, `"` and `'` for inclusion in HTML text or attributes.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Literal;

    const BASE: &str = "http://data.deichman.no";
    const DEICH: &str = "http://data.deichman.no/ontology#";

    fn deich(local: &str) -> String {
        format!("{DEICH}{local}")
    }

    fn render(triples: &[Triple], root: &Node) -> Description {
        let prefixes = PrefixMap::default();
        let linkifier = Linkifier::new(BASE);
        Renderer::new(&prefixes, &linkifier).describe(triples, root)
    }

    fn predicates(desc: &Description) -> Vec<&str> {
        desc.clauses.iter().map(|c| c.predicate.as_str()).collect()
    }

    fn root() -> Node {
        Node::named(format!("{BASE}/person/p1"))
    }

    #[test]
    fn type_sorts_before_name() {
        let r = root();
        let triples = vec![
            Triple::new(r.clone(), deich("name"), Node::literal("Alice")),
            Triple::new(r.clone(), RDF_TYPE, Node::named(deich("Person"))),
        ];
        let desc = render(&triples, &r);
        assert_eq!(predicates(&desc), vec!["a", "deich:name"]);
        assert_eq!(
            desc.to_string(),
            "    a             deich:Person ;\n    deich:name    \"Alice\""
        );
    }

    #[test]
    fn clauses_follow_compacted_predicate_order() {
        let r = root();
        let triples = vec![
            Triple::new(r.clone(), "http://purl.org/dc/terms/title", Node::literal("t")),
            Triple::new(r.clone(), "http://data.deichman.no/raw#zz", Node::literal("z")),
            Triple::new(r.clone(), deich("birthYear"), Node::literal("1900")),
            Triple::new(r.clone(), "http://migration.deichman.no/id", Node::literal("m")),
            Triple::new(r.clone(), deich("birthYear"), Node::literal("1901")),
        ];
        let desc = render(&triples, &r);
        assert_eq!(
            predicates(&desc),
            vec![
                "<http://purl.org/dc/terms/title>",
                "deich:birthYear",
                "migration:id",
                "raw:zz"
            ]
        );
    }

    #[test]
    fn object_lists_keep_input_order_without_dedup() {
        let r = root();
        let triples = vec![
            Triple::new(r.clone(), deich("alias"), Node::literal("b")),
            Triple::new(r.clone(), deich("name"), Node::literal("n")),
            Triple::new(r.clone(), deich("alias"), Node::literal("a")),
            Triple::new(r.clone(), deich("alias"), Node::literal("b")),
        ];
        let desc = render(&triples, &r);
        assert_eq!(desc.clauses[0].predicate, "deich:alias");
        assert_eq!(
            desc.clauses[0].objects,
            vec![
                Object::Literal("\"b\"".into()),
                Object::Literal("\"a\"".into()),
                Object::Literal("\"b\"".into()),
            ]
        );
        assert_eq!(
            desc.to_string(),
            "    deich:alias    \"b\",\n                   \"a\",\n                   \"b\" ;\n    deich:name     \"n\""
        );
    }

    #[test]
    fn other_subjects_are_not_described_at_top_level() {
        let r = root();
        let other = Node::named(format!("{BASE}/person/p2"));
        let triples = vec![
            Triple::new(other.clone(), deich("name"), Node::literal("Bob")),
            Triple::new(r.clone(), deich("name"), Node::literal("Alice")),
        ];
        let desc = render(&triples, &r);
        assert_eq!(desc.clauses.len(), 1);
        assert_eq!(desc.clauses[0].objects, vec![Object::Literal("\"Alice\"".into())]);
    }

    #[test]
    fn links_browsable_resources_only() {
        let r = root();
        let triples = vec![
            Triple::new(r.clone(), deich("knows"), Node::named(format!("{BASE}/person/p2"))),
            Triple::new(r.clone(), deich("seeAlso"), Node::named("http://example.org/x")),
        ];
        let desc = render(&triples, &r);
        assert_eq!(
            desc.clauses[0].objects[0],
            Object::Link {
                href: "person/p2".into(),
                iri: format!("{BASE}/person/p2"),
            }
        );
        assert_eq!(
            desc.clauses[1].objects[0],
            Object::Iri("http://example.org/x".into())
        );

        let mut html = String::new();
        desc.write(&mut html, Markup::Html);
        assert!(html.contains(
            "<a href=\"/person/p2\">&lt;http://data.deichman.no/person/p2&gt;</a>"
        ));
        assert!(html.contains("&lt;http://example.org/x&gt;"));
        assert_eq!(html.matches("<a ").count(), 1);
    }

    #[test]
    fn only_type_objects_are_prefixed() {
        let r = root();
        let triples = vec![
            Triple::new(r.clone(), RDF_TYPE, Node::named(deich("Person"))),
            Triple::new(r.clone(), deich("role"), Node::named(deich("author"))),
        ];
        let desc = render(&triples, &r);
        assert_eq!(desc.clauses[0].objects[0], Object::Name("deich:Person".into()));
        assert_eq!(desc.clauses[1].objects[0], Object::Iri(deich("author")));
    }

    #[test]
    fn blank_nodes_expand_one_level_deeper() {
        let r = root();
        let b = Node::blank("b0");
        let triples = vec![
            Triple::new(b.clone(), deich("role"), Node::literal("author")),
            Triple::new(r.clone(), deich("contributor"), b.clone()),
            Triple::new(b.clone(), deich("agent"), Node::named("http://example.org/x")),
        ];
        let desc = render(&triples, &r);
        let Object::Blank(nested) = &desc.clauses[0].objects[0] else {
            panic!("expected a blank-node block");
        };
        assert_eq!(predicates(nested), vec!["deich:agent", "deich:role"]);
        assert_eq!(
            desc.to_string(),
            "    deich:contributor    [\n        deich:agent    <http://example.org/x> ;\n        deich:role     \"author\"\n    ]"
        );
    }

    #[test]
    fn dangling_blank_node_renders_empty_block() {
        let r = root();
        let triples = vec![Triple::new(r.clone(), deich("x"), Node::blank("nowhere"))];
        let desc = render(&triples, &r);
        assert_eq!(desc.clauses[0].objects[0], Object::Blank(Description::default()));
        assert_eq!(desc.to_string(), "    deich:x    [ ]");
    }

    #[test]
    fn blank_node_cycles_terminate() {
        let r = root();
        let b1 = Node::blank("b1");
        let b2 = Node::blank("b2");
        let triples = vec![
            Triple::new(r.clone(), deich("x"), b1.clone()),
            Triple::new(b1.clone(), deich("next"), b2.clone()),
            Triple::new(b2.clone(), deich("next"), b1.clone()),
        ];
        let desc = render(&triples, &r);
        let Object::Blank(first) = &desc.clauses[0].objects[0] else {
            panic!("expected b1 block");
        };
        let Object::Blank(second) = &first.clauses[0].objects[0] else {
            panic!("expected b2 block");
        };
        assert_eq!(second.clauses[0].objects[0], Object::Cycle("b1".into()));
        assert!(desc.to_string().contains("_:b1"));
    }

    #[test]
    fn self_referencing_blank_root() {
        let b = Node::blank("b");
        let triples = vec![Triple::new(b.clone(), deich("self"), b.clone())];
        let desc = render(&triples, &b);
        assert_eq!(desc.clauses[0].objects[0], Object::Cycle("b".into()));
    }

    #[test]
    fn shared_blank_node_expands_once() {
        let r = root();
        let b = Node::blank("shared");
        let triples = vec![
            Triple::new(r.clone(), deich("a"), b.clone()),
            Triple::new(r.clone(), deich("b"), b.clone()),
            Triple::new(b.clone(), deich("v"), Node::literal("1")),
        ];
        let desc = render(&triples, &r);
        assert!(matches!(&desc.clauses[0].objects[0], Object::Blank(d) if d.clauses.len() == 1));
        assert_eq!(desc.clauses[1].objects[0], Object::Ref("shared".into()));
        assert!(desc.to_string().ends_with("    deich:b    _:shared"));
    }

    #[test]
    fn doubly_linked_chain_renders_in_linear_size() {
        // b0 -l-> b1, b0 -r-> b1, b1 -l-> b2, ... Re-expanding shared nodes
        // would double the output at every level.
        const DEPTH: usize = 30;
        let r = root();
        let mut triples = vec![Triple::new(r.clone(), deich("x"), Node::blank("b0"))];
        for i in 0..DEPTH {
            let here = Node::blank(format!("b{i}"));
            let next = Node::blank(format!("b{}", i + 1));
            triples.push(Triple::new(here.clone(), deich("l"), next.clone()));
            triples.push(Triple::new(here, deich("r"), next));
        }

        let text = render(&triples, &r).to_string();
        assert_eq!(text.matches('[').count(), DEPTH + 1);
        assert_eq!(text.matches("_:b").count(), DEPTH);
        // Indentation grows with depth, so the bound is quadratic in DEPTH
        // rather than exponential.
        assert!(text.len() < 200 * DEPTH * DEPTH, "{} bytes", text.len());
    }

    #[test]
    fn literals_are_quoted_and_html_escaped() {
        let r = root();
        let triples = vec![Triple::new(
            r.clone(),
            deich("title"),
            Node::Literal(Literal::lang("<b>\"Sult\"</b> & more", "no")),
        )];
        let desc = render(&triples, &r);
        assert_eq!(
            desc.clauses[0].objects[0],
            Object::Literal("\"<b>\\\"Sult\\\"</b> & more\"".into())
        );
        let mut html = String::new();
        desc.write(&mut html, Markup::Html);
        assert!(html.contains("&quot;&lt;b&gt;\\&quot;Sult\\&quot;&lt;/b&gt; &amp; more&quot;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn empty_root_gives_empty_description() {
        let desc = render(&[], &root());
        assert!(desc.is_empty());
        assert_eq!(desc.to_string(), "");
    }

    #[test]
    fn escape_html_borrows_clean_text() {
        assert!(matches!(escape_html("plain"), Cow::Borrowed(_)));
        assert_eq!(escape_html("a<b>&'\""), "a&lt;b&gt;&amp;&#39;&quot;");
    }
}
