//! `vindu` — render linked-data descriptions on the command line.
//!
//! Two subcommands:
//!
//! - **`render`** — decode a local RDF file and print the description of one
//!   resource as a Turtle-like tree.
//! - **`fetch`** — ask a SPARQL store for a resource's CBD and print it the
//!   same way (or raw).
//!
//! `render` reads from a file path or from stdin (`-`).

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use vindu::{decode, Description, Linkifier, Node, PrefixMap, RdfFormat, Renderer, Triple};
use vindu_server::describe_query;

/// vindu — linked-data description renderer
#[derive(Parser)]
#[command(name = "vindu", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the description of one resource from a local RDF file.
    ///
    /// The serialization is taken from --format, or guessed from the file
    /// extension (`.ttl`, `.rdf`/`.xml`, anything else is N-Triples).
    ///
    /// Pass `-` as FILE to read from stdin.
    Render {
        /// Path to an RDF file, or `-` for stdin.
        file: PathBuf,

        /// IRI of the resource to describe.
        #[arg(short, long, value_name = "IRI")]
        root: String,

        /// Input serialization.
        #[arg(short, long, value_enum)]
        format: Option<InputFormat>,

        /// Base IRI used to decide which objects are browsable links.
        #[arg(long, env = "VINDU_BASE", default_value = "http://data.deichman.no")]
        base: String,

        /// Print the description tree as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Fetch a resource's description from a SPARQL store and render it.
    ///
    /// Examples:
    ///   vindu fetch person/h10834700
    ///   vindu fetch work/w1 --sparql http://localhost:8890/sparql/ --raw
    Fetch {
        /// Resource path below the base, e.g. `person/h10834700`.
        path: String,

        /// SPARQL endpoint address.
        #[arg(long, env = "VINDU_SPARQL", default_value = "http://virtuoso:8890/sparql/")]
        sparql: String,

        /// Named graph to query.
        #[arg(long, env = "VINDU_GRAPH", default_value = "lsext")]
        graph: String,

        /// Base IRI the path is appended to.
        #[arg(long, env = "VINDU_BASE", default_value = "http://data.deichman.no")]
        base: String,

        /// Print the store's N-Triples unmodified.
        #[arg(long, conflicts_with = "json")]
        raw: bool,

        /// Print the description tree as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum InputFormat {
    Nt,
    Ttl,
    Rdfxml,
}

impl From<InputFormat> for RdfFormat {
    fn from(f: InputFormat) -> Self {
        match f {
            InputFormat::Nt => RdfFormat::NTriples,
            InputFormat::Ttl => RdfFormat::Turtle,
            InputFormat::Rdfxml => RdfFormat::RdfXml,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Render {
            file,
            root,
            format,
            base,
            json,
        } => {
            let format = format.map(RdfFormat::from).unwrap_or_else(|| guess_format(&file));
            let bytes = read_input(&file);
            let triples = decode(format, &bytes).unwrap_or_else(|e| fatal(&e.to_string()));
            let root = parse_root(&root);
            if !triples.iter().any(|t| t.subject == root) {
                fatal(&format!("no triples describe {root}"));
            }
            print_description(&describe(&triples, &root, &base), json);
        }

        Command::Fetch {
            path,
            sparql,
            graph,
            base,
            raw,
            json,
        } => {
            let subject = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
            let body = fetch(&sparql, &graph, &subject);
            if raw {
                print!("{}", String::from_utf8_lossy(&body));
                return;
            }
            let triples =
                decode(RdfFormat::NTriples, &body).unwrap_or_else(|e| fatal(&e.to_string()));
            if triples.is_empty() {
                fatal(&format!("not found: <{subject}>"));
            }
            print_description(&describe(&triples, &Node::named(&subject), &base), json);
        }
    }
}

fn describe(triples: &[Triple], root: &Node, base: &str) -> Description {
    let prefixes = PrefixMap::default();
    let linkifier = Linkifier::new(base);
    Renderer::new(&prefixes, &linkifier).describe(triples, root)
}

fn print_description(description: &Description, json: bool) {
    if json {
        let out = serde_json::to_string_pretty(description)
            .unwrap_or_else(|e| fatal(&format!("failed to serialise description: {e}")));
        println!("{out}");
    } else {
        println!("{description} .");
    }
}

/// `_:id` names a blank node; anything else is an IRI, with or without `<>`.
fn parse_root(raw: &str) -> Node {
    match raw.strip_prefix("_:") {
        Some(id) => Node::blank(id),
        None => Node::named(raw.trim_start_matches('<').trim_end_matches('>')),
    }
}

fn guess_format(path: &Path) -> RdfFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ttl") => RdfFormat::Turtle,
        Some("rdf") | Some("xml") | Some("owl") => RdfFormat::RdfXml,
        _ => RdfFormat::NTriples,
    }
}

/// POST the CBD DESCRIBE query and return the N-Triples body.
fn fetch(endpoint: &str, graph: &str, subject: &str) -> Vec<u8> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|e| fatal(&format!("failed to build HTTP client: {e}")));
    let query = describe_query(subject);
    let format = RdfFormat::NTriples.media_type();
    let response = client
        .post(endpoint)
        .query(&[
            ("query", query.as_str()),
            ("default-graph-uri", graph),
            ("format", format),
        ])
        .send()
        .unwrap_or_else(|e| fatal(&format!("request to {endpoint} failed: {e}")));
    if !response.status().is_success() {
        fatal(&format!("{endpoint} returned status {}", response.status()));
    }
    response
        .bytes()
        .map(|b| b.to_vec())
        .unwrap_or_else(|e| fatal(&format!("failed to read response: {e}")))
}

/// Read the full contents of a file, or stdin when the path is `"-"`.
fn read_input(path: &PathBuf) -> Vec<u8> {
    if path.to_str() == Some("-") {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .unwrap_or_else(|e| fatal(&format!("failed to read stdin: {}", e)));
        buf
    } else {
        fs::read(path).unwrap_or_else(|e| fatal(&format!("failed to read {}: {}", path.display(), e)))
    }
}

/// Print an error message to stderr and exit with code 2.
fn fatal(msg: &str) -> ! {
    eprintln!("vindu: {}", msg);
    process::exit(2);
}
