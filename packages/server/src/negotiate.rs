//! Content negotiation over the `Accept` header.
//!
//! Four representations are offered, in preference order: `text/plain`
//! (N-Triples), `text/turtle`, `application/rdf+xml`, and `text/html`. The
//! first three are the store's own bytes; HTML is rendered locally from an
//! N-Triples fetch.

use vindu::RdfFormat;

/// A representation this server can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    PlainText,
    Turtle,
    RdfXml,
    Html,
}

/// What a request should do with the store's response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Return the store's bytes in this serialization unmodified.
    PassThrough(RdfFormat),
    /// Decode N-Triples and render the HTML page.
    Render,
}

impl Format {
    /// Offered formats, most preferred first.
    pub const OFFERED: [Format; 4] = [
        Format::PlainText,
        Format::Turtle,
        Format::RdfXml,
        Format::Html,
    ];

    pub fn media_type(self) -> &'static str {
        match self {
            Format::PlainText => "text/plain",
            Format::Turtle => "text/turtle",
            Format::RdfXml => "application/rdf+xml",
            Format::Html => "text/html",
        }
    }

    /// The serialization requested from the store for this format.
    pub fn upstream(self) -> RdfFormat {
        match self {
            Format::PlainText | Format::Html => RdfFormat::NTriples,
            Format::Turtle => RdfFormat::Turtle,
            Format::RdfXml => RdfFormat::RdfXml,
        }
    }

    pub fn disposition(self) -> Disposition {
        match self {
            Format::Html => Disposition::Render,
            other => Disposition::PassThrough(other.upstream()),
        }
    }
}

// One media range from an Accept header.
struct MediaRange<'a> {
    kind: &'a str,
    subtype: &'a str,
    q: f32,
}

impl MediaRange<'_> {
    // 2 = exact, 1 = `type/*`, 0 = `*/*`; `None` if the range does not match.
    fn specificity(&self, media_type: &str) -> Option<u8> {
        let (kind, subtype) = media_type.split_once('/')?;
        match (self.kind, self.subtype) {
            ("*", "*") => Some(0),
            (k, "*") if k.eq_ignore_ascii_case(kind) => Some(1),
            (k, s) if k.eq_ignore_ascii_case(kind) && s.eq_ignore_ascii_case(subtype) => Some(2),
            _ => None,
        }
    }
}

fn parse_accept(header: &str) -> Vec<MediaRange<'_>> {
    header
        .split(',')
        .filter_map(|item| {
            let mut parts = item.split(';').map(str::trim);
            let (kind, subtype) = parts.next()?.split_once('/')?;
            let mut q = 1.0;
            for param in parts {
                if let Some((name, value)) = param.split_once('=') {
                    if name.trim().eq_ignore_ascii_case("q") {
                        q = value.trim().parse::<f32>().unwrap_or(0.0).clamp(0.0, 1.0);
                    }
                }
            }
            Some(MediaRange {
                kind: kind.trim(),
                subtype: subtype.trim(),
                q,
            })
        })
        .collect()
}

/// Pick the best offered format for an `Accept` header value.
///
/// Each offer takes the quality of its most specific matching range; `q=0`
/// excludes it. The highest quality wins, then the more specific match, then
/// the earlier offer. A missing header, or one nothing matches, yields
/// [`Format::PlainText`].
pub fn negotiate(accept: Option<&str>) -> Format {
    let Some(header) = accept.filter(|h| !h.trim().is_empty()) else {
        return Format::PlainText;
    };
    let ranges = parse_accept(header);

    let mut best: Option<(Format, f32, u8)> = None;
    for offer in Format::OFFERED {
        let matched = ranges
            .iter()
            .filter_map(|r| r.specificity(offer.media_type()).map(|s| (s, r.q)))
            .max_by_key(|(s, _)| *s);
        let Some((specificity, q)) = matched else {
            continue;
        };
        if q <= 0.0 {
            continue;
        }
        let better = match best {
            None => true,
            Some((_, best_q, best_s)) => q > best_q || (q == best_q && specificity > best_s),
        };
        if better {
            best = Some((offer, q, specificity));
        }
    }

    best.map(|(format, _, _)| format).unwrap_or(Format::PlainText)
}
