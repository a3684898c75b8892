//! The HTML document wrapped around a rendered description.

use vindu::{escape_html, Description, Markup, PrefixMap};

/// Build the full HTML page for one resource.
///
/// `base` is the service base IRI, `path` the resource path below it (no
/// leading slash). The body is a `<pre>` block: `@base`/`@prefix` lines
/// taken from `prefixes`, the path as a heading, then the rendered
/// description terminated by ` .`.
pub fn html_page(prefixes: &PrefixMap, base: &str, path: &str, description: &Description) -> String {
    let subject = format!("<{base}/{path}>");
    let mut out = String::with_capacity(4096);

    out.push_str("<html><head><title>");
    out.push_str(&escape_html(&subject));
    out.push_str("</title></head><body><pre>");

    let width = prefixes
        .declarations()
        .map(|(token, _)| token.chars().count())
        .max()
        .unwrap_or(0);
    let column = "@prefix ".len() + width;
    out.push_str(&format!(
        "{:<column$} &lt;{}/&gt; .\n",
        "@base",
        escape_html(base)
    ));
    for (token, namespace) in prefixes.declarations() {
        out.push_str(&format!(
            "@prefix {token:>width$} &lt;{}&gt; .\n",
            escape_html(namespace)
        ));
    }
    out.push('\n');

    out.push_str(&format!("<strong>&lt;{}&gt;</strong>\n", escape_html(path)));
    description.write(&mut out, Markup::Html);
    out.push_str(" .\n");
    out.push_str("</pre></body></html>");
    out
}
