//! Auto-framing of bare stylesheet fragments into complete stylesheets.

use once_cell::sync::Lazy;
use regex::Regex;

/// Namespace declared for host-callable extension hooks in framed
/// stylesheets.
pub const EXTENSION_NAMESPACE: &str = "urn:fluxdom:ext";

/// Closing-marker signature of an already complete stylesheet.
static STYLESHEET_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</xsl:stylesheet>\s*$").unwrap());

/// Parameters for the `xsl:output` directive generated while framing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSpec {
    pub method: String,
    pub encoding: String,
    pub indent: bool,
}

impl Default for OutputSpec {
    fn default() -> Self {
        OutputSpec {
            method: String::from("xml"),
            encoding: String::from("utf-8"),
            indent: true,
        }
    }
}

/// Wraps a bare sequence of templates in the minimal envelope required to
/// make it a complete stylesheet: XML declaration, stylesheet root with the
/// transform and host-extension namespaces, one output directive, the
/// fragment verbatim, closing root tag.
///
/// A fragment that already ends with a stylesheet closing marker is returned
/// unchanged. The check is a text scan, not a parse: marker text inside CDATA
/// or a comment counts as a marker.
pub fn ensure_framed(fragment: &str, output: &OutputSpec) -> String {
    if STYLESHEET_CLOSE.is_match(fragment) {
        return fragment.to_string();
    }
    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<xsl:stylesheet version=\"1.0\" xmlns:xsl=\"http://www.w3.org/1999/XSL/Transform\"\n",
            "\txmlns:ext=\"{}\" exclude-result-prefixes=\"ext\">\n",
            "<xsl:output method=\"{}\" encoding=\"{}\" indent=\"{}\"/>\n",
            "{}\n",
            "</xsl:stylesheet>\n",
        ),
        EXTENSION_NAMESPACE,
        output.method,
        output.encoding,
        if output.indent { "yes" } else { "no" },
        fragment
    )
}
