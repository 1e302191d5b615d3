//! Post-processing of serialized XML text driven by a friendly option string.

use once_cell::sync::Lazy;
use regex::Regex;

/// A leading DOCTYPE declaration, optionally preceded by an XML declaration.
/// Group 1 keeps the declaration so only the DOCTYPE is dropped.
static DOCTYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^(\s*(?:<\?xml[^>]+>\s*)?)<!DOCTYPE\s[^>]+>").unwrap());

/// Optional leading XML declaration plus the opening root tag.
static ROOT_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(\s*(?:<\?xml[^>]+>\s*)?)<([A-Za-z][A-Za-z0-9._:-]*)[^>]*>").unwrap()
});

/// Recognized serialization flags. Parsed case-insensitively from an option
/// string; flags may be combined, separated by whitespace, commas, or
/// semicolons. Unrecognized flags are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveOptions {
    /// Serialize starting at the root element, omitting the XML declaration
    /// and anything preceding it. Applied at serialization time, not during
    /// text post-processing.
    pub cut_xml_head: bool,
    /// Strip a leading DOCTYPE declaration, preserving an XML declaration
    /// before it.
    pub omit_doctype: bool,
    /// Strip the outermost root start/end tag pair, keeping its content and
    /// trailing whitespace.
    pub trim_root: bool,
}

impl SaveOptions {
    /// Parses an option string such as `"cutXmlHead, trimRoot"`.
    pub fn parse(options: &str) -> Self {
        let mut parsed = SaveOptions::default();
        for flag in options.split(|c: char| c.is_whitespace() || c == ',' || c == ';') {
            match flag.to_ascii_lowercase().as_str() {
                "cutxmlhead" => parsed.cut_xml_head = true,
                "omitdoctype" => parsed.omit_doctype = true,
                "trimroot" => parsed.trim_root = true,
                _ => {}
            }
        }
        parsed
    }

    /// Applies the text-level options to already-serialized XML.
    /// `cut_xml_head` has no effect here; it changes what gets serialized,
    /// not how the text is rewritten afterwards.
    pub fn apply(&self, xml: String) -> String {
        let mut xml = xml;
        if self.omit_doctype {
            xml = DOCTYPE.replace(&xml, "$1").into_owned();
        }
        if self.trim_root {
            if let Some(trimmed) = trim_root(&xml) {
                xml = trimmed;
            }
        }
        xml
    }
}

/// Strips the outermost root tag pair, keeping a leading declaration, the
/// inner content, and trailing whitespace. Best-effort text heuristic: the
/// opening and closing tag names must match, the content must be non-empty,
/// and nothing but whitespace may follow the close tag. With nested
/// same-named tags the outermost pair only is stripped. A close tag inside
/// CDATA or a comment can fool the scan; callers get the input back
/// unchanged whenever the shape does not match.
fn trim_root(xml: &str) -> Option<String> {
    let caps = ROOT_OPEN.captures(xml)?;
    let head = caps.get(1).map_or("", |m| m.as_str());
    let name = caps.get(2)?.as_str();
    let content_start = caps.get(0)?.end();

    let close = format!("</{}>", name);
    let rest = &xml[content_start..];
    let idx = rest.rfind(&close)?;
    let (content, tail) = rest.split_at(idx);
    let tail = &tail[close.len()..];

    if content.is_empty() || !tail.chars().all(char::is_whitespace) {
        return None;
    }
    Some(format!("{}{}{}", head, content, tail))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_separators_case_insensitively() {
        let opts = SaveOptions::parse("cutXmlHead, TRIMROOT;omitdoctype");
        assert!(opts.cut_xml_head);
        assert!(opts.trim_root);
        assert!(opts.omit_doctype);
    }

    #[test]
    fn unrecognized_flags_are_ignored() {
        assert_eq!(SaveOptions::parse("frobnicate pretty"), SaveOptions::default());
        assert_eq!(SaveOptions::parse(""), SaveOptions::default());
    }

    #[test]
    fn no_options_is_identity() {
        let xml = String::from("<?xml version=\"1.0\"?>\n<r><x/></r>\n");
        assert_eq!(SaveOptions::default().apply(xml.clone()), xml);
    }

    #[test]
    fn omit_doctype_preserves_declaration() {
        let opts = SaveOptions::parse("omitdoctype");
        let xml = String::from(
            "<?xml version=\"1.0\"?>\n<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0//EN\">\n<html/>",
        );
        let out = opts.apply(xml);
        assert!(out.starts_with("<?xml version=\"1.0\"?>\n"));
        assert!(!out.contains("DOCTYPE"));
    }

    #[test]
    fn omit_doctype_is_idempotent() {
        let opts = SaveOptions::parse("omitdoctype");
        let xml = String::from("<!DOCTYPE note SYSTEM \"note.dtd\"><note/>");
        let once = opts.apply(xml);
        let twice = opts.apply(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once, "<note/>");
    }

    #[test]
    fn trim_root_round_trip() {
        let opts = SaveOptions::parse("trimroot");
        assert_eq!(opts.apply(String::from("<r>CONTENT</r>")), "CONTENT");
    }

    #[test]
    fn trim_root_strips_outermost_pair_only() {
        let opts = SaveOptions::parse("trimroot");
        let xml = String::from("<?xml version=\"1.0\"?>\n<div>a<div>b</div>c</div>\n");
        assert_eq!(
            opts.apply(xml),
            "<?xml version=\"1.0\"?>\na<div>b</div>c\n"
        );
    }

    #[test]
    fn trim_root_leaves_non_matching_input_unchanged() {
        let opts = SaveOptions::parse("trimroot");
        // Mismatched close tag name.
        let xml = String::from("<r>CONTENT</other>");
        assert_eq!(opts.apply(xml.clone()), xml);
        // Trailing non-whitespace after the close tag.
        let xml = String::from("<r>CONTENT</r>extra");
        assert_eq!(opts.apply(xml.clone()), xml);
        // Self-closing root has no content to keep.
        let xml = String::from("<r/>");
        assert_eq!(opts.apply(xml.clone()), xml);
    }
}
