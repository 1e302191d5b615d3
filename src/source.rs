//! Inline-content versus file-path classification for caller-supplied strings.

use std::path::Path;

/// Strings longer than this are always treated as inline content.
const INLINE_LENGTH_THRESHOLD: usize = 500;

/// A caller-supplied XML source: inline markup or a path to a file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlSource<'a> {
    Inline(&'a str),
    File(&'a Path),
}

impl<'a> XmlSource<'a> {
    /// Classifies a candidate string. Anything longer than 500 bytes is
    /// inline content; shorter strings are inline only if they contain `<`,
    /// otherwise they name a file.
    pub fn classify(s: &'a str) -> Self {
        if s.len() > INLINE_LENGTH_THRESHOLD || s.contains('<') {
            XmlSource::Inline(s)
        } else {
            XmlSource::File(Path::new(s))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_markup_is_inline() {
        assert_eq!(XmlSource::classify("<a/>"), XmlSource::Inline("<a/>"));
    }

    #[test]
    fn long_string_is_inline_even_without_markup() {
        let s = "x".repeat(600);
        assert!(matches!(XmlSource::classify(&s), XmlSource::Inline(_)));
    }

    #[test]
    fn short_plain_string_is_a_path() {
        assert_eq!(
            XmlSource::classify("doc.xml"),
            XmlSource::File(Path::new("doc.xml"))
        );
    }

    #[test]
    fn threshold_boundary() {
        let at_limit = "y".repeat(500);
        assert!(matches!(XmlSource::classify(&at_limit), XmlSource::File(_)));
        let over_limit = "y".repeat(501);
        assert!(matches!(
            XmlSource::classify(&over_limit),
            XmlSource::Inline(_)
        ));
    }
}
