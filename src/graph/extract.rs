//! Link extraction from raw document text
//!
//! Recognizes anchors of the form `<a HREF="target">` (the attribute keyword
//! is case-sensitive) and yields the quoted target verbatim, in document
//! order. Nothing is validated here: a malformed target is passed through and
//! rejected by the normalizer.

use regex::{CaptureMatches, Regex};
use std::sync::OnceLock;

const ANCHOR_PATTERN: &str = r#"<a\s+HREF="([^"]*)">"#;

fn anchor_regex() -> &'static Regex {
    static ANCHOR: OnceLock<Regex> = OnceLock::new();
    ANCHOR.get_or_init(|| Regex::new(ANCHOR_PATTERN).expect("anchor pattern is a valid regex"))
}

/// Lazy iterator over the raw link targets of one document.
///
/// Call [`extract_links`] again to restart from the beginning.
pub struct Links<'t> {
    inner: CaptureMatches<'static, 't>,
}

impl<'t> Iterator for Links<'t> {
    type Item = &'t str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Raw link targets of `text`, in the order they appear
pub fn extract_links(text: &str) -> Links<'_> {
    Links {
        inner: anchor_regex().captures_iter(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_in_document_order() {
        let html = "<p>\n<a HREF=\"12.html\"> This is a link </a>\n<p>\n<a HREF=\"3.html\">x</a>";
        let links: Vec<&str> = extract_links(html).collect();
        assert_eq!(links, vec!["12.html", "3.html"]);
    }

    #[test]
    fn test_keeps_duplicates_and_malformed_targets() {
        let html = r#"<a HREF="1.html"><a HREF="1.html"><a HREF="oops.html"><a HREF="">"#;
        let links: Vec<&str> = extract_links(html).collect();
        assert_eq!(links, vec!["1.html", "1.html", "oops.html", ""]);
    }

    #[test]
    fn test_attribute_keyword_is_case_sensitive() {
        let html = r#"<a href="1.html"> <a Href="2.html"> <a HREF="3.html">"#;
        let links: Vec<&str> = extract_links(html).collect();
        assert_eq!(links, vec!["3.html"]);
    }

    #[test]
    fn test_restartable() {
        let html = r#"<a HREF="4.html"> text <a  HREF="5.html">"#;
        let first: Vec<&str> = extract_links(html).collect();
        let second: Vec<&str> = extract_links(html).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_no_links() {
        assert_eq!(extract_links("<html><body>plain</body></html>").count(), 0);
    }
}
