//! HTML entity un-escaping for locator text.
//!
//! Sources sometimes hand over locators already HTML-escaped
//! (`?a=1&amp;b=2`). Each `&...;` reference is decoded on its own with
//! quick-xml's XML unescaper (`&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`
//! and numeric references). A reference it does not know, or a bare `&`,
//! is left as written.

use quick_xml::escape::unescape;

/// Decode HTML entities in `input`.
pub fn unescape_html(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .and_then(|semi| unescape(&tail[..=semi]).ok().map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push_str(&c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_untouched() {
        assert_eq!(
            unescape_html("https://example.com/a?b=1"),
            "https://example.com/a?b=1"
        );
    }

    #[test]
    fn named_entities() {
        assert_eq!(
            unescape_html("https://example.com/q?a=1&amp;b=2"),
            "https://example.com/q?a=1&b=2"
        );
        assert_eq!(unescape_html("&lt;&gt;&quot;&apos;"), "<>\"'");
    }

    #[test]
    fn numeric_entities() {
        assert_eq!(unescape_html("a&#39;b"), "a'b");
        assert_eq!(unescape_html("a&#x2F;b"), "a/b");
    }

    #[test]
    fn unknown_or_unterminated_left_alone() {
        assert_eq!(unescape_html("a&nbsp;b"), "a&nbsp;b");
        assert_eq!(unescape_html("a&b=c"), "a&b=c");
        assert_eq!(unescape_html("tail&"), "tail&");
    }

    #[test]
    fn escaped_and_bare_ampersands_mixed() {
        assert_eq!(
            unescape_html("https://example.com/q?a=1&amp;b=2&c=3"),
            "https://example.com/q?a=1&b=2&c=3"
        );
        assert_eq!(unescape_html("x&nbsp;&amp;y"), "x&nbsp;&y");
    }
}
