//! Escaping and entity decoding.

/// Elements that never have a closing tag.
pub(crate) const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Escape text content.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a double-quoted attribute value.
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Decode character references in raw HTML text.
///
/// Follows the HTML rules for text content: every named reference in the
/// HTML table, legacy references without a trailing `;`, and numeric
/// references, with invalid code points decoding to U+FFFD. Anything that is
/// not a reference is kept verbatim.
pub fn decode_entities(raw: &str) -> String {
    htmlize::unescape(raw).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_common_entities() {
        assert_eq!(decode_entities("a &lt; b &amp;&amp; c &gt; d"), "a < b && c > d");
        assert_eq!(decode_entities("&quot;hi&quot; &#39;x&#39;"), "\"hi\" 'x'");
        assert_eq!(decode_entities("&#x41;&#66;"), "AB");
    }

    #[test]
    fn decodes_the_full_named_table() {
        assert_eq!(decode_entities("it&rsquo;s 2&times;3 &euro;"), "it\u{2019}s 2\u{d7}3 \u{20ac}");
        assert_eq!(decode_entities("&laquo;x&raquo; &hellip;"), "\u{ab}x\u{bb} \u{2026}");
    }

    #[test]
    fn legacy_and_invalid_references() {
        assert_eq!(decode_entities("a &lt b &amp c"), "a < b & c");
        assert_eq!(decode_entities("&#0;"), "\u{fffd}");
        assert_eq!(decode_entities("&#xD800;"), "\u{fffd}");
    }

    #[test]
    fn keeps_unknown_references() {
        assert_eq!(decode_entities("&bogus; & &;"), "&bogus; & &;");
        assert_eq!(decode_entities("a && b"), "a && b");
        assert_eq!(decode_entities("trailing &"), "trailing &");
    }

    #[test]
    fn escape_round_trips_through_decode() {
        let source = "if a < b && c > \"d\" {}";
        assert_eq!(decode_entities(&escape_text(source)), source);
        assert_eq!(decode_entities(&escape_attribute(source)), source);
    }
}
