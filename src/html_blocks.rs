//! Static dictionary of HTML block-level tag names (A6), used by the raw
//! HTML block recognizer in C5 to decide whether a line starting with `<`
//! opens an HTML block (as opposed to an inline HTML span).

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "base", "blockquote", "body", "caption",
    "center", "col", "colgroup", "dd", "details", "dialog", "dir", "div",
    "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form",
    "frame", "frameset", "h1", "h2", "h3", "h4", "h5", "h6", "head",
    "header", "hr", "html", "iframe", "legend", "li", "link", "main",
    "menu", "menuitem", "nav", "noframes", "ol", "optgroup", "option", "p",
    "param", "section", "source", "summary", "table", "tbody", "td",
    "tfoot", "th", "thead", "title", "tr", "track", "ul", "script",
    "style", "pre",
];

/// True if `name` (without angle brackets or a leading `/`) is a recognized
/// HTML block tag. Comparison is case-insensitive.
pub fn is_block_tag(name: &[u8]) -> bool {
    BLOCK_TAGS
        .iter()
        .any(|tag| tag.as_bytes().eq_ignore_ascii_case(name))
}

/// Extracts the tag name starting at `data[0] == b'<'`, skipping an
/// optional `/`. Returns the name slice and whether it was a closing tag.
pub fn tag_name(data: &[u8]) -> Option<(&[u8], bool)> {
    if data.first() != Some(&b'<') {
        return None;
    }
    let mut i = 1;
    let closing = data.get(i) == Some(&b'/');
    if closing {
        i += 1;
    }
    let start = i;
    while i < data.len() && (data[i].is_ascii_alphanumeric() || data[i] == b'-') {
        i += 1;
    }
    if i == start {
        return None;
    }
    Some((&data[start..i], closing))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_known_tags_case_insensitively() {
        assert!(is_block_tag(b"div"));
        assert!(is_block_tag(b"DIV"));
        assert!(!is_block_tag(b"span"));
    }

    #[test]
    fn extracts_closing_tag_name() {
        let (name, closing) = tag_name(b"</blockquote>").unwrap();
        assert_eq!(name, b"blockquote");
        assert!(closing);
    }

    #[test]
    fn extracts_opening_tag_name() {
        let (name, closing) = tag_name(b"<div class=\"x\">").unwrap();
        assert_eq!(name, b"div");
        assert!(!closing);
    }
}
