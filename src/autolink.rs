//! Autolink detection (A5): URL, email, and (with the short-domain
//! extension) bare-domain recognition used by the inline scanner's `<`, `:`,
//! `@`, and `w` dispatch entries.
//!
//! Each detector works backwards and forwards from a trigger position
//! within a line and reports how many bytes of an already-copied scheme
//! prefix the caller should rewind out of its output buffer, plus the total
//! span of the match. There is no upstream C source for this piece (hoedown
//! ships it as a separate translation unit we don't have), so it is
//! designed from scratch against the call contract `markdown.c` assumes:
//! a recognizer that reports a rewind count and a consumed length.

pub struct AutolinkMatch {
    /// Bytes already written to the output that must be truncated away
    /// because they belong to the matched link (e.g. a bare `www.` prefix
    /// the scanner had already copied as plain text).
    pub rewind: usize,
    /// Total length of the match, starting `rewind` bytes before the
    /// trigger offset.
    pub len: usize,
}

fn is_valid_url_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~' | b':' | b'/' | b'?' | b'#' | b'[' | b']' | b'@' | b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'=' | b'%')
}

fn is_word_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Called with `data` positioned at the `:` of a candidate scheme (e.g.
/// `http:`). Scans backward for the scheme letters and forward for the rest
/// of the URL. Returns `None` if this isn't actually a recognizable scheme.
pub fn url_autolink(data: &[u8], pos: usize) -> Option<AutolinkMatch> {
    let mut start = pos;
    while start > 0 {
        let b = data[start - 1];
        if b.is_ascii_alphanumeric() || b == b'+' || b == b'-' || b == b'.' {
            start -= 1;
        } else {
            break;
        }
    }
    if start == pos {
        return None;
    }
    let scheme = &data[start..pos];
    if !scheme[0].is_ascii_alphabetic() {
        return None;
    }

    // require "://" to avoid matching things like ratios "3:4"
    if data.len() < pos + 3 || data[pos] != b':' {
        return None;
    }
    if data[pos + 1..].starts_with(b"//") {
        let mut end = pos + 3;
        while end < data.len() && is_valid_url_char(data[end]) && data[end] != b'<' {
            end += 1;
        }
        while end > pos + 3 && matches!(data[end - 1], b'.' | b',' | b';' | b'!' | b'?' | b'\'' | b'"') {
            end -= 1;
        }
        if end <= pos + 3 {
            return None;
        }
        Some(AutolinkMatch {
            rewind: pos - start,
            len: end - start,
        })
    } else {
        None
    }
}

/// Called at an `@` within a run of word/dot characters. Scans outward for
/// a `local@domain.tld`-shaped span.
pub fn email_autolink(data: &[u8], pos: usize) -> Option<AutolinkMatch> {
    let mut start = pos;
    while start > 0 {
        let b = data[start - 1];
        if is_word_char(b) || matches!(b, b'.' | b'-' | b'+' | b'_') {
            start -= 1;
        } else {
            break;
        }
    }
    if start == pos {
        return None;
    }

    let mut end = pos + 1;
    while end < data.len() && (is_word_char(data[end]) || matches!(data[end], b'.' | b'-')) {
        end += 1;
    }
    let domain = &data[pos + 1..end];
    if !domain.contains(&b'.') {
        return None;
    }
    while end > pos + 1 && data[end - 1] == b'.' {
        end -= 1;
    }
    if end <= pos + 1 {
        return None;
    }

    Some(AutolinkMatch {
        rewind: pos - start,
        len: end - start,
    })
}

/// Called at a `www.`-prefixed run (short-domain-autolinks extension).
pub fn www_autolink(data: &[u8], pos: usize) -> Option<AutolinkMatch> {
    if !data[pos..].starts_with(b"www.") {
        return None;
    }
    let mut end = pos + 4;
    while end < data.len() && is_valid_url_char(data[end]) && data[end] != b'<' {
        end += 1;
    }
    while end > pos + 4 && matches!(data[end - 1], b'.' | b',' | b';' | b'!' | b'?') {
        end -= 1;
    }
    if end <= pos + 4 {
        return None;
    }
    Some(AutolinkMatch { rewind: 0, len: end - pos })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_http_url() {
        let data = b"see http://example.com/page now";
        let colon = data.iter().position(|&b| b == b':').unwrap();
        let m = url_autolink(data, colon).unwrap();
        let start = colon - m.rewind;
        assert_eq!(&data[start..start + m.len], b"http://example.com/page".as_slice());
    }

    #[test]
    fn strips_trailing_punctuation_from_url() {
        let data = b"(http://example.com).";
        let colon = data.iter().position(|&b| b == b':').unwrap();
        let m = url_autolink(data, colon).unwrap();
        let start = colon - m.rewind;
        assert_eq!(&data[start..start + m.len], b"http://example.com".as_slice());
    }

    #[test]
    fn recognizes_email() {
        let data = b"mail me at foo.bar@example.com please";
        let at = data.iter().position(|&b| b == b'@').unwrap();
        let m = email_autolink(data, at).unwrap();
        let start = at - m.rewind;
        assert_eq!(&data[start..start + m.len], b"foo.bar@example.com".as_slice());
    }

    #[test]
    fn rejects_bare_ratio() {
        let data = b"a 3:4 ratio";
        let colon = data.iter().position(|&b| b == b':').unwrap();
        assert!(url_autolink(data, colon).is_none());
    }
}
