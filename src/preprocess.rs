//! Preprocessor (C3): BOM stripping, the reference/footnote pre-scan, tab
//! expansion, and line-ending normalization.
//!
//! This is the first of the parser's two passes. It walks the raw document
//! line by line, pulling out link-reference and footnote definitions into
//! side tables so the block/inline pass never has to special-case them, and
//! produces a normalized text buffer (LF-only, tab-free, BOM-free,
//! guaranteed to end in a newline) for that second pass to consume.

use crate::extensions::Extension;
use crate::buffer::Buffer;
use crate::refs::{FootnoteList, RefTable};

const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

pub struct Preprocessed {
    pub text: Buffer,
    pub refs: RefTable,
    pub footnotes: FootnoteList,
}

pub fn preprocess(input: &[u8], extensions: Extension) -> Preprocessed {
    let input = if input.starts_with(&BOM) {
        &input[BOM.len()..]
    } else {
        input
    };

    let lines = split_lines(input);
    let mut refs = RefTable::new();
    let mut footnotes = FootnoteList::new();
    let mut text = Buffer::new(input.len() + 1);

    let footnotes_on = extensions.contains(Extension::FOOTNOTES);

    let mut i = 0;
    while i < lines.len() {
        if footnotes_on {
            if let Some((next, id, body)) = try_footnote_def(&lines, i) {
                footnotes.define(&id, body);
                i = next;
                continue;
            }
        }

        if let Some((next, id, link, title)) = try_link_ref(&lines, i) {
            refs.insert(&id, link, title);
            i = next;
            continue;
        }

        text.write_bytes(&expand_tabs(&lines[i]));
        text.push_byte(b'\n');
        i += 1;
    }

    if text.is_empty() {
        // nothing to do; an empty document is valid input
    }

    Preprocessed {
        text,
        refs,
        footnotes,
    }
}

fn split_lines(input: &[u8]) -> Vec<Vec<u8>> {
    let mut lines = Vec::new();
    let mut cur = Vec::new();
    let mut i = 0;
    while i < input.len() {
        match input[i] {
            b'\r' => {
                lines.push(std::mem::take(&mut cur));
                if i + 1 < input.len() && input[i + 1] == b'\n' {
                    i += 1;
                }
                i += 1;
            }
            b'\n' => {
                lines.push(std::mem::take(&mut cur));
                i += 1;
            }
            b => {
                cur.push(b);
                i += 1;
            }
        }
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    lines
}

fn expand_tabs(line: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(line.len());
    for &b in line {
        if b == b'\t' {
            let spaces = 4 - (out.len() % 4);
            for _ in 0..spaces {
                out.push(b' ');
            }
        } else {
            out.push(b);
        }
    }
    out
}

fn leading_spaces(line: &[u8]) -> usize {
    line.iter().take_while(|&&b| b == b' ').count()
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(|&b| b == b' ' || b == b'\t')
}

fn strip_indent(line: &[u8], max: usize) -> Vec<u8> {
    let n = leading_spaces(line).min(max);
    line[n..].to_vec()
}

/// Recognizes `[^id]: body` possibly spanning indented continuation lines.
fn try_footnote_def(lines: &[Vec<u8>], i: usize) -> Option<(usize, Vec<u8>, Buffer)> {
    let indent = leading_spaces(&lines[i]);
    if indent > 3 {
        return None;
    }
    let line = &lines[i][indent..];
    if !line.starts_with(b"[^") {
        return None;
    }
    let close = line.iter().position(|&b| b == b']')?;
    if close + 1 >= line.len() || line[close + 1] != b':' {
        return None;
    }
    let id = line[2..close].to_vec();
    if id.is_empty() {
        return None;
    }

    let mut rest = &line[close + 2..];
    while rest.first() == Some(&b' ') {
        rest = &rest[1..];
    }

    let mut body = Buffer::new(64);
    if !rest.is_empty() {
        body.write_bytes(rest);
    }

    let mut j = i + 1;
    loop {
        if j >= lines.len() {
            break;
        }
        if is_blank(&lines[j]) {
            if j + 1 < lines.len() && leading_spaces(&lines[j + 1]) >= 1 && !is_blank(&lines[j + 1]) {
                body.push_byte(b'\n');
                j += 1;
                continue;
            }
            break;
        }
        if leading_spaces(&lines[j]) >= 1 {
            let stripped = strip_indent(&lines[j], 4);
            if !body.is_empty() {
                body.push_byte(b'\n');
            }
            body.write_bytes(&stripped);
            j += 1;
        } else {
            break;
        }
    }

    Some((j, id, body))
}

/// Recognizes `[id]: destination "title"`, with the title optionally on the
/// following line.
fn try_link_ref(lines: &[Vec<u8>], i: usize) -> Option<(usize, Vec<u8>, Buffer, Option<Buffer>)> {
    let indent = leading_spaces(&lines[i]);
    if indent > 3 {
        return None;
    }
    let line = &lines[i][indent..];
    if line.first() != Some(&b'[') {
        return None;
    }
    let close = find_unescaped(line, b']', 1)?;
    if close + 1 >= line.len() || line[close + 1] != b':' {
        return None;
    }
    let id = line[1..close].to_vec();
    if id.is_empty() {
        return None;
    }

    let mut rest = trim_start(&line[close + 2..]);
    let mut j = i;
    if rest.is_empty() {
        j = i + 1;
        if j >= lines.len() {
            return None;
        }
        rest = trim_start(&lines[j]);
        if rest.is_empty() {
            return None;
        }
    }

    let (dest, after_dest) = parse_destination(rest)?;
    let mut remainder = trim_start(after_dest);
    let mut title = None;
    let mut next = j + 1;

    if !remainder.is_empty() {
        if let Some(t) = parse_title(remainder) {
            title = Some(t);
        } else {
            // trailing garbage on the definition line invalidates it
            return None;
        }
    } else if next < lines.len() {
        let candidate = trim_start(&lines[next]);
        if !candidate.is_empty() {
            if let Some(t) = parse_title(candidate) {
                title = Some(t);
                next += 1;
            }
        }
    }
    let _ = &mut remainder;

    Some((next, id, Buffer::from(dest), title))
}

fn find_unescaped(line: &[u8], target: u8, from: usize) -> Option<usize> {
    let mut k = from;
    while k < line.len() {
        if line[k] == b'\\' {
            k += 2;
            continue;
        }
        if line[k] == target {
            return Some(k);
        }
        k += 1;
    }
    None
}

fn trim_start(bytes: &[u8]) -> &[u8] {
    let n = bytes.iter().take_while(|&&b| b == b' ').count();
    &bytes[n..]
}

fn trim_end(bytes: &[u8]) -> &[u8] {
    let n = bytes.iter().rev().take_while(|&&b| b == b' ').count();
    &bytes[..bytes.len() - n]
}

fn parse_destination(rest: &[u8]) -> Option<(&[u8], &[u8])> {
    if rest.first() == Some(&b'<') {
        let end = rest.iter().position(|&b| b == b'>')?;
        Some((&rest[1..end], &rest[end + 1..]))
    } else {
        let end = rest.iter().position(|&b| b == b' ').unwrap_or(rest.len());
        Some((&rest[..end], &rest[end..]))
    }
}

fn parse_title(text: &[u8]) -> Option<Buffer> {
    let text = trim_end(text);
    if text.len() < 2 {
        return None;
    }
    let (open, close) = match text[0] {
        b'"' => (b'"', b'"'),
        b'\'' => (b'\'', b'\''),
        b'(' => (b'(', b')'),
        _ => return None,
    };
    if *text.last().unwrap() != close {
        return None;
    }
    let inner = &text[1..text.len() - 1];
    if inner.contains(&open) && open != b'(' {
        // a stray matching delimiter inside means this wasn't really a title
    }
    Some(Buffer::from(inner))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bom() {
        let mut input = BOM.to_vec();
        input.extend_from_slice(b"hi\n");
        let out = preprocess(&input, Extension::empty());
        assert_eq!(out.text.as_str().unwrap(), "hi\n");
    }

    #[test]
    fn expands_tabs_to_four_column_stops() {
        let out = preprocess(b"a\tb\n", Extension::empty());
        assert_eq!(out.text.as_str().unwrap(), "a   b\n");
    }

    #[test]
    fn ensures_trailing_newline() {
        let out = preprocess(b"no newline", Extension::empty());
        assert_eq!(out.text.as_str().unwrap(), "no newline\n");
    }

    #[test]
    fn extracts_link_reference_same_line() {
        let out = preprocess(b"[foo]: http://example.com \"Title\"\n\ntext\n", Extension::empty());
        let r = out.refs.find(b"foo").unwrap();
        assert_eq!(r.link.as_str().unwrap(), "http://example.com");
        assert_eq!(r.title.as_ref().unwrap().as_str().unwrap(), "Title");
        assert_eq!(out.text.as_str().unwrap(), "\ntext\n");
    }

    #[test]
    fn extracts_link_reference_title_on_next_line() {
        let out = preprocess(b"[foo]: http://example.com\n  \"Title\"\n", Extension::empty());
        let r = out.refs.find(b"foo").unwrap();
        assert_eq!(r.title.as_ref().unwrap().as_str().unwrap(), "Title");
    }

    #[test]
    fn extracts_footnote_definition_with_continuation() {
        let out = preprocess(
            b"a[^f]b\n\n[^f]: line one\n    line two\n",
            Extension::FOOTNOTES,
        );
        assert!(out.footnotes.contains(b"f"));
    }

    #[test]
    fn crlf_and_cr_both_break_lines() {
        let out = preprocess(b"a\r\nb\rc\n", Extension::empty());
        assert_eq!(out.text.as_str().unwrap(), "a\nb\nc\n");
    }
}
