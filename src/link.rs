//! Link and image resolution (C6): shared logic for the inline scanner's
//! `[` and `!` dispatch entries. Handles inline destinations, reference and
//! shortcut forms, and footnote references.

use crate::buffer::Buffer;
use crate::driver::State;

pub enum LinkKind {
    Link { dest: Buffer, title: Buffer },
    Image { dest: Buffer, title: Buffer },
    FootnoteReference { num: u32 },
}

pub struct LinkMatch {
    pub kind: LinkKind,
    /// Byte range of the bracketed text (link text, or image alt text),
    /// relative to the scanned slice.
    pub text: (usize, usize),
    /// Total bytes consumed starting at the trigger position.
    pub consumed: usize,
}

/// `data[i] == b'['`.
pub fn try_link(state: &mut State, data: &[u8], i: usize) -> Option<LinkMatch> {
    try_bracketed(state, data, i, false)
}

/// `data[i] == b'!'` and `data[i + 1] == b'['`.
pub fn try_image(state: &mut State, data: &[u8], i: usize) -> Option<LinkMatch> {
    let m = try_bracketed(state, data, i + 1, true)?;
    Some(LinkMatch {
        consumed: m.consumed + 1,
        text: (m.text.0 + 1, m.text.1 + 1),
        ..m
    })
}

fn try_bracketed(state: &mut State, data: &[u8], i: usize, is_image: bool) -> Option<LinkMatch> {
    debug_assert_eq!(data[i], b'[');

    let close = find_matching_bracket(data, i + 1)?;
    let text_start = i + 1;
    let text_end = close;

    if !is_image
        && state.extensions.contains(crate::extensions::Extension::FOOTNOTES)
        && data.get(text_start) == Some(&b'^')
    {
        let id = &data[text_start + 1..text_end];
        if !id.is_empty() && state.footnotes.contains(id) {
            let num = state.footnotes.mark_used(id).unwrap();
            return Some(LinkMatch {
                kind: LinkKind::FootnoteReference { num },
                text: (text_start, text_end),
                consumed: (close + 1) - i,
            });
        }
    }

    let after = close + 1;

    if data.get(after) == Some(&b'(') {
        let (dest, title, end) = parse_inline_destination(data, after + 1)?;
        let kind = if is_image {
            LinkKind::Image { dest, title }
        } else {
            LinkKind::Link { dest, title }
        };
        return Some(LinkMatch {
            kind,
            text: (text_start, text_end),
            consumed: end - i,
        });
    }

    if data.get(after) == Some(&b'[') {
        let ref_close = find_unescaped(data, after + 1, b']')?;
        let id_slice = &data[after + 1..ref_close];
        let id: &[u8] = if id_slice.is_empty() {
            &data[text_start..text_end]
        } else {
            id_slice
        };
        let reference = state.refs.find(id)?;
        let dest = reference.link.clone();
        let title = reference.title.clone().unwrap_or_else(|| Buffer::new(0));
        let kind = if is_image {
            LinkKind::Image { dest, title }
        } else {
            LinkKind::Link { dest, title }
        };
        return Some(LinkMatch {
            kind,
            text: (text_start, text_end),
            consumed: (ref_close + 1) - i,
        });
    }

    // shortcut reference: `[id]`
    let id = &data[text_start..text_end];
    let reference = state.refs.find(id)?;
    let dest = reference.link.clone();
    let title = reference.title.clone().unwrap_or_else(|| Buffer::new(0));
    let kind = if is_image {
        LinkKind::Image { dest, title }
    } else {
        LinkKind::Link { dest, title }
    };
    Some(LinkMatch {
        kind,
        text: (text_start, text_end),
        consumed: (close + 1) - i,
    })
}

/// Finds the `]` matching the `[` that opened at `open - 1`, respecting
/// nested brackets and backslash escapes.
fn find_matching_bracket(data: &[u8], start: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut k = start;
    while k < data.len() {
        match data[k] {
            b'\\' => k += 2,
            b'[' => {
                depth += 1;
                k += 1;
            }
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(k);
                }
                k += 1;
            }
            _ => k += 1,
        }
    }
    None
}

fn find_unescaped(data: &[u8], start: usize, target: u8) -> Option<usize> {
    let mut k = start;
    while k < data.len() {
        if data[k] == b'\\' {
            k += 2;
            continue;
        }
        if data[k] == target {
            return Some(k);
        }
        k += 1;
    }
    None
}

/// Parses `dest "title")` (or `dest)`) starting just after the opening `(`.
/// Returns the destination, an (empty if absent) title, and the index just
/// past the closing `)`.
fn parse_inline_destination(data: &[u8], start: usize) -> Option<(Buffer, Buffer, usize)> {
    let mut k = start;
    while data.get(k) == Some(&b' ') {
        k += 1;
    }

    let dest: &[u8];
    if data.get(k) == Some(&b'<') {
        let end = data[k..].iter().position(|&b| b == b'>')? + k;
        dest = &data[k + 1..end];
        k = end + 1;
    } else {
        let mut depth = 0usize;
        let start_dest = k;
        while k < data.len() {
            match data[k] {
                b'(' => {
                    depth += 1;
                    k += 1;
                }
                b')' if depth > 0 => {
                    depth -= 1;
                    k += 1;
                }
                b')' | b' ' => break,
                b'\\' => k += 2,
                _ => k += 1,
            }
        }
        dest = &data[start_dest..k];
    }

    while data.get(k) == Some(&b' ') {
        k += 1;
    }

    let mut title = Buffer::new(0);
    if matches!(data.get(k), Some(&b'"') | Some(&b'\'')) {
        let quote = data[k];
        let title_start = k + 1;
        let title_end = find_unescaped(data, title_start, quote)?;
        title = Buffer::from(&data[title_start..title_end]);
        k = title_end + 1;
        while data.get(k) == Some(&b' ') {
            k += 1;
        }
    }

    if data.get(k) != Some(&b')') {
        return None;
    }

    Some((Buffer::from(dest), title, k + 1))
}
