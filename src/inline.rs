//! Inline scanner (C4): active-character dispatch over span-level content.
//!
//! The scanner walks `data` byte by byte. Bytes that can never start a
//! construct are accumulated into a plain-text run; a byte that can is
//! dispatched to its recognizer, which either consumes some bytes and
//! renders a construct or declines (consumes zero), in which case the byte
//! rejoins the plain-text run. This mirrors the original's `[u8; 256]`
//! action table, expressed here as a per-byte boolean gate plus a match.

use crate::autolink;
use crate::buffer::Buffer;
use crate::driver::State;
use crate::extensions::Extension;
use crate::html_blocks;
use crate::link::{self, LinkKind};
use crate::pool::Kind;
use crate::renderer::{AutoLink, Render};

fn is_special(b: u8, ext: Extension) -> bool {
    match b {
        b'\\' | b'&' | b'<' | b'*' | b'_' | b'`' | b'[' | b'!' | b'\n' => true,
        b':' if ext.contains(Extension::AUTOLINK) => true,
        b'@' if ext.contains(Extension::AUTOLINK) => true,
        b'w' if ext.contains(Extension::SHORT_DOMAIN_AUTOLINKS) => true,
        b'~' if ext.contains(Extension::STRIKETHROUGH) => true,
        b'=' if ext.contains(Extension::HIGHLIGHT) => true,
        b'"' if ext.contains(Extension::QUOTE) => true,
        b'^' if ext.contains(Extension::SUPERSCRIPT) => true,
        _ => false,
    }
}

pub fn parse_inline<R: Render + ?Sized>(state: &mut State, renderer: &mut R, data: &[u8], output: &mut Buffer) {
    let mut i = 0;
    let mut text_start = 0;

    while i < data.len() {
        let b = data[i];
        if !is_special(b, state.extensions) {
            i += 1;
            continue;
        }

        if i > text_start {
            flush_text(renderer, output, &data[text_start..i]);
        }

        let consumed = dispatch(state, renderer, data, i, output);
        if consumed == 0 {
            i += 1;
            // leave text_start where it is: the rejected special byte
            // becomes the start of (or rejoins) the next plain-text run
            text_start = i - 1;
        } else {
            i += consumed;
            text_start = i;
        }
    }

    if i > text_start {
        flush_text(renderer, output, &data[text_start..i]);
    }
}

fn flush_text<R: Render + ?Sized>(renderer: &mut R, output: &mut Buffer, text: &[u8]) {
    renderer.normal_text(output, &Buffer::from(text));
}

fn dispatch<R: Render + ?Sized>(state: &mut State, renderer: &mut R, data: &[u8], i: usize, output: &mut Buffer) -> usize {
    match data[i] {
        b'\\' => escape(data, i, renderer, output),
        b'&' => entity(data, i, renderer, output),
        b'\n' => line_break(data, i, renderer, output),
        b'<' => angle(state, data, i, renderer, output),
        b'*' => emphasis(state, renderer, data, i, b'*', output),
        b'_' => emphasis(state, renderer, data, i, b'_', output),
        b'~' => delimited_run(state, renderer, data, i, b'~', 2, output, &Render::strikethrough),
        b'=' => delimited_run(state, renderer, data, i, b'=', 2, output, &Render::highlight),
        b'"' => quote(state, renderer, data, i, output),
        b'^' => superscript(state, renderer, data, i, output),
        b'`' => code_span(data, i, renderer, output),
        b'[' => link_or_footnote(state, renderer, data, i, output),
        b'!' => image(state, renderer, data, i, output),
        b':' => url_autolink(state, renderer, data, i, output),
        b'@' => email_autolink(state, renderer, data, i, output),
        b'w' => www_autolink(state, renderer, data, i, output),
        _ => 0,
    }
}

fn escape<R: Render + ?Sized>(data: &[u8], i: usize, renderer: &mut R, output: &mut Buffer) -> usize {
    match data.get(i + 1) {
        Some(&c) if c.is_ascii_punctuation() => {
            renderer.normal_text(output, &Buffer::from(&data[i + 1..i + 2]));
            2
        }
        _ => 0,
    }
}

fn entity<R: Render + ?Sized>(data: &[u8], i: usize, renderer: &mut R, output: &mut Buffer) -> usize {
    let rest = &data[i..];
    let end = match rest.iter().position(|&b| b == b';') {
        Some(p) if p > 1 && p <= 32 => p,
        _ => return 0,
    };
    let body = &rest[1..end];
    let valid = (body.first() == Some(&b'#')
        && body[1..].iter().all(|b| b.is_ascii_digit())
        && body.len() > 1)
        || body.iter().all(|b| b.is_ascii_alphanumeric());
    if !valid || body.is_empty() {
        return 0;
    }
    renderer.entity(output, &Buffer::from(&rest[..=end]));
    end + 1
}

fn line_break<R: Render + ?Sized>(data: &[u8], i: usize, renderer: &mut R, output: &mut Buffer) -> usize {
    let mut spaces = 0;
    while spaces < i && data[i - 1 - spaces] == b' ' {
        spaces += 1;
    }
    if spaces >= 2 {
        output.truncate(output.len() - spaces);
        if renderer.line_break(output) {
            return 1;
        }
        output.write_bytes(&vec![b' '; spaces]);
    }
    0
}

fn angle<R: Render + ?Sized>(state: &mut State, data: &[u8], i: usize, renderer: &mut R, output: &mut Buffer) -> usize {
    if let Some((name, closing)) = html_blocks::tag_name(&data[i..]) {
        let _ = (name, closing);
        if let Some(end) = find_tag_close(data, i) {
            renderer.html_span(output, &Buffer::from(&data[i..=end]));
            return end + 1 - i;
        }
    }

    if state.extensions.contains(Extension::AUTOLINK) {
        if let Some(close) = data[i..].iter().position(|&b| b == b'>') {
            let inner = &data[i + 1..i + close];
            if !inner.is_empty() && !inner.contains(&b' ') {
                let kind = if inner.contains(&b'@') {
                    AutoLink::Email
                } else if inner.contains(&b':') {
                    AutoLink::Normal
                } else {
                    return 0;
                };
                if renderer.autolink(output, &Buffer::from(inner), kind) {
                    return close + 1;
                }
            }
        }
    }

    0
}

fn find_tag_close(data: &[u8], i: usize) -> Option<usize> {
    let mut k = i + 1;
    let mut in_quote: Option<u8> = None;
    while k < data.len() {
        match (in_quote, data[k]) {
            (Some(q), c) if c == q => in_quote = None,
            (Some(_), _) => {}
            (None, b'"') | (None, b'\'') => in_quote = Some(data[k]),
            (None, b'>') => return Some(k),
            (None, b'<') => return None,
            _ => {}
        }
        k += 1;
    }
    None
}

struct EmphasisMatch {
    run: usize,
    content: (usize, usize),
    total: usize,
}

fn scan_emphasis(data: &[u8], i: usize, marker: u8, ext: Extension) -> Option<EmphasisMatch> {
    let run = data[i..].iter().take_while(|&&b| b == marker).count().min(3);
    if run == 0 {
        return None;
    }
    let open_end = i + run;
    if data.get(open_end).map_or(true, |b| b.is_ascii_whitespace()) {
        return None;
    }

    let intraword_suppressed = ext.contains(Extension::NO_INTRA_EMPHASIS) && run == 1;
    if intraword_suppressed && i > 0 && data[i - 1].is_ascii_alphanumeric() && data[open_end].is_ascii_alphanumeric() {
        return None;
    }

    let mut j = open_end;
    while j + run <= data.len() {
        if data[j] == marker {
            let close_run = data[j..].iter().take_while(|&&b| b == marker).count();
            if close_run == run && !data[j - 1].is_ascii_whitespace() {
                if !(intraword_suppressed
                    && data[j - 1].is_ascii_alphanumeric()
                    && data.get(j + run).map_or(false, |b| b.is_ascii_alphanumeric()))
                {
                    return Some(EmphasisMatch {
                        run,
                        content: (open_end, j),
                        total: (j + run) - i,
                    });
                }
            }
            j += close_run.max(1);
        } else {
            j += 1;
        }
    }
    None
}

fn emphasis<R: Render + ?Sized>(
    state: &mut State,
    renderer: &mut R,
    data: &[u8],
    i: usize,
    marker: u8,
    output: &mut Buffer,
) -> usize {
    if state.at_nesting_limit() {
        return 0;
    }
    let m = match scan_emphasis(data, i, marker, state.extensions) {
        Some(m) => m,
        None => return 0,
    };

    state.pool.acquire(Kind::Span);
    let mut content = Buffer::new(64);
    parse_inline(state, renderer, &data[m.content.0..m.content.1], &mut content);
    state.pool.release(Kind::Span);

    let ok = match m.run {
        3 => renderer.triple_emphasis(output, &content),
        2 => renderer.double_emphasis(output, &content),
        1 if marker == b'_' && state.extensions.contains(Extension::UNDERLINE) => {
            renderer.underline(output, &content)
        }
        _ => renderer.emphasis(output, &content),
    };

    if ok {
        m.total
    } else {
        output.pipe(&content);
        m.total
    }
}

fn delimited_run<R: Render + ?Sized>(
    state: &mut State,
    renderer: &mut R,
    data: &[u8],
    i: usize,
    marker: u8,
    width: usize,
    output: &mut Buffer,
    callback: &dyn Fn(&mut R, &mut Buffer, &Buffer) -> bool,
) -> usize {
    if state.at_nesting_limit() {
        return 0;
    }
    if !data[i..].starts_with(&vec![marker; width][..]) {
        return 0;
    }
    let open_end = i + width;
    if data.get(open_end).map_or(true, |b| b.is_ascii_whitespace()) {
        return 0;
    }
    let rest = &data[open_end..];
    let needle = vec![marker; width];
    let close = find_subslice(rest, &needle);
    let close = match close {
        Some(c) if c > 0 => c,
        _ => return 0,
    };

    state.pool.acquire(Kind::Span);
    let mut content = Buffer::new(64);
    parse_inline(state, renderer, &rest[..close], &mut content);
    state.pool.release(Kind::Span);

    if callback(renderer, output, &content) {
        open_end + close + width - i
    } else {
        output.pipe(&content);
        open_end + close + width - i
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).find(|&k| &haystack[k..k + needle.len()] == needle)
}

fn quote<R: Render + ?Sized>(state: &mut State, renderer: &mut R, data: &[u8], i: usize, output: &mut Buffer) -> usize {
    if state.at_nesting_limit() {
        return 0;
    }
    let rest = &data[i + 1..];
    let close = match rest.iter().position(|&b| b == b'"') {
        Some(c) if c > 0 => c,
        _ => return 0,
    };

    state.pool.acquire(Kind::Span);
    let mut content = Buffer::new(64);
    parse_inline(state, renderer, &rest[..close], &mut content);
    state.pool.release(Kind::Span);

    if renderer.quote_span(output, &content) {
        close + 2
    } else {
        output.write_str("\"");
        output.pipe(&content);
        output.write_str("\"");
        close + 2
    }
}

fn superscript<R: Render + ?Sized>(state: &mut State, renderer: &mut R, data: &[u8], i: usize, output: &mut Buffer) -> usize {
    if state.at_nesting_limit() {
        return 0;
    }
    let rest = &data[i + 1..];
    if rest.is_empty() {
        return 0;
    }

    let (span, total) = if rest[0] == b'(' {
        match rest.iter().position(|&b| b == b')') {
            Some(p) if p > 1 => (&rest[1..p], p + 2),
            _ => return 0,
        }
    } else {
        let end = rest.iter().position(|b| b.is_ascii_whitespace()).unwrap_or(rest.len());
        if end == 0 {
            return 0;
        }
        (&rest[..end], end + 1)
    };

    state.pool.acquire(Kind::Span);
    let mut content = Buffer::new(64);
    parse_inline(state, renderer, span, &mut content);
    state.pool.release(Kind::Span);

    if renderer.superscript(output, &content) {
        total
    } else {
        output.write_str("^");
        output.pipe(&content);
        total
    }
}

fn code_span<R: Render + ?Sized>(data: &[u8], i: usize, renderer: &mut R, output: &mut Buffer) -> usize {
    let run = data[i..].iter().take_while(|&&b| b == b'`').count();
    let open_end = i + run;
    let needle = vec![b'`'; run];
    let rest = &data[open_end..];
    let close = match find_subslice(rest, &needle) {
        Some(c) => c,
        None => return 0,
    };

    let mut content = &rest[..close];
    if content.len() >= 2 && content.first() == Some(&b' ') && content.last() == Some(&b' ') && !content.iter().all(|&b| b == b' ') {
        content = &content[1..content.len() - 1];
    }

    renderer.code_span(output, &Buffer::from(content));
    open_end + close + run - i
}

fn link_or_footnote<R: Render + ?Sized>(state: &mut State, renderer: &mut R, data: &[u8], i: usize, output: &mut Buffer) -> usize {
    if state.at_nesting_limit() {
        return 0;
    }
    let m = match link::try_link(state, data, i) {
        Some(m) => m,
        None => return 0,
    };

    match m.kind {
        LinkKind::FootnoteReference { num } => {
            renderer.footnote_reference(output, num);
        }
        LinkKind::Link { dest, title } => {
            state.pool.acquire(Kind::Span);
            let was_in_link = state.in_link_body;
            state.in_link_body = true;
            let mut content = Buffer::new(64);
            parse_inline(state, renderer, &data[m.text.0..m.text.1], &mut content);
            state.in_link_body = was_in_link;
            state.pool.release(Kind::Span);
            renderer.link(output, &content, &dest, &title);
        }
        LinkKind::Image { .. } => unreachable!("try_link never returns an image"),
    }

    m.consumed
}

fn image<R: Render + ?Sized>(state: &mut State, renderer: &mut R, data: &[u8], i: usize, output: &mut Buffer) -> usize {
    if state.at_nesting_limit() || data.get(i + 1) != Some(&b'[') {
        return 0;
    }
    let m = match link::try_image(state, data, i) {
        Some(m) => m,
        None => return 0,
    };

    match m.kind {
        LinkKind::Image { dest, title } => {
            renderer.image(output, &dest, &title, &Buffer::from(&data[m.text.0..m.text.1]));
        }
        _ => unreachable!("try_image never returns a link"),
    }

    m.consumed
}

fn url_autolink<R: Render + ?Sized>(state: &mut State, renderer: &mut R, data: &[u8], i: usize, output: &mut Buffer) -> usize {
    if state.in_link_body || !state.extensions.contains(Extension::AUTOLINK) {
        return 0;
    }
    let m = match autolink::url_autolink(data, i) {
        Some(m) => m,
        None => return 0,
    };
    let start = i - m.rewind;
    output.truncate(output.len() - m.rewind);
    if renderer.autolink(output, &Buffer::from(&data[start..start + m.len]), AutoLink::Normal) {
        m.len - m.rewind
    } else {
        output.write_bytes(&data[start..start + m.len]);
        m.len - m.rewind
    }
}

fn email_autolink<R: Render + ?Sized>(state: &mut State, renderer: &mut R, data: &[u8], i: usize, output: &mut Buffer) -> usize {
    if state.in_link_body || !state.extensions.contains(Extension::AUTOLINK) {
        return 0;
    }
    let m = match autolink::email_autolink(data, i) {
        Some(m) => m,
        None => return 0,
    };
    let start = i - m.rewind;
    output.truncate(output.len() - m.rewind);
    if renderer.autolink(output, &Buffer::from(&data[start..start + m.len]), AutoLink::Email) {
        m.len - m.rewind
    } else {
        output.write_bytes(&data[start..start + m.len]);
        m.len - m.rewind
    }
}

fn www_autolink<R: Render + ?Sized>(state: &mut State, renderer: &mut R, data: &[u8], i: usize, output: &mut Buffer) -> usize {
    if state.in_link_body || !state.extensions.contains(Extension::SHORT_DOMAIN_AUTOLINKS) {
        return 0;
    }
    let m = match autolink::www_autolink(data, i) {
        Some(m) => m,
        None => return 0,
    };
    if renderer.autolink(output, &Buffer::from(&data[i..i + m.len]), AutoLink::Normal) {
        m.len
    } else {
        output.write_bytes(&data[i..i + m.len]);
        m.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::html::{Flags, Html};

    fn render(ext: Extension, input: &str) -> String {
        let mut state = State::new(ext, 16);
        let mut html = Html::new(Flags::empty(), 0);
        let mut output = Buffer::new(64);
        parse_inline(&mut state, &mut html, input.as_bytes(), &mut output);
        output.as_str().unwrap().to_string()
    }

    #[test]
    fn renders_emphasis() {
        assert_eq!(render(Extension::empty(), "a _b_ c"), "a <em>b</em> c");
    }

    #[test]
    fn renders_strong() {
        assert_eq!(render(Extension::empty(), "a **b** c"), "a <strong>b</strong> c");
    }

    #[test]
    fn renders_code_span() {
        assert_eq!(render(Extension::empty(), "a `b` c"), "a <code>b</code> c");
    }

    #[test]
    fn suppresses_intraword_emphasis() {
        assert_eq!(
            render(Extension::NO_INTRA_EMPHASIS, "Sorry,_my_space_key_is_broken."),
            "Sorry,_my_space_key_is_broken."
        );
    }

    #[test]
    fn renders_highlight() {
        assert_eq!(
            render(Extension::HIGHLIGHT, "I'm ==special==."),
            "I&#39;m <mark>special</mark>."
        );
    }
}
