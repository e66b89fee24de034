//! Block-level scanner (C5): an eleven-step priority cascade over the
//! preprocessed line stream.
//!
//! Each step gets first refusal on the line(s) starting at the current
//! position; the first one that recognizes its construct consumes some
//! number of lines and renders it, and the cascade starts over at the next
//! unconsumed line. A line that nothing recognizes falls through to the
//! paragraph step, which never refuses.

use crate::buffer::Buffer;
use crate::driver::State;
use crate::extensions::Extension;
use crate::html_blocks;
use crate::pool::Kind;
use crate::renderer::{list::List, Render};
use crate::table;

pub fn parse_blocks<R: Render + ?Sized>(state: &mut State, renderer: &mut R, text: &[u8], output: &mut Buffer) {
    if state.at_nesting_limit() {
        renderer.paragraph(output, &Buffer::from(text));
        return;
    }

    state.pool.acquire(Kind::Block);
    let lines = split_lines(text);
    let mut i = 0;
    while i < lines.len() {
        i = dispatch(state, renderer, &lines, i, output);
    }
    state.pool.release(Kind::Block);
}

fn split_lines(text: &[u8]) -> Vec<&[u8]> {
    let mut lines: Vec<&[u8]> = text.split(|&b| b == b'\n').collect();
    if lines.last() == Some(&&b""[..]) {
        lines.pop();
    }
    lines
}

fn leading_spaces(line: &[u8]) -> usize {
    line.iter().take_while(|&&b| b == b' ').count()
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(|&b| b == b' ' || b == b'\t')
}

fn trim_end(line: &[u8]) -> &[u8] {
    let n = line.iter().rev().take_while(|&&b| b == b' ').count();
    &line[..line.len() - n]
}

fn trim_start(line: &[u8]) -> &[u8] {
    let n = line.iter().take_while(|&&b| b == b' ').count();
    &line[n..]
}

fn dispatch<R: Render + ?Sized>(state: &mut State, renderer: &mut R, lines: &[&[u8]], i: usize, output: &mut Buffer) -> usize {
    if is_blank(lines[i]) {
        return i + 1;
    }
    if let Some(next) = try_atx_header(state, renderer, lines, i, output) {
        log::trace!("block dispatch: atx header at line {}", i);
        return next;
    }
    if let Some(next) = try_html_block(renderer, lines, i, output) {
        log::trace!("block dispatch: html block at line {}", i);
        return next;
    }
    if let Some(next) = try_hrule(renderer, lines, i, output) {
        log::trace!("block dispatch: horizontal rule at line {}", i);
        return next;
    }
    if state.extensions.contains(Extension::FENCED_CODE) {
        if let Some(next) = try_fenced_code(renderer, lines, i, output) {
            log::trace!("block dispatch: fenced code at line {}", i);
            return next;
        }
    }
    if state.extensions.contains(Extension::TABLES) {
        if let Some(next) = table::try_table(state, renderer, lines, i, output) {
            log::trace!("block dispatch: table at line {}", i);
            return next;
        }
    }
    if let Some(next) = try_blockquote(state, renderer, lines, i, output) {
        log::trace!("block dispatch: blockquote at line {}", i);
        return next;
    }
    if !state.extensions.contains(Extension::DISABLE_INDENTED_CODE) {
        if let Some(next) = try_indented_code(renderer, lines, i, output) {
            log::trace!("block dispatch: indented code at line {}", i);
            return next;
        }
    }
    if let Some(next) = try_list(state, renderer, lines, i, output) {
        log::trace!("block dispatch: list at line {}", i);
        return next;
    }
    log::trace!("block dispatch: paragraph (fallthrough) at line {}", i);
    try_paragraph(state, renderer, lines, i, output)
}

fn space_required(ext: Extension) -> bool {
    ext.contains(Extension::SPACE_HEADERS)
}

/// True if `line` opens an ATX header (`#`-`######`). Shared between the
/// block dispatch step and the paragraph-termination check, which must
/// recognize an upcoming header without consuming or rendering it.
fn is_atx_header_line(ext: Extension, line: &[u8]) -> bool {
    let indent = leading_spaces(line);
    if indent > 3 {
        return false;
    }
    let rest = &line[indent..];
    let level = rest.iter().take_while(|&&b| b == b'#').count();
    if level == 0 || level > 6 {
        return false;
    }
    let after = &rest[level..];
    if space_required(ext) && !after.is_empty() && after[0] != b' ' {
        return false;
    }
    true
}

/// True if `line` is a horizontal rule (≥3 of `-`, `_`, or `*`, optionally
/// interleaved with spaces). Shared the same way as `is_atx_header_line`.
fn is_hrule_line(line: &[u8]) -> bool {
    let indent = leading_spaces(line);
    if indent > 3 {
        return false;
    }
    let rest = &line[indent..];
    let marker = match rest.first() {
        Some(&m) if matches!(m, b'-' | b'_' | b'*') => m,
        _ => return false,
    };
    let mut count = 0;
    for &b in rest {
        if b == marker {
            count += 1;
        } else if b != b' ' {
            return false;
        }
    }
    count >= 3
}

/// True if `line` opens a blockquote (0-3 leading spaces then `>`). Shared
/// the same way as `is_atx_header_line`.
fn is_blockquote_prefix(line: &[u8]) -> bool {
    let indent = leading_spaces(line);
    indent <= 3 && line.get(indent) == Some(&b'>')
}

fn try_atx_header<R: Render + ?Sized>(state: &mut State, renderer: &mut R, lines: &[&[u8]], i: usize, output: &mut Buffer) -> Option<usize> {
    if !is_atx_header_line(state.extensions, lines[i]) {
        return None;
    }
    let indent = leading_spaces(lines[i]);
    let line = &lines[i][indent..];
    let level = line.iter().take_while(|&&b| b == b'#').count();
    let rest = &line[level..];
    let mut content = trim_end(rest);
    while content.first() == Some(&b' ') {
        content = &content[1..];
    }
    let trailing_hashes = content.iter().rev().take_while(|&&b| b == b'#').count();
    if trailing_hashes > 0 && (content.len() == trailing_hashes || content[content.len() - trailing_hashes - 1] == b' ') {
        content = trim_end(&content[..content.len() - trailing_hashes]);
    }

    let mut buf = Buffer::new(content.len().max(16));
    crate::inline::parse_inline(state, renderer, content, &mut buf);
    renderer.header(output, &buf, level as i32);
    Some(i + 1)
}

fn try_html_block<R: Render + ?Sized>(renderer: &mut R, lines: &[&[u8]], i: usize, output: &mut Buffer) -> Option<usize> {
    let line = lines[i];
    if line.first() != Some(&b'<') {
        return None;
    }
    let (name, _closing) = html_blocks::tag_name(line)?;
    if !html_blocks::is_block_tag(name) {
        return None;
    }

    let mut j = i;
    while j < lines.len() && !is_blank(lines[j]) {
        j += 1;
    }

    let mut text = Buffer::new(256);
    for (k, l) in lines[i..j].iter().enumerate() {
        if k > 0 {
            text.push_byte(b'\n');
        }
        text.write_bytes(l);
    }
    renderer.html_block(output, &text);
    Some(j)
}

fn try_hrule<R: Render + ?Sized>(renderer: &mut R, lines: &[&[u8]], i: usize, output: &mut Buffer) -> Option<usize> {
    if !is_hrule_line(lines[i]) {
        return None;
    }
    renderer.horizontal_rule(output);
    Some(i + 1)
}

fn try_fenced_code<R: Render + ?Sized>(renderer: &mut R, lines: &[&[u8]], i: usize, output: &mut Buffer) -> Option<usize> {
    let indent = leading_spaces(lines[i]);
    if indent > 3 {
        return None;
    }
    let line = &lines[i][indent..];
    let fence_char = *line.first()?;
    if fence_char != b'`' && fence_char != b'~' {
        return None;
    }
    let fence_len = line.iter().take_while(|&&b| b == fence_char).count();
    if fence_len < 3 {
        return None;
    }
    let lang = trim_end(&line[fence_len..]);
    let lang = if lang.first() == Some(&b' ') { &lang[1..] } else { lang };

    let mut j = i + 1;
    let mut body = Buffer::new(256);
    let mut first = true;
    loop {
        if j >= lines.len() {
            break;
        }
        let close_indent = leading_spaces(lines[j]);
        let close_line = &lines[j][close_indent.min(lines[j].len())..];
        let close_run = close_line.iter().take_while(|&&b| b == fence_char).count();
        if close_indent <= 3 && close_run >= fence_len && close_line[close_run..].iter().all(|&b| b == b' ') {
            j += 1;
            break;
        }
        if !first {
            body.push_byte(b'\n');
        }
        body.write_bytes(lines[j]);
        first = false;
        j += 1;
    }

    renderer.code_block(output, &body, &Buffer::from(lang));
    Some(j)
}

fn try_blockquote<R: Render + ?Sized>(state: &mut State, renderer: &mut R, lines: &[&[u8]], i: usize, output: &mut Buffer) -> Option<usize> {
    let indent = leading_spaces(lines[i]);
    if indent > 3 || lines[i].get(indent) != Some(&b'>') {
        return None;
    }

    let mut j = i;
    let mut stripped = Buffer::new(256);
    let mut first = true;
    while j < lines.len() {
        let line = lines[j];
        let line_indent = leading_spaces(line);
        let content: &[u8];
        if line_indent <= 3 && line.get(line_indent) == Some(&b'>') {
            let mut rest = &line[line_indent + 1..];
            if rest.first() == Some(&b' ') {
                rest = &rest[1..];
            }
            content = rest;
        } else if is_blank(line) {
            // A blank line only ends the quote if the line after it is both
            // non-blank and not itself quote-prefixed; otherwise it's a lazy
            // blank folded into the quote (e.g. between two inner paragraphs).
            let ends_quote = match lines.get(j + 1) {
                Some(next) => {
                    let next_indent = leading_spaces(next);
                    let next_quoted = next_indent <= 3 && next.get(next_indent) == Some(&b'>');
                    !is_blank(next) && !next_quoted
                }
                None => false,
            };
            if ends_quote {
                break;
            }
            content = line;
        } else if j > i && !is_blank(lines[j - 1]) {
            // lazy continuation of a quoted paragraph
            content = line;
        } else {
            break;
        }

        if !first {
            stripped.push_byte(b'\n');
        }
        stripped.write_bytes(content);
        first = false;
        j += 1;
    }

    state.pool.acquire(Kind::Block);
    let mut content = Buffer::new(256);
    parse_blocks(state, renderer, stripped.as_bytes(), &mut content);
    state.pool.release(Kind::Block);

    renderer.quote_block(output, &content);
    Some(j)
}

fn try_indented_code<R: Render + ?Sized>(renderer: &mut R, lines: &[&[u8]], i: usize, output: &mut Buffer) -> Option<usize> {
    if leading_spaces(lines[i]) < 4 {
        return None;
    }

    let mut j = i;
    let mut body = Buffer::new(256);
    let mut first = true;
    let mut pending_blanks = 0;
    loop {
        if j >= lines.len() {
            break;
        }
        if is_blank(lines[j]) {
            pending_blanks += 1;
            j += 1;
            continue;
        }
        if leading_spaces(lines[j]) < 4 {
            j -= pending_blanks;
            break;
        }
        for _ in 0..pending_blanks {
            body.push_byte(b'\n');
        }
        pending_blanks = 0;
        if !first {
            body.push_byte(b'\n');
        }
        body.write_bytes(&lines[j][4..]);
        first = false;
        j += 1;
    }

    renderer.code_block(output, &body, &Buffer::new(0));
    Some(j)
}

fn list_marker(line: &[u8]) -> Option<(bool, usize)> {
    let indent = leading_spaces(line);
    if indent > 3 {
        return None;
    }
    let rest = &line[indent..];
    match rest.first()? {
        b'-' | b'*' | b'+' => {
            if rest.get(1) == Some(&b' ') {
                Some((false, 2 + indent))
            } else {
                None
            }
        }
        b'0'..=b'9' => {
            let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
            if rest.get(digits) == Some(&b'.') && rest.get(digits + 1) == Some(&b' ') {
                Some((true, digits + 2 + indent))
            } else {
                None
            }
        }
        _ => None,
    }
}

fn try_list<R: Render + ?Sized>(state: &mut State, renderer: &mut R, lines: &[&[u8]], i: usize, output: &mut Buffer) -> Option<usize> {
    let (ordered, _) = list_marker(lines[i])?;

    let mut j = i;
    let mut items: Vec<Buffer> = Vec::new();
    let mut loose = false;

    while j < lines.len() {
        let (item_ordered, marker_width) = match list_marker(lines[j]) {
            Some(m) if m.0 == ordered => m,
            _ => break,
        };

        let mut item_lines: Vec<Vec<u8>> = vec![lines[j][marker_width..].to_vec()];
        let mut k = j + 1;
        let mut trailing_blanks = 0;
        let mut ends_at_new_item = false;
        loop {
            if k >= lines.len() {
                break;
            }
            if is_blank(lines[k]) {
                trailing_blanks += 1;
                k += 1;
                continue;
            }
            if list_marker(lines[k]).map(|m| m.0) == Some(ordered) {
                if trailing_blanks > 0 {
                    loose = true;
                }
                ends_at_new_item = true;
                break;
            }
            if leading_spaces(lines[k]) >= marker_width {
                if trailing_blanks > 0 {
                    loose = true;
                    for _ in 0..trailing_blanks {
                        item_lines.push(Vec::new());
                    }
                }
                trailing_blanks = 0;
                item_lines.push(lines[k][marker_width.min(lines[k].len())..].to_vec());
                k += 1;
            } else {
                break;
            }
        }
        if !ends_at_new_item {
            k -= trailing_blanks;
        }

        let mut item_text = Buffer::new(128);
        for (n, l) in item_lines.iter().enumerate() {
            if n > 0 {
                item_text.push_byte(b'\n');
            }
            item_text.write_bytes(l);
        }

        state.pool.acquire(Kind::Block);
        let mut content = Buffer::new(128);
        if loose {
            parse_blocks(state, renderer, item_text.as_bytes(), &mut content);
        } else {
            crate::inline::parse_inline(state, renderer, trim_end(item_text.as_bytes()), &mut content);
        }
        state.pool.release(Kind::Block);
        items.push(content);

        j = k;
        let _ = item_ordered;
    }

    if items.is_empty() {
        return None;
    }

    let mut item_flags = List::empty();
    if ordered {
        item_flags |= List::ORDERED;
    }
    if loose {
        item_flags |= List::BLOCK;
    }

    let mut list_body = Buffer::new(256);
    for item in &items {
        renderer.list_item(&mut list_body, item, item_flags);
    }

    renderer.list(output, &list_body, item_flags);
    Some(j)
}

fn try_paragraph<R: Render + ?Sized>(state: &mut State, renderer: &mut R, lines: &[&[u8]], i: usize, output: &mut Buffer) -> usize {
    let mut j = i + 1;
    while j < lines.len() && !is_blank(lines[j]) {
        if is_setext_underline(lines[j]) {
            break;
        }
        if is_atx_header_line(state.extensions, lines[j]) || is_hrule_line(lines[j]) || is_blockquote_prefix(lines[j]) {
            break;
        }
        if state.extensions.contains(Extension::LAX_SPACING) && list_marker(lines[j]).is_some() {
            break;
        }
        j += 1;
    }

    if j < lines.len() && is_setext_underline(lines[j]) && j > i {
        let level = if trim_end(lines[j]).iter().all(|&b| b == b'=') { 1 } else { 2 };
        let mut text = Buffer::new(128);
        for (n, l) in lines[i..j].iter().enumerate() {
            if n > 0 {
                text.push_byte(b'\n');
            }
            text.write_bytes(trim_start(l));
        }
        let mut content = Buffer::new(text.len());
        crate::inline::parse_inline(state, renderer, text.as_bytes(), &mut content);
        renderer.header(output, &content, level);
        return j + 1;
    }

    let mut text = Buffer::new(128);
    for (n, l) in lines[i..j].iter().enumerate() {
        if n > 0 {
            text.push_byte(b'\n');
        }
        text.write_bytes(trim_start(l));
    }

    let mut content = Buffer::new(text.len());
    crate::inline::parse_inline(state, renderer, text.as_bytes(), &mut content);
    renderer.paragraph(output, &content);
    j
}

fn is_setext_underline(line: &[u8]) -> bool {
    if leading_spaces(line) > 3 {
        return false;
    }
    let trimmed = trim_end(line);
    !trimmed.is_empty() && (trimmed.iter().all(|&b| b == b'=') || trimmed.iter().all(|&b| b == b'-'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::html::{Flags, Html};

    fn render(ext: Extension, input: &str) -> String {
        let mut state = State::new(ext, 16);
        let mut html = Html::new(Flags::empty(), 0);
        let mut output = Buffer::new(64);
        let pre = crate::preprocess::preprocess(input.as_bytes(), ext);
        parse_blocks(&mut state, &mut html, pre.text.as_bytes(), &mut output);
        output.as_str().unwrap().to_string()
    }

    #[test]
    fn renders_atx_header() {
        assert_eq!(render(Extension::empty(), "# Title\n"), "<h1>Title</h1>\n");
    }

    #[test]
    fn renders_paragraph() {
        assert_eq!(render(Extension::empty(), "hello\nworld\n"), "<p>hello\nworld</p>\n");
    }

    #[test]
    fn renders_setext_header() {
        assert_eq!(render(Extension::empty(), "Title\n=====\n"), "<h1>Title</h1>\n");
    }

    #[test]
    fn renders_horizontal_rule() {
        assert_eq!(render(Extension::empty(), "---\n"), "<hr>\n");
    }

    #[test]
    fn renders_blockquote() {
        assert_eq!(render(Extension::empty(), "> quoted\n"), "<blockquote>\n<p>quoted</p>\n</blockquote>\n");
    }

    #[test]
    fn renders_indented_code() {
        assert_eq!(render(Extension::empty(), "    code\n"), "<pre><code>code\n</code></pre>\n");
    }

    #[test]
    fn renders_tight_list() {
        assert_eq!(
            render(Extension::empty(), "- one\n- two\n"),
            "<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n"
        );
    }

    #[test]
    fn renders_fenced_code_with_language() {
        assert_eq!(
            render(Extension::FENCED_CODE, "```rust\nfn main() {}\n```\n"),
            "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>\n"
        );
    }
}
