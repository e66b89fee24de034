//! Native HTML renderer (A3) and `smartypants` post-processor.

use bitflags::bitflags;

use crate::buffer::Buffer;
use super::{list, AutoLink, Render, Table};

/// Escapes `& < > " '` into their named entities. Applied unconditionally to
/// normal text and code content regardless of the `ESCAPE` flag; `ESCAPE`
/// only governs whether raw HTML tags/spans are passed through as markup.
pub fn escape_html(output: &mut Buffer, text: &[u8]) {
    for &b in text {
        match b {
            b'&' => output.write_str("&amp;"),
            b'<' => output.write_str("&lt;"),
            b'>' => output.write_str("&gt;"),
            b'"' => output.write_str("&quot;"),
            b'\'' => output.write_str("&#39;"),
            _ => output.push_byte(b),
        }
    }
}

/// Performs "smartypants" processing of the provided buffer.
///
/// This turns, for example, straight quotes `"test"` into curly quotes.
pub fn smartypants(content: &Buffer, output: &mut Buffer) {
    let data: &[u8] = content.as_bytes();
    let mut i = 0;
    while i < data.len() {
        match data[i] {
            b'.' if data[i..].starts_with(b"...") => {
                output.write_str("&hellip;");
                i += 3;
            }
            b'-' => {
                let run = data[i..].iter().take_while(|&&b| b == b'-').count();
                if run >= 3 {
                    output.write_str("&mdash;");
                } else if run == 2 {
                    output.write_str("&ndash;");
                } else {
                    output.push_byte(b'-');
                }
                i += run.max(1);
            }
            b'"' => {
                let prev = if i == 0 { None } else { Some(data[i - 1]) };
                if prev.map_or(false, |p| !p.is_ascii_whitespace()) {
                    output.write_str("&rdquo;");
                } else {
                    output.write_str("&ldquo;");
                }
                i += 1;
            }
            b'\'' => {
                let prev = if i == 0 { None } else { Some(data[i - 1]) };
                let next = data.get(i + 1).copied();
                if prev.map_or(false, |p| p.is_ascii_alphanumeric())
                    && next.map_or(false, |n| n.is_ascii_alphanumeric())
                {
                    output.write_str("&rsquo;");
                } else if prev.map_or(false, |p| !p.is_ascii_whitespace()) {
                    output.write_str("&rsquo;");
                } else {
                    output.write_str("&lsquo;");
                }
                i += 1;
            }
            b => {
                output.push_byte(b);
                i += 1;
            }
        }
    }
}

bitflags! {
    /// Flags to control the behavior of the html renderer
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Flags: u32 {
        /// Ignore raw html
        const SKIP_HTML = 1 << 0;
        /// Ignore raw html blocks and escape html spans
        const ESCAPE    = 1 << 1;
        /// Insert breaks inside paragraphs for every newline
        const HARD_WRAP = 1 << 2;
        /// Output XHTML
        const USE_XHTML = 1 << 3;
    }
}

/// HTML renderer.
///
/// This can be used to render markdown documents to HTML. This type can
/// also be leveraged to create custom renderers that delegate to the HTML
/// renderer in certain cases, as shown in the `Render` trait documentation
/// example.
///
///``` rust
///# use hoedown::renderer::html::{Html, Flags};
///# use hoedown::{Buffer, Render};
///let input = Buffer::from("EMPHASIZE");
///let mut output = Buffer::new(64usize);
///let mut html_renderer = Html::new(Flags::empty(), 0);
///
///html_renderer.emphasis(&mut output, &input);
///
///assert_eq!(output.to_str().unwrap(), "<em>EMPHASIZE</em>");
///```
pub struct Html {
    flags: Flags,
    toc_only: bool,
    nesting_level: i32,
    header_count: u32,
    toc_stack: Vec<i32>,
}

impl Html {
    /// Construct a new html renderer given the provided html flags
    /// and table of contents nesting level.
    pub fn new(flags: Flags, nesting_level: i32) -> Html {
        Html {
            flags,
            toc_only: false,
            nesting_level,
            header_count: 0,
            toc_stack: Vec::new(),
        }
    }

    /// Construct a table of contents renderer.
    ///
    /// This renderer will _only_ render the table of contents, as a nested
    /// `<ul>` of headers up to `nesting_level` deep.
    pub fn toc(nesting_level: i32) -> Html {
        Html {
            flags: Flags::empty(),
            toc_only: true,
            nesting_level,
            header_count: 0,
            toc_stack: Vec::new(),
        }
    }

    fn xhtml_br(&self) -> &'static str {
        if self.flags.contains(Flags::USE_XHTML) {
            "<br/>"
        } else {
            "<br>"
        }
    }

    fn xhtml_hr(&self) -> &'static str {
        if self.flags.contains(Flags::USE_XHTML) {
            "<hr/>\n"
        } else {
            "<hr>\n"
        }
    }
}

impl Render for Html {
    fn code_block(&mut self, output: &mut Buffer, text: &Buffer, lang: &Buffer) {
        if self.toc_only {
            return;
        }
        output.write_str("<pre><code");
        if !lang.is_empty() {
            output.write_str(" class=\"language-");
            escape_html(output, lang.as_bytes());
            output.write_str("\"");
        }
        output.write_str(">");
        escape_html(output, text.as_bytes());
        output.write_str("</code></pre>\n");
    }

    fn quote_block(&mut self, output: &mut Buffer, content: &Buffer) {
        if self.toc_only {
            return;
        }
        output.write_str("<blockquote>\n");
        output.pipe(content);
        output.write_str("</blockquote>\n");
    }

    fn header(&mut self, output: &mut Buffer, content: &Buffer, level: i32) {
        if self.toc_only {
            if level <= self.nesting_level {
                while let Some(&top) = self.toc_stack.last() {
                    if top > level {
                        self.toc_stack.pop();
                        output.write_str("</li>\n");
                        if !self.toc_stack.is_empty() {
                            output.write_str("</ul>\n");
                        }
                    } else {
                        break;
                    }
                }
                match self.toc_stack.last() {
                    Some(&top) if top == level => {
                        output.write_str("</li>\n");
                        self.toc_stack.pop();
                    }
                    Some(&top) if top < level => {
                        output.write_str("<ul>\n");
                    }
                    _ => {}
                }
                output.write_str(&format!("<li>\n<a href=\"#toc_{}\">", self.header_count));
                output.pipe(content);
                output.write_str("</a>\n");
                self.toc_stack.push(level);
                self.header_count += 1;
            }
            return;
        }
        output.write_str(&format!("<h{}>", level));
        output.pipe(content);
        output.write_str(&format!("</h{}>\n", level));
    }

    fn horizontal_rule(&mut self, output: &mut Buffer) {
        if self.toc_only {
            return;
        }
        let hr = self.xhtml_hr();
        output.write_str(hr);
    }

    fn list(&mut self, output: &mut Buffer, content: &Buffer, flags: list::List) {
        if self.toc_only {
            output.write_str("<ul>\n");
            output.pipe(content);
            output.write_str("</ul>\n");
            return;
        }
        let tag = if flags.contains(list::List::ORDERED) { "ol" } else { "ul" };
        output.write_str(&format!("<{}>\n", tag));
        output.pipe(content);
        output.write_str(&format!("</{}>\n", tag));
    }

    fn list_item(&mut self, output: &mut Buffer, content: &Buffer, flags: list::List) {
        if self.toc_only {
            output.write_str("<li>");
            output.pipe(content);
            output.write_str("</li>\n");
            return;
        }
        output.write_str("<li>");
        if flags.contains(list::List::BLOCK) {
            output.write_str("\n");
        }
        output.pipe(content);
        output.write_str("</li>\n");
    }

    fn paragraph(&mut self, output: &mut Buffer, content: &Buffer) {
        if self.toc_only {
            return;
        }
        output.write_str("<p>");
        output.pipe(content);
        output.write_str("</p>\n");
    }

    fn table(&mut self, output: &mut Buffer, header: &Buffer, body: &Buffer) {
        if self.toc_only {
            return;
        }
        output.write_str("<table>\n<thead>\n");
        output.pipe(header);
        output.write_str("</thead>\n\n<tbody>\n");
        output.pipe(body);
        output.write_str("</tbody>\n</table>\n");
    }

    fn table_row(&mut self, output: &mut Buffer, content: &Buffer) {
        if self.toc_only {
            return;
        }
        output.write_str("<tr>\n");
        output.pipe(content);
        output.write_str("</tr>\n");
    }

    fn table_cell(&mut self, output: &mut Buffer, content: &Buffer, flags: Table) {
        if self.toc_only {
            return;
        }
        let tag = if flags.contains(Table::HEADER) { "th" } else { "td" };
        output.write_str(&format!("<{}", tag));
        if flags.contains(Table::LEFT) && !flags.contains(Table::RIGHT) {
            output.write_str(" align=\"left\"");
        } else if flags.contains(Table::RIGHT) && !flags.contains(Table::LEFT) {
            output.write_str(" align=\"right\"");
        } else if flags.contains(Table::CENTER) {
            output.write_str(" align=\"center\"");
        }
        output.write_str(">");
        output.pipe(content);
        output.write_str(&format!("</{}>\n", tag));
    }

    fn footnotes(&mut self, output: &mut Buffer, content: &Buffer) {
        if self.toc_only {
            return;
        }
        output.write_str("<div class=\"footnotes\">\n<hr>\n<ol>\n");
        output.pipe(content);
        output.write_str("\n</ol>\n</div>\n");
    }

    fn footnote_definition(&mut self, output: &mut Buffer, content: &Buffer, num: u32) {
        if self.toc_only {
            return;
        }
        output.write_str(&format!("\n<li id=\"fn{}\">\n<p>", num));
        output.pipe(content);
        output.write_str(&format!(
            "&nbsp;<a href=\"#fnref{}\" rev=\"footnote\">&#8617;</a></p>\n</li>\n",
            num
        ));
    }

    fn html_block(&mut self, output: &mut Buffer, text: &Buffer) {
        if self.toc_only || self.flags.contains(Flags::SKIP_HTML) {
            return;
        }
        output.pipe(text);
    }

    fn autolink(&mut self, output: &mut Buffer, link: &Buffer, link_type: AutoLink) -> bool {
        if self.toc_only {
            return true;
        }
        output.write_str("<a href=\"");
        if matches!(link_type, AutoLink::Email) {
            output.write_str("mailto:");
        }
        escape_html(output, link.as_bytes());
        output.write_str("\">");
        escape_html(output, link.as_bytes());
        output.write_str("</a>");
        true
    }

    fn code_span(&mut self, output: &mut Buffer, text: &Buffer) -> bool {
        if self.toc_only {
            return true;
        }
        output.write_str("<code>");
        escape_html(output, text.as_bytes());
        output.write_str("</code>");
        true
    }

    fn double_emphasis(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        if self.toc_only {
            return true;
        }
        output.write_str("<strong>");
        output.pipe(content);
        output.write_str("</strong>");
        true
    }

    fn emphasis(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        if self.toc_only {
            return true;
        }
        output.write_str("<em>");
        output.pipe(content);
        output.write_str("</em>");
        true
    }

    fn underline(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        if self.toc_only {
            return true;
        }
        output.write_str("<u>");
        output.pipe(content);
        output.write_str("</u>");
        true
    }

    fn highlight(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        if self.toc_only {
            return true;
        }
        output.write_str("<mark>");
        output.pipe(content);
        output.write_str("</mark>");
        true
    }

    fn quote_span(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        if self.toc_only {
            return true;
        }
        output.write_str("<q>");
        output.pipe(content);
        output.write_str("</q>");
        true
    }

    fn image(&mut self, output: &mut Buffer, link: &Buffer, title: &Buffer, alt: &Buffer) -> bool {
        if self.toc_only {
            return true;
        }
        output.write_str("<img src=\"");
        escape_html(output, link.as_bytes());
        output.write_str("\" alt=\"");
        escape_html(output, alt.as_bytes());
        output.write_str("\"");
        if !title.is_empty() {
            output.write_str(" title=\"");
            escape_html(output, title.as_bytes());
            output.write_str("\"");
        }
        if self.flags.contains(Flags::USE_XHTML) {
            output.write_str("/>");
        } else {
            output.write_str(">");
        }
        true
    }

    fn line_break(&mut self, output: &mut Buffer) -> bool {
        if self.toc_only {
            return true;
        }
        let br = self.xhtml_br();
        output.write_str(br);
        output.write_str("\n");
        true
    }

    fn link(&mut self, output: &mut Buffer, content: &Buffer, link: &Buffer, title: &Buffer) -> bool {
        if self.toc_only {
            return true;
        }
        output.write_str("<a href=\"");
        escape_html(output, link.as_bytes());
        output.write_str("\"");
        if !title.is_empty() {
            output.write_str(" title=\"");
            escape_html(output, title.as_bytes());
            output.write_str("\"");
        }
        output.write_str(">");
        output.pipe(content);
        output.write_str("</a>");
        true
    }

    fn triple_emphasis(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        if self.toc_only {
            return true;
        }
        output.write_str("<strong><em>");
        output.pipe(content);
        output.write_str("</em></strong>");
        true
    }

    fn strikethrough(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        if self.toc_only {
            return true;
        }
        output.write_str("<del>");
        output.pipe(content);
        output.write_str("</del>");
        true
    }

    fn superscript(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        if self.toc_only {
            return true;
        }
        output.write_str("<sup>");
        output.pipe(content);
        output.write_str("</sup>");
        true
    }

    fn footnote_reference(&mut self, output: &mut Buffer, num: u32) -> bool {
        if self.toc_only {
            return true;
        }
        output.write_str(&format!(
            "<sup id=\"fnref{0}\"><a href=\"#fn{0}\" rel=\"footnote\">{0}</a></sup>",
            num
        ));
        true
    }

    fn html_span(&mut self, output: &mut Buffer, text: &Buffer) -> bool {
        if self.toc_only {
            return true;
        }
        if self.flags.contains(Flags::SKIP_HTML) {
            return true;
        }
        if self.flags.contains(Flags::ESCAPE) {
            escape_html(output, text.as_bytes());
        } else {
            output.pipe(text);
        }
        true
    }

    fn entity(&mut self, output: &mut Buffer, text: &Buffer) {
        if self.toc_only {
            return;
        }
        output.pipe(text);
    }

    fn normal_text(&mut self, output: &mut Buffer, text: &Buffer) {
        if self.toc_only {
            return;
        }
        if self.flags.contains(Flags::HARD_WRAP) {
            for (i, line) in text.as_bytes().split(|&b| b == b'\n').enumerate() {
                if i > 0 {
                    output.write_str(self.xhtml_br());
                    output.write_str("\n");
                }
                escape_html(output, line);
            }
        } else {
            escape_html(output, text.as_bytes());
        }
    }

    fn before_render(&mut self, output: &mut Buffer, _inline_render: bool) {
        if self.toc_only {
            output.write_str("<ul>\n");
        }
    }

    fn after_render(&mut self, output: &mut Buffer, _inline_render: bool) {
        if self.toc_only {
            while self.toc_stack.pop().is_some() {
                output.write_str("</li>\n");
                if !self.toc_stack.is_empty() {
                    output.write_str("</ul>\n");
                }
            }
            output.write_str("</ul>\n");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_reserved_characters() {
        let mut out = Buffer::new(16);
        escape_html(&mut out, b"<a & b> \"c\" 'd'");
        assert_eq!(
            out.as_str().unwrap(),
            "&lt;a &amp; b&gt; &quot;c&quot; &#39;d&#39;"
        );
    }

    #[test]
    fn emphasis_wraps_in_em_tag() {
        let input = Buffer::from("EMPHASIZE");
        let mut output = Buffer::new(64);
        let mut html_renderer = Html::new(Flags::empty(), 0);
        html_renderer.emphasis(&mut output, &input);
        assert_eq!(output.to_str().unwrap(), "<em>EMPHASIZE</em>");
    }

    #[test]
    fn smartypants_converts_ellipsis_and_dashes() {
        let input = Buffer::from("wait... ok -- no --- really");
        let mut output = Buffer::new(64);
        smartypants(&input, &mut output);
        assert_eq!(
            output.to_str().unwrap(),
            "wait&hellip; ok &ndash; no &mdash; really"
        );
    }
}
