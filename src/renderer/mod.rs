//! Contains the `Render` trait and stock renderers.

use crate::buffer::Buffer;
use crate::driver;
use crate::markdown::Markdown;

/// Renderer behavior.
///
/// Types that implement this trait can be used to render a `Markdown`
/// document. All methods have default implementations that can be
/// overridden as needed, depending on which callbacks the implementer is
/// interested in.
///
/// The default implementations attempt to be as neutral as possible, with
/// the exception of the block callbacks: a default block handler writes a
/// marker into the output so that gaps in a custom renderer are obvious
/// during development, rather than silently skipping the block.
///
///| Type  | Action                                       |
///| :---- | :------                                      |
///| block | write "MISSING <callback> HANDLER" to output |
///| span  | pass through markdown to output              |
///| rest  | pass through content to output               |
///
/// Below is an example of a custom renderer that collects emphasis elements
/// into a vector that can then be inspected after rendering.
///
///``` rust
///# use hoedown::Markdown;
///# use hoedown::renderer::{Render, html};
///# use hoedown::buffer::Buffer;
///struct EmphCollector {
///    html: html::Html,
///    emphs: Vec<String>,
///}
///
///impl EmphCollector {
///    fn new() -> EmphCollector {
///        EmphCollector {
///            html: html::Html::new(html::Flags::empty(), 0),
///            emphs: vec![],
///        }
///    }
///}
///
///impl Render for EmphCollector {
///    fn paragraph(&mut self, ob: &mut Buffer, content: &Buffer) {
///        ob.pipe(content);
///    }
///
///    fn emphasis(&mut self, ob: &mut Buffer, content: &Buffer) -> bool {
///        self.emphs.push(content.as_str().unwrap().to_string());
///        self.html.emphasis(ob, content)
///    }
///}
///
///let doc = Markdown::new("this _one_ that _two_".as_bytes());
///let mut collector = EmphCollector::new();
///let output = doc.render_to_buffer(&mut collector);
///
///assert_eq!(collector.emphs, vec!["one".to_string(), "two".to_string()]);
///assert_eq!("this <em>one</em> that <em>two</em>", output.as_str().unwrap());
///```
#[allow(unused_variables)]
pub trait Render {
    /// Renders `input` to a freshly allocated buffer.
    fn render(&mut self, input: &Markdown) -> Buffer {
        let mut output = Buffer::new(input.contents.len() + input.contents.len() / 2 + 64);
        self.render_to(input, &mut output);
        output
    }

    /// Renders `input` into `output`.
    fn render_to(&mut self, input: &Markdown, output: &mut Buffer) {
        driver::render(self, input, output, false);
    }

    /// Renders `input` as a single inline span to a freshly allocated
    /// buffer, skipping the block pass.
    fn render_inline(&mut self, input: &Markdown) -> Buffer {
        let mut output = Buffer::new(input.contents.len() + 64);
        self.render_inline_to(input, &mut output);
        output
    }

    /// Renders `input` as a single inline span into `output`, skipping the
    /// block pass.
    fn render_inline_to(&mut self, input: &Markdown, output: &mut Buffer) {
        driver::render(self, input, output, true);
    }

    // block-level: not registered = emit a marker

    /// An indented or fenced code block. `lang` is empty for indented code,
    /// or when a fenced block names no language.
    fn code_block(&mut self, output: &mut Buffer, text: &Buffer, lang: &Buffer) {
        output.write_str("MISSING CODE_BLOCK HANDLER\n");
    }

    fn quote_block(&mut self, output: &mut Buffer, content: &Buffer) {
        output.write_str("MISSING QUOTE_BLOCK HANDLER\n");
    }

    fn header(&mut self, output: &mut Buffer, content: &Buffer, level: i32) {
        output.write_str("MISSING HEADER HANDLER\n");
    }

    fn horizontal_rule(&mut self, output: &mut Buffer) {
        output.write_str("MISSING HORIZONTAL_RULE HANDLER\n");
    }

    fn list(&mut self, output: &mut Buffer, content: &Buffer, flags: list::List) {
        output.write_str("MISSING LIST HANDLER\n");
    }

    fn list_item(&mut self, output: &mut Buffer, content: &Buffer, flags: list::List) {
        output.write_str("MISSING LIST_ITEM HANDLER\n");
    }

    fn paragraph(&mut self, output: &mut Buffer, content: &Buffer) {
        output.write_str("MISSING PARAGRAPH HANDLER\n");
    }

    /// Only runs if the `TABLES` extension is enabled.
    fn table(&mut self, output: &mut Buffer, header: &Buffer, body: &Buffer) {
        output.write_str("MISSING TABLE HANDLER\n");
    }

    fn table_row(&mut self, output: &mut Buffer, content: &Buffer) {
        output.write_str("MISSING TABLE_ROW HANDLER\n");
    }

    fn table_cell(&mut self, output: &mut Buffer, content: &Buffer, flags: Table) {
        output.write_str("MISSING TABLE_CELL HANDLER\n");
    }

    /// Only runs if the `FOOTNOTES` extension is enabled, and only if at
    /// least one footnote was actually cited.
    fn footnotes(&mut self, output: &mut Buffer, content: &Buffer) {
        output.write_str("MISSING FOOTNOTES HANDLER\n");
    }

    fn footnote_definition(&mut self, output: &mut Buffer, content: &Buffer, num: u32) {
        output.write_str("MISSING FOOTNOTE_DEFINITION HANDLER\n");
    }

    fn html_block(&mut self, output: &mut Buffer, text: &Buffer) {
        output.write_str("MISSING HTML_BLOCK HANDLER\n");
    }

    // span-level: not registered = pass-through (treat as unhandled, literal)

    /// Only runs if the `AUTOLINK` extension is enabled.
    fn autolink(&mut self, output: &mut Buffer, link: &Buffer, link_type: AutoLink) -> bool {
        false
    }

    fn code_span(&mut self, output: &mut Buffer, text: &Buffer) -> bool {
        false
    }

    /// `**double emphasis**`
    fn double_emphasis(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        false
    }

    fn emphasis(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        false
    }

    /// Only runs if the `UNDERLINE` extension is enabled.
    fn underline(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        false
    }

    /// Only runs if the `HIGHLIGHT` extension is enabled.
    fn highlight(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        false
    }

    /// Only runs if the `QUOTE` extension is enabled.
    fn quote_span(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        false
    }

    /// `![alt](link title)`
    fn image(&mut self, output: &mut Buffer, link: &Buffer, title: &Buffer, alt: &Buffer) -> bool {
        false
    }

    fn line_break(&mut self, output: &mut Buffer) -> bool {
        false
    }

    /// `[content](link title)`
    fn link(&mut self, output: &mut Buffer, content: &Buffer, link: &Buffer, title: &Buffer) -> bool {
        false
    }

    /// `***strongly emphasized***`
    fn triple_emphasis(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        false
    }

    /// Only runs if the `STRIKETHROUGH` extension is enabled.
    fn strikethrough(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        false
    }

    /// Only runs if the `SUPERSCRIPT` extension is enabled.
    fn superscript(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        false
    }

    /// Only runs if the `FOOTNOTES` extension is enabled.
    fn footnote_reference(&mut self, output: &mut Buffer, num: u32) -> bool {
        false
    }

    fn html_span(&mut self, output: &mut Buffer, text: &Buffer) -> bool {
        false
    }

    // low-level: not registered = pass-through

    fn entity(&mut self, output: &mut Buffer, text: &Buffer) {
        output.pipe(text);
    }

    fn normal_text(&mut self, output: &mut Buffer, text: &Buffer) {
        output.pipe(text);
    }

    // document lifecycle

    fn before_render(&mut self, output: &mut Buffer, inline_render: bool) {}
    fn after_render(&mut self, output: &mut Buffer, inline_render: bool) {}
}

impl<'a, R: Render + ?Sized> Render for &'a mut R {
    fn code_block(&mut self, output: &mut Buffer, text: &Buffer, lang: &Buffer) {
        (**self).code_block(output, text, lang)
    }
    fn quote_block(&mut self, output: &mut Buffer, content: &Buffer) {
        (**self).quote_block(output, content)
    }
    fn header(&mut self, output: &mut Buffer, content: &Buffer, level: i32) {
        (**self).header(output, content, level)
    }
    fn horizontal_rule(&mut self, output: &mut Buffer) {
        (**self).horizontal_rule(output)
    }
    fn list(&mut self, output: &mut Buffer, content: &Buffer, flags: list::List) {
        (**self).list(output, content, flags)
    }
    fn list_item(&mut self, output: &mut Buffer, content: &Buffer, flags: list::List) {
        (**self).list_item(output, content, flags)
    }
    fn paragraph(&mut self, output: &mut Buffer, content: &Buffer) {
        (**self).paragraph(output, content)
    }
    fn table(&mut self, output: &mut Buffer, header: &Buffer, body: &Buffer) {
        (**self).table(output, header, body)
    }
    fn table_row(&mut self, output: &mut Buffer, content: &Buffer) {
        (**self).table_row(output, content)
    }
    fn table_cell(&mut self, output: &mut Buffer, content: &Buffer, flags: Table) {
        (**self).table_cell(output, content, flags)
    }
    fn footnotes(&mut self, output: &mut Buffer, content: &Buffer) {
        (**self).footnotes(output, content)
    }
    fn footnote_definition(&mut self, output: &mut Buffer, content: &Buffer, num: u32) {
        (**self).footnote_definition(output, content, num)
    }
    fn html_block(&mut self, output: &mut Buffer, text: &Buffer) {
        (**self).html_block(output, text)
    }
    fn autolink(&mut self, output: &mut Buffer, link: &Buffer, link_type: AutoLink) -> bool {
        (**self).autolink(output, link, link_type)
    }
    fn code_span(&mut self, output: &mut Buffer, text: &Buffer) -> bool {
        (**self).code_span(output, text)
    }
    fn double_emphasis(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        (**self).double_emphasis(output, content)
    }
    fn emphasis(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        (**self).emphasis(output, content)
    }
    fn underline(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        (**self).underline(output, content)
    }
    fn highlight(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        (**self).highlight(output, content)
    }
    fn quote_span(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        (**self).quote_span(output, content)
    }
    fn image(&mut self, output: &mut Buffer, link: &Buffer, title: &Buffer, alt: &Buffer) -> bool {
        (**self).image(output, link, title, alt)
    }
    fn line_break(&mut self, output: &mut Buffer) -> bool {
        (**self).line_break(output)
    }
    fn link(&mut self, output: &mut Buffer, content: &Buffer, link: &Buffer, title: &Buffer) -> bool {
        (**self).link(output, content, link, title)
    }
    fn triple_emphasis(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        (**self).triple_emphasis(output, content)
    }
    fn strikethrough(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        (**self).strikethrough(output, content)
    }
    fn superscript(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        (**self).superscript(output, content)
    }
    fn footnote_reference(&mut self, output: &mut Buffer, num: u32) -> bool {
        (**self).footnote_reference(output, num)
    }
    fn html_span(&mut self, output: &mut Buffer, text: &Buffer) -> bool {
        (**self).html_span(output, text)
    }
    fn entity(&mut self, output: &mut Buffer, text: &Buffer) {
        (**self).entity(output, text)
    }
    fn normal_text(&mut self, output: &mut Buffer, text: &Buffer) {
        (**self).normal_text(output, text)
    }
    fn before_render(&mut self, output: &mut Buffer, inline_render: bool) {
        (**self).before_render(output, inline_render)
    }
    fn after_render(&mut self, output: &mut Buffer, inline_render: bool) {
        (**self).after_render(output, inline_render)
    }
}

/// Flags that describe a list or list item.
pub mod list {
    use bitflags::bitflags;

    bitflags! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct List: u32 {
            /// An ordered list or list item
            const ORDERED = 1 << 0;
            /// A list item that contains a block (the list is "loose")
            const BLOCK   = 1 << 1;
        }
    }
}

bitflags::bitflags! {
    /// Table cell alignment, plus whether the cell is in the header row.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Table: u32 {
        const LEFT   = 1 << 0;
        const RIGHT  = 1 << 1;
        const CENTER = Self::LEFT.bits() | Self::RIGHT.bits();
        const HEADER = 1 << 2;
    }
}

/// The kind of an autolink candidate. `None` is the enum's sentinel/default
/// value; only `Normal` and `Email` are ever passed to `Render::autolink`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoLink {
    #[default]
    None,
    Normal,
    Email,
}

pub mod closures;
pub mod html;
pub mod trace;
