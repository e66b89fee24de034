//! Contains the Closures renderer
#![allow(non_camel_case_types)]
use crate::buffer::Buffer;
use super::{list, AutoLink, Render, Table};

mod types {
    use crate::buffer::Buffer;
    use super::{list as list_mod, AutoLink, Table};

    pub type code_block<'a> = Box<dyn FnMut(&mut Buffer, &Buffer, &Buffer) + 'a>;
    pub type quote_block<'a> = Box<dyn FnMut(&mut Buffer, &Buffer) + 'a>;
    pub type header<'a> = Box<dyn FnMut(&mut Buffer, &Buffer, i32) + 'a>;
    pub type horizontal_rule<'a> = Box<dyn FnMut(&mut Buffer) + 'a>;
    pub type list<'a> = Box<dyn FnMut(&mut Buffer, &Buffer, list_mod::List) + 'a>;
    pub type list_item<'a> = Box<dyn FnMut(&mut Buffer, &Buffer, list_mod::List) + 'a>;
    pub type paragraph<'a> = Box<dyn FnMut(&mut Buffer, &Buffer) + 'a>;
    pub type table<'a> = Box<dyn FnMut(&mut Buffer, &Buffer, &Buffer) + 'a>;
    pub type table_row<'a> = Box<dyn FnMut(&mut Buffer, &Buffer) + 'a>;
    pub type table_cell<'a> = Box<dyn FnMut(&mut Buffer, &Buffer, Table) + 'a>;
    pub type footnotes<'a> = Box<dyn FnMut(&mut Buffer, &Buffer) + 'a>;
    pub type footnote_definition<'a> = Box<dyn FnMut(&mut Buffer, &Buffer, u32) + 'a>;
    pub type html_block<'a> = Box<dyn FnMut(&mut Buffer, &Buffer) + 'a>;

    pub type autolink<'a> = Box<dyn FnMut(&mut Buffer, &Buffer, AutoLink) -> bool + 'a>;
    pub type code_span<'a> = Box<dyn FnMut(&mut Buffer, &Buffer) -> bool + 'a>;
    pub type double_emphasis<'a> = Box<dyn FnMut(&mut Buffer, &Buffer) -> bool + 'a>;
    pub type emphasis<'a> = Box<dyn FnMut(&mut Buffer, &Buffer) -> bool + 'a>;
    pub type underline<'a> = Box<dyn FnMut(&mut Buffer, &Buffer) -> bool + 'a>;
    pub type highlight<'a> = Box<dyn FnMut(&mut Buffer, &Buffer) -> bool + 'a>;
    pub type quote<'a> = Box<dyn FnMut(&mut Buffer, &Buffer) -> bool + 'a>;
    pub type image<'a> = Box<dyn FnMut(&mut Buffer, &Buffer, &Buffer, &Buffer) -> bool + 'a>;
    pub type line_break<'a> = Box<dyn FnMut(&mut Buffer) -> bool + 'a>;
    pub type link<'a> = Box<dyn FnMut(&mut Buffer, &Buffer, &Buffer, &Buffer) -> bool + 'a>;
    pub type triple_emphasis<'a> = Box<dyn FnMut(&mut Buffer, &Buffer) -> bool + 'a>;
    pub type strikethrough<'a> = Box<dyn FnMut(&mut Buffer, &Buffer) -> bool + 'a>;
    pub type superscript<'a> = Box<dyn FnMut(&mut Buffer, &Buffer) -> bool + 'a>;
    pub type footnote_reference<'a> = Box<dyn FnMut(&mut Buffer, u32) -> bool + 'a>;
    pub type html_span<'a> = Box<dyn FnMut(&mut Buffer, &Buffer) -> bool + 'a>;

    pub type entity<'a> = Box<dyn FnMut(&mut Buffer, &Buffer) + 'a>;
    pub type normal_text<'a> = Box<dyn FnMut(&mut Buffer, &Buffer) + 'a>;

    pub type before_render<'a> = Box<dyn FnMut(&mut Buffer, i32) + 'a>;
    pub type after_render<'a> = Box<dyn FnMut(&mut Buffer, i32) + 'a>;
}

/// A renderer whose behavior is defined by closures.
///
/// This renderer is meant for quick, one-off renderers.
/// Handlers are passed to this type in the form of closures.
///
///``` rust
///# use hoedown::Markdown;
///# use hoedown::renderer::closures::Closures;
///# use hoedown::buffer::Buffer;
///let mut closures = Closures::new();
///
///closures.on_paragraph(|output: &mut Buffer, content: &Buffer| {
///    output.pipe(content);
///});
///
///closures.on_emphasis(|output: &mut Buffer, content: &Buffer| -> bool {
///    output.write_str("~~");
///    output.pipe(content);
///    output.write_str("~~");
///    true
///});
///
///let doc = Markdown::new("this _requires_ emphasis".as_bytes());
///let output = doc.render_to_buffer(closures);
///
///assert_eq!(output.as_str().unwrap(), "this ~~requires~~ emphasis");
///```
#[derive(Default)]
pub struct Closures<'a> {
    code_block: Option<types::code_block<'a>>,
    quote_block: Option<types::quote_block<'a>>,
    header: Option<types::header<'a>>,
    horizontal_rule: Option<types::horizontal_rule<'a>>,
    list: Option<types::list<'a>>,
    list_item: Option<types::list_item<'a>>,
    paragraph: Option<types::paragraph<'a>>,
    table: Option<types::table<'a>>,
    table_row: Option<types::table_row<'a>>,
    table_cell: Option<types::table_cell<'a>>,
    footnotes: Option<types::footnotes<'a>>,
    footnote_definition: Option<types::footnote_definition<'a>>,
    html_block: Option<types::html_block<'a>>,

    autolink: Option<types::autolink<'a>>,
    code_span: Option<types::code_span<'a>>,
    double_emphasis: Option<types::double_emphasis<'a>>,
    emphasis: Option<types::emphasis<'a>>,
    underline: Option<types::underline<'a>>,
    highlight: Option<types::highlight<'a>>,
    quote: Option<types::quote<'a>>,
    image: Option<types::image<'a>>,
    line_break: Option<types::line_break<'a>>,
    link: Option<types::link<'a>>,
    triple_emphasis: Option<types::triple_emphasis<'a>>,
    strikethrough: Option<types::strikethrough<'a>>,
    superscript: Option<types::superscript<'a>>,
    footnote_reference: Option<types::footnote_reference<'a>>,
    html_span: Option<types::html_span<'a>>,

    entity: Option<types::entity<'a>>,
    normal_text: Option<types::normal_text<'a>>,

    before_render: Option<types::before_render<'a>>,
    after_render: Option<types::after_render<'a>>,
}

impl<'a> Closures<'a> {
    pub fn new() -> Closures<'a> {
        Closures::default()
    }
}

impl<'a> Render for Closures<'a> {
    fn code_block(&mut self, output: &mut Buffer, text: &Buffer, lang: &Buffer) {
        if let Some(ref mut func) = self.code_block {
            func(output, text, lang);
        } else {
            output.write_str("MISSING CODE_BLOCK HANDLER\n");
        }
    }

    fn quote_block(&mut self, output: &mut Buffer, content: &Buffer) {
        if let Some(ref mut func) = self.quote_block {
            func(output, content);
        } else {
            output.write_str("MISSING QUOTE_BLOCK HANDLER\n");
        }
    }

    fn header(&mut self, output: &mut Buffer, content: &Buffer, level: i32) {
        if let Some(ref mut func) = self.header {
            func(output, content, level);
        } else {
            output.write_str("MISSING HEADER HANDLER\n");
        }
    }

    fn horizontal_rule(&mut self, output: &mut Buffer) {
        if let Some(ref mut func) = self.horizontal_rule {
            func(output);
        } else {
            output.write_str("MISSING HORIZONTAL_RULE HANDLER\n");
        }
    }

    fn list(&mut self, output: &mut Buffer, content: &Buffer, flags: list::List) {
        if let Some(ref mut func) = self.list {
            func(output, content, flags);
        } else {
            output.write_str("MISSING LIST HANDLER\n");
        }
    }

    fn list_item(&mut self, output: &mut Buffer, content: &Buffer, flags: list::List) {
        if let Some(ref mut func) = self.list_item {
            func(output, content, flags);
        } else {
            output.write_str("MISSING LIST_ITEM HANDLER\n");
        }
    }

    fn paragraph(&mut self, output: &mut Buffer, content: &Buffer) {
        if let Some(ref mut func) = self.paragraph {
            func(output, content);
        } else {
            output.write_str("MISSING PARAGRAPH HANDLER\n");
        }
    }

    fn table(&mut self, output: &mut Buffer, header: &Buffer, body: &Buffer) {
        if let Some(ref mut func) = self.table {
            func(output, header, body);
        } else {
            output.write_str("MISSING TABLE HANDLER\n");
        }
    }

    fn table_row(&mut self, output: &mut Buffer, content: &Buffer) {
        if let Some(ref mut func) = self.table_row {
            func(output, content);
        } else {
            output.write_str("MISSING TABLE_ROW HANDLER\n");
        }
    }

    fn table_cell(&mut self, output: &mut Buffer, content: &Buffer, flags: Table) {
        if let Some(ref mut func) = self.table_cell {
            func(output, content, flags);
        } else {
            output.write_str("MISSING TABLE_CELL HANDLER\n");
        }
    }

    fn footnotes(&mut self, output: &mut Buffer, content: &Buffer) {
        if let Some(ref mut func) = self.footnotes {
            func(output, content);
        } else {
            output.write_str("MISSING FOOTNOTES HANDLER\n");
        }
    }

    fn footnote_definition(&mut self, output: &mut Buffer, content: &Buffer, num: u32) {
        if let Some(ref mut func) = self.footnote_definition {
            func(output, content, num);
        } else {
            output.write_str("MISSING FOOTNOTE_DEFINITION HANDLER\n");
        }
    }

    fn html_block(&mut self, output: &mut Buffer, text: &Buffer) {
        if let Some(ref mut func) = self.html_block {
            func(output, text);
        } else {
            output.write_str("MISSING HTML_BLOCK HANDLER\n");
        }
    }

    fn autolink(&mut self, output: &mut Buffer, link: &Buffer, ty: AutoLink) -> bool {
        if let Some(ref mut func) = self.autolink {
            func(output, link, ty)
        } else {
            false
        }
    }

    fn code_span(&mut self, output: &mut Buffer, text: &Buffer) -> bool {
        if let Some(ref mut func) = self.code_span {
            func(output, text)
        } else {
            false
        }
    }

    fn double_emphasis(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        if let Some(ref mut func) = self.double_emphasis {
            func(output, content)
        } else {
            false
        }
    }

    fn emphasis(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        if let Some(ref mut func) = self.emphasis {
            func(output, content)
        } else {
            false
        }
    }

    fn underline(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        if let Some(ref mut func) = self.underline {
            func(output, content)
        } else {
            false
        }
    }

    fn highlight(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        if let Some(ref mut func) = self.highlight {
            func(output, content)
        } else {
            false
        }
    }

    fn quote_span(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        if let Some(ref mut func) = self.quote {
            func(output, content)
        } else {
            false
        }
    }

    fn image(&mut self, output: &mut Buffer, link: &Buffer, title: &Buffer, alt: &Buffer) -> bool {
        if let Some(ref mut func) = self.image {
            func(output, link, title, alt)
        } else {
            false
        }
    }

    fn line_break(&mut self, output: &mut Buffer) -> bool {
        if let Some(ref mut func) = self.line_break {
            func(output)
        } else {
            false
        }
    }

    fn link(&mut self, output: &mut Buffer, content: &Buffer, link: &Buffer, title: &Buffer) -> bool {
        if let Some(ref mut func) = self.link {
            func(output, content, link, title)
        } else {
            false
        }
    }

    fn triple_emphasis(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        if let Some(ref mut func) = self.triple_emphasis {
            func(output, content)
        } else {
            false
        }
    }

    fn strikethrough(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        if let Some(ref mut func) = self.strikethrough {
            func(output, content)
        } else {
            false
        }
    }

    fn superscript(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        if let Some(ref mut func) = self.superscript {
            func(output, content)
        } else {
            false
        }
    }

    fn footnote_reference(&mut self, output: &mut Buffer, num: u32) -> bool {
        if let Some(ref mut func) = self.footnote_reference {
            func(output, num)
        } else {
            false
        }
    }

    fn html_span(&mut self, output: &mut Buffer, text: &Buffer) -> bool {
        if let Some(ref mut func) = self.html_span {
            func(output, text)
        } else {
            false
        }
    }

    fn entity(&mut self, output: &mut Buffer, text: &Buffer) {
        if let Some(ref mut func) = self.entity {
            func(output, text);
        } else {
            output.pipe(text);
        }
    }

    fn normal_text(&mut self, output: &mut Buffer, text: &Buffer) {
        if let Some(ref mut func) = self.normal_text {
            func(output, text);
        } else {
            output.pipe(text);
        }
    }

    fn before_render(&mut self, output: &mut Buffer, inline_render: bool) {
        if let Some(ref mut func) = self.before_render {
            func(output, inline_render as i32);
        }
    }

    fn after_render(&mut self, output: &mut Buffer, inline_render: bool) {
        if let Some(ref mut func) = self.after_render {
            func(output, inline_render as i32);
        }
    }
}

impl<'a> Closures<'a> {
    pub fn on_code_block<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer, &Buffer) + 'a {
        self.code_block = Some(Box::new(closure));
    }

    pub fn on_quote_block<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer) + 'a {
        self.quote_block = Some(Box::new(closure));
    }

    pub fn on_header<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer, i32) + 'a {
        self.header = Some(Box::new(closure));
    }

    pub fn on_horizontal_rule<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer) + 'a {
        self.horizontal_rule = Some(Box::new(closure));
    }

    pub fn on_list<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer, list::List) + 'a {
        self.list = Some(Box::new(closure));
    }

    pub fn on_list_item<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer, list::List) + 'a {
        self.list_item = Some(Box::new(closure));
    }

    pub fn on_paragraph<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer) + 'a {
        self.paragraph = Some(Box::new(closure));
    }

    pub fn on_table<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer, &Buffer) + 'a {
        self.table = Some(Box::new(closure));
    }

    pub fn on_table_row<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer) + 'a {
        self.table_row = Some(Box::new(closure));
    }

    pub fn on_table_cell<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer, Table) + 'a {
        self.table_cell = Some(Box::new(closure));
    }

    pub fn on_footnotes<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer) + 'a {
        self.footnotes = Some(Box::new(closure));
    }

    pub fn on_footnote_definition<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer, u32) + 'a {
        self.footnote_definition = Some(Box::new(closure));
    }

    pub fn on_html_block<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer) + 'a {
        self.html_block = Some(Box::new(closure));
    }

    pub fn on_autolink<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer, AutoLink) -> bool + 'a {
        self.autolink = Some(Box::new(closure));
    }

    pub fn on_code_span<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer) -> bool + 'a {
        self.code_span = Some(Box::new(closure));
    }

    pub fn on_double_emphasis<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer) -> bool + 'a {
        self.double_emphasis = Some(Box::new(closure));
    }

    pub fn on_emphasis<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer) -> bool + 'a {
        self.emphasis = Some(Box::new(closure));
    }

    pub fn on_underline<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer) -> bool + 'a {
        self.underline = Some(Box::new(closure));
    }

    pub fn on_highlight<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer) -> bool + 'a {
        self.highlight = Some(Box::new(closure));
    }

    pub fn on_quote<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer) -> bool + 'a {
        self.quote = Some(Box::new(closure));
    }

    pub fn on_image<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer, &Buffer, &Buffer) -> bool + 'a {
        self.image = Some(Box::new(closure));
    }

    pub fn on_line_break<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer) -> bool + 'a {
        self.line_break = Some(Box::new(closure));
    }

    pub fn on_link<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer, &Buffer, &Buffer) -> bool + 'a {
        self.link = Some(Box::new(closure));
    }

    pub fn on_triple_emphasis<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer) -> bool + 'a {
        self.triple_emphasis = Some(Box::new(closure));
    }

    pub fn on_strikethrough<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer) -> bool + 'a {
        self.strikethrough = Some(Box::new(closure));
    }

    pub fn on_superscript<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer) -> bool + 'a {
        self.superscript = Some(Box::new(closure));
    }

    pub fn on_footnote_reference<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, u32) -> bool + 'a {
        self.footnote_reference = Some(Box::new(closure));
    }

    pub fn on_html_span<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer) -> bool + 'a {
        self.html_span = Some(Box::new(closure));
    }

    pub fn on_entity<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer) + 'a {
        self.entity = Some(Box::new(closure));
    }

    pub fn on_normal_text<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, &Buffer) + 'a {
        self.normal_text = Some(Box::new(closure));
    }

    pub fn on_before_render<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, i32) + 'a {
        self.before_render = Some(Box::new(closure));
    }

    pub fn on_after_render<F>(&mut self, closure: F)
    where F: FnMut(&mut Buffer, i32) + 'a {
        self.after_render = Some(Box::new(closure));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Markdown;

    #[test]
    fn custom_emphasis_closure_overrides_default() {
        let mut closures = Closures::new();

        closures.on_paragraph(|output: &mut Buffer, content: &Buffer| {
            output.pipe(content);
        });

        closures.on_emphasis(|output: &mut Buffer, content: &Buffer| -> bool {
            output.write_str("~~");
            output.pipe(content);
            output.write_str("~~");
            true
        });

        let doc = Markdown::new(b"this _requires_ emphasis");
        let output = doc.render_to_buffer(closures);

        assert_eq!(output.as_str().unwrap(), "this ~~requires~~ emphasis");
    }
}
