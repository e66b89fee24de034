use hoedown::renderer::html::Html;
use hoedown::renderer::{self, Render};
use hoedown::{Buffer, Extension, Markdown};

use std::io::Write;

/// Wraps the stock `Html` renderer, overriding `emphasis` to use squiggly
/// markers instead of `<em>` while delegating every other callback it cares
/// about to the inner renderer.
struct EmphasisWrapper {
    html: Html,
}

impl Render for EmphasisWrapper {
    fn paragraph(&mut self, output: &mut Buffer, content: &Buffer) {
        self.html.paragraph(output, content);
    }

    fn double_emphasis(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        self.html.double_emphasis(output, content)
    }

    fn emphasis(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        output.write_str("~~");
        output.pipe(content);
        output.write_str("~~");
        true
    }
}

struct BlockRenderer;

impl Render for BlockRenderer {
    fn paragraph(&mut self, ob: &mut Buffer, content: &Buffer) {
        ob.pipe(content);
    }

    fn code_block(&mut self, output: &mut Buffer, input: &Buffer, language: &Buffer) {
        let s = format!(
            "[CODE_BLOCK language={}] {}",
            language.to_str().unwrap_or(""),
            input.to_str().unwrap_or("")
        );
        output.write(s.as_bytes()).unwrap();
    }

    fn html_block(&mut self, output: &mut Buffer, input: &Buffer) {
        let s = format!("[HTML_BLOCK] {}", input.to_str().unwrap_or(""));
        output.write(s.as_bytes()).unwrap();
    }

    fn quote_block(&mut self, output: &mut Buffer, content: &Buffer) {
        let s = format!("[QUOTE_BLOCK] {}", content.to_str().unwrap_or(""));
        output.write(s.as_bytes()).unwrap();
    }

    fn header(&mut self, output: &mut Buffer, input: &Buffer, level: i32) {
        let s = format!("[HEADER level={}] {}", level, input.to_str().unwrap_or(""));
        output.write(s.as_bytes()).unwrap();
    }

    fn horizontal_rule(&mut self, output: &mut Buffer) {
        output.write(b"[HORIZONTAL_RULE]").unwrap();
    }

    fn list(&mut self, output: &mut Buffer, input: &Buffer, list_flags: renderer::list::List) {
        let is_ordered = list_flags.contains(renderer::list::List::ORDERED);
        let s = format!("[LIST ordered={}]\n{}", is_ordered, input.to_str().unwrap_or(""));
        output.write(s.as_bytes()).unwrap();
    }

    fn list_item(&mut self, output: &mut Buffer, input: &Buffer, list_flags: renderer::list::List) {
        let is_ordered = list_flags.contains(renderer::list::List::ORDERED);
        let s = format!("[LISTITEM ordered={}] {}\n", is_ordered, input.to_str().unwrap_or(""));
        output.write(s.as_bytes()).unwrap();
    }

    fn table(&mut self, output: &mut Buffer, header: &Buffer, body: &Buffer) {
        let s = format!(
            "[TABLE]\n[TABLE_HEADER]{}\n[TABLE_BODY]{}",
            header.to_str().unwrap_or(""),
            body.to_str().unwrap_or("")
        );
        output.write(s.as_bytes()).unwrap();
    }

    fn table_row(&mut self, output: &mut Buffer, content: &Buffer) {
        let s = format!("\n[TABLE_ROW]\n{}", content.to_str().unwrap_or(""));
        output.write(s.as_bytes()).unwrap();
    }

    fn table_cell(&mut self, output: &mut Buffer, content: &Buffer, _flags: renderer::Table) {
        let s = format!("[TABLE_CELL text={}]", content.to_str().unwrap_or(""));
        output.write(s.as_bytes()).unwrap();
    }
}

struct DocRenderer;

impl Render for DocRenderer {
    fn paragraph(&mut self, ob: &mut Buffer, content: &Buffer) {
        ob.pipe(content);
    }

    fn before_render(&mut self, output: &mut Buffer, _inline_render: bool) {
        output.write(b"One.\n").unwrap();
    }

    fn after_render(&mut self, output: &mut Buffer, _inline_render: bool) {
        output.write(b"\nFive.").unwrap();
    }
}

struct FootnotesRenderer;

impl Render for FootnotesRenderer {
    fn paragraph(&mut self, ob: &mut Buffer, content: &Buffer) {
        ob.pipe(content);
    }

    fn footnotes(&mut self, output: &mut Buffer, content: &Buffer) {
        let s = format!("[FOOTNOTES]\n{}", content.to_str().unwrap_or(""));
        output.write(s.as_bytes()).unwrap();
    }

    fn footnote_definition(&mut self, output: &mut Buffer, content: &Buffer, number: u32) {
        let s = format!("[FOOTNOTE_DEFINITION #{}] {}", number, content.to_str().unwrap_or(""));
        output.write(s.as_bytes()).unwrap();
    }

    fn footnote_reference(&mut self, output: &mut Buffer, number: u32) -> bool {
        let s = format!("[FOOTNOTE_REFERENCE #{}]", number);
        output.write(s.as_bytes()).unwrap();
        true
    }
}

struct LowLevelRenderer;

impl Render for LowLevelRenderer {
    fn paragraph(&mut self, ob: &mut Buffer, content: &Buffer) {
        ob.pipe(content);
    }

    fn entity(&mut self, output: &mut Buffer, content: &Buffer) {
        let s = format!("[ENTITY] {}", content.to_str().unwrap_or(""));
        output.write(s.as_bytes()).unwrap();
    }

    fn normal_text(&mut self, output: &mut Buffer, content: &Buffer) {
        let s = format!("[NORMAL_TEXT] {}", content.to_str().unwrap_or(""));
        output.write(s.as_bytes()).unwrap();
    }
}

struct ParagraphRenderer;

impl Render for ParagraphRenderer {
    fn paragraph(&mut self, output: &mut Buffer, content: &Buffer) {
        let s = format!("[PARAGRAPH] {}", content.to_str().unwrap_or(""));
        output.write(s.as_bytes()).unwrap();
    }
}

struct SpanRenderer;

impl Render for SpanRenderer {
    fn paragraph(&mut self, ob: &mut Buffer, content: &Buffer) {
        ob.pipe(content);
    }

    fn line_break(&mut self, output: &mut Buffer) -> bool {
        output.write(b"[LINE_BREAK]").unwrap();
        true
    }

    fn autolink(&mut self, output: &mut Buffer, content: &Buffer, link_type: renderer::AutoLink) -> bool {
        let s = format!("[AUTOLINK type={:?}] {}", link_type, content.to_str().unwrap_or(""));
        output.write(s.as_bytes()).unwrap();
        true
    }

    fn code_span(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        let s = format!("[CODE_SPAN] {}", content.to_str().unwrap_or(""));
        output.write(s.as_bytes()).unwrap();
        true
    }

    fn double_emphasis(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        let s = format!("[DOUBLE_EMPHASIS] {}", content.to_str().unwrap_or(""));
        output.write(s.as_bytes()).unwrap();
        true
    }

    fn emphasis(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        let s = format!("[EMPHASIS] {}", content.to_str().unwrap_or(""));
        output.write(s.as_bytes()).unwrap();
        true
    }

    fn highlight(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        let s = format!("[HIGHLIGHT] {}", content.to_str().unwrap_or(""));
        output.write(s.as_bytes()).unwrap();
        true
    }

    fn image(&mut self, output: &mut Buffer, link: &Buffer, title: &Buffer, alt: &Buffer) -> bool {
        let s = format!(
            "[IMAGE link={} title={} alt={}]",
            link.to_str().unwrap_or(""),
            title.to_str().unwrap_or(""),
            alt.to_str().unwrap_or("")
        );
        output.write(s.as_bytes()).unwrap();
        true
    }

    fn link(&mut self, output: &mut Buffer, content: &Buffer, link: &Buffer, title: &Buffer) -> bool {
        let s = format!(
            "[LINK link={} title={}] {}",
            link.to_str().unwrap_or(""),
            title.to_str().unwrap_or(""),
            content.to_str().unwrap_or("")
        );
        output.write(s.as_bytes()).unwrap();
        true
    }

    fn quote_span(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        let s = format!("[QUOTE] {}", content.to_str().unwrap_or(""));
        output.write(s.as_bytes()).unwrap();
        true
    }

    fn html_span(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        let s = format!("[HTML_SPAN] {}", content.to_str().unwrap_or(""));
        output.write(s.as_bytes()).unwrap();
        true
    }

    fn strikethrough(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        let s = format!("[STRIKETHROUGH] {}", content.to_str().unwrap_or(""));
        output.write(s.as_bytes()).unwrap();
        true
    }

    fn superscript(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        let s = format!("[SUPERSCRIPT] {}", content.to_str().unwrap_or(""));
        output.write(s.as_bytes()).unwrap();
        true
    }

    fn triple_emphasis(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        let s = format!("[TRIPLE_EMPHASIS] {}", content.to_str().unwrap_or(""));
        output.write(s.as_bytes()).unwrap();
        true
    }
}

struct UnderlineRenderer;

impl Render for UnderlineRenderer {
    fn paragraph(&mut self, ob: &mut Buffer, content: &Buffer) {
        ob.pipe(content);
    }

    fn underline(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        let s = format!("[UNDERLINE] {}", content.to_str().unwrap_or(""));
        output.write(s.as_bytes()).unwrap();
        true
    }
}

macro_rules! renderer_test {
    ($renderer:expr => $left:expr, $right:expr) => ({
        renderer_test!($renderer, Extension::empty() => $left, $right);
    });

    ($renderer:expr, $flags:expr => $left:expr, $right:expr) => ({
        let mut renderer = $renderer;
        let doc = Markdown::new($left.as_bytes()).extensions($flags);

        let output = renderer.render(&doc);

        assert_eq!(output.to_str().unwrap(), $right);
    })
}

#[test]
fn test_emphasis_wrapper() {
    let doc = Markdown::new(b"something _EMPHASIZED_ **hehe**");
    let mut wrapper = EmphasisWrapper {
        html: Html::new(hoedown::renderer::html::Flags::empty(), 0),
    };

    let output = wrapper.render(&doc);

    assert_eq!(
        output.to_str().unwrap(),
        "<p>something ~~EMPHASIZED~~ <strong>hehe</strong></p>\n"
    );
}

#[test]
fn test_doc_header_and_footer() {
    renderer_test!(DocRenderer =>
       "Two.",
       "One.\nTwo.\nFive.");
}

#[test]
fn test_blockcode() {
    renderer_test!(BlockRenderer, Extension::FENCED_CODE =>
        "```bash\n$ :(){ :|:& };:\n```",
        "[CODE_BLOCK language=bash] $ :(){ :|:& };:");
}

#[test]
fn test_blockcode_empty_lang() {
    renderer_test!(BlockRenderer, Extension::FENCED_CODE =>
        "```\n$ :(){ :|:& };:\n```",
        "[CODE_BLOCK language=] $ :(){ :|:& };:");
}

#[test]
fn test_blockhtml() {
    renderer_test!(BlockRenderer =>
        "<p>Hi.</p>",
        "[HTML_BLOCK] <p>Hi.</p>");
}

#[test]
fn test_blockquote() {
    renderer_test!(BlockRenderer =>
        "> Echo.",
        "[QUOTE_BLOCK] Echo.");
}

#[test]
fn test_footnotes() {
    renderer_test!(FootnotesRenderer, Extension::FOOTNOTES =>
        "What you looking at? [^1]\n\n[^1]: Yeah, I'm talking to you pal.",
"What you looking at? [FOOTNOTE_REFERENCE #1][FOOTNOTES]
[FOOTNOTE_DEFINITION #1] Yeah, I'm talking to you pal.");
}

#[test]
fn test_header() {
    renderer_test!(BlockRenderer =>
        "## One more to go.",
        "[HEADER level=2] One more to go.");
}

#[test]
fn test_horizontal_rule() {
    renderer_test!(BlockRenderer =>
        "---",
        "[HORIZONTAL_RULE]");
}

#[test]
fn test_list_ordered() {
    renderer_test!(BlockRenderer =>
        "1. Ehh\n2. Bee\n3. Eee",
"[LIST ordered=true]
[LISTITEM ordered=true] Ehh
[LISTITEM ordered=true] Bee
[LISTITEM ordered=true] Eee
");
}

#[test]
fn test_list_unordered() {
    renderer_test!(BlockRenderer =>
        "+ One\n+ Two\n+ Five",
"[LIST ordered=false]
[LISTITEM ordered=false] One
[LISTITEM ordered=false] Two
[LISTITEM ordered=false] Five
");
}

#[test]
fn test_paragraph() {
    renderer_test!(ParagraphRenderer =>
        "One might say this is soul sucking...",
        "[PARAGRAPH] One might say this is soul sucking...");
}

#[test]
fn test_table() {
    renderer_test!(BlockRenderer, Extension::TABLES =>
"|  1  |  2  |  3  |
| --- | --- | --- |
|  X  |  X  |  O  |
|  O  |  O  |  X  |
|  X  |  O  |  X  |
",

"[TABLE]
[TABLE_HEADER]
[TABLE_ROW]
[TABLE_CELL text=1][TABLE_CELL text=2][TABLE_CELL text=3]
[TABLE_BODY]
[TABLE_ROW]
[TABLE_CELL text=X][TABLE_CELL text=X][TABLE_CELL text=O]
[TABLE_ROW]
[TABLE_CELL text=O][TABLE_CELL text=O][TABLE_CELL text=X]
[TABLE_ROW]
[TABLE_CELL text=X][TABLE_CELL text=O][TABLE_CELL text=X]");
}

#[test]
fn test_autolink() {
    renderer_test!(SpanRenderer, Extension::AUTOLINK =>
        "https://github.com/",
        "[AUTOLINK type=Normal] https://github.com/");
}

#[test]
fn test_code_span() {
    renderer_test!(SpanRenderer =>
        "`$ rm -Rf tests/`",
        "[CODE_SPAN] $ rm -Rf tests/");
}

#[test]
fn test_double_emphasis() {
    renderer_test!(SpanRenderer =>
        "__strong__",
        "[DOUBLE_EMPHASIS] strong");
}

#[test]
fn test_emphasis() {
    renderer_test!(SpanRenderer =>
        "_wat_",
        "[EMPHASIS] wat");
}

#[test]
fn test_highlight() {
    renderer_test!(SpanRenderer, Extension::HIGHLIGHT =>
        "==blink==",
        "[HIGHLIGHT] blink");
}

#[test]
fn test_image() {
    renderer_test!(SpanRenderer =>
        "![spacer](spacer.gif \"the spacer\")",
        "[IMAGE link=spacer.gif title=the spacer alt=spacer]");
}

#[test]
fn test_line_break() {
    renderer_test!(SpanRenderer =>
        "So.  \nTired.",
        "So.[LINE_BREAK]Tired.");
}

#[test]
fn test_link() {
    renderer_test!(SpanRenderer =>
        "[GitHub](https://github.com/ \"repo\")",
        "[LINK link=https://github.com/ title=repo] GitHub");
}

#[test]
fn test_quote_span() {
    renderer_test!(SpanRenderer, Extension::QUOTE =>
        "\"Air quotes are obnoxious.\"",
        "[QUOTE] Air quotes are obnoxious.");
}

#[test]
fn test_html_span() {
    renderer_test!(SpanRenderer =>
        "<halp/>",
        "[HTML_SPAN] <halp/>");
}

#[test]
fn test_strikethrough() {
    renderer_test!(SpanRenderer, Extension::STRIKETHROUGH =>
        "I'm ~~running~~ out of ideas.",
        "I'm [STRIKETHROUGH] running out of ideas.");
}

#[test]
fn test_superscript() {
    renderer_test!(SpanRenderer, Extension::SUPERSCRIPT =>
        "^bro",
        "[SUPERSCRIPT] bro");
}

#[test]
fn test_triple_emphasis() {
    renderer_test!(SpanRenderer =>
        "Triple emphasis? That's ___absurd___.",
        "Triple emphasis? That's [TRIPLE_EMPHASIS] absurd.");
}

#[test]
fn test_underline() {
    renderer_test!(UnderlineRenderer, Extension::UNDERLINE =>
        "That's _it_?",
        "That's [UNDERLINE] it?");
}

#[test]
fn test_low_level() {
    renderer_test!(LowLevelRenderer =>
        "&#9731;",
        "[ENTITY] &#9731;");
}
