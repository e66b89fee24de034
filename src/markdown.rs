use std::io::Read;

use crate::buffer::Buffer;
use crate::error::{Error, Result};
use crate::extensions::Extension;
use crate::renderer::Render;

/// A markdown document: the raw contents plus the extension set and nesting
/// limit that a render should use. Rendering itself lives on the `Render`
/// trait, not here; `Markdown` is inert data describing what to parse and
/// how.
#[derive(Clone)]
pub struct Markdown {
    pub contents: Buffer,
    pub extensions: Extension,
    pub max_nesting: usize,
}

impl Markdown {
    pub fn new(body: &[u8]) -> Markdown {
        Markdown::from(body)
    }

    /// Construct a markdown document from a given reader.
    ///
    /// By default it enables no extensions and sets the maximum block
    /// depth to parse at 16. This may be changed with the `extensions`
    /// and `max_nesting` builder methods.
    ///
    /// Note that `Buffer` also implements `Read`, so it can be used with
    /// this method.
    pub fn read_from<R: Read>(reader: R) -> Result<Markdown> {
        let contents = Buffer::read_from(reader).map_err(Error::Io)?;
        Ok(Markdown::from(contents))
    }

    /// Builder method to specify extensions.
    pub fn extensions(mut self, extensions: Extension) -> Markdown {
        self.extensions = extensions;
        self
    }

    /// Builder method to specify the maximum block depth to parse.
    pub fn max_nesting(mut self, max_nesting: usize) -> Markdown {
        self.max_nesting = max_nesting;
        self
    }

    /// Renders this document with `renderer`, returning a fresh buffer.
    pub fn render_to_buffer<R: Render>(&self, mut renderer: R) -> Buffer {
        renderer.render(self)
    }

    /// Renders this document with `renderer` into `output`.
    pub fn render_into<R: Render>(&self, mut renderer: R, output: &mut Buffer) {
        renderer.render_to(self, output)
    }

    /// Renders this document as a single inline span with `renderer`,
    /// returning a fresh buffer. Skips the block pass entirely.
    pub fn render_inline_to_buffer<R: Render>(&self, mut renderer: R) -> Buffer {
        renderer.render_inline(self)
    }

    /// Renders this document as a single inline span with `renderer` into
    /// `output`.
    pub fn render_inline_into<R: Render>(&self, mut renderer: R, output: &mut Buffer) {
        renderer.render_inline_to(self, output)
    }
}

impl Default for Markdown {
    fn default() -> Markdown {
        Markdown {
            contents: Buffer::new(64),
            extensions: Extension::empty(),
            max_nesting: 16,
        }
    }
}

impl From<Buffer> for Markdown {
    fn from(buffer: Buffer) -> Markdown {
        Markdown {
            contents: buffer,
            ..Markdown::default()
        }
    }
}

impl<'a> From<&'a [u8]> for Markdown {
    fn from(bytes: &'a [u8]) -> Markdown {
        Markdown::from(Buffer::from(bytes))
    }
}

impl<'a> From<&'a str> for Markdown {
    fn from(s: &'a str) -> Markdown {
        Markdown::from(s.as_bytes())
    }
}
