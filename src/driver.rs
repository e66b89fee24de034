//! Driver (C8): orchestrates the two-pass parse and owns the state shared
//! by the block, inline, link, and table scanners for the duration of a
//! single render.

use log::{debug, trace};

use crate::buffer::Buffer;
use crate::extensions::Extension;
use crate::markdown::Markdown;
use crate::pool::Pool;
use crate::preprocess::preprocess;
use crate::refs::{FootnoteList, RefTable};
use crate::renderer::Render;
use crate::{block, inline};

/// Parser state threaded through a single render: the renderer callbacks
/// are invoked on a separately-passed `&mut R`, but everything else a
/// recognizer needs — reference tables, the footnote lists, the buffer
/// pool, the active extension set, and the nesting limit — lives here.
pub struct State {
    pub extensions: Extension,
    pub max_nesting: usize,
    pub refs: RefTable,
    pub footnotes: FootnoteList,
    pub pool: Pool,
    /// Suppresses autolinking while rendering the text of a link, matching
    /// the original implementation's rule against links-inside-links.
    pub in_link_body: bool,
}

impl State {
    pub fn new(extensions: Extension, max_nesting: usize) -> State {
        State {
            extensions,
            max_nesting,
            refs: RefTable::new(),
            footnotes: FootnoteList::new(),
            pool: Pool::new(),
            in_link_body: false,
        }
    }

    /// True once the combined block/span pool depth has reached the
    /// configured limit; callers use this to bail out of recursion rather
    /// than rendering an over-deep construct.
    pub fn at_nesting_limit(&self) -> bool {
        let at_limit = self.pool.depth() >= self.max_nesting;
        if at_limit {
            trace!("nesting limit reached at pool depth {}, rejecting construct", self.pool.depth());
        }
        at_limit
    }
}

pub fn render<R: Render + ?Sized>(renderer: &mut R, input: &Markdown, output: &mut Buffer, inline_render: bool) {
    let mut state = State::new(input.extensions, input.max_nesting.max(1));

    if inline_render {
        trace!("inline-only render over {} bytes", input.contents.len());
        renderer.before_render(output, true);
        inline::parse_inline(&mut state, renderer, input.contents.as_bytes(), output);
        renderer.after_render(output, true);
        debug_assert!(state.pool.is_empty());
        return;
    }

    debug!(
        "starting render: {} bytes, extensions={:?}, max_nesting={}",
        input.contents.len(),
        state.extensions,
        state.max_nesting
    );

    let pre = preprocess(input.contents.as_bytes(), input.extensions);
    trace!(
        "preprocess done: {} refs, {} footnote definitions found",
        pre.refs.len(),
        pre.footnotes.found_len()
    );
    state.refs = pre.refs;
    state.footnotes = pre.footnotes;

    renderer.before_render(output, false);

    block::parse_blocks(&mut state, renderer, pre.text.as_bytes(), output);

    if state.extensions.contains(Extension::FOOTNOTES) && !state.footnotes.is_empty() {
        trace!("rendering footnote tail: {} used", state.footnotes.used_len());
        let notes: Vec<(u32, Buffer)> = state
            .footnotes
            .used()
            .into_iter()
            .map(|note| (note.num, note.body.clone()))
            .collect();

        let mut tail = Buffer::new(256);
        for (num, source) in notes {
            let mut body = Buffer::new(256);
            block::parse_blocks(&mut state, renderer, source.as_bytes(), &mut body);
            renderer.footnote_definition(&mut tail, &body, num);
        }
        renderer.footnotes(output, &tail);
    }

    renderer.after_render(output, false);

    debug_assert!(state.pool.is_empty(), "buffer pool was not fully released");
    debug!("render complete: {} bytes out", output.len());
}
