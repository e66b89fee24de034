//! A native markdown processor. It has a `Markdown` type which stores
//! markdown text in a `Buffer`. The markdown can then be rendered with any
//! renderer that implements the `Render` trait. The library comes with an
//! `Html` renderer by default.
//!
//!``` rust
//!# use hoedown::Markdown;
//!# use hoedown::renderer::html::{self, Html};
//!let doc = Markdown::new("some _emphasis_ required".as_bytes());
//!let html = Html::new(html::Flags::empty(), 0);
//!
//!assert_eq!(
//!    doc.render_to_buffer(html).to_str().unwrap(),
//!    "<p>some <em>emphasis</em> required</p>\n");
//!```

mod autolink;
mod block;
pub mod buffer;
mod driver;
pub mod error;
mod extensions;
mod html_blocks;
mod inline;
mod link;
mod markdown;
mod pool;
mod preprocess;
pub mod renderer;
mod refs;
mod table;

pub use buffer::Buffer;
pub use error::{Error, Result};
pub use extensions::*;
pub use markdown::Markdown;
pub use renderer::Render;
pub use table::TableBuilder;
