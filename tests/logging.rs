//! Smoke test for the driver's `log` instrumentation. Run with
//! `RUST_LOG=trace cargo test --test logging -- --nocapture` to see the
//! pass-boundary and block-dispatch trace output.

use hoedown::renderer::html;
use hoedown::{Extension, Markdown};

#[test]
fn render_emits_log_records_without_panicking() {
    let _ = env_logger::try_init();

    let doc = Markdown::new(
        b"# Title\n\n\
          A paragraph with a [link](https://example.com) and a footnote[^1].\n\n\
          [^1]: the footnote body.\n",
    )
    .extensions(Extension::FOOTNOTES);
    let renderer = html::Html::new(html::Flags::empty(), 0);

    let output = doc.render_to_buffer(renderer);

    assert!(output.to_str().unwrap().contains("<h1>Title</h1>"));
}
