use crate::buffer::Buffer;
use super::Render;

/// This renderer implements none of the callbacks itself, relying entirely
/// on `Render`'s default "MISSING ... HANDLER" block markers and pass-through
/// span behavior. Useful for seeing at a glance which constructs a document
/// actually exercises.
pub struct Trace;

impl Render for Trace {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Markdown;

    #[test]
    fn marks_unhandled_blocks() {
        let doc = Markdown::new(b"# hi\n");
        let output = doc.render_to_buffer(Trace);
        assert_eq!(output.as_str().unwrap(), "MISSING HEADER HANDLER\n");
    }
}
