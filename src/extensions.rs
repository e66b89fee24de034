//! Extension flags controlling which non-core constructs the parser
//! recognizes.

use bitflags::bitflags;

bitflags! {
    /// Constants for the various extensions the parser can be configured
    /// with. None are enabled by default.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Extension: u32 {
        // block-level

        /// Process table syntax
        const TABLES                  = 1 << 0;

        /// Process fenced code
        const FENCED_CODE             = 1 << 1;

        /// Process footnotes
        const FOOTNOTES               = 1 << 2;

        // span-level

        /// Automatically link URLs, emails, and (with `SHORT_DOMAIN_AUTOLINKS`) bare domains
        const AUTOLINK                = 1 << 3;

        /// Enable strikethrough syntax, e.g. `~~strike one~~`
        const STRIKETHROUGH           = 1 << 4;

        /// Perform an underline instead of emphasis when using `_`
        const UNDERLINE               = 1 << 5;

        /// Process highlight syntax, e.g. `==highlight me==`
        const HIGHLIGHT               = 1 << 6;

        /// Render quotes differently, e.g. the html renderer may use the `<q>` tag
        const QUOTE                   = 1 << 7;

        /// Process superscript syntax, e.g. `2^3 = 8`
        const SUPERSCRIPT              = 1 << 8;

        // other flags

        /// Don't parse emphasis inside of words, e.g. `foo_bar_baz` won't emphasize the 'bar'
        const NO_INTRA_EMPHASIS       = 1 << 11;

        /// Relax the space requirement before an ATX header's `#` sequence
        const SPACE_HEADERS           = 1 << 12;

        /// Loosen paragraph-termination rules: a list marker, HTML block, or
        /// code fence also ends the current paragraph
        const LAX_SPACING             = 1 << 13;

        /// Recognize bare domains without a scheme (`www.example.com`) as autolinks
        const SHORT_DOMAIN_AUTOLINKS  = 1 << 15;

        // negative flags

        /// Ignore indented code blocks
        const DISABLE_INDENTED_CODE   = 1 << 14;
    }
}
