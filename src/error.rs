//! Errors surfaced at the crate's outer boundary.
//!
//! The parser itself never fails: every recognizer falls back to literal
//! text on a syntactic mismatch, and the only hard limit (`max_nesting`) is
//! enforced by silently dropping the over-deep construct. `Error` exists for
//! the handful of operations that sit outside that model, such as reading a
//! document from an arbitrary `Read` or converting rendered output to `str`.

use std::io;
use std::str::Utf8Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read markdown source")]
    Io(#[from] io::Error),

    #[error("rendered output was not valid utf-8")]
    Utf8(#[from] Utf8Error),

    #[error("table row has {found} cells, expected {expected}")]
    InconsistentColumns { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
