// crates/document_splice/src/lib.rs

//! In-memory edits of a document: replacing located spans, the uniqueness
//! checked text substitution fallback, the best-effort duplicate block removal
//! and appending generated declarations.

use std::ops::Range;
use thiserror::Error;

mod cleanup;
mod substitute;

pub use cleanup::{append_units, remove_duplicate_block};
pub use substitute::{substitute_at, substitute_exact, Directive, Spliced};

/// Errors raised by the substitution strategies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpliceError {
    #[error("spans {first:?} and {second:?} overlap")]
    OverlappingSpans {
        first: Range<usize>,
        second: Range<usize>,
    },

    #[error("span {span:?} is outside the document (length {document_len}) or splits a character")]
    SpanOutOfBounds {
        span: Range<usize>,
        document_len: usize,
    },

    /// The text under a span no longer matches what was located there.
    #[error("span {span:?} no longer holds the located text starting with {preview:?}")]
    StaleSpan { span: Range<usize>, preview: String },

    #[error("substitution target starting with {preview:?} occurs {count} times; refusing to replace all of them")]
    NonUniqueSubstitutionTarget { preview: String, count: usize },

    #[error("substitution target starting with {preview:?} does not occur in the document")]
    SubstitutionTargetMissing { preview: String },

    #[error("substitution target must not be empty")]
    EmptySearchText,
}

/// First line of `text`, shortened for error messages.
pub(crate) fn preview(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or("");
    let mut out: String = first_line.chars().take(48).collect();
    if out.len() < first_line.len() {
        out.push('…');
    }
    out
}
