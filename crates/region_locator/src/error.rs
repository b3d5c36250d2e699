// crates/region_locator/src/error.rs

use std::fmt;
use thiserror::Error;

/// Which end of a span an anchor or marker was supposed to delimit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorRole {
    Start,
    End,
}

impl fmt::Display for AnchorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnchorRole::Start => f.write_str("start"),
            AnchorRole::End => f.write_str("end"),
        }
    }
}

/// Failures while locating regions and slicing their inner bodies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocateError {
    /// A required anchor is absent from the search window `[search_from, len)`.
    #[error("{role} anchor {anchor:?} not found in document window {search_from}..{document_len}")]
    AnchorNotFound {
        anchor: String,
        role: AnchorRole,
        search_from: usize,
        document_len: usize,
    },

    /// An inner-body marker is absent from an otherwise located region.
    #[error("{role} marker {marker:?} not found inside region starting at byte {region_start}")]
    MarkerNotFound {
        marker: String,
        role: AnchorRole,
        region_start: usize,
    },

    #[error("search start {search_from} is outside the document (length {document_len}) or not on a char boundary")]
    SearchStartOutOfBounds {
        search_from: usize,
        document_len: usize,
    },

    #[error("{0} anchor must not be empty")]
    EmptyAnchor(AnchorRole),
}
