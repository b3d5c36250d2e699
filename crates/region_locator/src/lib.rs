// crates/region_locator/src/lib.rs

//! Anchor-based region lookup.
//!
//! A *region* is the span of a document that starts at the first occurrence of
//! a start anchor and runs up to (not including) the next occurrence of an end
//! anchor. Every lookup either returns a validated span or a typed
//! [`LocateError`]; a missing anchor never turns into a sentinel offset.

use std::ops::Range;

mod error;

pub use error::{AnchorRole, LocateError};

/// A located, non-empty span of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region<'d> {
    start: usize,
    end: usize,
    raw: &'d str,
}

impl<'d> Region<'d> {
    /// Byte offset of the start anchor.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset of the end anchor (exclusive bound of the region).
    pub fn end(&self) -> usize {
        self.end
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The region text, start anchor included, end anchor excluded.
    pub fn raw(&self) -> &'d str {
        self.raw
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Always `false` for a region produced by [`locate`].
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Returns the byte offset of the first `needle` at or after `from`.
///
/// Returns `None` when `from` is past the end of `haystack` or not on a char
/// boundary, which callers treat as "not found".
pub fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    haystack
        .get(from..)
        .and_then(|tail| tail.find(needle))
        .map(|idx| from + idx)
}

/// Finds the region delimited by `start_anchor` and `end_anchor`.
///
/// The start anchor is searched at or after `search_from`; the end anchor is
/// searched after the start anchor, so the returned region always begins with
/// the complete start anchor and is never empty.
pub fn locate<'d>(
    document: &'d str,
    start_anchor: &str,
    end_anchor: &str,
    search_from: usize,
) -> Result<Region<'d>, LocateError> {
    if start_anchor.is_empty() {
        return Err(LocateError::EmptyAnchor(AnchorRole::Start));
    }
    if end_anchor.is_empty() {
        return Err(LocateError::EmptyAnchor(AnchorRole::End));
    }
    if document.get(search_from..).is_none() {
        return Err(LocateError::SearchStartOutOfBounds {
            search_from,
            document_len: document.len(),
        });
    }

    let start = find_from(document, start_anchor, search_from).ok_or_else(|| {
        LocateError::AnchorNotFound {
            anchor: start_anchor.to_string(),
            role: AnchorRole::Start,
            search_from,
            document_len: document.len(),
        }
    })?;

    let end_search = start + start_anchor.len();
    let end = find_from(document, end_anchor, end_search).ok_or_else(|| {
        LocateError::AnchorNotFound {
            anchor: end_anchor.to_string(),
            role: AnchorRole::End,
            search_from: end_search,
            document_len: document.len(),
        }
    })?;

    log::debug!(
        "located region {:?}..{:?} at bytes {}..{}",
        start_anchor,
        end_anchor,
        start,
        end
    );

    Ok(Region {
        start,
        end,
        raw: &document[start..end],
    })
}

/// Returns the part of the region between the first `inner_start` marker and
/// the *last* `inner_end` marker that follows it.
///
/// Taking the last end marker keeps nested look-alike closers inside the body.
pub fn extract_inner_body<'d>(
    region: &Region<'d>,
    inner_start: &str,
    inner_end: &str,
) -> Result<&'d str, LocateError> {
    if inner_start.is_empty() {
        return Err(LocateError::EmptyAnchor(AnchorRole::Start));
    }
    if inner_end.is_empty() {
        return Err(LocateError::EmptyAnchor(AnchorRole::End));
    }

    let raw = region.raw();
    let (_, rest) = raw
        .split_once(inner_start)
        .ok_or_else(|| LocateError::MarkerNotFound {
            marker: inner_start.to_string(),
            role: AnchorRole::Start,
            region_start: region.start(),
        })?;
    let (body, _) = rest
        .rsplit_once(inner_end)
        .ok_or_else(|| LocateError::MarkerNotFound {
            marker: inner_end.to_string(),
            role: AnchorRole::End,
            region_start: region.start(),
        })?;
    Ok(body)
}
