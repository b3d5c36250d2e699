// crates/document_splice/src/cleanup.rs

use std::ops::Range;

use region_locator::locate;

/// Deletes the first block delimited by `start_anchor` .. `end_anchor` found at
/// or after `search_from`. The end anchor itself is kept.
///
/// This pass is optional: when either anchor is missing (or `search_from` is
/// past the end of the document) the document is returned unchanged and the
/// removed range is `None`. At most one block is removed per call.
pub fn remove_duplicate_block(
    document: &str,
    start_anchor: &str,
    end_anchor: &str,
    search_from: usize,
) -> (String, Option<Range<usize>>) {
    match locate(document, start_anchor, end_anchor, search_from) {
        Ok(block) => {
            log::debug!("removing duplicate block at bytes {:?}", block.span());
            let mut out = String::with_capacity(document.len() - block.len());
            out.push_str(&document[..block.start()]);
            out.push_str(&document[block.end()..]);
            (out, Some(block.span()))
        }
        Err(err) => {
            log::debug!("duplicate block absent, skipping: {}", err);
            (document.to_string(), None)
        }
    }
}

/// Appends each declaration to the end of the document, in the given order.
pub fn append_units<I, S>(document: &str, declarations: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = document.to_string();
    for declaration in declarations {
        out.push_str(declaration.as_ref());
    }
    out
}
