// crates/document_splice/src/substitute.rs

use std::ops::Range;

use crate::{preview, SpliceError};

/// Replace the text under `span` (which must still read `search_text`) with
/// `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub span: Range<usize>,
    pub search_text: String,
    pub replacement: String,
}

/// Result of applying a set of directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spliced {
    pub document: String,
    /// Where each replacement landed in the new document, in directive order.
    pub inserted: Vec<Range<usize>>,
}

/// Replaces exactly the byte ranges named by `directives`.
///
/// Nothing outside the spans is touched, so a copy of a region's text that
/// happens to appear elsewhere in the document survives unchanged.
pub fn substitute_at(document: &str, directives: &[Directive]) -> Result<Spliced, SpliceError> {
    for directive in directives {
        let span = directive.span.clone();
        let current = document
            .get(span.clone())
            .ok_or_else(|| SpliceError::SpanOutOfBounds {
                span: span.clone(),
                document_len: document.len(),
            })?;
        if current != directive.search_text {
            return Err(SpliceError::StaleSpan {
                span,
                preview: preview(&directive.search_text),
            });
        }
    }

    let mut order: Vec<usize> = (0..directives.len()).collect();
    order.sort_by_key(|&i| directives[i].span.start);
    for pair in order.windows(2) {
        let (a, b) = (&directives[pair[0]].span, &directives[pair[1]].span);
        if b.start < a.end {
            return Err(SpliceError::OverlappingSpans {
                first: a.clone(),
                second: b.clone(),
            });
        }
    }

    let mut out = String::with_capacity(document.len());
    let mut inserted = vec![0..0; directives.len()];
    let mut cursor = 0;
    for &i in &order {
        let directive = &directives[i];
        out.push_str(&document[cursor..directive.span.start]);
        let start = out.len();
        out.push_str(&directive.replacement);
        inserted[i] = start..out.len();
        cursor = directive.span.end;
        log::debug!(
            "replaced bytes {:?} ({} -> {} bytes)",
            directive.span,
            directive.span.len(),
            directive.replacement.len()
        );
    }
    out.push_str(&document[cursor..]);

    Ok(Spliced {
        document: out,
        inserted,
    })
}

/// Replaces the single occurrence of `search` with `replacement`.
///
/// Refuses to run when `search` is absent or occurs more than once, instead of
/// rewriting every copy.
pub fn substitute_exact(
    document: &str,
    search: &str,
    replacement: &str,
) -> Result<(String, Range<usize>), SpliceError> {
    if search.is_empty() {
        return Err(SpliceError::EmptySearchText);
    }
    let mut hits = document.match_indices(search).map(|(idx, _)| idx);
    let start = hits.next().ok_or_else(|| SpliceError::SubstitutionTargetMissing {
        preview: preview(search),
    })?;
    let extra = hits.count();
    if extra > 0 {
        return Err(SpliceError::NonUniqueSubstitutionTarget {
            preview: preview(search),
            count: extra + 1,
        });
    }

    let mut out = String::with_capacity(document.len() - search.len() + replacement.len());
    out.push_str(&document[..start]);
    out.push_str(replacement);
    let inserted = start..out.len();
    out.push_str(&document[start + search.len()..]);
    Ok((out, inserted))
}
