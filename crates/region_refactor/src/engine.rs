// crates/region_refactor/src/engine.rs

use std::ops::Range;

use document_splice::{
    append_units, remove_duplicate_block, substitute_at, substitute_exact, Directive,
};
use region_locator::{extract_inner_body, locate};
use unit_wrapper::{
    declared_identifiers, render_header, render_invocation, wrap_as_unit, NamedUnit, UnitStyle,
};

use crate::config::{RefactorConfig, Strategy};
use crate::RefactorError;

/// What a run did to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every unit is already declared in the document; nothing to do.
    AlreadyApplied,
    Transformed(Transformation),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformation {
    pub document: String,
    /// Generated units, in the order they were appended.
    pub units: Vec<NamedUnit>,
    /// Byte range (in the substituted document) of the removed duplicate block.
    pub duplicate_removed: Option<Range<usize>>,
}

/// Runs the full transformation on `document` in memory.
///
/// Regions are located against the original document. Any locate, extract or
/// validation failure aborts before the first substitution.
pub fn run(config: &RefactorConfig, document: &str) -> Result<Outcome, RefactorError> {
    config.validate()?;
    let style = config.style.unit_style();

    if is_already_applied(config, document, &style) {
        log::info!("all units are already declared; leaving document unchanged");
        return Ok(Outcome::AlreadyApplied);
    }

    let mut located = Vec::with_capacity(config.regions.len());
    for spec in &config.regions {
        let region = locate(document, &spec.start, &spec.end, spec.search_from).map_err(
            |source| RefactorError::Locate {
                region: spec.name.clone(),
                source,
            },
        )?;
        let body = extract_inner_body(&region, &spec.inner_start, &spec.inner_end).map_err(
            |source| RefactorError::Locate {
                region: spec.name.clone(),
                source,
            },
        )?;
        located.push((spec, region, body));
    }

    let scope = match &config.scope {
        Some(scope) => scope.clone(),
        None => {
            let spans: Vec<Range<usize>> = located.iter().map(|(_, region, _)| region.span()).collect();
            derive_scope(document, spans)
        }
    };

    let mut units = Vec::with_capacity(located.len());
    let mut directives = Vec::with_capacity(located.len());
    for (spec, region, body) in located {
        let unit = wrap_as_unit(&spec.unit, &spec.parameters, body, &scope, &style).map_err(
            |source| RefactorError::Unit {
                region: spec.name.clone(),
                source,
            },
        )?;

        let replacement = format!(
            "{}\n{}{}\n",
            spec.start,
            spec.indent,
            render_invocation(&unit, &spec.condition, &style)
        );
        log::debug!(
            "region {} -> unit {} (bytes {:?})",
            spec.name,
            unit.name(),
            region.span()
        );
        directives.push(Directive {
            span: region.span(),
            search_text: region.raw().to_string(),
            replacement,
        });
        units.push(unit);
    }

    let (substituted, inserted) = match config.strategy {
        Strategy::Offset => {
            let spliced = substitute_at(document, &directives)?;
            (spliced.document, spliced.inserted)
        }
        Strategy::Exact => substitute_all_exact(document, &directives)?,
    };

    let (cleaned, duplicate_removed) = match &config.duplicate {
        Some(duplicate) => {
            let resume = duplicate
                .search_from
                .unwrap_or_else(|| inserted.iter().map(|r| r.end).max().unwrap_or(0));
            remove_duplicate_block(&substituted, &duplicate.start, &duplicate.end, resume)
        }
        None => (substituted, None),
    };

    let document = append_units(&cleaned, units.iter().map(NamedUnit::declaration));
    Ok(Outcome::Transformed(Transformation {
        document,
        units,
        duplicate_removed,
    }))
}

fn is_already_applied(config: &RefactorConfig, document: &str, style: &UnitStyle) -> bool {
    config
        .regions
        .iter()
        .all(|spec| document.contains(&render_header(&spec.unit, &spec.parameters, style)))
}

/// Names declared in `document` outside every region: the bindings a region
/// body can see at its original site.
fn derive_scope(document: &str, mut spans: Vec<Range<usize>>) -> Vec<String> {
    spans.sort_by_key(|span| span.start);

    let mut outside = String::with_capacity(document.len());
    let mut cursor = 0;
    for span in spans {
        if span.start > cursor {
            outside.push_str(&document[cursor..span.start]);
            outside.push('\n');
        }
        cursor = cursor.max(span.end);
    }
    outside.push_str(&document[cursor..]);

    let scope: Vec<String> = declared_identifiers(&outside).into_iter().collect();
    log::debug!("derived scope [{}]", scope.join(", "));
    scope
}

/// Text-based fallback: each region's text must occur exactly once in the
/// document at the time it is replaced.
fn substitute_all_exact(
    document: &str,
    directives: &[Directive],
) -> Result<(String, Vec<Range<usize>>), RefactorError> {
    let mut current = document.to_string();
    let mut inserted: Vec<Range<usize>> = Vec::with_capacity(directives.len());
    for directive in directives {
        let (next, range) =
            substitute_exact(&current, &directive.search_text, &directive.replacement)?;
        let delta = next.len() as isize - current.len() as isize;
        for earlier in inserted.iter_mut() {
            if earlier.start >= range.start {
                earlier.start = (earlier.start as isize + delta) as usize;
                earlier.end = (earlier.end as isize + delta) as usize;
            }
        }
        inserted.push(range);
        current = next;
    }
    Ok((current, inserted))
}
