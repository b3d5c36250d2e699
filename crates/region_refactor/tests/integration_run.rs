// crates/region_refactor/tests/integration_run.rs

mod common;

use pretty_assertions::assert_eq;
use region_locator::{AnchorRole, LocateError};
use region_refactor::{run, Outcome, RefactorConfig, RefactorError, Strategy};
use document_splice::SpliceError;
use unit_wrapper::UnitError;

use common::*;

fn transformed(outcome: Outcome) -> region_refactor::Transformation {
    match outcome {
        Outcome::Transformed(t) => t,
        Outcome::AlreadyApplied => panic!("expected a transformation"),
    }
}

#[test]
fn three_regions_become_invocations_and_units_are_appended_in_order() {
    let result = transformed(run(&config(), PROFILE_VIEW).unwrap());
    assert_eq!(result.document, expected_document());

    let names: Vec<&str> = result.units.iter().map(|u| u.name()).collect();
    assert_eq!(names, vec!["AccidentsTab", "InspectionsTab", "ViolationsTab"]);
    assert!(result.duplicate_removed.is_some());
    assert!(!result.document.contains("OldViolations"));
}

#[test]
fn unit_bodies_are_the_original_inner_bodies() {
    let result = transformed(run(&config(), PROFILE_VIEW).unwrap());
    assert_eq!(result.units[0].inline(), ACCIDENTS_BODY);
    assert_eq!(result.units[1].inline(), INSPECTIONS_BODY);
    assert_eq!(result.units[2].inline(), VIOLATIONS_BODY);
}

#[test]
fn exact_strategy_gives_the_same_result_on_unique_regions() {
    let mut config = config();
    config.strategy = Strategy::Exact;
    let result = transformed(run(&config, PROFILE_VIEW).unwrap());
    assert_eq!(result.document, expected_document());
}

#[test]
fn second_run_is_a_noop() {
    let first = transformed(run(&config(), PROFILE_VIEW).unwrap());
    assert_eq!(run(&config(), &first.document).unwrap(), Outcome::AlreadyApplied);
}

#[test]
fn missing_anchor_aborts_with_anchor_not_found() {
    let broken = PROFILE_VIEW.replace("{/* INSPECTIONS TAB */}", "{/* INSPECTIONS */}");
    match run(&config(), &broken) {
        Err(RefactorError::Locate {
            region,
            source: LocateError::AnchorNotFound { role, anchor, .. },
        }) => {
            assert_eq!(region, "inspections");
            assert_eq!(role, AnchorRole::Start);
            assert_eq!(anchor, "{/* INSPECTIONS TAB */}");
        }
        other => panic!("expected AnchorNotFound, got {:?}", other),
    }
}

#[test]
fn missing_inner_marker_is_reported_as_marker_not_found() {
    let broken = PROFILE_VIEW.replacen(
        "{activeTab === 'Accidents' && (() => {",
        "{activeTab === 'Accidents' && (function () {",
        1,
    );
    assert!(matches!(
        run(&config(), &broken),
        Err(RefactorError::Locate {
            source: LocateError::MarkerNotFound { role: AnchorRole::Start, .. },
            ..
        })
    ));
}

#[test]
fn undeclared_free_variable_is_a_parameter_mismatch() {
    let mut config = config();
    config.regions[0].parameters = vec!["driverData".to_string()];
    match run(&config, PROFILE_VIEW) {
        Err(RefactorError::Unit {
            region,
            source: UnitError::ParameterMismatch { missing, unused, .. },
        }) => {
            assert_eq!(region, "accidents");
            assert_eq!(missing, vec!["setViewingAccident".to_string()]);
            assert!(unused.is_empty());
        }
        other => panic!("expected ParameterMismatch, got {:?}", other),
    }
}

/// The fixture config with its `scope` line removed.
fn config_without_scope() -> RefactorConfig {
    let text: String = CONFIG
        .lines()
        .filter(|line| !line.starts_with("scope ="))
        .map(|line| format!("{}\n", line))
        .collect();
    RefactorConfig::from_toml_str(&text).unwrap()
}

#[test]
fn omitted_scope_still_catches_an_undeclared_setter() {
    let mut config = config_without_scope();
    assert_eq!(config.scope, None);
    config.regions[0].parameters = vec!["driverData".to_string()];
    match run(&config, PROFILE_VIEW) {
        Err(RefactorError::Unit {
            region,
            source: UnitError::ParameterMismatch { missing, unused, .. },
        }) => {
            assert_eq!(region, "accidents");
            assert_eq!(missing, vec!["setViewingAccident".to_string()]);
            assert!(unused.is_empty());
        }
        other => panic!("expected ParameterMismatch, got {:?}", other),
    }
}

#[test]
fn omitted_scope_is_derived_from_the_surrounding_declarations() {
    let result = transformed(run(&config_without_scope(), PROFILE_VIEW).unwrap());
    assert_eq!(result.document, expected_document());
}

#[test]
fn region_text_repeated_elsewhere_is_left_alone_by_offset_strategy() {
    let start = PROFILE_VIEW.find("{/* INSPECTIONS TAB */}").unwrap();
    let end = PROFILE_VIEW.find("            {/* VIOLATIONS TAB */}").unwrap();
    let copy = &PROFILE_VIEW[start..end];
    let document = format!("{}/*\n{}*/\n", PROFILE_VIEW, copy);

    let result = transformed(run(&config(), &document).unwrap());
    assert_eq!(result.document.matches(copy).count(), 1);
    assert!(result.document.contains(&format!("/*\n{}*/\n", copy)));
}

#[test]
fn region_text_repeated_elsewhere_is_rejected_by_exact_strategy() {
    let start = PROFILE_VIEW.find("{/* INSPECTIONS TAB */}").unwrap();
    let end = PROFILE_VIEW.find("            {/* VIOLATIONS TAB */}").unwrap();
    let document = format!("{}/*\n{}*/\n", PROFILE_VIEW, &PROFILE_VIEW[start..end]);

    let mut config = config();
    config.strategy = Strategy::Exact;
    assert!(matches!(
        run(&config, &document),
        Err(RefactorError::Splice(SpliceError::NonUniqueSubstitutionTarget { count: 2, .. }))
    ));
}

#[test]
fn absent_duplicate_block_is_skipped() {
    let start = PROFILE_VIEW.find("            {activeTab === 'Violations' && (\n").unwrap();
    let end = PROFILE_VIEW.find("        </div>\n  );").unwrap();
    let without = format!("{}{}", &PROFILE_VIEW[..start], &PROFILE_VIEW[end..]);

    let result = transformed(run(&config(), &without).unwrap());
    assert_eq!(result.duplicate_removed, None);
    assert_eq!(result.document, expected_document());
}

#[test]
fn overlapping_regions_are_rejected() {
    let mut config = config();
    // Widen the accidents region so that it swallows the inspections region.
    config.regions[0].end = "            {/* VIOLATIONS TAB */}".to_string();
    config.regions[0].parameters = ["activeTab", "driverData", "viewingAccident", "setViewingAccident"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert!(matches!(
        run(&config, PROFILE_VIEW),
        Err(RefactorError::Splice(SpliceError::OverlappingSpans { .. }))
    ));
}

#[test]
fn search_from_skips_earlier_occurrences() {
    let mut config = config();
    let doubled = format!("{{/* INSPECTIONS TAB */}} stray mention\n{}", PROFILE_VIEW);
    config.regions[1].search_from = "{/* INSPECTIONS TAB */} stray mention\n".len();
    let result = transformed(run(&config, &doubled).unwrap());
    assert!(result.document.starts_with("{/* INSPECTIONS TAB */} stray mention\n"));
    assert!(result.document.contains("<InspectionsTab driverData={driverData} />"));
}
