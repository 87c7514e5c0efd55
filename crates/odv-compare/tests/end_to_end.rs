//! End-to-end comparisons of observed layouts against small standard tables.

use odv_compare::{compare, CompareError, CompareOptions, ViolationKind};
use odv_core::{
    AttributeValue, Diagnostics, Location, ObservedNode, ObservedTree, RuleEntry, RuleTable,
    StandardVersion, ValueKind,
};
use odv_expr::ExprError;

fn loc(s: &str) -> Location {
    Location::parse(s).unwrap()
}

fn quiet() -> CompareOptions {
    CompareOptions::default().with_diagnostics(Diagnostics::quiet())
}

fn pvol_table() -> RuleTable {
    RuleTable::new(vec![
        RuleEntry::mandatory(loc("/#Conventions"), "ODIM_H5/V2_[0-9]"),
        RuleEntry::mandatory(loc("/what"), ""),
        RuleEntry::mandatory(loc("/what#object"), "PVOL|SCAN"),
        RuleEntry::mandatory(loc("/what#source"), ".*NOD:.*"),
        RuleEntry::mandatory(loc("/dataset[0-9]+"), ""),
        RuleEntry::mandatory(loc("/dataset[0-9]+/where#elangle"), ">=-2&&<=90"),
        RuleEntry::optional(loc("/how#beamwidth"), "=1.0+-0.1"),
    ])
    .with_version(StandardVersion::new(2, 1))
    .with_product("PVOL")
}

fn pvol_file() -> ObservedTree {
    ObservedTree::new(vec![
        ObservedNode::attribute(loc("/#Conventions"), "ODIM_H5/V2_1"),
        ObservedNode::container(loc("/what")),
        ObservedNode::attribute(loc("/what#object"), "PVOL"),
        ObservedNode::attribute(loc("/what#source"), "WMO:11812,NOD:skjav"),
        ObservedNode::container(loc("/dataset1")),
        ObservedNode::attribute(loc("/dataset1/where#elangle"), 0.5),
        ObservedNode::container(loc("/dataset2")),
        ObservedNode::attribute(loc("/dataset2/where#elangle"), 1.5),
    ])
}

// ─── Source Identifier ───────────────────────────────────────────────

#[test]
fn missing_source_reports_exactly_that_entry() {
    let entry = RuleEntry::mandatory(loc("/what#source"), ".*NOD:.*");
    let rules = RuleTable::new(vec![entry.clone()]);

    let report = compare(&ObservedTree::default(), &rules, &quiet()).unwrap();
    assert!(!report.is_compliant());
    assert_eq!(report.failed_entries().collect::<Vec<_>>(), vec![&entry]);

    let observed = ObservedTree::new(vec![ObservedNode::attribute(
        loc("/what#source"),
        "WMO:11812,NOD:skjav",
    )]);
    assert!(compare(&observed, &rules, &quiet()).unwrap().is_compliant());
}

#[test]
fn malformed_wmo_token_fails_even_when_pattern_matches() {
    let rules = RuleTable::new(vec![RuleEntry::mandatory(
        loc("/what#source"),
        "(WMO:.*)|(RAD:.*)",
    )]);
    let observed = ObservedTree::new(vec![ObservedNode::attribute(
        loc("/what#source"),
        "WMO:foobar",
    )]);
    let report = compare(&observed, &rules, &quiet()).unwrap();
    match &report.violations()[0].kind {
        ViolationKind::ValueMismatch { explanation, .. } => {
            assert!(explanation.contains("WMO:foobar"), "{explanation}");
        }
        other => panic!("unexpected violation kind {other:?}"),
    }
}

// ─── Whole Table ─────────────────────────────────────────────────────

#[test]
fn compliant_volume_passes_every_policy() {
    let strict = CompareOptions::strict().with_diagnostics(Diagnostics::quiet());
    let report = compare(&pvol_file(), &pvol_table(), &strict).unwrap();
    assert!(report.is_compliant(), "{:?}", report.violations());
    assert_eq!(report.rules_checked(), 7);
    assert_eq!(report.nodes_observed(), 8);
}

#[test]
fn comparison_is_idempotent() {
    let mut observed = pvol_file();
    observed.push(ObservedNode::attribute(
        loc("/dataset2/where#elangle"),
        95.0,
    ));
    let opts = CompareOptions::strict();
    let first = compare(&observed, &pvol_table(), &opts).unwrap();
    let second = compare(&observed, &pvol_table(), &opts).unwrap();
    assert_eq!(first, second);
    assert!(!first.is_compliant());
}

#[test]
fn every_matching_node_of_a_pattern_rule_is_checked() {
    let mut observed = pvol_file();
    observed.push(ObservedNode::container(loc("/dataset3")));
    observed.push(ObservedNode::attribute(
        loc("/dataset3/where#elangle"),
        120.0,
    ));
    let report = compare(&observed, &pvol_table(), &quiet()).unwrap();
    assert_eq!(report.violations().len(), 1);
    assert_eq!(
        report.violations()[0].kind,
        ViolationKind::ValueMismatch {
            observed: loc("/dataset3/where#elangle"),
            explanation: "value 120 does not satisfy <=90".into(),
        }
    );
}

#[test]
fn missing_pattern_rule_is_reported_once() {
    let observed = ObservedTree::new(vec![
        ObservedNode::attribute(loc("/#Conventions"), "ODIM_H5/V2_1"),
        ObservedNode::container(loc("/what")),
        ObservedNode::attribute(loc("/what#object"), "PVOL"),
        ObservedNode::attribute(loc("/what#source"), "NOD:skjav"),
    ]);
    let report = compare(&observed, &pvol_table(), &quiet()).unwrap();
    let missing: Vec<String> = report
        .failed_entries()
        .map(|e| e.location.to_string())
        .collect();
    assert_eq!(missing, vec!["/dataset[0-9]+", "/dataset[0-9]+/where#elangle"]);
}

#[test]
fn duplicate_rule_locations_each_contribute_a_violation() {
    let rules = RuleTable::new(vec![
        RuleEntry::mandatory(loc("/how#NI"), ">10"),
        RuleEntry::mandatory(loc("/how#NI"), ">20"),
    ]);
    let observed = ObservedTree::new(vec![ObservedNode::attribute(loc("/how#NI"), 5.0)]);
    let report = compare(&observed, &rules, &quiet()).unwrap();
    let failed: Vec<&str> = report
        .failed_entries()
        .map(|e| e.constraint_text.as_str())
        .collect();
    assert_eq!(failed, vec![">10", ">20"]);
}

#[test]
fn attribute_rule_without_constraint_needs_only_presence() {
    let rules = RuleTable::new(vec![RuleEntry::mandatory(loc("/how#software"), "")]);
    let observed = ObservedTree::new(vec![ObservedNode::attribute(
        loc("/how#software"),
        "anything at all",
    )]);
    assert!(compare(&observed, &rules, &quiet()).unwrap().is_compliant());
    assert!(!compare(&ObservedTree::default(), &rules, &quiet())
        .unwrap()
        .is_compliant());
}

// ─── Optional And Extra Policies ─────────────────────────────────────

#[test]
fn optional_failure_is_reported_only_when_checked() {
    let mut observed = pvol_file();
    observed.push(ObservedNode::attribute(loc("/how#beamwidth"), 1.5));

    assert!(compare(&observed, &pvol_table(), &quiet())
        .unwrap()
        .is_compliant());

    let checked = quiet().with_check_optional(true);
    let report = compare(&observed, &pvol_table(), &checked).unwrap();
    assert_eq!(report.violations().len(), 1);
    assert!(!report.violations()[0].entry.mandatory);
}

#[test]
fn extras_follow_rule_violations_in_tree_order() {
    let mut observed = pvol_file();
    observed.push(ObservedNode::attribute(loc("/how#zeta"), 1.0));
    observed.push(ObservedNode::attribute(loc("/how#alpha"), 2.0));
    observed.push(ObservedNode::attribute(
        loc("/dataset1/where#elangle"),
        -10.0,
    ));

    assert!(!compare(&observed, &pvol_table(), &quiet())
        .unwrap()
        .violations()
        .iter()
        .any(|v| v.kind == ViolationKind::Unexpected));

    let opts = quiet().with_check_extras(true);
    let report = compare(&observed, &pvol_table(), &opts).unwrap();
    let kinds: Vec<(&str, String)> = report
        .violations()
        .iter()
        .map(|v| {
            let tag = match v.kind {
                ViolationKind::Unexpected => "unexpected",
                _ => "rule",
            };
            (tag, v.entry.location.to_string())
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("rule", "/dataset[0-9]+/where#elangle".to_string()),
            ("unexpected", "/how#zeta".to_string()),
            ("unexpected", "/how#alpha".to_string()),
        ]
    );

    let extra = &report.violations()[1].entry;
    assert!(!extra.mandatory);
    assert!(extra.is_presence_only());
    assert_eq!(extra.standard_version, Some(StandardVersion::new(2, 1)));
}

// ─── Kinds And Errors ────────────────────────────────────────────────

#[test]
fn declared_kind_mismatch_is_a_violation() {
    let rules = RuleTable::new(vec![
        RuleEntry::mandatory(loc("/how#elangles"), "min>=0").with_kind(ValueKind::NumberSequence),
        RuleEntry::mandatory(loc("/what#date"), "[0-9]{8}").with_kind(ValueKind::Text),
    ]);
    let observed = ObservedTree::new(vec![
        ObservedNode::attribute(loc("/how#elangles"), vec![0.5, 1.5]),
        ObservedNode::attribute(loc("/what#date"), 20240101.0),
    ]);
    let report = compare(&observed, &rules, &quiet()).unwrap();
    assert_eq!(report.violations().len(), 1);
    assert_eq!(
        report.violations()[0].kind,
        ViolationKind::KindMismatch {
            observed: loc("/what#date"),
            expected: ValueKind::Text,
            actual: Some(ValueKind::Number),
        }
    );
}

#[test]
fn empty_sequence_aggregate_aborts_with_rule_context() {
    let rules = RuleTable::new(vec![RuleEntry::mandatory(loc("/how#elangles"), "min>=0")]);
    let observed = ObservedTree::new(vec![ObservedNode::attribute(
        loc("/how#elangles"),
        AttributeValue::NumberSequence(vec![]),
    )]);
    let err = compare(&observed, &rules, &quiet()).unwrap_err();
    match err {
        CompareError::Constraint {
            location,
            constraint,
            source,
        } => {
            assert_eq!(location, loc("/how#elangles"));
            assert_eq!(constraint, "min>=0");
            assert!(matches!(source, ExprError::EmptySequence { .. }));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn invalid_location_pattern_aborts() {
    let rules = RuleTable::new(vec![RuleEntry::mandatory(loc("/dataset[0-9/what#gain"), "")]);
    let err = compare(&pvol_file(), &rules, &quiet()).unwrap_err();
    assert!(matches!(err, CompareError::LocationPattern { .. }));
}

#[test]
fn malformed_optional_constraint_aborts_without_check_optional() {
    let rules = RuleTable::new(vec![RuleEntry::optional(loc("/how#NI"), "==1||==2|||==3")]);
    let observed = ObservedTree::new(vec![ObservedNode::attribute(loc("/how#NI"), 5.0)]);
    let err = compare(&observed, &rules, &quiet()).unwrap_err();
    match err {
        CompareError::Constraint { location, .. } => assert_eq!(location, loc("/how#NI")),
        other => panic!("unexpected error {other:?}"),
    }
}
