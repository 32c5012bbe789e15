use ljpw_core::serde::{from_yaml_slice, to_canonical_json_bytes};
use ljpw_core::{natural_equilibrium, Axis, Coordinate, ReferencePoints};
use ljpw_mix::{
    bottleneck, compare_to_equilibrium, diagnose, optimization_priority, optimization_vector,
    ColorName, CouplingMatrix, DiagnosticThresholds, EquilibriumInterpretation, IssueKind,
    ModelConfig, SuggestionKind,
};

fn coord(l: f64, j: f64, p: f64, w: f64) -> Coordinate {
    Coordinate::new(l, j, p, w).expect("valid coordinate")
}

#[test]
fn free_diagnose_matches_a_default_engine() {
    let c = coord(0.55, 0.7, 0.35, 0.6);
    let engine = ModelConfig {
        coupling: CouplingMatrix::full(),
        ..ModelConfig::default()
    }
    .build_engine()
    .expect("default engine");
    assert_eq!(
        to_canonical_json_bytes(&diagnose(&c, &CouplingMatrix::full())).expect("json"),
        to_canonical_json_bytes(&engine.diagnose(&c)).expect("json")
    );
}

#[test]
fn weak_love_team_is_flagged() {
    let report = diagnose(
        &coord(0.3, 0.85, 0.9, 0.4),
        &CouplingMatrix::love_amplification(),
    );

    assert_eq!(report.bottleneck, Axis::Love);
    assert_eq!(report.bottleneck_value, 0.3);

    let kinds: Vec<IssueKind> = report.issues.iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        vec![
            IssueKind::Bottleneck,
            IssueKind::CriticallyLow,
            IssueKind::AmplifierDeficiency,
            IssueKind::FarFromAnchor,
        ]
    );

    let first = &report.suggestions[0];
    assert_eq!(first.kind, SuggestionKind::RaiseAmplifier);
    assert_eq!(first.target, Some(Axis::Love));
    assert_eq!(first.priority, 1);
    assert_eq!(report.suggestions[1].kind, SuggestionKind::FixBottleneck);
    assert_eq!(report.suggestions.len(), 2);

    assert_eq!(report.color.rgb, [137, 159, 146]);
    assert_eq!(report.color.hex, "#899f92");
    assert_eq!(report.color.name, ColorName::Gray);
}

#[test]
fn anchor_has_no_issues_and_keeps_balance() {
    let report = diagnose(&Coordinate::anchor(), &CouplingMatrix::love_amplification());
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].kind, IssueKind::NoCriticalIssues);
    assert_eq!(report.issues[0].message, "No critical issues");
    assert_eq!(report.suggestions.len(), 1);
    assert_eq!(report.suggestions[0].kind, SuggestionKind::MaintainBalance);
}

#[test]
fn strong_love_with_weak_rest_asks_for_the_others() {
    let report = diagnose(&coord(0.8, 0.1, 0.1, 0.1), &CouplingMatrix::love_amplification());
    assert!(report
        .suggestions
        .iter()
        .any(|s| s.kind == SuggestionKind::RaiseOthers));
    assert!(report
        .suggestions
        .iter()
        .all(|s| s.kind != SuggestionKind::RaiseAmplifier));
    let priorities: Vec<u32> = report.suggestions.iter().map(|s| s.priority).collect();
    assert_eq!(priorities, (1..=priorities.len() as u32).collect::<Vec<_>>());
}

#[test]
fn bottleneck_ties_go_to_the_first_axis() {
    assert_eq!(bottleneck(&coord(0.5, 0.5, 0.9, 0.9)), (Axis::Love, 0.5));
    assert_eq!(bottleneck(&coord(0.9, 0.4, 0.4, 0.9)), (Axis::Justice, 0.4));
    assert_eq!(bottleneck(&coord(0.9, 0.9, 0.9, 0.2)), (Axis::Wisdom, 0.2));
}

#[test]
fn report_json_is_byte_stable() {
    let c = coord(0.62, 0.41, 0.72, 0.69);
    let a = diagnose(&c, &CouplingMatrix::full());
    let b = diagnose(&c, &CouplingMatrix::full());
    assert_eq!(
        to_canonical_json_bytes(&a).expect("json"),
        to_canonical_json_bytes(&b).expect("json")
    );
}

#[test]
fn equilibrium_comparison_buckets() {
    let reference = ReferencePoints::default();

    let at_eq = compare_to_equilibrium(&natural_equilibrium(), &reference);
    assert_eq!(at_eq.interpretation, EquilibriumInterpretation::NearEquilibrium);
    assert_eq!(at_eq.distance_to_equilibrium, 0.0);
    assert_eq!(at_eq.percent_differences.love, 0.0);

    let at_anchor = compare_to_equilibrium(&Coordinate::anchor(), &reference);
    assert_eq!(
        at_anchor.interpretation,
        EquilibriumInterpretation::BeyondEquilibrium
    );
    assert_eq!(at_anchor.distance_to_anchor, 0.0);
    assert!(at_anchor.differences.justice > 0.5);

    let low = compare_to_equilibrium(&coord(0.1, 0.1, 0.1, 0.1), &reference);
    assert_eq!(low.interpretation, EquilibriumInterpretation::Developing);
    assert!(low.percent_differences.power < 0.0);
}

#[test]
fn amplifier_gap_counts_double() {
    let anchor = Coordinate::anchor();
    let c = coord(0.8, 0.2, 0.5, 0.5);
    let vector = optimization_vector(&c, &anchor);
    assert!((vector.justice - 0.8).abs() < 1e-12);

    let order: Vec<Axis> = optimization_priority(&c, &anchor, Axis::Love)
        .into_iter()
        .map(|gap| gap.axis)
        .collect();
    assert_eq!(order, vec![Axis::Justice, Axis::Power, Axis::Wisdom, Axis::Love]);

    let flat = optimization_priority(&coord(0.5, 0.5, 0.5, 0.5), &anchor, Axis::Love);
    assert_eq!(flat[0].axis, Axis::Love);
    assert_eq!(flat[0].priority, 1.0);
    assert_eq!(
        flat[1..].iter().map(|g| g.axis).collect::<Vec<_>>(),
        vec![Axis::Justice, Axis::Power, Axis::Wisdom]
    );
}

#[test]
fn model_config_loads_partial_yaml() {
    let config: ModelConfig = from_yaml_slice(b"{}").expect("empty config");
    assert_eq!(config, ModelConfig::default());

    let yaml = br#"
coupling:
  - { source: L, target: J, coefficient: 1.2 }
  - { source: wisdom, target: power, coefficient: 1.0 }
mixer:
  axis_weights: { L: 0.25, J: 0.25, P: 0.25, W: 0.25 }
thresholds:
  amplifier: W
"#;
    let config: ModelConfig = from_yaml_slice(yaml).expect("config");
    assert_eq!(config.coupling.coefficient(Axis::Love, Axis::Justice), 1.2);
    assert_eq!(config.coupling.coefficient(Axis::Love, Axis::Power), 0.0);
    assert_eq!(config.thresholds.amplifier, Axis::Wisdom);
    assert_eq!(config.thresholds.low_harmony, DiagnosticThresholds::default().low_harmony);

    let engine = config.build_engine().expect("engine");
    let report = engine.diagnose(&coord(0.9, 0.9, 0.9, 0.3));
    assert_eq!(report.suggestions[0].target, Some(Axis::Wisdom));
}

#[test]
fn model_config_rejects_bad_sections() {
    let self_coupling = b"coupling:\n  - { source: P, target: P, coefficient: 0.5 }\n";
    assert!(from_yaml_slice::<ModelConfig>(self_coupling).is_err());

    let config: ModelConfig =
        from_yaml_slice(b"mixer:\n  axis_weights: { L: 0.9, J: 0.25, P: 0.2, W: 0.2 }\n")
            .expect("parses");
    assert!(config.build_engine().is_err());
}
