use ljpw_calib::{
    CalibrationProfile, Calibrator, MetricField, RawMetricBundle, SubMetric, Transform,
};
use ljpw_core::{Axis, LjpwError};
use proptest::prelude::*;

fn team_alpha() -> RawMetricBundle {
    use MetricField as F;
    RawMetricBundle::default()
        .with(F::CrossReviewRate, 0.85)
        .with(F::ApiErrorRate, 0.08)
        .with(F::DocCoverage, 0.65)
        .with(F::PsychSafetyScore, 5.5)
        .with(F::LineCoverage, 0.82)
        .with(F::BranchCoverage, 0.78)
        .with(F::ArchitectureViolations, 0.06)
        .with(F::CodeStandardsCompliance, 0.88)
        .with(F::TechDebtTimeRatio, 0.25)
        .with(F::VelocityAchievement, 0.95)
        .with(F::P95ResponseTimeMs, 450.0)
        .with(F::SlaTargetMs, 500.0)
        .with(F::CpuUtilization, 0.79)
        .with(F::DocToCodeRatio, 0.30)
        .with(F::OnboardingDays, 4.0)
        .with(F::BaselineOnboardingDays, 10.0)
        .with(F::ChangeIsolationRate, 0.88)
        .with(F::KnowledgeRetentionScore, 5.0)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn team_alpha_calibrates_to_known_coordinate() {
    let coord = Calibrator::default()
        .calibrate(&team_alpha())
        .expect("calibrate");
    assert_close(coord.love(), (0.85 + 0.92 + 0.65 + 0.75) / 4.0);
    assert_close(coord.justice(), (0.80 + 0.94 + 0.88 + 0.75) / 4.0);
    assert_close(coord.power(), (0.95 + 1.0 + (1.0 - 0.09 / 0.7)) / 3.0);
    assert_close(coord.wisdom(), (0.75 + 0.6 + 0.88 + 4.0 / 6.0) / 4.0);
}

#[test]
fn calibration_is_deterministic() {
    let calibrator = Calibrator::default();
    let bundle = team_alpha();
    let first = calibrator.calibrate(&bundle).expect("first");
    let second = calibrator.calibrate(&bundle).expect("second");
    assert_eq!(first.to_vector().map(f64::to_bits), second.to_vector().map(f64::to_bits));
}

#[test]
fn missing_field_is_named() {
    let bundle = team_alpha().without(MetricField::CpuUtilization);
    let err = Calibrator::default()
        .calibrate(&bundle)
        .expect_err("missing metric");
    match err {
        LjpwError::Calibration(info) => {
            assert_eq!(info.code, "missing-metric");
            assert_eq!(
                info.context.get("field").map(String::as_str),
                Some("cpu_utilization")
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn out_of_range_field_is_rejected() {
    let bundle = team_alpha().with(MetricField::PsychSafetyScore, 8.0);
    let err = Calibrator::default().calibrate(&bundle).expect_err("range");
    assert_eq!(err.info().code, "metric-out-of-range");
    assert_eq!(
        err.info().context.get("field").map(String::as_str),
        Some("psych_safety_score")
    );

    let bundle = team_alpha().with(MetricField::ApiErrorRate, -0.1);
    assert!(matches!(
        Calibrator::default().calibrate(&bundle),
        Err(LjpwError::Calibration(_))
    ));
}

#[test]
fn zero_baseline_is_rejected() {
    let bundle = team_alpha().with(MetricField::BaselineOnboardingDays, 0.0);
    assert!(matches!(
        Calibrator::default().calibrate(&bundle),
        Err(LjpwError::Calibration(_))
    ));
}

#[test]
fn zero_sla_target_scores_zero_performance() {
    let bundle = team_alpha().with(MetricField::SlaTargetMs, 0.0);
    let report = Calibrator::default()
        .calibrate_detailed(&bundle)
        .expect("zero target is in range");
    let performance = report.axes[&Axis::Power]
        .sub_metrics
        .iter()
        .find(|s| s.label == "performance")
        .expect("performance sub-metric");
    assert_eq!(performance.score, 0.0);
}

#[test]
fn slow_onboarding_clamps_at_zero() {
    let bundle = team_alpha().with(MetricField::OnboardingDays, 15.0);
    let report = Calibrator::default()
        .calibrate_detailed(&bundle)
        .expect("calibrate");
    let wisdom = &report.axes[&Axis::Wisdom];
    let onboarding = wisdom
        .sub_metrics
        .iter()
        .find(|s| s.label == "onboarding")
        .expect("onboarding sub-metric");
    assert_eq!(onboarding.score, 0.0);
    assert_eq!(report.coordinate.wisdom(), wisdom.value);
}

#[test]
fn bundle_deserializes_with_missing_keys() {
    let bundle: RawMetricBundle =
        serde_json::from_str(r#"{"cross_review_rate": 0.5}"#).expect("partial bundle");
    assert_eq!(bundle.get(MetricField::CrossReviewRate), Some(0.5));
    assert_eq!(bundle.get(MetricField::DocCoverage), None);
    assert!(serde_json::from_str::<RawMetricBundle>(r#"{"typo_rate": 0.5}"#).is_err());
}

#[test]
fn custom_profile_with_empty_axis_is_rejected() {
    let mut profile = CalibrationProfile::software_team();
    profile.axes.insert(Axis::Power, Vec::new());
    assert!(matches!(
        Calibrator::new(profile),
        Err(LjpwError::Configuration(_))
    ));

    let mut profile = CalibrationProfile::software_team();
    profile.axes.insert(
        Axis::Power,
        vec![SubMetric::single(
            "cpu",
            MetricField::CpuUtilization,
            Transform::OptimalPoint { optimum: -1.0 },
        )],
    );
    assert!(Calibrator::new(profile).is_err());
}

proptest! {
    #[test]
    fn unit_rates_always_land_inside_the_unit_cube(
        rates in proptest::collection::vec(0.0f64..=1.0, 12),
        survey in 1.0f64..=7.0,
        latency in 0.0f64..5000.0,
        onboarding in 0.0f64..60.0,
    ) {
        use MetricField as F;
        let bundle = RawMetricBundle::default()
            .with(F::CrossReviewRate, rates[0])
            .with(F::ApiErrorRate, rates[1])
            .with(F::DocCoverage, rates[2])
            .with(F::PsychSafetyScore, survey)
            .with(F::LineCoverage, rates[3])
            .with(F::BranchCoverage, rates[4])
            .with(F::ArchitectureViolations, rates[5])
            .with(F::CodeStandardsCompliance, rates[6])
            .with(F::TechDebtTimeRatio, rates[7])
            .with(F::VelocityAchievement, rates[8] * 2.0)
            .with(F::P95ResponseTimeMs, latency)
            .with(F::SlaTargetMs, 500.0)
            .with(F::CpuUtilization, rates[9])
            .with(F::DocToCodeRatio, rates[10])
            .with(F::OnboardingDays, onboarding)
            .with(F::BaselineOnboardingDays, 10.0)
            .with(F::ChangeIsolationRate, rates[11])
            .with(F::KnowledgeRetentionScore, survey);
        let calibrator = Calibrator::default();
        let coord = calibrator.calibrate(&bundle).unwrap();
        for value in coord.to_vector() {
            prop_assert!((0.0..=1.0).contains(&value));
        }
        prop_assert_eq!(coord, calibrator.calibrate(&bundle).unwrap());
    }
}

#[test]
fn single_axis_matches_full_calibration() {
    let calibrator = Calibrator::default();
    let coord = calibrator.calibrate(&team_alpha()).expect("calibrate");
    for axis in Axis::ALL {
        let value = calibrator
            .calibrate_axis(axis, &team_alpha())
            .expect("axis");
        assert_close(value, coord.get(axis));
    }
}
