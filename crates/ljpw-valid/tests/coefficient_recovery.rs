use ljpw_core::{Axis, LjpwError};
use ljpw_mix::CouplingMatrix;
use ljpw_valid::{
    fit_domain, fitted_matrix, generate, generate_domains, AcceptanceCriteria,
    CoefficientValidator, Domain, DomainObservations, SynthConfig, Verdict, SMALL_NOISE,
};

fn quiet(seed: u64) -> SynthConfig {
    SynthConfig {
        samples: 30,
        kappa: 1.4,
        noise: SMALL_NOISE,
        seed,
        ..SynthConfig::default()
    }
}

#[test]
fn known_coefficient_is_recovered_across_seeds() {
    let criteria = AcceptanceCriteria::default();
    let mut recovered = 0;
    for seed in 0..200 {
        let observations = generate("engineering", &quiet(seed)).expect("synth");
        let fit = fit_domain("engineering", &observations, &criteria).expect("fit");
        if fit.valid && fit.r_squared > 0.6 {
            recovered += 1;
        }
        assert!(fit.confidence_interval.contains(fit.coefficient));
        assert_eq!(fit.sample_size, 30);
    }
    assert!(recovered >= 190, "recovered only {recovered} of 200");
}

#[test]
fn synthetic_streams_are_seeded_by_domain() {
    let config = quiet(7);
    let a = generate("healthcare", &config).expect("a");
    let b = generate("healthcare", &config).expect("b");
    let c = generate("education", &config).expect("c");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(a.effective.iter().all(|&e| e >= config.floor));
}

#[test]
fn fit_hash_tracks_inputs() {
    let criteria = AcceptanceCriteria::default();
    let observations = generate("finance", &quiet(3)).expect("synth");
    let first = fit_domain("finance", &observations, &criteria).expect("fit");
    let again = fit_domain("finance", &observations, &criteria).expect("fit");
    let renamed = fit_domain("retail", &observations, &criteria).expect("fit");
    assert_eq!(first.fit_hash, again.fit_hash);
    assert_eq!(first.fit_hash.len(), 64);
    assert_ne!(first.fit_hash, renamed.fit_hash);
}

#[test]
fn too_few_observations_are_rejected() {
    let observations = DomainObservations {
        source: vec![0.2, 0.8],
        base: vec![0.5, 0.6],
        effective: vec![0.7, 1.2],
    };
    let err = fit_domain("tiny", &observations, &AcceptanceCriteria::default())
        .expect_err("two points");
    assert!(matches!(err, LjpwError::InsufficientData(_)));
}

#[test]
fn malformed_observations_are_named() {
    let criteria = AcceptanceCriteria::default();

    let mismatched = DomainObservations {
        source: vec![0.2, 0.5, 0.8],
        base: vec![0.5, 0.6],
        effective: vec![0.7, 1.0, 1.2],
    };
    let err = fit_domain("m", &mismatched, &criteria).expect_err("lengths");
    assert_eq!(err.info().code, "mismatched-lengths");

    let zero_base = DomainObservations {
        source: vec![0.2, 0.5, 0.8],
        base: vec![0.5, 0.0, 0.6],
        effective: vec![0.7, 1.0, 1.2],
    };
    let err = fit_domain("z", &zero_base, &criteria).expect_err("zero base");
    assert_eq!(err.info().code, "invalid-observation");
    assert_eq!(err.info().context.get("index").map(String::as_str), Some("1"));

    let constant = DomainObservations {
        source: vec![0.5, 0.5, 0.5, 0.5],
        base: vec![0.5, 0.6, 0.7, 0.8],
        effective: vec![0.7, 1.0, 1.2, 1.3],
    };
    let err = fit_domain("c", &constant, &criteria).expect_err("constant source");
    assert!(matches!(err, LjpwError::InsufficientData(_)));
    assert_eq!(err.info().code, "degenerate-predictor");
}

#[test]
fn fit_all_preserves_input_order() {
    let names = ["zeta", "alpha", "mu", "beta", "omega", "gamma"];
    let domains = generate_domains(&names, &quiet(11)).expect("synth");
    let validator = CoefficientValidator::new(AcceptanceCriteria::default())
        .expect("criteria")
        .with_threads(4);
    let fits = validator.fit_all(&domains).expect("fit all");
    let order: Vec<&str> = fits.iter().map(|fit| fit.domain.as_str()).collect();
    assert_eq!(order, names);
}

#[test]
fn fit_all_reports_the_first_failing_domain() {
    let mut domains = generate_domains(&["a", "b", "c"], &quiet(1)).expect("synth");
    domains.insert(
        1,
        Domain::new(
            "broken",
            DomainObservations {
                source: vec![0.1],
                base: vec![0.5],
                effective: vec![0.6],
            },
        ),
    );
    let err = CoefficientValidator::default()
        .fit_all(&domains)
        .expect_err("broken domain");
    assert!(matches!(err, LjpwError::InsufficientData(_)));
}

#[test]
fn consistent_domains_validate() {
    let domains = generate_domains(
        &["software", "healthcare", "education", "finance"],
        &quiet(42),
    )
    .expect("synth");
    let report = CoefficientValidator::default()
        .validate(&domains)
        .expect("validate");
    assert_eq!(report.fits.len(), 4);
    assert_eq!(report.cross_domain.domains_tested, 4);
    assert!(report.cross_domain.validation_rate >= 0.75);
    assert!(report.posterior.probability_in_range > 0.8);
    assert!(report
        .posterior
        .credible_interval
        .contains(report.posterior.posterior_mean));
    assert_eq!(report.verdict, Verdict::Validated);
}

#[test]
fn wrong_coefficient_is_not_validated() {
    let config = SynthConfig {
        kappa: 0.5,
        ..quiet(5)
    };
    let domains = generate_domains(&["a", "b", "c"], &config).expect("synth");
    let report = CoefficientValidator::default()
        .validate(&domains)
        .expect("validate");
    assert!(report.fits.iter().all(|fit| !fit.in_range));
    assert_eq!(report.cross_domain.domains_validated, 0);
    assert_eq!(report.verdict, Verdict::NotValidated);
}

#[test]
fn single_domain_cannot_be_aggregated() {
    let domains = generate_domains(&["only"], &quiet(0)).expect("synth");
    let err = CoefficientValidator::default()
        .validate(&domains)
        .expect_err("one domain");
    assert!(matches!(err, LjpwError::InsufficientDomains(_)));
}

#[test]
fn posterior_feeds_back_into_a_new_matrix() {
    let domains = generate_domains(&["a", "b", "c"], &quiet(9)).expect("synth");
    let report = CoefficientValidator::default()
        .validate(&domains)
        .expect("validate");
    let base = CouplingMatrix::love_amplification();
    let updated =
        fitted_matrix(&base, Axis::Love, Axis::Justice, &report.posterior).expect("matrix");
    assert_eq!(base.coefficient(Axis::Love, Axis::Justice), 1.4);
    assert_eq!(
        updated.coefficient(Axis::Love, Axis::Justice),
        report.posterior.posterior_mean
    );
    assert_eq!(updated.coefficient(Axis::Love, Axis::Wisdom), 1.5);
}

#[test]
fn invalid_criteria_are_rejected() {
    let criteria = AcceptanceCriteria {
        tolerance: 0.0,
        ..AcceptanceCriteria::default()
    };
    assert!(matches!(
        CoefficientValidator::new(criteria),
        Err(LjpwError::Configuration(_))
    ));
}
