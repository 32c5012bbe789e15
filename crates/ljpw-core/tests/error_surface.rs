use ljpw_core::errors::{ErrorInfo, LjpwError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("field", "cpu_utilization")
        .with_hint("check the ingestion pipeline")
}

#[test]
fn every_family_exposes_its_payload() {
    let errors = [
        LjpwError::Range(sample_info("R001", "axis out of range")),
        LjpwError::Calibration(sample_info("C001", "missing metric")),
        LjpwError::Configuration(sample_info("K001", "self coupling")),
        LjpwError::InsufficientData(sample_info("D001", "two observations")),
        LjpwError::InsufficientDomains(sample_info("M001", "one domain")),
        LjpwError::Serde(sample_info("S001", "schema mismatch")),
    ];
    for err in errors.iter() {
        assert!(err.info().context.contains_key("field"));
        assert!(err.info().hint.is_some());
    }
    assert_eq!(errors[3].info().code, "D001");
}

#[test]
fn display_includes_context_and_hint() {
    let err = LjpwError::Calibration(sample_info("missing-metric", "metric not supplied"));
    let rendered = err.to_string();
    assert!(rendered.starts_with("calibration error: metric not supplied"));
    assert!(rendered.contains("field=cpu_utilization"));
    assert!(rendered.contains("hint: check the ingestion pipeline"));
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = LjpwError::configuration("self-coupling", "source equals target");
    let json = serde_json::to_value(&err).expect("serialize");
    assert_eq!(json["family"], "Configuration");
    assert_eq!(json["detail"]["code"], "self-coupling");
    let back: LjpwError = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, err);
}
