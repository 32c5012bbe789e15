use ljpw_core::{Axis, Coordinate, LjpwError};
use proptest::prelude::*;

#[test]
fn out_of_range_axis_is_rejected() {
    let err = Coordinate::new(0.5, 1.2, 0.5, 0.5).expect_err("justice above one");
    match &err {
        LjpwError::Range(info) => {
            assert_eq!(info.code, "axis-out-of-range");
            assert_eq!(info.context.get("axis").map(String::as_str), Some("J"));
        }
        other => panic!("unexpected error family: {other:?}"),
    }

    assert!(Coordinate::new(-0.01, 0.5, 0.5, 0.5).is_err());
    assert!(Coordinate::new(0.5, 0.5, f64::NAN, 0.5).is_err());
    assert!(Coordinate::new(0.5, 0.5, 0.5, f64::INFINITY).is_err());
}

#[test]
fn bounds_are_inclusive() {
    let low = Coordinate::new(0.0, 0.0, 0.0, 0.0).expect("origin");
    let high = Coordinate::new(1.0, 1.0, 1.0, 1.0).expect("anchor");
    assert_eq!(high, Coordinate::anchor());
    assert!((low.distance_to(&high) - 2.0).abs() < 1e-12);
}

#[test]
fn vector_follows_axis_order() {
    let coord = Coordinate::new(0.1, 0.2, 0.3, 0.4).expect("coordinate");
    assert_eq!(coord.to_vector(), [0.1, 0.2, 0.3, 0.4]);
    for axis in Axis::ALL {
        assert_eq!(coord[axis], coord.to_vector()[axis.index()]);
    }
    assert_eq!(coord.get(Axis::Power), coord.power());
}

#[test]
fn deserialization_enforces_bounds() {
    let ok: Coordinate =
        serde_json::from_str(r#"{"L":0.3,"J":0.85,"P":0.9,"W":0.4}"#).expect("valid");
    assert_eq!(ok.love(), 0.3);
    let bad = serde_json::from_str::<Coordinate>(r#"{"L":1.3,"J":0.85,"P":0.9,"W":0.4}"#);
    assert!(bad.is_err());
}

proptest! {
    #[test]
    fn distance_is_a_metric(
        a in proptest::array::uniform4(0.0f64..=1.0),
        b in proptest::array::uniform4(0.0f64..=1.0),
    ) {
        let x = Coordinate::from_vector(a).unwrap();
        let y = Coordinate::from_vector(b).unwrap();
        let d = x.distance_to(&y);
        prop_assert!(d >= 0.0);
        prop_assert_eq!(d, y.distance_to(&x));
        prop_assert_eq!(x.distance_to(&x), 0.0);
        if x != y {
            prop_assert!(d > 0.0);
        }
    }
}
