use ljpw_core::serde::{
    from_yaml_slice, stable_hash_string, to_canonical_json_bytes, to_yaml_string,
};
use ljpw_core::{Coordinate, ReferencePoints};

#[test]
fn canonical_json_sorts_keys() {
    let coord = Coordinate::new(0.3, 0.85, 0.9, 0.4).expect("coordinate");
    let bytes = to_canonical_json_bytes(&coord).expect("serialize");
    assert_eq!(
        String::from_utf8(bytes).expect("utf8"),
        r#"{"J":0.85,"L":0.3,"P":0.9,"W":0.4}"#
    );
}

#[test]
fn hashes_are_stable() {
    let coord = Coordinate::new(0.3, 0.85, 0.9, 0.4).expect("coordinate");
    let first = stable_hash_string(&coord).expect("hash");
    let second = stable_hash_string(&coord).expect("hash");
    assert_eq!(first, second);
    assert_eq!(first.len(), 64);
}

#[test]
fn reference_points_fill_defaults() {
    let refs: ReferencePoints =
        from_yaml_slice(b"anchor: {L: 0.9, J: 0.9, P: 0.9, W: 0.9}\n").expect("yaml");
    assert_eq!(refs.anchor.love(), 0.9);
    assert_eq!(
        refs.natural_equilibrium,
        ReferencePoints::default().natural_equilibrium
    );
    assert!((refs.natural_equilibrium.wisdom() - std::f64::consts::LN_2).abs() < 1e-12);
}

#[test]
fn yaml_round_trips_a_coordinate() {
    let coord = Coordinate::new(0.3, 0.85, 0.9, 0.4).expect("coordinate");
    let yaml = to_yaml_string(&coord).expect("yaml");
    let back: Coordinate = from_yaml_slice(yaml.as_bytes()).expect("parse");
    assert_eq!(back, coord);
}
