use freightgis_lib::{
    calculate_distance, calculate_route_distance, estimate_travel_time, Coordinate, DistanceUnit,
    Gazetteer,
};
use proptest::prelude::*;

fn city(name: &str) -> Coordinate {
    Gazetteer::builtin()
        .resolve(name)
        .expect("city is in the built-in gazetteer")
}

#[test]
fn new_york_to_los_angeles_is_about_3940_km() {
    let km = calculate_distance(city("NYC"), city("LA"), DistanceUnit::Kilometers)
        .expect("distance computes");
    assert!((3930.0..3950.0).contains(&km), "got {km}");

    let hours = estimate_travel_time(km, 80.0).expect("valid speed").hours;
    assert!((hours - km / 80.0).abs() < 1e-9);
}

#[test]
fn miles_are_kilometres_over_1_609344() {
    let km = calculate_distance(city("NYC"), city("LA"), DistanceUnit::Kilometers).unwrap();
    let miles = calculate_distance(city("NYC"), city("LA"), DistanceUnit::Miles).unwrap();
    assert!((miles - km / 1.609_344).abs() < 1e-9);
    assert!((2440.0..2460.0).contains(&miles), "got {miles}");
}

#[test]
fn route_distance_sums_legs_in_order() {
    let legs = [city("New York"), city("Denver"), city("Los Angeles")];
    let total = calculate_route_distance(&legs, DistanceUnit::Kilometers).unwrap();
    let first = calculate_distance(legs[0], legs[1], DistanceUnit::Kilometers).unwrap();
    let second = calculate_distance(legs[1], legs[2], DistanceUnit::Kilometers).unwrap();
    assert!((total - (first + second)).abs() < 1e-9);
}

#[test]
fn invalid_coordinate_literal_is_rejected() {
    let bogus = Coordinate {
        latitude: 123.0,
        longitude: 0.0,
    };
    assert!(calculate_distance(bogus, city("Boston"), DistanceUnit::Kilometers).is_err());
}

fn coordinate() -> impl Strategy<Value = Coordinate> {
    (-90.0f64..=90.0, -180.0f64..=180.0)
        .prop_map(|(lat, lon)| Coordinate::new(lat, lon).expect("generated in range"))
}

proptest! {
    #[test]
    fn distance_is_symmetric(a in coordinate(), b in coordinate()) {
        let ab = calculate_distance(a, b, DistanceUnit::Kilometers).unwrap();
        let ba = calculate_distance(b, a, DistanceUnit::Kilometers).unwrap();
        prop_assert!((ab - ba).abs() < 1e-6, "{} vs {}", ab, ba);
    }

    #[test]
    fn distance_to_self_is_zero(a in coordinate()) {
        let d = calculate_distance(a, a, DistanceUnit::Kilometers).unwrap();
        prop_assert!(d.abs() < 1e-9);
    }

    #[test]
    fn distance_is_non_negative_and_bounded(a in coordinate(), b in coordinate()) {
        let d = calculate_distance(a, b, DistanceUnit::Kilometers).unwrap();
        // Half the WGS84 meridian circumference is just over 20,003 km.
        prop_assert!((0.0..20_100.0).contains(&d));
    }
}
