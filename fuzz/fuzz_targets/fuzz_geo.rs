//! Fuzz target for great-circle distance and bounding boxes.
//!
//! # Running
//!
//! ```bash
//! cd fuzz
//! cargo +nightly fuzz run fuzz_geo
//! ```

#![no_main]

use arbitrary::Arbitrary;
use ladle_core::geo::{bounding_box, distance_km, Geolocation};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct GeoInput {
    lat1: f64,
    lon1: f64,
    lat2: f64,
    lon2: f64,
    radius_km: f64,
}

fuzz_target!(|input: GeoInput| {
    let (Ok(a), Ok(b)) = (
        Geolocation::new(input.lat1, input.lon1),
        Geolocation::new(input.lat2, input.lon2),
    ) else {
        return;
    };

    let distance = distance_km(a.latitude, a.longitude, b.latitude, b.longitude);
    assert!(distance.is_finite() && distance >= 0.0, "bad distance {distance}");
    assert_eq!(a.distance_to(&a), 0.0);

    let bbox = bounding_box(a.latitude, a.longitude, input.radius_km);
    if input.radius_km.is_finite() {
        assert!(bbox.contains(&a), "centre outside {bbox:?}");
    }
});
