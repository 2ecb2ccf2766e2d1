//! Great-circle distance and bounding-box neighbour lookup.
//!
//! Bounding coordinates follow the classic derivation of
//! <http://janmatuschek.de/LatitudeLongitudeBoundingCoordinates>: the box is
//! a cheap pre-filter that contains every point within the radius, but may
//! also contain points farther away in its corners.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{User, UserId};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.01;

/// A WGS84 position in degrees.
///
/// Deserialization goes through [`Geolocation::new`], so loaded data obeys
/// the same bounds as constructed data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeolocation")]
pub struct Geolocation {
    /// Latitude in degrees, `-90..=90`.
    pub latitude: f64,
    /// Longitude in degrees, `-180..=180`.
    pub longitude: f64,
}

impl Geolocation {
    /// Creates a position, rejecting non-finite or out-of-range coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(Error::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Great-circle distance to `other` in kilometres.
    #[must_use]
    pub fn distance_to(&self, other: &Geolocation) -> f64 {
        distance_km(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

#[derive(Deserialize)]
struct RawGeolocation {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeolocation> for Geolocation {
    type Error = Error;

    fn try_from(raw: RawGeolocation) -> Result<Self> {
        Self::new(raw.latitude, raw.longitude)
    }
}

/// Latitude/longitude rectangle enclosing a search radius.
///
/// When the box crosses the antimeridian, `min.longitude > max.longitude`
/// and the box covers `[min.longitude, 180] ∪ [-180, max.longitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// South-west corner.
    pub min: Geolocation,
    /// North-east corner.
    pub max: Geolocation,
}

impl BoundingBox {
    /// Returns true when `point` lies inside the box (edges included).
    #[must_use]
    pub fn contains(&self, point: &Geolocation) -> bool {
        if point.latitude < self.min.latitude || point.latitude > self.max.latitude {
            return false;
        }
        if self.min.longitude <= self.max.longitude {
            point.longitude >= self.min.longitude && point.longitude <= self.max.longitude
        } else {
            point.longitude >= self.min.longitude || point.longitude <= self.max.longitude
        }
    }

    /// Returns true when the box wraps across the ±180° meridian.
    #[must_use]
    pub fn crosses_antimeridian(&self) -> bool {
        self.min.longitude > self.max.longitude
    }
}

/// Spherical law-of-cosines distance between two points, in kilometres.
///
/// Inputs are degrees. The arccos argument is clamped to `[-1, 1]` so that
/// rounding never yields `NaN`, and identical points are exactly 0.
#[must_use]
// Reason: exact equality is the identical-point case, anything else goes through acos
#[allow(clippy::float_cmp)]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }

    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let delta_lambda = (lon1 - lon2).to_radians();

    let cos_angle = phi1.sin() * phi2.sin() + phi1.cos() * phi2.cos() * delta_lambda.cos();
    cos_angle.clamp(-1.0, 1.0).acos() * EARTH_RADIUS_KM
}

/// Computes the bounding box of all points within `radius_km` of a centre.
///
/// Near a pole the box degenerates: latitude is clamped to ±90° and the
/// longitude range widens to the full `[-180, 180]`. Negative or `NaN`
/// radii are treated as 0.
#[must_use]
pub fn bounding_box(latitude: f64, longitude: f64, radius_km: f64) -> BoundingBox {
    let angular = radius_km.max(0.0) / EARTH_RADIUS_KM;
    let delta_lat = angular.to_degrees();

    // Offsets are applied in degrees so a zero radius yields the centre exactly.
    let mut min_lat = latitude - delta_lat;
    let mut max_lat = latitude + delta_lat;

    let (min_lon, max_lon) = if min_lat > -90.0 && max_lat < 90.0 {
        let delta_lon = (angular.sin() / latitude.to_radians().cos())
            .min(1.0)
            .asin()
            .to_degrees();
        let mut min_lon = longitude - delta_lon;
        if min_lon < -180.0 {
            min_lon += 360.0;
        }
        let mut max_lon = longitude + delta_lon;
        if max_lon > 180.0 {
            max_lon -= 360.0;
        }
        (min_lon, max_lon)
    } else {
        min_lat = min_lat.max(-90.0);
        max_lat = max_lat.min(90.0);
        (-180.0, 180.0)
    };

    BoundingBox {
        min: Geolocation {
            latitude: min_lat,
            longitude: min_lon,
        },
        max: Geolocation {
            latitude: max_lat,
            longitude: max_lon,
        },
    }
}

/// Returns every user whose position falls inside the bounding box of
/// `radius_km` around `center_id`, the centre user included.
///
/// This is the rectangular approximation: returned users are inside the
/// box, not necessarily within `radius_km`. An unknown centre id yields an
/// empty list. Input order is preserved.
#[must_use]
pub fn users_within_radius(center_id: UserId, radius_km: f64, users: &[User]) -> Vec<User> {
    let Some(center) = users.iter().find(|u| u.id == center_id) else {
        tracing::debug!(user_id = center_id, "Centre user not found, no neighbours");
        return Vec::new();
    };

    let bbox = bounding_box(
        center.location.latitude,
        center.location.longitude,
        radius_km,
    );

    users
        .iter()
        .filter(|u| bbox.contains(&u.location))
        .copied()
        .collect()
}

/// Like [`users_within_radius`], then refined by true great-circle distance.
#[must_use]
pub fn users_within_distance(center_id: UserId, radius_km: f64, users: &[User]) -> Vec<User> {
    let Some(center) = users.iter().find(|u| u.id == center_id).copied() else {
        return Vec::new();
    };

    users_within_radius(center_id, radius_km, users)
        .into_iter()
        .filter(|u| center.location.distance_to(&u.location) <= radius_km)
        .collect()
}
