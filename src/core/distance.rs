use crate::models::Coordinates;

/// Earth's mean radius in statute miles; every distance in the crate uses this unit
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Calculate the great-circle distance between two points in miles
///
/// Uses the spherical law of cosines. For coincident or near-coincident
/// points rounding can push the cosine slightly past 1.0, so the argument
/// is clamped to [-1, 1] before `acos`.
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in miles
#[inline]
pub fn great_circle_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let cosine = lat1_rad.cos() * lat2_rad.cos() * delta_lon.cos()
        + lat1_rad.sin() * lat2_rad.sin();

    EARTH_RADIUS_MILES * cosine.clamp(-1.0, 1.0).acos()
}

/// Distance between two coordinates in miles
#[inline]
pub fn distance_between(a: Coordinates, b: Coordinates) -> f64 {
    great_circle_distance(a.latitude, a.longitude, b.latitude, b.longitude)
}
