use crate::geo::{Coordinate, EARTH_RADIUS};

/// Great-circle distance between two coordinates in meters, using the
/// haversine formula.
///
/// Identical coordinates are exactly `0`. The haversine term is clamped
/// into `[0, 1]` so rounding on near-antipodal points cannot produce `NaN`.
///
/// Never overestimates the length of a road between the two points, which
/// makes it an admissible A* heuristic.
pub fn haversine(lhs: Coordinate, rhs: Coordinate) -> f64 {
    if lhs == rhs {
        return 0.0;
    }

    let l_lat = (lhs.lat as f64).to_radians();
    let r_lat = (rhs.lat as f64).to_radians();
    let delta_lat = r_lat - l_lat;
    let delta_lng = (rhs.lng as f64 - lhs.lng as f64).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + l_lat.cos() * r_lat.cos() * (delta_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS * a.clamp(0.0, 1.0).sqrt().asin()
}
