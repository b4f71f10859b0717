//! Spherical-earth distance and projection helpers.

use crate::models::Coordinate;

/// Mean earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Great-circle distance between two points in kilometers (Haversine formula).
///
/// Symmetric in its arguments and exactly zero for identical points.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let dphi = (b.lat - a.lat).to_radians();
    let dlambda = (b.lon - a.lon).to_radians();
    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Total length of a path in kilometers; 0 for fewer than two points.
pub fn path_distance_km(path: &[Coordinate]) -> f64 {
    path.windows(2).map(|pair| distance_km(pair[0], pair[1])).sum()
}

/// Point reached by travelling `distance_km` from `origin` on an initial bearing.
///
/// # Arguments
/// * `origin` - Starting position
/// * `distance_km` - Distance along the great circle
/// * `bearing_deg` - Initial bearing in degrees (0 = north, clockwise)
pub fn destination_point(origin: Coordinate, distance_km: f64, bearing_deg: f64) -> Coordinate {
    if distance_km.abs() <= f64::EPSILON {
        return origin;
    }

    let lat1 = origin.lat.to_radians();
    let lon1 = origin.lon.to_radians();
    let bearing_rad = bearing_deg.to_radians();
    let angular_distance = distance_km / EARTH_RADIUS_KM;

    let sin_lat1 = lat1.sin();
    let cos_lat1 = lat1.cos();
    let sin_ad = angular_distance.sin();
    let cos_ad = angular_distance.cos();

    let sin_lat2 = sin_lat1 * cos_ad + cos_lat1 * sin_ad * bearing_rad.cos();
    let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();

    let y = bearing_rad.sin() * sin_ad * cos_lat1;
    let x = cos_ad - sin_lat1 * sin_lat2;
    let mut lon2 = lon1 + y.atan2(x);
    lon2 =
        (lon2 + std::f64::consts::PI).rem_euclid(2.0 * std::f64::consts::PI) - std::f64::consts::PI;

    Coordinate::new(lon2.to_degrees(), lat2.to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = distance_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn distance_is_zero_for_same_point_and_symmetric() {
        let a = Coordinate::new(35.2137, 31.7683);
        let b = Coordinate::new(34.7818, 32.0853);
        assert_eq!(distance_km(a, a), 0.0);
        assert_eq!(distance_km(a, b), distance_km(b, a));
    }

    #[test]
    fn path_distance_sums_legs() {
        assert_eq!(path_distance_km(&[]), 0.0);
        assert_eq!(path_distance_km(&[Coordinate::new(1.0, 1.0)]), 0.0);

        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 0.5);
        let c = Coordinate::new(0.0, 1.0);
        let total = path_distance_km(&[a, b, c]);
        assert!((total - distance_km(a, c)).abs() < 1e-9);
    }

    #[test]
    fn destination_point_round_trips_distance() {
        let origin = Coordinate::new(-117.8265, 33.6846);
        for bearing in [0.0, 45.0, 90.0, 180.0, 270.0] {
            let target = destination_point(origin, 50.0, bearing);
            let d = distance_km(origin, target);
            assert!((d - 50.0).abs() < 1e-6, "bearing {bearing}: {d}");
        }
    }

    #[test]
    fn destination_point_bearing_directions() {
        let origin = Coordinate::new(10.0, 45.0);
        let north = destination_point(origin, 10.0, 0.0);
        assert!(north.lat > origin.lat);
        assert!((north.lon - origin.lon).abs() < 1e-9);

        let east = destination_point(origin, 10.0, 90.0);
        assert!(east.lon > origin.lon);
    }

    #[test]
    fn zero_distance_returns_origin() {
        let origin = Coordinate::new(10.0, 45.0);
        assert_eq!(destination_point(origin, 0.0, 123.0), origin);
    }
}
