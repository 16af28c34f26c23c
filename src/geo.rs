//! Great-circle distance on a spherical Earth.

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two `(latitude, longitude)` pairs
/// given in degrees.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_is_zero() {
        assert_eq!(haversine_km(48.85, 2.35, 48.85, 2.35), 0.0);
        assert_eq!(haversine_km(-90.0, 180.0, -90.0, 180.0), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let ab = haversine_km(40.7128, -74.0060, 51.5074, -0.1278);
        let ba = haversine_km(51.5074, -0.1278, 40.7128, -74.0060);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        let d = haversine_km(0.0, 0.0, 0.0, 1.0);
        assert!((d - 111.19).abs() < 0.5, "got {d}");
    }

    #[test]
    fn test_antimeridian_crossing_is_short() {
        let d = haversine_km(0.0, 179.5, 0.0, -179.5);
        assert!((d - 111.19).abs() < 0.5, "got {d}");
    }
}
