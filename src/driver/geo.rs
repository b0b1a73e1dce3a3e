use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Arrival and off-route share the same 200 m threshold.
pub const GEOFENCE_RADIUS_M: f64 = 200.0;

/// A position older than this is treated as offline.
pub const STALE_AFTER_MINUTES: i64 = 5;

/// Great-circle distance in meters.
pub fn haversine_distance_m(a: LatLng, b: LatLng) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

pub fn arrival_soon(driver: LatLng, destination: LatLng) -> bool {
    haversine_distance_m(driver, destination) <= GEOFENCE_RADIUS_M
}

/// Minimum distance from the driver to any vertex of the route polyline.
/// Returns None for an empty path.
pub fn min_distance_to_path_m(driver: LatLng, path: &[LatLng]) -> Option<f64> {
    path.iter()
        .map(|point| haversine_distance_m(driver, *point))
        .min_by(|a, b| a.total_cmp(b))
}

/// Off-route when every route vertex is further than the geofence radius.
/// An empty path never counts as off-route.
pub fn off_route(driver: LatLng, path: &[LatLng]) -> bool {
    match min_distance_to_path_m(driver, path) {
        Some(distance) => distance > GEOFENCE_RADIUS_M,
        None => false,
    }
}

pub fn is_stale(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - updated_at > Duration::minutes(STALE_AFTER_MINUTES)
}

pub fn speed_kmh(speed_ms: f64) -> i64 {
    (speed_ms * 3.6).round() as i64
}

/// "123° NE" style label on an 8-wind rose.
pub fn heading_label(heading: f64) -> String {
    const DIRS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let rounded = heading.round();
    let idx = ((rounded.rem_euclid(360.0) / 45.0).round() as i64).rem_euclid(8) as usize;
    format!("{}\u{b0} {}", rounded as i64, DIRS[idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const LAGOS: LatLng = LatLng { lat: 6.5244, lng: 3.3792 };

    fn north_of(origin: LatLng, meters: f64) -> LatLng {
        // one degree of latitude is ~111.195 km on this sphere
        LatLng {
            lat: origin.lat + meters / 111_194.93,
            lng: origin.lng,
        }
    }

    #[test]
    fn haversine_matches_known_degree_of_latitude() {
        let a = LatLng { lat: 0.0, lng: 0.0 };
        let b = LatLng { lat: 1.0, lng: 0.0 };
        let d = haversine_distance_m(a, b);
        assert!((d - 111_194.93).abs() < 1.0, "got {d}");
    }

    #[test]
    fn arrival_flag_flips_at_the_200m_radius() {
        assert!(arrival_soon(LAGOS, north_of(LAGOS, 150.0)));
        assert!(arrival_soon(LAGOS, north_of(LAGOS, 199.0)));
        assert!(!arrival_soon(LAGOS, north_of(LAGOS, 250.0)));
    }

    #[test]
    fn off_route_checks_nearest_polyline_vertex() {
        let path = vec![north_of(LAGOS, 1_000.0), north_of(LAGOS, 2_000.0)];
        assert!(off_route(LAGOS, &path));

        let path_nearby = vec![north_of(LAGOS, 1_000.0), north_of(LAGOS, 120.0)];
        assert!(!off_route(LAGOS, &path_nearby));

        assert!(!off_route(LAGOS, &[]));
    }

    #[test]
    fn staleness_boundary_is_strictly_after_five_minutes() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        assert!(!is_stale(now - Duration::minutes(5), now));
        assert!(is_stale(now - Duration::minutes(5) - Duration::seconds(1), now));
        assert!(!is_stale(now, now));
    }

    #[test]
    fn speed_converts_meters_per_second_to_kmh() {
        assert_eq!(speed_kmh(10.0), 36);
        assert_eq!(speed_kmh(0.0), 0);
        assert_eq!(speed_kmh(13.9), 50);
    }

    #[test]
    fn heading_label_uses_eight_wind_rose() {
        assert_eq!(heading_label(0.0), "0\u{b0} N");
        assert_eq!(heading_label(45.0), "45\u{b0} NE");
        assert_eq!(heading_label(90.0), "90\u{b0} E");
        assert_eq!(heading_label(225.0), "225\u{b0} SW");
        assert_eq!(heading_label(350.0), "350\u{b0} N");
    }
}
