use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::AppError;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A point in decimal degrees, always within lat [-90, 90] and lon [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Accepts a caller-supplied coordinate. Out-of-range input is rejected, never clamped.
    pub fn new(lat: f64, lon: f64) -> Result<Self, AppError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(AppError::InvalidArgument(
                "Coordinates must be finite numbers".to_string(),
            ));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(AppError::InvalidArgument(format!(
                "Latitude {lat} is outside [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(AppError::InvalidArgument(format!(
                "Longitude {lon} is outside [-180, 180]"
            )));
        }
        Ok(Self { lat, lon })
    }
}

/// Clamp latitude and wrap longitude into range.
///
/// Longitude uses `((lon + 180) mod 360) - 180` with a euclidean modulo, so
/// 180 maps to -180 and values west of the antimeridian wrap east.
#[inline]
pub fn normalize(lat: f64, lon: f64) -> Coordinate {
    Coordinate {
        lat: lat.clamp(-90.0, 90.0),
        lon: (lon + 180.0).rem_euclid(360.0) - 180.0,
    }
}

/// Great-circle destination from `origin` along `bearing_rad` for `distance_m`.
///
///   lat' = asin(sin lat · cos δ + cos lat · sin δ · cos θ)
///   lon' = lon + atan2(sin θ · sin δ · cos lat, cos δ − sin lat · sin lat')
///
/// At exactly ±90° latitude the bearing is degenerate and the longitude
/// term depends on floating-point residue of `cos(±π/2)`.
pub fn destination(origin: Coordinate, bearing_rad: f64, distance_m: f64) -> Coordinate {
    let delta = distance_m / EARTH_RADIUS_M;
    let lat1 = origin.lat.to_radians();
    let lon1 = origin.lon.to_radians();

    let sin_lat2 = lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * bearing_rad.cos();
    // Rounding can push the sine a hair past ±1 near the poles.
    let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();
    let lon2 = lon1
        + (bearing_rad.sin() * delta.sin() * lat1.cos())
            .atan2(delta.cos() - lat1.sin() * lat2.sin());

    normalize(lat2.to_degrees(), lon2.to_degrees())
}

/// Small-angle planar offset. Diverges from [`destination`] at high latitude
/// and long distances.
pub fn destination_planar(origin: Coordinate, bearing_rad: f64, distance_m: f64) -> Coordinate {
    let lat1 = origin.lat.to_radians();
    let d_lat = distance_m * bearing_rad.cos() / EARTH_RADIUS_M;
    let d_lon = distance_m * bearing_rad.sin() / (EARTH_RADIUS_M * lat1.cos());

    normalize(
        (lat1 + d_lat).to_degrees(),
        origin.lon + d_lon.to_degrees(),
    )
}

/// Haversine distance in meters.
pub fn haversine_m(a: Coordinate, b: Coordinate) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let d_lat = lat2 - lat1;
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const LONDON: Coordinate = Coordinate {
        lat: 51.5074,
        lon: -0.1278,
    };

    #[test]
    fn rejects_out_of_range() {
        assert!(Coordinate::new(90.5, 0.0).is_err());
        assert!(Coordinate::new(-91.0, 0.0).is_err());
        assert!(Coordinate::new(0.0, 180.1).is_err());
        assert!(Coordinate::new(0.0, -181.0).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn accepts_edges() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn normalize_wraps_longitude() {
        assert_eq!(normalize(0.0, 190.0).lon, -170.0);
        assert_eq!(normalize(0.0, -190.0).lon, 170.0);
        assert_eq!(normalize(0.0, 180.0).lon, -180.0);
        assert_eq!(normalize(0.0, 45.0).lon, 45.0);
    }

    #[test]
    fn normalize_clamps_latitude() {
        assert_eq!(normalize(90.2, 0.0).lat, 90.0);
        assert_eq!(normalize(-95.0, 0.0).lat, -90.0);
    }

    #[test]
    fn due_north_only_moves_latitude() {
        let out = destination(LONDON, 0.0, 5000.0);
        let expected = LONDON.lat + (5000.0 / EARTH_RADIUS_M).to_degrees();
        assert!((out.lat - expected).abs() < 1e-9);
        assert!((out.lon - LONDON.lon).abs() < 1e-12);
    }

    #[test]
    fn destination_distance_matches() {
        for bearing in [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2, 1.0] {
            let out = destination(LONDON, bearing, 12_345.0);
            assert!((haversine_m(LONDON, out) - 12_345.0).abs() < 1e-3);
        }
    }

    #[test]
    fn destination_crosses_antimeridian() {
        let origin = Coordinate { lat: 0.0, lon: 179.99 };
        let out = destination(origin, FRAC_PI_2, 5000.0);
        assert!(out.lon < 0.0);
        assert!(out.lon >= -180.0);
    }

    #[test]
    fn planar_agrees_near_equator() {
        let origin = Coordinate { lat: 1.0, lon: 10.0 };
        let a = destination(origin, 0.7, 1000.0);
        let b = destination_planar(origin, 0.7, 1000.0);
        assert!(haversine_m(a, b) < 1.0);
    }

    #[test]
    fn haversine_zero_for_same_point() {
        assert_eq!(haversine_m(LONDON, LONDON), 0.0);
    }
}
