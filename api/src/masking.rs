use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use utoipa::ToSchema;

use crate::errors::AppError;
use crate::geo::{self, Coordinate};
use crate::validation::MAX_RADIUS_M;

/// How the displacement is projected onto the globe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    #[default]
    Spherical,
    Planar,
}

impl Projection {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "spherical" | "great-circle" => Some(Self::Spherical),
            "planar" => Some(Self::Planar),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spherical => "spherical",
            Self::Planar => "planar",
        }
    }
}

/// Supplies the two random draws a mask needs.
pub trait DrawSource {
    /// Distance uniformly drawn from `[min_m, max_m]`.
    fn distance_m(&mut self, min_m: f64, max_m: f64) -> f64;
    /// Bearing uniformly drawn from `[0, 2π)`.
    fn bearing_rad(&mut self) -> f64;
}

/// Draws backed by any `rand` generator.
pub struct RandomDraws<R: Rng>(pub R);

impl RandomDraws<ThreadRng> {
    pub fn thread() -> Self {
        Self(rand::thread_rng())
    }
}

impl RandomDraws<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> DrawSource for RandomDraws<R> {
    fn distance_m(&mut self, min_m: f64, max_m: f64) -> f64 {
        self.0.gen_range(min_m..=max_m)
    }

    fn bearing_rad(&mut self) -> f64 {
        self.0.gen_range(0.0..TAU)
    }
}

/// Replays one fixed distance and bearing on every draw.
#[derive(Debug, Clone, Copy)]
pub struct FixedDraws {
    pub distance_m: f64,
    pub bearing_rad: f64,
}

impl DrawSource for FixedDraws {
    fn distance_m(&mut self, _min_m: f64, _max_m: f64) -> f64 {
        self.distance_m
    }

    fn bearing_rad(&mut self) -> f64 {
        self.bearing_rad
    }
}

/// A true coordinate plus the displacement band, validated on construction.
#[derive(Debug, Clone, Copy)]
pub struct MaskRequest {
    pub origin: Coordinate,
    pub radius_m: f64,
    pub min_radius_m: f64,
}

impl MaskRequest {
    pub fn new(origin: Coordinate, radius_m: f64, min_radius_m: f64) -> Result<Self, AppError> {
        if !radius_m.is_finite() || radius_m <= 0.0 || radius_m > MAX_RADIUS_M {
            return Err(AppError::InvalidArgument(format!(
                "Radius must be between 0 and {MAX_RADIUS_M} meters, got {radius_m}"
            )));
        }
        if !min_radius_m.is_finite() || min_radius_m < 0.0 || min_radius_m > radius_m {
            return Err(AppError::InvalidArgument(format!(
                "Minimum radius must be between 0 and {radius_m} meters, got {min_radius_m}"
            )));
        }
        Ok(Self {
            origin,
            radius_m,
            min_radius_m,
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Masker {
    pub projection: Projection,
}

impl Masker {
    pub fn new(projection: Projection) -> Self {
        Self { projection }
    }

    /// Displace the origin by a random distance in `[min_radius_m, radius_m]`
    /// along a uniformly random bearing.
    ///
    /// Distances are uniform along the radius, so points cluster towards the
    /// centre of the disk rather than covering it uniformly.
    pub fn mask<D: DrawSource>(
        &self,
        request: &MaskRequest,
        draws: &mut D,
    ) -> Result<Coordinate, AppError> {
        let distance = draws.distance_m(request.min_radius_m, request.radius_m);
        let bearing = draws.bearing_rad();

        let masked = match self.projection {
            Projection::Spherical => geo::destination(request.origin, bearing, distance),
            Projection::Planar => geo::destination_planar(request.origin, bearing, distance),
        };

        if !masked.lat.is_finite() || !masked.lon.is_finite() {
            return Err(AppError::InvalidArgument(format!(
                "Projection is undefined for latitude {} with bearing {bearing}",
                request.origin.lat
            )));
        }

        // Never log the true coordinate.
        log::debug!(
            "Masked coordinate ({}): radius {} m, min {} m, displacement {:.1} m",
            self.projection.as_str(),
            request.radius_m,
            request.min_radius_m,
            geo::haversine_m(request.origin, masked),
        );
        Ok(masked)
    }
}

/// Mask with the thread RNG and great-circle projection.
pub fn mask_coordinate(
    lat: f64,
    lon: f64,
    radius_m: f64,
    min_radius_m: f64,
) -> Result<(f64, f64), AppError> {
    let request = MaskRequest::new(Coordinate::new(lat, lon)?, radius_m, min_radius_m)?;
    let masked = Masker::default().mask(&request, &mut RandomDraws::thread())?;
    Ok((masked.lat, masked.lon))
}
