use serde::Serialize;
use utoipa::ToSchema;

use crate::geo::Coordinate;
use crate::masking::Projection;
use crate::zones::ZoneDescriptor;

#[derive(Serialize, ToSchema)]
pub struct HealthPayload {
    pub status: String,
}

#[derive(Serialize, ToSchema)]
pub struct ZoneListPayload {
    pub count: usize,
    pub zones: Vec<ZoneDescriptor>,
}

#[derive(Serialize, ToSchema)]
pub struct ValidationPayload {
    pub kind: &'static str,
    pub value: String,
    pub valid: bool,
}

#[derive(Serialize, ToSchema)]
pub struct MaskPayload {
    pub coordinate: Coordinate,
    pub radius_m: f64,
    pub min_radius_m: f64,
    pub projection: Projection,
}
