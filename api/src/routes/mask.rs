use actix_web::{web, HttpResponse, Result as ActixResult};
use validator::Validate;

use crate::config::Config;
use crate::errors::AppError;
use crate::geo::Coordinate;
use crate::masking::{MaskRequest, Masker, RandomDraws};
use crate::models::requests::MaskQuery;
use crate::models::responses::MaskPayload;
use crate::response::ApiResponse;
use crate::validation::validate_radius;

#[utoipa::path(
    get,
    path = "/mask",
    tag = "Masking",
    params(MaskQuery),
    responses(
        (status = 200, description = "Masked coordinate", body = MaskPayload),
        (status = 400, description = "Out-of-range coordinate or radius")
    )
)]
pub async fn mask(
    cfg: web::Data<Config>,
    query: web::Query<MaskQuery>,
) -> ActixResult<HttpResponse> {
    query.validate().map_err(AppError::from)?;

    let radius_m = query.radius_m.unwrap_or(cfg.mask_radius_m);
    let min_radius_m = query
        .min_radius_m
        .unwrap_or(cfg.mask_min_radius_m.min(radius_m));
    validate_radius(radius_m, min_radius_m)?;

    let request = MaskRequest::new(Coordinate::new(query.lat, query.lon)?, radius_m, min_radius_m)?;
    let coordinate = Masker::new(cfg.projection).mask(&request, &mut RandomDraws::thread())?;

    Ok(ApiResponse::ok(MaskPayload {
        coordinate,
        radius_m,
        min_radius_m,
        projection: cfg.projection,
    }))
}
