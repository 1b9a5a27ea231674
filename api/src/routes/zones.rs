use actix_web::HttpResponse;

use crate::models::responses::ZoneListPayload;
use crate::response::ApiResponse;
use crate::zones;

#[utoipa::path(
    get,
    path = "/zones",
    tag = "Reference",
    responses((status = 200, description = "Köppen climate zones with legend colours", body = ZoneListPayload))
)]
pub async fn list_zones() -> HttpResponse {
    let zones: Vec<_> = zones::all().iter().map(|z| z.descriptor()).collect();
    ApiResponse::ok(ZoneListPayload {
        count: zones.len(),
        zones,
    })
}
