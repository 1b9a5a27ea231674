pub mod health;
pub mod mask;
pub mod pins;
pub mod validate;
pub mod zones;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health))
        .route("/zones", web::get().to(zones::list_zones))
        .route("/validate", web::get().to(validate::validate_field))
        .route("/mask", web::get().to(mask::mask))
        .route("/pins", web::post().to(pins::create_pin));
}
