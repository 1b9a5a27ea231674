use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use std::env;
use utoipa::openapi::Server;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use pins_api::config::{Config, API_PREFIX};
use pins_api::{geo, masking, models, prompt, routes, zones};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pins API",
        description = "Builds pins.json map entries: validates link, colour and identifier \
            fields, attaches Köppen climate zones, and optionally geomasks the published \
            coordinate by a random bearing and distance for location privacy.",
        version = "1.0.0"
    ),
    paths(
        routes::health::health,
        routes::zones::list_zones,
        routes::validate::validate_field,
        routes::mask::mask,
        routes::pins::create_pin,
    ),
    components(schemas(
        models::MaskQuery, models::ValidateQuery, models::ValidationKind, models::PinForm,
        models::HealthPayload, models::ZoneListPayload, models::ValidationPayload,
        models::MaskPayload, geo::Coordinate, masking::Projection, zones::ZoneDescriptor,
    )),
    tags(
        (name = "System", description = "Health and status"),
        (name = "Reference", description = "Climate zone table"),
        (name = "Validation", description = "Field format checks"),
        (name = "Masking", description = "Coordinate geomasking"),
        (name = "Pins", description = "Pin record assembly"),
    )
)]
struct ApiDoc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
    let cfg = Config::from_env();

    let args: Vec<String> = env::args().collect();
    match args.get(1).map(String::as_str) {
        None | Some("server") => serve(cfg).await,
        Some("prompt") => prompt::run(&cfg).map_err(|e| {
            log::error!("{e}");
            std::io::Error::other(e.to_string())
        }),
        Some(other) => {
            log::error!("Unknown command: {other} (expected 'server' or 'prompt')");
            Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("unknown command: {other}"),
            ))
        }
    }
}

async fn serve(cfg: Config) -> std::io::Result<()> {
    let bind = format!("{}:{}", cfg.host, cfg.port);
    log::info!("Starting Pins API on {bind}");
    log::info!("Swagger UI: http://{bind}{API_PREFIX}/docs/");
    log::info!(
        "Masking: {} projection, radius {} m (min {} m)",
        cfg.projection.as_str(),
        cfg.mask_radius_m,
        cfg.mask_min_radius_m
    );

    let mut openapi = ApiDoc::openapi();
    openapi.servers = Some(vec![Server::new(API_PREFIX)]);

    let openapi_url: &'static str = Box::leak(format!("{API_PREFIX}/openapi.json").into_boxed_str());
    let docs_path: &'static str = Box::leak(format!("{API_PREFIX}/docs/{{_:.*}}").into_boxed_str());
    let health_path = format!("{API_PREFIX}/health");

    let data = web::Data::new(cfg);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new(r#"%a "%r" %s %b %Dms "%{User-Agent}i""#).exclude(health_path.clone()))
            .wrap(Cors::permissive())
            .app_data(data.clone())
            .service(SwaggerUi::new(docs_path).url(openapi_url, openapi.clone()))
            .service(web::scope(API_PREFIX).configure(routes::configure_routes))
    })
    .bind(&bind)?
    .run()
    .await
}
