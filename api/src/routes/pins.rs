use actix_web::{web, HttpResponse, Result as ActixResult};
use validator::Validate;

use crate::config::Config;
use crate::errors::AppError;
use crate::masking::{Masker, RandomDraws};
use crate::models::requests::PinForm;
use crate::record::PinBuilder;
use crate::response::ApiResponse;
use crate::validation::validate_radius;

/// Assemble a pins.json entry from a submitted form.
#[utoipa::path(
    post,
    path = "/pins",
    tag = "Pins",
    request_body = PinForm,
    responses(
        (status = 201, description = "Assembled pin record"),
        (status = 400, description = "A field failed validation")
    )
)]
pub async fn create_pin(
    cfg: web::Data<Config>,
    form: web::Json<PinForm>,
) -> ActixResult<HttpResponse> {
    form.validate().map_err(AppError::from)?;
    let form = form.into_inner();

    let mut pin = PinBuilder::new(cfg.max_zones, cfg.strict_ids);
    pin.id(&form.id)?;
    pin.title(&form.title)?;
    pin.link(&form.link)?;
    pin.address(&form.address)?;
    for code in &form.zones {
        pin.add_zone(code)?;
    }
    pin.coordinate(form.latitude, form.longitude)?;
    if form.mask {
        let radius_m = form.radius_m.unwrap_or(cfg.mask_radius_m);
        let min_radius_m = form
            .min_radius_m
            .unwrap_or(cfg.mask_min_radius_m.min(radius_m));
        validate_radius(radius_m, min_radius_m)?;
        pin.mask(
            &Masker::new(cfg.projection),
            radius_m,
            min_radius_m,
            &mut RandomDraws::thread(),
        )?;
    } else {
        pin.no_mask();
    }
    pin.image_url(&form.image_url)?;
    pin.colour(&form.colour)?;
    if let Some(pin_type) = &form.pin_type {
        pin.pin_type(pin_type)?;
    }

    let record = pin.build()?;
    Ok(ApiResponse::created(record.to_value(&cfg.profile)))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use serde_json::{json, Value};

    use crate::config::Config;

    fn form() -> Value {
        json!({
            "id": "house-5",
            "title": "House 5",
            "address": "5 Example Road",
            "zones": ["cfb", "Dfb"],
            "latitude": 51.5074,
            "longitude": -0.1278,
            "colour": "#FF0000"
        })
    }

    macro_rules! app {
        ($cfg:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($cfg))
                    .route("/pins", web::post().to(super::create_pin)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn assembles_unmasked_pin() {
        let app = app!(Config::default());
        let req = test::TestRequest::post().uri("/pins").set_json(form()).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        let pin = &body["payload"];
        assert_eq!(pin["id"], "house-5");
        assert_eq!(pin["gdpr"], false);
        assert_eq!(pin["radiusKm"], 0);
        assert_eq!(pin["latitude"], 51.5074);
        assert_eq!(pin["zones"][1]["code"], "Dfb");
        assert_eq!(pin["link"], "");
    }

    #[actix_web::test]
    async fn masks_when_requested() {
        let mut cfg = Config::default();
        cfg.profile.mask_key = "mask".to_string();
        let app = app!(cfg);
        let mut body = form();
        body["mask"] = json!(true);
        body["radiusM"] = json!(2000.0);
        let req = test::TestRequest::post().uri("/pins").set_json(body).to_request();
        let res: Value = test::call_and_read_body_json(&app, req).await;
        let pin = &res["payload"];
        assert_eq!(pin["mask"], true);
        assert_eq!(pin["radiusKm"], 2.0);
        assert!(pin.get("gdpr").is_none());
    }

    #[actix_web::test]
    async fn rejects_invalid_fields() {
        let app = app!(Config::default());
        let cases = [
            ("colour", json!("red")),
            ("link", json!("not a url")),
            ("imageUrl", json!("ftp://x.com/a.png")),
            ("id", json!("House 5")),
            ("zones", json!([])),
            ("zones", json!(["Af", "Am", "Aw", "ET"])),
            ("zones", json!(["Xx"])),
            ("latitude", json!(95.0)),
            ("title", json!("  ")),
        ];
        for (field, value) in cases {
            let mut body = form();
            body[field] = value;
            let req = test::TestRequest::post().uri("/pins").set_json(body).to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{field}");
        }
    }

    #[actix_web::test]
    async fn rejects_radius_outside_band() {
        let app = app!(Config::default());
        let cases = [
            json!({"radiusM": 30_000_000.0, "minRadiusM": 25_000_000.0}),
            json!({"radiusM": 30_000_000.0}),
            json!({"radiusM": 1000.0, "minRadiusM": 2000.0}),
            json!({"radiusM": 0.0}),
        ];
        for extra in cases {
            let mut body = form();
            body["mask"] = json!(true);
            for (key, value) in extra.as_object().unwrap() {
                body[key.as_str()] = value.clone();
            }
            let req = test::TestRequest::post().uri("/pins").set_json(&body).to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{extra}");
        }
    }
}
