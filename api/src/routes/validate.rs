use actix_web::{web, HttpResponse};

use crate::models::requests::{ValidateQuery, ValidationKind};
use crate::models::responses::ValidationPayload;
use crate::response::ApiResponse;
use crate::validation::{validate_hex_colour, validate_identifier, validate_url};

/// Check a single field value against its format rule.
#[utoipa::path(
    get,
    path = "/validate",
    tag = "Validation",
    params(ValidateQuery),
    responses(
        (status = 200, description = "Validation verdict", body = ValidationPayload),
        (status = 400, description = "Unknown kind")
    )
)]
pub async fn validate_field(query: web::Query<ValidateQuery>) -> HttpResponse {
    let query = query.into_inner();
    let valid = match query.kind {
        ValidationKind::Url => validate_url(&query.value),
        ValidationKind::Colour => validate_hex_colour(&query.value),
        ValidationKind::Identifier => validate_identifier(&query.value),
    };

    ApiResponse::ok(ValidationPayload {
        kind: query.kind.as_str(),
        value: query.value,
        valid,
    })
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use serde_json::Value;

    async fn verdict(uri: &str) -> Value {
        let app = test::init_service(
            App::new().route("/validate", web::get().to(super::validate_field)),
        )
        .await;
        let req = test::TestRequest::get().uri(uri).to_request();
        test::call_and_read_body_json(&app, req).await
    }

    #[actix_web::test]
    async fn url_verdicts() {
        let res = verdict("/validate?kind=url&value=https%3A%2F%2Fexample.com").await;
        assert_eq!(res["payload"]["valid"], true);
        let res = verdict("/validate?kind=url&value=ftp%3A%2F%2Fx.com").await;
        assert_eq!(res["payload"]["valid"], false);
    }

    #[actix_web::test]
    async fn colour_accepts_us_spelling() {
        let res = verdict("/validate?kind=color&value=%23fff").await;
        assert_eq!(res["payload"]["kind"], "colour");
        assert_eq!(res["payload"]["valid"], true);
    }

    #[actix_web::test]
    async fn identifier_verdict() {
        let res = verdict("/validate?kind=identifier&value=House%205").await;
        assert_eq!(res["payload"]["valid"], false);
    }

    #[actix_web::test]
    async fn unknown_kind_is_rejected() {
        let app = test::init_service(
            App::new().route("/validate", web::get().to(super::validate_field)),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/validate?kind=email&value=a")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
