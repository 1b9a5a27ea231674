use actix_web::HttpResponse;

use crate::models::responses::HealthPayload;
use crate::response::ApiResponse;

#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses((status = 200, description = "Service is healthy"))
)]
pub async fn health() -> HttpResponse {
    ApiResponse::ok(HealthPayload {
        status: "ok".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use actix_web::{test, web, App};
    use serde_json::Value;

    #[actix_web::test]
    async fn reports_ok() {
        let app = test::init_service(
            App::new().route("/health", web::get().to(super::health)),
        )
        .await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let res: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(res["payload"]["status"], "ok");
        assert_eq!(res["code"], 200);
    }
}
