use actix_web::{HttpResponse, Responder};

pub async fn health_check_route() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({"status": "ok"}))
}
