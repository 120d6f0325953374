use actix_web::{get, web, HttpResponse, Responder};
use log::error;

use crate::service::PostService;

#[get("/health")]
pub async fn health(service: web::Data<PostService>) -> impl Responder {
    match service.ping().await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "database": "connected"
        })),
        Err(err) => {
            error!("Health ping failed: {}", err);

            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "database": "disconnected",
                "error": err.to_string()
            }))
        }
    }
}
