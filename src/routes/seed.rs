use crate::services::FeedbackService;
use actix_web::{get, post, web, HttpResponse};
use serde_json::json;

/// POST /api/seed
/// Development only; each call inserts another copy of the demo record.
#[tracing::instrument(name = "Seed route.", skip(service))]
#[post("/seed")]
pub async fn seed_handler(service: web::Data<FeedbackService>) -> HttpResponse {
    match service.seed().await {
        Ok(inserted) => HttpResponse::Ok().json(json!({
            "message": "Seed data inserted successfully",
            "count": inserted.len(),
        })),
        Err(err) => HttpResponse::InternalServerError().json(json!({
            "message": "Server error",
            "error": err.to_string(),
        })),
    }
}

/// GET /api/seed-get
#[tracing::instrument(name = "Minimal seed route.", skip(service))]
#[get("/seed-get")]
pub async fn seed_get_handler(service: web::Data<FeedbackService>) -> HttpResponse {
    match service.seed_minimal().await {
        Ok(_) => HttpResponse::Ok().json(json!({ "success": true })),
        Err(err) => HttpResponse::InternalServerError().json(json!({ "error": err.to_string() })),
    }
}
