use crate::services::FeedbackService;
use actix_web::{get, web, HttpResponse};

#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Feedback API is running! Use /api/feedback to access data.")
}

#[get("/test")]
pub async fn test_handler() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("API is working")
}

#[tracing::instrument(name = "Health check.", skip(service))]
#[get("/health_check")]
pub async fn health_check(service: web::Data<FeedbackService>) -> HttpResponse {
    match service.ping().await {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(err) => {
            tracing::error!("Store is unreachable: {}", err);
            HttpResponse::ServiceUnavailable().finish()
        }
    }
}
