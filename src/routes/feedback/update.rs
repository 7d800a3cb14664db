use crate::errors::FeedbackError;
use crate::forms::{FeedbackUpdate, HiddenUpdate};
use crate::models::FeedbackRecord;
use crate::services::FeedbackService;
use actix_web::{patch, web};

#[tracing::instrument(name = "Update feedback tag.", skip(service))]
#[patch("/{id}/feedback")]
pub async fn feedback_handler(
    path: web::Path<(String,)>,
    web::Json(body): web::Json<FeedbackUpdate>,
    service: web::Data<FeedbackService>,
) -> Result<web::Json<FeedbackRecord>, FeedbackError> {
    service
        .set_feedback(&path.0, body.feedback)
        .await
        .map(web::Json)
}

#[tracing::instrument(name = "Update hidden status.", skip(service))]
#[patch("/{id}/hidden")]
pub async fn hidden_handler(
    path: web::Path<(String,)>,
    web::Json(body): web::Json<HiddenUpdate>,
    service: web::Data<FeedbackService>,
) -> Result<web::Json<FeedbackRecord>, FeedbackError> {
    service
        .set_hidden(&path.0, body.hidden)
        .await
        .map(web::Json)
}
