use crate::errors::FeedbackError;
use crate::forms::ListQuery;
use crate::models::FeedbackRecord;
use crate::services::FeedbackService;
use actix_web::{get, web};

/// GET /api/feedback?schema&feedback&showHidden&search&limit
/// Newest first; hidden records only with showHidden=true.
#[tracing::instrument(name = "List feedback.", skip(service))]
#[get("")]
pub async fn list_handler(
    query: web::Query<ListQuery>,
    service: web::Data<FeedbackService>,
) -> Result<web::Json<Vec<FeedbackRecord>>, FeedbackError> {
    service.list_feedback(&query).await.map(web::Json)
}

/// GET /api/feedback/schemas
#[tracing::instrument(name = "List feedback schemas.", skip(service))]
#[get("/schemas")]
pub async fn schemas_handler(
    service: web::Data<FeedbackService>,
) -> Result<web::Json<Vec<String>>, FeedbackError> {
    service.schemas().await.map(web::Json)
}
