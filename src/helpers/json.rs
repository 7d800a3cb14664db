use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;

/// Error envelope returned by the API routes.
#[derive(Debug, Serialize)]
pub struct JsonResponse {
    pub status: String,
    pub code: u16,
    pub message: String,
}

impl JsonResponse {
    pub fn new(code: StatusCode, message: &str, fallback: &str) -> Self {
        let msg = if !message.trim().is_empty() {
            message.to_string()
        } else {
            String::from(fallback)
        };

        JsonResponse {
            status: "Error".to_string(),
            code: code.as_u16(),
            message: msg,
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message, "Object not found")
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, "Validation error")
    }

    pub fn internal_server_error(message: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, "Internal error")
    }

    pub fn respond(&self) -> HttpResponse {
        let status =
            StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status).json(self)
    }
}
