//! # ApiError
//!
//! Every failure leaves as JSON `{ "error": <message> }`. Storage details are
//! logged, never sent.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use rb_core::AppError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body or query could not be read
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    App(#[from] AppError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::App(AppError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::App(AppError::Storage(_)) | ApiError::App(AppError::Timeout) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ApiError::BadRequest(msg) | ApiError::App(AppError::Validation(msg)) => msg.clone(),
            ApiError::App(AppError::Storage(e)) => {
                log::error!("storage failure: {e:#}");
                "Internal Server Error".to_string()
            }
            ApiError::App(AppError::Timeout) => {
                log::error!("request deadline exceeded");
                "Request timed out".to_string()
            }
        };

        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}
