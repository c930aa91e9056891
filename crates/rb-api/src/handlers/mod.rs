//! # rb-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the core services.

pub mod replies;
pub mod threads;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use actix_web::http::header::ContentType;
use actix_web::HttpResponse;
use rb_core::{AppError, BoardRepo, ModerationOutcome, ReplyService, ThreadService};

use crate::error::ApiError;
use crate::params::IdFields;

/// Tunables of the HTTP layer.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Upper bound on the service work done for one request.
    pub request_timeout: Duration,
    /// Fields that may name the thread in a thread report.
    pub report_id_fields: IdFields,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            report_id_fields: IdFields::default(),
        }
    }
}

/// State shared across all Actix-web workers.
pub struct AppState {
    pub threads: ThreadService,
    pub replies: ReplyService,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(repo: Arc<dyn BoardRepo>, config: ApiConfig) -> Self {
        Self {
            threads: ThreadService::new(repo.clone()),
            replies: ReplyService::new(repo),
            config,
        }
    }
}

/// Runs `work` under the request deadline.
async fn within_deadline<T>(
    state: &AppState,
    work: impl Future<Output = rb_core::Result<T>>,
) -> Result<T, ApiError> {
    match tokio::time::timeout(state.config.request_timeout, work).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(AppError::Timeout.into()),
    }
}

/// Domain negatives and confirmations share a 200 plain-text reply.
fn outcome_response(outcome: ModerationOutcome) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(ContentType::plaintext())
        .body(outcome.message())
}
