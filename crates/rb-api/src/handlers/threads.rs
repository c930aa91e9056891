use std::collections::HashMap;

use actix_web::http::header;
use actix_web::{web, HttpResponse};
use rb_core::ModerationOutcome;
use serde::Deserialize;
use serde_json::Value;

use super::{outcome_response, within_deadline, AppState};
use crate::error::ApiError;
use crate::params::{into_inner, Body, IdParam};

#[derive(Debug, Deserialize)]
pub struct NewThreadForm {
    pub text: String,
    pub delete_password: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteThreadForm {
    pub thread_id: IdParam,
    pub delete_password: String,
}

/// POST /api/threads/{board}
pub async fn create_thread(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: Body<NewThreadForm>,
) -> Result<HttpResponse, ApiError> {
    let board = path.into_inner();
    let form = into_inner(body);

    within_deadline(&data, data.threads.create_thread(&board, &form.text, &form.delete_password)).await?;

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, format!("/b/{board}/")))
        .finish())
}

/// GET /api/threads/{board}
pub async fn list_threads(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let board = path.into_inner();
    let threads = within_deadline(&data, data.threads.list_threads(&board)).await?;
    Ok(HttpResponse::Ok().json(threads))
}

/// PUT /api/threads/{board}
///
/// The thread may be named by any of the configured id fields.
pub async fn report_thread(
    data: web::Data<AppState>,
    body: Body<HashMap<String, Value>>,
) -> Result<HttpResponse, ApiError> {
    let fields = into_inner(body);
    let thread_id = data
        .config
        .report_id_fields
        .resolve(&fields)
        .and_then(|id| id.resolve());

    let outcome = match thread_id {
        Some(id) => within_deadline(&data, data.threads.report_thread(id)).await?,
        None => ModerationOutcome::ThreadNotFound,
    };
    Ok(outcome_response(outcome))
}

/// DELETE /api/threads/{board}
pub async fn delete_thread(
    data: web::Data<AppState>,
    body: Body<DeleteThreadForm>,
) -> Result<HttpResponse, ApiError> {
    let form = into_inner(body);

    let outcome = match form.thread_id.resolve() {
        Some(id) => within_deadline(&data, data.threads.delete_thread(id, &form.delete_password)).await?,
        None => ModerationOutcome::ThreadNotFound,
    };
    Ok(outcome_response(outcome))
}
