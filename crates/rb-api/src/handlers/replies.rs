use actix_web::http::header;
use actix_web::{web, HttpResponse};
use rb_core::{AppError, ModerationOutcome};
use serde::Deserialize;

use super::{outcome_response, within_deadline, AppState};
use crate::error::ApiError;
use crate::params::{into_inner, Body, IdParam};

#[derive(Debug, Deserialize)]
pub struct ThreadQuery {
    pub thread_id: Option<IdParam>,
}

#[derive(Debug, Deserialize)]
pub struct NewReplyForm {
    /// Board recorded on the reply; falls back to the path segment.
    pub board: Option<String>,
    pub thread_id: IdParam,
    pub text: String,
    pub delete_password: String,
}

#[derive(Debug, Deserialize)]
pub struct ReportReplyForm {
    pub thread_id: IdParam,
    pub reply_id: IdParam,
}

#[derive(Debug, Deserialize)]
pub struct DeleteReplyForm {
    pub thread_id: IdParam,
    pub reply_id: IdParam,
    pub delete_password: String,
}

/// GET /api/replies/{board}?thread_id=
pub async fn get_thread(
    data: web::Data<AppState>,
    query: web::Query<ThreadQuery>,
) -> Result<HttpResponse, ApiError> {
    let Some(raw) = query.into_inner().thread_id else {
        return Err(ApiError::BadRequest("thread_id is required".to_string()));
    };
    let Some(thread_id) = raw.resolve() else {
        return Ok(outcome_response(ModerationOutcome::ThreadNotFound));
    };

    match within_deadline(&data, data.replies.get_thread_with_replies(thread_id)).await? {
        Some(thread) => Ok(HttpResponse::Ok().json(thread)),
        None => Ok(outcome_response(ModerationOutcome::ThreadNotFound)),
    }
}

/// POST /api/replies/{board}
pub async fn create_reply(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: Body<NewReplyForm>,
) -> Result<HttpResponse, ApiError> {
    let path_board = path.into_inner();
    let form = into_inner(body);

    let thread_id = form
        .thread_id
        .resolve()
        .ok_or_else(|| AppError::Validation("thread_id must be a number".to_string()))?;
    let board = form.board.filter(|b| !b.is_empty()).unwrap_or(path_board);

    within_deadline(
        &data,
        data.replies.create_reply(&board, thread_id, &form.text, &form.delete_password),
    )
    .await?;

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, format!("/b/{board}/{thread_id}")))
        .finish())
}

/// PUT /api/replies/{board}
pub async fn report_reply(
    data: web::Data<AppState>,
    body: Body<ReportReplyForm>,
) -> Result<HttpResponse, ApiError> {
    let form = into_inner(body);

    let outcome = match (form.thread_id.resolve(), form.reply_id.resolve()) {
        (Some(thread_id), Some(reply_id)) => {
            within_deadline(&data, data.replies.report_reply(thread_id, reply_id)).await?
        }
        _ => ModerationOutcome::ReplyNotFound,
    };
    Ok(outcome_response(outcome))
}

/// DELETE /api/replies/{board}
///
/// Redacts the reply text; the reply itself stays listed.
pub async fn delete_reply(
    data: web::Data<AppState>,
    body: Body<DeleteReplyForm>,
) -> Result<HttpResponse, ApiError> {
    let form = into_inner(body);

    let outcome = match (form.thread_id.resolve(), form.reply_id.resolve()) {
        (Some(thread_id), Some(reply_id)) => {
            within_deadline(
                &data,
                data.replies.redact_reply(thread_id, reply_id, &form.delete_password),
            )
            .await?
        }
        _ => ModerationOutcome::ReplyNotFound,
    };
    Ok(outcome_response(outcome))
}
