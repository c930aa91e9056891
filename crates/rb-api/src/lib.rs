//! # rb-api
//!
//! The web routing and orchestration layer for Rusty-Board.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod params;

use actix_web::web;

pub use error::ApiError;
pub use handlers::{ApiConfig, AppState};
pub use params::{IdFields, IdParam};

/// Configures the `/api` routes and the body/query extractors they rely on.
///
/// # Developer Note
/// Extractor failures are rewritten into [`ApiError::BadRequest`] so that
/// every error leaving the API shares the JSON `{ "error": ... }` shape.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(err.to_string()).into()
    }))
    .app_data(web::FormConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(err.to_string()).into()
    }))
    .service(
        web::scope("/api")
            .service(
                web::resource("/threads/{board}")
                    .route(web::get().to(handlers::threads::list_threads))
                    .route(web::post().to(handlers::threads::create_thread))
                    .route(web::put().to(handlers::threads::report_thread))
                    .route(web::delete().to(handlers::threads::delete_thread)),
            )
            .service(
                web::resource("/replies/{board}")
                    .route(web::get().to(handlers::replies::get_thread))
                    .route(web::post().to(handlers::replies::create_reply))
                    .route(web::put().to(handlers::replies::report_reply))
                    .route(web::delete().to(handlers::replies::delete_reply)),
            ),
    );
}
