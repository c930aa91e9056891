//! # Rusty-Board Binary
//!
//! The entry point that assembles the application based on compile-time features.

mod config;
mod pages;

use std::sync::Arc;

use actix_files::Files;
use actix_web::{web, App, HttpServer};
use rb_api::{configure_routes, middleware, AppState};

// Feature-gated imports: This is the "Compiled-to-Order" magic
#[cfg(feature = "db-sqlite")]
use rb_db_sqlite::SqliteBoardRepo;

#[cfg(not(feature = "db-sqlite"))]
compile_error!("rusty-board needs a database backend; enable the `db-sqlite` feature");

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = config::load()?;

    // 1. Initialize Database Implementation
    #[cfg(feature = "db-sqlite")]
    let repo = Arc::new(
        SqliteBoardRepo::connect(&settings.database.url, settings.database.max_connections).await?,
    );
    log::info!("Connected to {}", settings.database.url);

    // 2. Wrap in AppState (Using dynamic dispatch for maximum flexibility)
    let state = web::Data::new(AppState::new(repo.clone(), settings.api.to_api_config()));
    let views = web::Data::new(pages::Views::new(&settings.static_root));
    let public_dir = settings.static_root.join("public");

    let (host, port) = (settings.server.host.clone(), settings.server.port);
    log::info!("Rusty-Board listening on http://{host}:{port}");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(views.clone())
            .wrap(middleware::security_headers())
            .wrap(middleware::cors_policy())
            .wrap(middleware::standard_middleware())
            .configure(configure_routes)
            .service(Files::new("/public", public_dir.clone()))
            .route("/", web::get().to(pages::index))
            .route("/b/{board}/", web::get().to(pages::board))
            .route("/b/{board}/{thread_id}", web::get().to(pages::thread))
            .default_service(web::to(pages::not_found))
    })
    .bind((host, port))?
    .run()
    .await?;

    repo.close().await;
    Ok(())
}
