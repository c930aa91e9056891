//! Static front-end pages. The pages fetch everything else from `/api`.

use std::path::{Path, PathBuf};

use actix_files::NamedFile;
use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse};

/// Location of the `views/` directory.
pub struct Views {
    root: PathBuf,
}

impl Views {
    pub fn new(static_root: &Path) -> Self {
        Self {
            root: static_root.join("views"),
        }
    }

    async fn open(&self, name: &str) -> actix_web::Result<NamedFile> {
        Ok(NamedFile::open_async(self.root.join(name)).await?)
    }
}

/// GET /
pub async fn index(views: web::Data<Views>) -> actix_web::Result<NamedFile> {
    views.open("index.html").await
}

/// GET /b/{board}/
pub async fn board(views: web::Data<Views>) -> actix_web::Result<NamedFile> {
    views.open("board.html").await
}

/// GET /b/{board}/{thread_id}
pub async fn thread(views: web::Data<Views>) -> actix_web::Result<NamedFile> {
    views.open("thread.html").await
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .insert_header(ContentType::plaintext())
        .body("Not Found")
}
