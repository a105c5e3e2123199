//! HTTP handlers and route configuration.

mod blogs;
mod health;

use std::path::PathBuf;

use actix_files::Files;
use actix_web::{HttpResponse, guard, web};

use crate::middleware::error::AppError;

/// Largest accepted form body, matching common urlencoded parser defaults.
pub const FORM_LIMIT: usize = 100 * 1024;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::FormConfig::default()
            .limit(FORM_LIMIT)
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .route("/", web::get().to(blogs::root))
    .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/blogs")
                .service(
                    web::resource("")
                        .route(web::get().to(blogs::index))
                        .route(web::post().to(blogs::create)),
                )
                .route("/new", web::get().to(blogs::new_form))
                .service(
                    web::resource("/{id}")
                        .route(web::get().to(blogs::show))
                        .route(web::put().to(blogs::update))
                        .route(web::delete().to(blogs::destroy)),
                )
                .route("/{id}/edit", web::get().to(blogs::edit)),
        );
}

/// Static assets served at the site root. Only GET and HEAD reach the files;
/// other methods fall through to the 404 page.
pub fn static_files(dir: impl Into<PathBuf>) -> Files {
    Files::new("/", dir)
        .guard(guard::Any(guard::Get()).or(guard::Head()))
        .default_handler(web::to(not_found))
}

/// Fallback for unmatched paths.
pub async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound("Page not found".to_string()))
}
