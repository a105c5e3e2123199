//! Askama templates and the view models they render.

use actix_web::HttpResponse;
use actix_web::http::header::ContentType;
use askama::Template;

use blog_core::domain::sanitize;
use blog_core::domain::{BlogFields, BlogPost};

use crate::middleware::error::{AppError, AppResult};

/// Length of the plain-text preview shown on the index page.
const EXCERPT_CHARS: usize = 100;

/// Display form of a post. Missing fields render as empty strings.
#[derive(Debug, Clone, Default)]
pub struct BlogView {
    pub id: String,
    pub title: String,
    pub image: String,
    /// Sanitized HTML, rendered unescaped.
    pub description: String,
    /// Markup-free preview, already HTML-escaped.
    pub excerpt: String,
    pub created: String,
}

impl BlogView {
    /// Values of a form that has not been stored yet.
    pub fn draft(fields: &BlogFields) -> Self {
        Self {
            title: fields.title.clone().unwrap_or_default(),
            image: fields.image.clone().unwrap_or_default(),
            description: fields.description.clone().unwrap_or_default(),
            ..Self::default()
        }
    }
}

impl From<&BlogPost> for BlogView {
    fn from(blog: &BlogPost) -> Self {
        let description = blog.description.clone().unwrap_or_default();
        Self {
            id: blog.id.to_string(),
            title: blog.title.clone().unwrap_or_default(),
            image: blog.image.clone().unwrap_or_default(),
            excerpt: sanitize::excerpt(&description, EXCERPT_CHARS),
            description,
            created: blog.created.format("%a %b %d %Y").to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub blogs: Vec<BlogView>,
}

#[derive(Template, Default)]
#[template(path = "new.html")]
pub struct NewTemplate {
    pub blog: BlogView,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "show.html")]
pub struct ShowTemplate {
    pub blog: BlogView,
}

#[derive(Template)]
#[template(path = "edit.html")]
pub struct EditTemplate {
    pub blog: BlogView,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    pub title: String,
    pub detail: String,
}

/// Render a template into a 200 HTML response.
pub fn render<T: Template>(template: &T) -> AppResult<HttpResponse> {
    let body = template
        .render()
        .map_err(|e| AppError::Internal(format!("Template rendering failed: {}", e)))?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body))
}
