//! Blog post handlers.
//!
//! Every handler performs one storage call and answers with either a
//! rendered page or a redirect. Lookups that miss redirect to the list.

use actix_web::http::header;
use actix_web::{HttpResponse, web};

use blog_core::domain::{BlogFields, BlogId, BlogPost};
use blog_shared::BlogForm;

use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views::{BlogView, EditTemplate, IndexTemplate, NewTemplate, ShowTemplate, render};

const BLOGS_PATH: &str = "/blogs";

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Look a post up, folding storage failures into "not found".
async fn find_blog(state: &AppState, id: &BlogId) -> Option<BlogPost> {
    match state.blogs.find_by_id(id).await {
        Ok(Some(blog)) => Some(blog),
        Ok(None) => {
            tracing::debug!(blog_id = %id, "Blog not found");
            None
        }
        Err(e) => {
            tracing::error!(blog_id = %id, error = %e, "Failed to load blog");
            None
        }
    }
}

/// GET /
pub async fn root() -> HttpResponse {
    redirect(BLOGS_PATH)
}

/// GET /blogs
pub async fn index(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let blogs = state.blogs.find_all().await?;

    render(&IndexTemplate {
        blogs: blogs.iter().map(BlogView::from).collect(),
    })
}

/// GET /blogs/new
pub async fn new_form() -> AppResult<HttpResponse> {
    render(&NewTemplate::default())
}

/// POST /blogs
pub async fn create(
    state: web::Data<AppState>,
    form: web::Form<BlogForm>,
) -> AppResult<HttpResponse> {
    let fields = BlogFields::from(form.into_inner()).sanitized();

    match state.blogs.create(fields.clone()).await {
        Ok(blog) => {
            tracing::info!(blog_id = %blog.id, "Blog created");
            Ok(redirect(BLOGS_PATH))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create blog");
            render(&NewTemplate {
                blog: BlogView::draft(&fields),
                error: Some("The post could not be saved. Please try again.".to_string()),
            })
        }
    }
}

/// GET /blogs/{id}
pub async fn show(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = BlogId::from(path.into_inner());

    match find_blog(&state, &id).await {
        Some(blog) => render(&ShowTemplate {
            blog: BlogView::from(&blog),
        }),
        None => Ok(redirect(BLOGS_PATH)),
    }
}

/// GET /blogs/{id}/edit
pub async fn edit(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = BlogId::from(path.into_inner());

    match find_blog(&state, &id).await {
        Some(blog) => render(&EditTemplate {
            blog: BlogView::from(&blog),
        }),
        None => Ok(redirect(BLOGS_PATH)),
    }
}

/// PUT /blogs/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Form<BlogForm>,
) -> HttpResponse {
    let id = BlogId::from(path.into_inner());
    let fields = BlogFields::from(form.into_inner()).sanitized();

    match state.blogs.update_by_id(&id, fields).await {
        Ok(blog) => {
            tracing::info!(blog_id = %blog.id, "Blog updated");
            redirect(&format!("{}/{}", BLOGS_PATH, blog.id))
        }
        Err(e) if e.is_not_found() => {
            tracing::debug!(blog_id = %id, "Blog to update not found");
            redirect(BLOGS_PATH)
        }
        Err(e) => {
            tracing::error!(blog_id = %id, error = %e, "Failed to update blog");
            redirect(BLOGS_PATH)
        }
    }
}

/// DELETE /blogs/{id}
pub async fn destroy(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = BlogId::from(path.into_inner());

    match state.blogs.delete_by_id(&id).await {
        Ok(()) => tracing::info!(blog_id = %id, "Blog deleted"),
        Err(e) if e.is_not_found() => tracing::debug!(blog_id = %id, "Blog to delete not found"),
        Err(e) => tracing::error!(blog_id = %id, error = %e, "Failed to delete blog"),
    }

    redirect(BLOGS_PATH)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::http::header::ContentType;
    use actix_web::{App, test, web};
    use async_trait::async_trait;

    use blog_core::domain::{BlogFields, BlogId, BlogPost};
    use blog_core::error::RepoError;
    use blog_core::ports::BlogRepository;
    use blog_infra::InMemoryBlogRepository;
    use blog_shared::BlogForm;

    use crate::handlers::{configure_routes, not_found};
    use crate::middleware::MethodOverride;
    use crate::state::AppState;

    macro_rules! test_app {
        ($repo:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState::with_repository($repo)))
                    .wrap(MethodOverride)
                    .configure(configure_routes)
                    .default_service(web::to(not_found)),
            )
            .await
        };
    }

    macro_rules! body_of {
        ($app:expr, $uri:expr) => {{
            let req = test::TestRequest::get().uri($uri).to_request();
            let body = test::call_and_read_body($app, req).await;
            String::from_utf8(body.to_vec()).unwrap()
        }};
    }

    /// Repository whose every call fails like an unreachable database.
    struct FailingRepository;

    fn down() -> RepoError {
        RepoError::Connection("server selection timeout".to_string())
    }

    #[async_trait]
    impl BlogRepository for FailingRepository {
        async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
            Err(down())
        }

        async fn find_by_id(&self, _id: &BlogId) -> Result<Option<BlogPost>, RepoError> {
            Err(down())
        }

        async fn create(&self, _fields: BlogFields) -> Result<BlogPost, RepoError> {
            Err(down())
        }

        async fn update_by_id(
            &self,
            _id: &BlogId,
            _fields: BlogFields,
        ) -> Result<BlogPost, RepoError> {
            Err(down())
        }

        async fn delete_by_id(&self, _id: &BlogId) -> Result<(), RepoError> {
            Err(down())
        }

        fn backend(&self) -> &'static str {
            "failing"
        }
    }

    fn form(title: &str, image: &str, desc: &str) -> BlogForm {
        BlogForm {
            title: Some(title.to_string()),
            image: Some(image.to_string()),
            desc: Some(desc.to_string()),
        }
    }

    fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> &str {
        resp.headers()
            .get(actix_web::http::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    #[actix_web::test]
    async fn test_root_redirects_to_list() {
        let app = test_app!(Arc::new(InMemoryBlogRepository::new()));

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/blogs");
    }

    #[actix_web::test]
    async fn test_new_form_renders() {
        let app = test_app!(Arc::new(InMemoryBlogRepository::new()));

        let body = body_of!(&app, "/blogs/new");
        assert!(body.contains(r#"name="blog[title]""#));
        assert!(body.contains(r#"name="blog[desc]""#));
    }

    #[actix_web::test]
    async fn test_create_then_list() {
        let repo = Arc::new(InMemoryBlogRepository::new());
        let app = test_app!(repo.clone());

        let req = test::TestRequest::post()
            .uri("/blogs")
            .set_form(form("First post", "http://x/y.png", "<b>bold</b> words"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/blogs");

        let stored = repo.find_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title.as_deref(), Some("First post"));
        assert_eq!(stored[0].image.as_deref(), Some("http://x/y.png"));
        assert_eq!(stored[0].description.as_deref(), Some("<b>bold</b> words"));

        let body = body_of!(&app, "/blogs");
        assert!(body.contains("First post"));
        assert!(body.contains("y.png"));
        assert!(body.contains("bold words"));
        assert!(body.contains(&format!("/blogs/{}", stored[0].id)));
    }

    #[actix_web::test]
    async fn test_create_accepts_browser_form_encoding() {
        let repo = Arc::new(InMemoryBlogRepository::new());
        let app = test_app!(repo.clone());

        let req = test::TestRequest::post()
            .uri("/blogs")
            .insert_header(ContentType::form_url_encoded())
            .set_payload("blog[title]=Hi&blog[image]=&blog[desc]=hello+there")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);

        let stored = repo.find_all().await.unwrap();
        assert_eq!(stored[0].title.as_deref(), Some("Hi"));
        assert_eq!(stored[0].image.as_deref(), Some(""));
        assert_eq!(stored[0].description.as_deref(), Some("hello there"));
    }

    #[actix_web::test]
    async fn test_script_is_stripped_end_to_end() {
        let repo = Arc::new(InMemoryBlogRepository::new());
        let app = test_app!(repo.clone());

        let req = test::TestRequest::post()
            .uri("/blogs")
            .set_form(form("Hi", "http://x/y.png", "<script>alert(1)</script>hello"))
            .to_request();
        test::call_service(&app, req).await;

        let stored = repo.find_all().await.unwrap();
        assert_eq!(stored[0].description.as_deref(), Some("hello"));

        let body = body_of!(&app, &format!("/blogs/{}", stored[0].id));
        assert!(body.contains("Hi"));
        assert!(body.contains("hello"));
        assert!(!body.contains("<script>"));
    }

    #[actix_web::test]
    async fn test_show_and_edit_render_stored_values() {
        let repo = Arc::new(InMemoryBlogRepository::new());
        let blog = repo
            .create(BlogFields {
                title: Some("Travel".to_string()),
                image: Some("http://x/trip.png".to_string()),
                description: Some("<p>Notes</p>".to_string()),
                created: None,
            })
            .await
            .unwrap();
        let app = test_app!(repo.clone());

        let body = body_of!(&app, &format!("/blogs/{}", blog.id));
        assert!(body.contains("Travel"));
        assert!(body.contains("trip.png"));
        assert!(body.contains("<p>Notes</p>"));

        let body = body_of!(&app, &format!("/blogs/{}/edit", blog.id));
        assert!(body.contains(r#"value="Travel""#));
        assert!(body.contains(&format!("/blogs/{}?_method=PUT", blog.id)));
    }

    #[actix_web::test]
    async fn test_update_through_method_override() {
        let repo = Arc::new(InMemoryBlogRepository::new());
        let blog = repo
            .create(BlogFields {
                title: Some("Old".to_string()),
                image: Some("http://x/old.png".to_string()),
                description: Some("old".to_string()),
                created: None,
            })
            .await
            .unwrap();
        let app = test_app!(repo.clone());

        let req = test::TestRequest::post()
            .uri(&format!("/blogs/{}?_method=PUT", blog.id))
            .set_form(form("New", "http://x/new.png", "<script>x</script>new"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), format!("/blogs/{}", blog.id));

        let updated = repo.find_by_id(&blog.id).await.unwrap().unwrap();
        assert_eq!(updated.title.as_deref(), Some("New"));
        assert_eq!(updated.description.as_deref(), Some("new"));
        assert_eq!(updated.created, blog.created);

        let body = body_of!(&app, &format!("/blogs/{}", blog.id));
        assert!(body.contains("New"));
        assert!(body.contains("new.png"));
        assert!(!body.contains("Old"));
    }

    #[actix_web::test]
    async fn test_delete_through_method_override() {
        let repo = Arc::new(InMemoryBlogRepository::new());
        let blog = repo.create(BlogFields::default()).await.unwrap();
        let app = test_app!(repo.clone());

        let req = test::TestRequest::post()
            .uri(&format!("/blogs/{}?_method=DELETE", blog.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/blogs");
        assert!(repo.find_all().await.unwrap().is_empty());

        for uri in [format!("/blogs/{}", blog.id), format!("/blogs/{}/edit", blog.id)] {
            let req = test::TestRequest::get().uri(&uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::FOUND);
            assert_eq!(location(&resp), "/blogs");
        }
    }

    #[actix_web::test]
    async fn test_missing_id_redirects_to_list() {
        let app = test_app!(Arc::new(InMemoryBlogRepository::new()));

        let requests = vec![
            test::TestRequest::get().uri("/blogs/nope").to_request(),
            test::TestRequest::get().uri("/blogs/nope/edit").to_request(),
            test::TestRequest::put()
                .uri("/blogs/nope")
                .set_form(form("a", "b", "c"))
                .to_request(),
            test::TestRequest::delete().uri("/blogs/nope").to_request(),
        ];

        for req in requests {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::FOUND);
            assert_eq!(location(&resp), "/blogs");
        }
    }

    /// A failing list query used to leave the request without any response.
    /// It is now answered with an error page.
    #[actix_web::test]
    async fn test_index_storage_failure_returns_error_page() {
        let app = test_app!(Arc::new(FailingRepository));

        let req = test::TestRequest::get().uri("/blogs").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = test::read_body(resp).await;
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(!body.contains("server selection timeout"));
    }

    #[actix_web::test]
    async fn test_create_storage_failure_rerenders_form() {
        let app = test_app!(Arc::new(FailingRepository));

        let req = test::TestRequest::post()
            .uri("/blogs")
            .set_form(form("Kept title", "http://x/y.png", "text"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains(r#"value="Kept title""#));
        assert!(body.contains("could not be saved"));
    }

    #[actix_web::test]
    async fn test_storage_failure_on_id_routes_redirects() {
        let app = test_app!(Arc::new(FailingRepository));

        let requests = vec![
            test::TestRequest::get().uri("/blogs/abc").to_request(),
            test::TestRequest::get().uri("/blogs/abc/edit").to_request(),
            test::TestRequest::post()
                .uri("/blogs/abc?_method=PUT")
                .set_form(form("a", "b", "c"))
                .to_request(),
            test::TestRequest::post()
                .uri("/blogs/abc?_method=DELETE")
                .to_request(),
        ];

        for req in requests {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::FOUND);
            assert_eq!(location(&resp), "/blogs");
        }
    }

    #[actix_web::test]
    async fn test_long_description_is_accepted() {
        let repo = Arc::new(InMemoryBlogRepository::new());
        let blog = repo.create(BlogFields::default()).await.unwrap();
        let app = test_app!(repo.clone());
        let long = "a".repeat(20_000);

        let req = test::TestRequest::post()
            .uri("/blogs")
            .set_form(form("Long", "http://x/y.png", &long))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/blogs");

        let req = test::TestRequest::post()
            .uri(&format!("/blogs/{}?_method=PUT", blog.id))
            .set_form(form("Longer", "", &long))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), format!("/blogs/{}", blog.id));

        let stored = repo.find_all().await.unwrap();
        assert_eq!(stored.len(), 2);
        assert!(
            stored
                .iter()
                .all(|b| b.description.as_deref().map(str::len) == Some(20_000))
        );
    }

    #[actix_web::test]
    async fn test_malformed_form_is_bad_request() {
        let repo = Arc::new(InMemoryBlogRepository::new());
        let app = test_app!(repo.clone());

        let req = test::TestRequest::post()
            .uri("/blogs")
            .insert_header(ContentType::json())
            .set_payload(r#"{"title":"Hi"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_unknown_path_is_not_found() {
        let app = test_app!(Arc::new(InMemoryBlogRepository::new()));

        let req = test::TestRequest::get().uri("/nowhere").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_health_reports_storage_backend() {
        let app = test_app!(Arc::new(InMemoryBlogRepository::new()));

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "memory");
    }
}
