//! In-memory blog repository - used when no database is configured or reachable.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{BlogFields, BlogId, BlogPost};
use blog_core::error::RepoError;
use blog_core::ports::BlogRepository;

/// In-memory repository using a HashMap behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryBlogRepository {
    store: RwLock<HashMap<BlogId, BlogPost>>,
}

impl InMemoryBlogRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryBlogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlogRepository for InMemoryBlogRepository {
    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        let store = self.store.read().await;
        let mut blogs: Vec<BlogPost> = store.values().cloned().collect();
        blogs.sort_by_key(|blog| blog.created);
        Ok(blogs)
    }

    async fn find_by_id(&self, id: &BlogId) -> Result<Option<BlogPost>, RepoError> {
        Ok(self.store.read().await.get(id).cloned())
    }

    async fn create(&self, fields: BlogFields) -> Result<BlogPost, RepoError> {
        let id = BlogId::new(Uuid::new_v4().simple().to_string());
        let blog = BlogPost::new(id.clone(), fields);

        self.store.write().await.insert(id, blog.clone());
        Ok(blog)
    }

    async fn update_by_id(&self, id: &BlogId, fields: BlogFields) -> Result<BlogPost, RepoError> {
        let mut store = self.store.write().await;
        let blog = store.get_mut(id).ok_or(RepoError::NotFound)?;
        blog.apply(fields);
        Ok(blog.clone())
    }

    async fn delete_by_id(&self, id: &BlogId) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
