use async_trait::async_trait;

use crate::domain::{BlogFields, BlogId, BlogPost};
use crate::error::RepoError;

/// Storage port for the `blogs` collection.
///
/// Implementations generate ids on [`create`](BlogRepository::create) and
/// fill in `created` when the caller leaves it out. An id the backend cannot
/// parse is treated like an id that does not exist.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Every stored post. No filtering, no pagination.
    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError>;

    /// Find a post by its id.
    async fn find_by_id(&self, id: &BlogId) -> Result<Option<BlogPost>, RepoError>;

    /// Insert a new post.
    async fn create(&self, fields: BlogFields) -> Result<BlogPost, RepoError>;

    /// Replace the editable fields of a post and return the updated record.
    ///
    /// Fields left as `None` become absent, except `created` which is kept.
    /// Returns [`RepoError::NotFound`] when no post has this id.
    async fn update_by_id(&self, id: &BlogId, fields: BlogFields) -> Result<BlogPost, RepoError>;

    /// Delete a post. Returns [`RepoError::NotFound`] when no post has this id.
    async fn delete_by_id(&self, id: &BlogId) -> Result<(), RepoError>;

    /// Short name of the backend, reported by the health endpoint.
    fn backend(&self) -> &'static str;
}
