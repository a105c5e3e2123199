//! MongoDB repository implementation.

use async_trait::async_trait;
use bson::doc;
use futures::TryStreamExt;
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};

use blog_core::domain::{BlogFields, BlogId, BlogPost};
use blog_core::error::RepoError;
use blog_core::ports::BlogRepository;

use super::document::{self, BlogDocument};

/// Collection holding the posts.
pub const BLOG_COLLECTION: &str = "blogs";

/// MongoDB blog repository.
#[derive(Clone)]
pub struct MongoBlogRepository {
    collection: Collection<BlogDocument>,
}

impl MongoBlogRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(BLOG_COLLECTION),
        }
    }
}

fn repo_error(err: MongoError) -> RepoError {
    match err.kind.as_ref() {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. } => RepoError::Connection(err.to_string()),
        _ => RepoError::Query(err.to_string()),
    }
}

#[async_trait]
impl BlogRepository for MongoBlogRepository {
    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        let documents: Vec<BlogDocument> = self
            .collection
            .find(doc! {})
            .await
            .map_err(repo_error)?
            .try_collect()
            .await
            .map_err(repo_error)?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: &BlogId) -> Result<Option<BlogPost>, RepoError> {
        let Some(oid) = document::object_id(id) else {
            tracing::debug!(blog_id = %id, "Malformed blog id");
            return Ok(None);
        };

        let result = self
            .collection
            .find_one(document::by_id(oid))
            .await
            .map_err(repo_error)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, fields: BlogFields) -> Result<BlogPost, RepoError> {
        let document = BlogDocument::new(fields);
        self.collection
            .insert_one(&document)
            .await
            .map_err(repo_error)?;

        tracing::debug!(blog_id = %document.id, "Blog inserted");
        Ok(document.into())
    }

    async fn update_by_id(&self, id: &BlogId, fields: BlogFields) -> Result<BlogPost, RepoError> {
        let oid = document::object_id(id).ok_or(RepoError::NotFound)?;

        let updated = self
            .collection
            .find_one_and_update(document::by_id(oid), document::replace_fields(fields))
            .return_document(ReturnDocument::After)
            .await
            .map_err(repo_error)?
            .ok_or(RepoError::NotFound)?;

        Ok(updated.into())
    }

    async fn delete_by_id(&self, id: &BlogId) -> Result<(), RepoError> {
        let oid = document::object_id(id).ok_or(RepoError::NotFound)?;

        let result = self
            .collection
            .delete_one(document::by_id(oid))
            .await
            .map_err(repo_error)?;

        if result.deleted_count == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    fn backend(&self) -> &'static str {
        "mongodb"
    }
}
