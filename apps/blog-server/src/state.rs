//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::BlogRepository;
use blog_infra::database::{DatabaseConfig, DatabaseConnections, InMemoryBlogRepository};

#[cfg(feature = "mongodb")]
use blog_infra::database::MongoBlogRepository;

/// Shared application state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub blogs: Arc<dyn BlogRepository>,
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "mongodb")]
        let (db, blogs): (Option<Arc<DatabaseConnections>>, Arc<dyn BlogRepository>) = {
            if let Some(config) = db_config {
                match DatabaseConnections::init(config).await {
                    Ok(connections) => {
                        let repo = Arc::new(MongoBlogRepository::new(&connections.main));
                        (Some(Arc::new(connections)), repo)
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        (None, Arc::new(InMemoryBlogRepository::new()))
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (None, Arc::new(InMemoryBlogRepository::new()))
            }
        };

        #[cfg(not(feature = "mongodb"))]
        let (db, blogs): (Option<Arc<DatabaseConnections>>, Arc<dyn BlogRepository>) = {
            let _ = db_config;
            tracing::info!("Running without mongodb feature - using in-memory repository");
            (None, Arc::new(InMemoryBlogRepository::new()))
        };

        tracing::info!(storage = blogs.backend(), "Application state initialized");

        Self { blogs, db }
    }

    /// State backed by the given repository, without a database handle.
    #[cfg(test)]
    pub fn with_repository(blogs: Arc<dyn BlogRepository>) -> Self {
        Self { blogs, db: None }
    }

    /// Release external resources. Called once the server has stopped.
    pub async fn shutdown(&self) {
        if let Some(db) = &self.db {
            db.shutdown().await;
        }
        tracing::info!("Application state shut down");
    }
}
