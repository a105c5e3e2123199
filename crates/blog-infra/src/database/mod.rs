//! Database connection management and blog repositories.

mod connections;
mod memory_repo;

#[cfg(feature = "mongodb")]
mod document;
#[cfg(feature = "mongodb")]
mod mongo_repo;

pub use connections::{DatabaseConfig, DatabaseConnections};
pub use memory_repo::InMemoryBlogRepository;

#[cfg(feature = "mongodb")]
pub use mongo_repo::{BLOG_COLLECTION, MongoBlogRepository};
