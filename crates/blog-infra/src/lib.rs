//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `mongodb` - MongoDB storage via the official driver

pub mod database;

pub use database::{DatabaseConfig, DatabaseConnections, InMemoryBlogRepository};

#[cfg(feature = "mongodb")]
pub use database::MongoBlogRepository;
