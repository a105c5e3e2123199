//! # Blog Core
//!
//! The domain layer of the blog server.
//! Holds the blog post record, the sanitizer applied to user-supplied text
//! and the repository port that storage adapters implement. No I/O here.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::RepoError;
