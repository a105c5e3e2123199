//! Domain entities - the core business objects.

mod blog;
pub mod sanitize;

pub use blog::{BlogFields, BlogId, BlogPost};
