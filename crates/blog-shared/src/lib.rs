//! # Blog Shared
//!
//! Wire types exchanged with browsers: the post form and the
//! method-override query parameter.

pub mod dto;

pub use dto::{BlogForm, MethodOverrideQuery};
