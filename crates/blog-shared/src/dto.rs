//! Data Transfer Objects - form payloads submitted by the HTML views.

use serde::{Deserialize, Serialize};

use blog_core::domain::BlogFields;

/// Post form, submitted as `application/x-www-form-urlencoded` with
/// bracketed names (`blog[title]`, `blog[image]`, `blog[desc]`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogForm {
    #[serde(rename = "blog[title]", default)]
    pub title: Option<String>,
    #[serde(rename = "blog[image]", default)]
    pub image: Option<String>,
    #[serde(rename = "blog[desc]", default)]
    pub desc: Option<String>,
}

impl From<BlogForm> for BlogFields {
    fn from(form: BlogForm) -> Self {
        Self {
            title: form.title,
            image: form.image,
            description: form.desc,
            created: None,
        }
    }
}

/// Query string carrying the tunneled HTTP method, e.g. `?_method=DELETE`.
#[derive(Debug, Clone, Deserialize)]
pub struct MethodOverrideQuery {
    #[serde(rename = "_method")]
    pub method: Option<String>,
}
