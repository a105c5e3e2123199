use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::sanitize;

/// Identifier of a stored post, generated by the storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlogId(String);

impl BlogId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for BlogId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Post entity - one blog article.
///
/// None of the text fields are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: BlogId,
    pub title: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub created: DateTime<Utc>,
}

impl BlogPost {
    /// Build a new post from submitted fields, defaulting `created` to now.
    pub fn new(id: BlogId, fields: BlogFields) -> Self {
        Self {
            id,
            title: fields.title,
            image: fields.image,
            description: fields.description,
            created: fields.created.unwrap_or_else(Utc::now),
        }
    }

    /// Replace the editable fields in place. `created` only changes when supplied.
    pub fn apply(&mut self, fields: BlogFields) {
        self.title = fields.title;
        self.image = fields.image;
        self.description = fields.description;
        if let Some(created) = fields.created {
            self.created = created;
        }
    }
}

/// The caller-supplied part of a post, used for create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlogFields {
    pub title: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub created: Option<DateTime<Utc>>,
}

impl BlogFields {
    /// Copy of these fields with executable markup stripped from the description.
    pub fn sanitized(self) -> Self {
        Self {
            description: self.description.as_deref().map(sanitize::clean),
            ..self
        }
    }
}
