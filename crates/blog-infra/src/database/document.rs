//! BSON shape of a stored post.

use bson::oid::ObjectId;
use bson::{DateTime, Document, doc};
use serde::{Deserialize, Serialize};

use blog_core::domain::{BlogFields, BlogId, BlogPost};

/// A document in the `blogs` collection.
///
/// The description is stored under `desc`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "desc", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created: DateTime,
}

impl BlogDocument {
    /// New document with a fresh ObjectId, defaulting `created` to now.
    pub fn new(fields: BlogFields) -> Self {
        Self {
            id: ObjectId::new(),
            title: fields.title,
            image: fields.image,
            description: fields.description,
            created: fields.created.map(DateTime::from_chrono).unwrap_or_else(DateTime::now),
        }
    }
}

impl From<BlogDocument> for BlogPost {
    fn from(document: BlogDocument) -> Self {
        Self {
            id: BlogId::new(document.id.to_hex()),
            title: document.title,
            image: document.image,
            description: document.description,
            created: document.created.to_chrono(),
        }
    }
}

/// Parse a post id into an ObjectId. Malformed ids yield `None`.
pub fn object_id(id: &BlogId) -> Option<ObjectId> {
    ObjectId::parse_str(id.as_str()).ok()
}

/// Update modifications replacing the editable fields of a post.
///
/// Supplied fields go into `$set`, missing ones into `$unset`. `created` is
/// only set when supplied.
pub fn replace_fields(fields: BlogFields) -> Document {
    let mut set = Document::new();
    let mut unset = Document::new();

    for (key, value) in [
        ("title", fields.title),
        ("image", fields.image),
        ("desc", fields.description),
    ] {
        match value {
            Some(value) => {
                set.insert(key, value);
            }
            None => {
                unset.insert(key, "");
            }
        }
    }
    if let Some(created) = fields.created {
        set.insert("created", DateTime::from_chrono(created));
    }

    let mut update = Document::new();
    if !set.is_empty() {
        update.insert("$set", set);
    }
    if !unset.is_empty() {
        update.insert("$unset", unset);
    }
    update
}

/// Filter matching a single post by ObjectId.
pub fn by_id(id: ObjectId) -> Document {
    doc! { "_id": id }
}
