//! Typed shapes for the two entity kinds. The facade itself works on plain
//! documents; these are used at the edges to build and check payloads.

use bson::oid::ObjectId;
use bson::{Bson, DateTime, Document, doc};
use serde::{Deserialize, Serialize};

use crate::id::RecordId;

/// A movie. Attributes are optional and stored as given, whatever their
/// type; unknown attributes are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullplot: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directors: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rated: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awards: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastupdated: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub countries: Option<Bson>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tomatoes: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_mflix_comments: Option<Bson>,
    #[serde(flatten)]
    pub extra: Document,
}

impl Movie {
    /// The movie as an insertable document, without any client-supplied `_id`.
    pub fn into_document(self) -> Result<Document, bson::ser::Error> {
        bson::to_document(&Movie { id: None, ..self })
    }
}

/// A stored comment on a movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub movie_id: ObjectId,
    pub name: String,
    pub email: String,
    pub text: String,
    pub date: DateTime,
}

impl Comment {
    pub fn into_document(self) -> Result<Document, bson::ser::Error> {
        bson::to_document(&self)
    }
}

/// Request body for creating a comment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewComment {
    pub name: String,
    pub email: String,
    pub text: String,
}

impl NewComment {
    /// Attach the comment to `movie`, stamped with the current time. The
    /// movie is not checked for existence.
    pub fn into_comment(self, movie: RecordId) -> Comment {
        Comment {
            id: None,
            movie_id: movie.object_id(),
            name: self.name,
            email: self.email,
            text: self.text,
            date: DateTime::now(),
        }
    }
}

/// Request body for updating a comment. Absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CommentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub text: Option<String>,
}

impl CommentPatch {
    /// The `$set` body for this patch applied over `current`.
    pub fn merged_over(self, current: &Document) -> Document {
        let mut set = doc! {};
        for (field, value) in [("name", self.name), ("email", self.email), ("text", self.text)] {
            match value {
                Some(v) => {
                    set.insert(field, v);
                }
                None => {
                    if let Some(existing) = current.get(field) {
                        set.insert(field, existing.clone());
                    }
                }
            }
        }
        set
    }
}
