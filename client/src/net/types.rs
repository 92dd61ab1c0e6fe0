//! Wire DTOs for the backend's JSON API.
//!
//! DESIGN
//! ======
//! Field names mirror the backend's JSON. Timestamps stay as RFC 3339
//! strings; they double as pagination cursors (`prev`) and are only ever
//! displayed or echoed back.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Public user record as returned by search and embedded in posts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub body: String,
    pub created: String,
    #[serde(default)]
    pub updated: Option<String>,
    pub author: User,
}

/// `POST /api/signup` payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// `POST /api/post` payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PostSubmission {
    pub title: String,
    pub body: String,
}

/// `PUT /api/post` payload. The backend only accepts edits whose
/// `author.id` is the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PostEdit {
    pub id: String,
    pub title: String,
    pub body: String,
    pub author: AuthorRef,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuthorRef {
    pub id: String,
}

/// Image picked for `PUT /api/profilephoto/{id}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvatarUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}
