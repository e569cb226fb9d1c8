//! Domain DTOs for the posts API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any schema drift between the two crates.
//!
//! Three shapes exist for one entity. `PostInput` is whatever the caller
//! hands in and has not been checked yet. `NewPost` and `Post` only come out
//! of the validation functions (or off the wire), so holding one means the
//! shape rules already passed. `NewPost` has no `id` field at all, which makes
//! "creation never sends an identity" a property of the type.

use serde::{Deserialize, Serialize};

/// A post as returned by the API, and the validated payload for an update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    pub body: String,
}

/// Validated payload for creating a post. The server assigns the identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub user_id: i64,
    pub title: String,
    pub body: String,
}

/// Unvalidated post candidate. Every field is optional so that a missing
/// field surfaces as a validation violation instead of a decode failure.
/// Deserializing still rejects wrong-typed fields; pass a `serde_json::Value`
/// to the validators to get those reported as violations too.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl PostInput {
    /// Candidate with the three content fields set and no identity.
    pub fn new(user_id: i64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id),
            id: None,
            title: Some(title.into()),
            body: Some(body.into()),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

impl From<Post> for PostInput {
    fn from(post: Post) -> Self {
        Self {
            user_id: Some(post.user_id),
            id: Some(post.id),
            title: Some(post.title),
            body: Some(post.body),
        }
    }
}

impl From<NewPost> for PostInput {
    fn from(post: NewPost) -> Self {
        Self::new(post.user_id, post.title, post.body)
    }
}
