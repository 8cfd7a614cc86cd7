//! Typed views of the JSON the snippet service sends back.
//!
//! The client itself hands back raw bodies; these are for callers that want
//! to look inside one (see [`crate::api::RawResponse::json`]). Field names on
//! the wire are capitalized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub id: u64,
    pub username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Rating {
    pub likes: i64,
    pub dislikes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Snippet {
    pub id: u64,
    pub contents: String,
    #[serde(default)]
    pub highlighted_contents: String,
    pub language: String,
    pub author: u64,
    #[serde(default)]
    pub rating: Rating,
    /// The caller's own vote on this snippet, 0 if none.
    #[serde(default)]
    pub current_user_vote: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Comment {
    pub id: u64,
    pub contents: String,
    pub snippet: u64,
    pub author: u64,
    pub created_at: DateTime<Utc>,
}

// Envelopes: every successful response wraps its payload in one named field.

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserEnvelope {
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnippetEnvelope {
    pub snippet: Snippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnippetList {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub snippets: Vec<Snippet>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommentEnvelope {
    pub comment: Comment,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommentList {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub comments: Vec<Comment>,
}

/// An empty list arrives as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Payload the service writes alongside any non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub error: String,
}
