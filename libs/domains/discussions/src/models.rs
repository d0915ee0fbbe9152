use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Kind of discussion entry
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "post_type")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PostType {
    #[default]
    #[sea_orm(string_value = "comment")]
    Comment,
    #[sea_orm(string_value = "feedback")]
    Feedback,
}

/// Comment or feedback attached to a document, optionally replying to
/// another post on the same document
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: Uuid,
    /// Internal id of the owning document
    pub document: Uuid,
    pub parent_id: Option<Uuid>,
    /// HRMS ID of the author
    pub author: String,
    pub post_type: PostType,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(input: NewPost) -> Self {
        Self {
            id: Uuid::now_v7(),
            document: input.document,
            parent_id: input.parent_id,
            author: input.author,
            post_type: input.post_type,
            content: input.content,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub document: Uuid,
    pub parent_id: Option<Uuid>,
    pub author: String,
    pub post_type: PostType,
    pub content: String,
}

/// Post as returned by `/posts`; the document is named by its external id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PostResponse {
    pub id: Uuid,
    pub document_id: String,
    pub parent_id: Option<Uuid>,
    pub author: String,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl PostResponse {
    pub fn from_post(post: Post, document_id: &str) -> Self {
        Self {
            id: post.id,
            document_id: document_id.to_string(),
            parent_id: post.parent_id,
            author: post.author,
            post_type: post.post_type,
            content: post.content,
            created_at: post.created_at,
        }
    }
}

/// Body of `POST /create_post`; the author is the authenticated caller
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePost {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub document_id: String,

    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub content: String,

    #[serde(rename = "type", default)]
    pub post_type: PostType,

    pub parent_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePostResponse {
    pub id: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PostQuery {
    /// External id of the document whose posts to list (required)
    pub document_id: Option<String>,
}
