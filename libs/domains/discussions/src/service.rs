use domain_documents::DocumentRepository;
use std::sync::Arc;
use validator::Validate;

use crate::error::{PostError, PostResult};
use crate::models::{CreatePost, NewPost, Post, PostResponse};
use crate::repository::PostRepository;

/// Service layer for threaded posts on documents
pub struct PostService<P: PostRepository, D: DocumentRepository> {
    posts: Arc<P>,
    documents: Arc<D>,
}

impl<P: PostRepository, D: DocumentRepository> Clone for PostService<P, D> {
    fn clone(&self) -> Self {
        Self {
            posts: Arc::clone(&self.posts),
            documents: Arc::clone(&self.documents),
        }
    }
}

impl<P: PostRepository, D: DocumentRepository> PostService<P, D> {
    /// `documents` is shared with the documents service
    pub fn new(posts: P, documents: Arc<D>) -> Self {
        Self {
            posts: Arc::new(posts),
            documents,
        }
    }

    /// Attach a post by `author` to a document.
    ///
    /// The parent, when given, must exist and belong to the same document.
    pub async fn create_post(&self, author: &str, input: CreatePost) -> PostResult<Post> {
        if let Err(errors) = input.validate() {
            let field = if errors.field_errors().contains_key("document_id") {
                "document_id"
            } else {
                "content"
            };
            return Err(PostError::Validation {
                field,
                message: "This field may not be blank.".to_string(),
            });
        }

        let document = self
            .documents
            .get_by_document_id(&input.document_id)
            .await?
            .ok_or_else(|| PostError::DocumentNotFound(input.document_id.clone()))?;

        if let Some(parent_id) = input.parent_id {
            let parent = self
                .posts
                .get_by_id(parent_id)
                .await?
                .ok_or(PostError::ParentNotFound(parent_id))?;

            if parent.document != document.id {
                return Err(PostError::Validation {
                    field: "parent_id",
                    message: "Parent post belongs to a different document.".to_string(),
                });
            }
        }

        self.posts
            .create(NewPost {
                document: document.id,
                parent_id: input.parent_id,
                author: author.to_string(),
                post_type: input.post_type,
                content: input.content,
            })
            .await
    }

    /// Flat thread of a document in creation order; unknown documents have
    /// no posts.
    pub async fn list_posts(&self, document_id: &str) -> PostResult<Vec<PostResponse>> {
        let Some(document) = self.documents.get_by_document_id(document_id).await? else {
            return Ok(Vec::new());
        };

        let posts = self.posts.list_by_document(document.id).await?;
        Ok(posts
            .into_iter()
            .map(|post| PostResponse::from_post(post, &document.document_id))
            .collect())
    }
}
