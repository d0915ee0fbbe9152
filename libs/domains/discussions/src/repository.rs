use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::PostResult;
use crate::models::{NewPost, Post};

/// Repository trait for Post persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, input: NewPost) -> PostResult<Post>;

    async fn get_by_id(&self, id: Uuid) -> PostResult<Option<Post>>;

    /// All posts of a document, replies included, in creation order
    async fn list_by_document(&self, document: Uuid) -> PostResult<Vec<Post>>;
}

/// In-memory implementation of PostRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryPostRepository {
    posts: Arc<RwLock<Vec<Post>>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, input: NewPost) -> PostResult<Post> {
        let post = Post::new(input);
        self.posts.write().await.push(post.clone());

        tracing::info!(post_id = %post.id, document = %post.document, "Created post");
        Ok(post)
    }

    async fn get_by_id(&self, id: Uuid) -> PostResult<Option<Post>> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn list_by_document(&self, document: Uuid) -> PostResult<Vec<Post>> {
        let posts = self.posts.read().await;
        Ok(posts
            .iter()
            .filter(|p| p.document == document)
            .cloned()
            .collect())
    }
}
