use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    entity,
    error::PostResult,
    models::{NewPost, Post},
    repository::PostRepository,
};

pub struct PgPostRepository {
    db: DatabaseConnection,
}

impl PgPostRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn create(&self, input: NewPost) -> PostResult<Post> {
        let active_model: entity::ActiveModel = Post::new(input).into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(post_id = %model.id, document = %model.document_id, "Created post");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> PostResult<Option<Post>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list_by_document(&self, document: Uuid) -> PostResult<Vec<Post>> {
        let models = entity::Entity::find()
            .filter(entity::Column::DocumentId.eq(document))
            .order_by_asc(entity::Column::CreatedAt)
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostType;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn model(document_id: Uuid, parent_id: Option<Uuid>) -> entity::Model {
        entity::Model {
            id: Uuid::now_v7(),
            document_id,
            parent_id,
            author: "E100".to_string(),
            post_type: PostType::Feedback,
            content: "Section 4 is outdated".to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_list_by_document_maps_rows() {
        let document = Uuid::now_v7();
        let root = model(document, None);
        let reply = model(document, Some(root.id));

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![root.clone(), reply.clone()]])
            .into_connection();
        let repo = PgPostRepository::new(db);

        let posts = repo.list_by_document(document).await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, root.id);
        assert_eq!(posts[1].parent_id, Some(root.id));
        assert_eq!(posts[1].post_type, PostType::Feedback);
    }

    #[tokio::test]
    async fn test_create_returns_inserted_row() {
        let document = Uuid::now_v7();
        let row = model(document, None);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row.clone()]])
            .into_connection();
        let repo = PgPostRepository::new(db);

        let post = repo
            .create(NewPost {
                document,
                parent_id: None,
                author: row.author.clone(),
                post_type: row.post_type,
                content: row.content.clone(),
            })
            .await
            .unwrap();

        assert_eq!(post.document, document);
        assert_eq!(post.author, "E100");
    }
}
