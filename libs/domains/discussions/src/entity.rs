use crate::models::PostType;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for the posts table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub document_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub author: String,
    pub post_type: PostType,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_delete = "Cascade"
    )]
    Parent,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            document: model.document_id,
            parent_id: model.parent_id,
            author: model.author,
            post_type: model.post_type,
            content: model.content,
            created_at: model.created_at.into(),
        }
    }
}

impl From<crate::models::Post> for ActiveModel {
    fn from(post: crate::models::Post) -> Self {
        ActiveModel {
            id: Set(post.id),
            document_id: Set(post.document),
            parent_id: Set(post.parent_id),
            author: Set(post.author),
            post_type: Set(post.post_type),
            content: Set(post.content),
            created_at: Set(post.created_at.into()),
        }
    }
}
