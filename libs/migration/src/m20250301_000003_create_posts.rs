use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_users::Users;
use crate::m20250301_000002_create_documents::Documents;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(PostType::Enum)
                    .values([PostType::Comment, PostType::Feedback])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(pk_uuid(Posts::Id))
                    .col(uuid(Posts::DocumentId))
                    .col(uuid_null(Posts::ParentId))
                    .col(string_len(Posts::Author, 255))
                    .col(
                        ColumnDef::new(Posts::PostType)
                            .enumeration(PostType::Enum, [PostType::Comment, PostType::Feedback])
                            .not_null()
                            .default("comment"),
                    )
                    .col(text(Posts::Content))
                    .col(
                        timestamp_with_time_zone(Posts::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_document")
                            .from(Posts::Table, Posts::DocumentId)
                            .to(Documents::Table, Documents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_parent")
                            .from(Posts::Table, Posts::ParentId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_author")
                            .from(Posts::Table, Posts::Author)
                            .to(Users::Table, Users::HrmsId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Threads are always read per document in creation order
        manager
            .create_index(
                Index::create()
                    .name("idx_posts_document_created_at")
                    .table(Posts::Table)
                    .col(Posts::DocumentId)
                    .col(Posts::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posts_parent_id")
                    .table(Posts::Table)
                    .col(Posts::ParentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(PostType::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    DocumentId,
    ParentId,
    Author,
    PostType,
    Content,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PostType {
    #[sea_orm(iden = "post_type")]
    Enum,
    #[sea_orm(iden = "comment")]
    Comment,
    #[sea_orm(iden = "feedback")]
    Feedback,
}
