use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Documents::Table)
                    .if_not_exists()
                    .col(pk_uuid(Documents::Id))
                    .col(string_len(Documents::DocumentId, 255).unique_key())
                    .col(string_len(Documents::Name, 255))
                    .col(string_len(Documents::Version, 50))
                    .col(text_null(Documents::PublicLink))
                    .col(text_null(Documents::InternalLink))
                    .col(
                        timestamp_with_time_zone(Documents::LastModified)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(pk_uuid(Categories::Id))
                    .col(string_len(Categories::Name, 255).unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DocumentCategories::Table)
                    .if_not_exists()
                    .col(uuid(DocumentCategories::DocumentId))
                    .col(uuid(DocumentCategories::CategoryId))
                    .primary_key(
                        Index::create()
                            .col(DocumentCategories::DocumentId)
                            .col(DocumentCategories::CategoryId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_categories_document")
                            .from(DocumentCategories::Table, DocumentCategories::DocumentId)
                            .to(Documents::Table, Documents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_categories_category")
                            .from(DocumentCategories::Table, DocumentCategories::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_document_categories_category_id")
                    .table(DocumentCategories::Table)
                    .col(DocumentCategories::CategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER documents_touch_last_modified
                    BEFORE UPDATE ON documents
                    FOR EACH ROW
                    EXECUTE FUNCTION util.touch_last_modified()
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS documents_touch_last_modified ON documents")
            .await?;

        manager
            .drop_table(Table::drop().table(DocumentCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Documents::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Documents {
    Table,
    Id,
    DocumentId,
    Name,
    Version,
    PublicLink,
    InternalLink,
    LastModified,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum DocumentCategories {
    Table,
    DocumentId,
    CategoryId,
}
