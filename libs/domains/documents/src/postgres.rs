use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, SqlErr, Statement, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity::{self, category, document, document_category},
    error::{DocumentError, DocumentResult},
    models::{Document, DocumentChanges, NewDocument},
    repository::DocumentRepository,
};

const INSERT_CATEGORY: &str =
    "INSERT INTO categories (id, name) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING";

pub struct PgDocumentRepository {
    db: DatabaseConnection,
}

impl PgDocumentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Get-or-insert every named category and return their rows.
///
/// `ON CONFLICT DO NOTHING` makes concurrent inserts of the same name safe.
async fn ensure_categories<C: ConnectionTrait>(
    conn: &C,
    names: &[String],
) -> Result<Vec<category::Model>, DbErr> {
    if names.is_empty() {
        return Ok(Vec::new());
    }

    for name in names {
        conn.execute_raw(Statement::from_sql_and_values(
            conn.get_database_backend(),
            INSERT_CATEGORY,
            [Uuid::now_v7().into(), name.clone().into()],
        ))
        .await?;
    }

    category::Entity::find()
        .filter(category::Column::Name.is_in(names.iter().cloned()))
        .all(conn)
        .await
}

/// Replace the document's category links with `names`.
async fn replace_categories<C: ConnectionTrait>(
    conn: &C,
    document_id: Uuid,
    names: &[String],
) -> Result<Vec<category::Model>, DbErr> {
    document_category::Entity::delete_many()
        .filter(document_category::Column::DocumentId.eq(document_id))
        .exec(conn)
        .await?;

    let categories = ensure_categories(conn, names).await?;
    if !categories.is_empty() {
        let links = categories.iter().map(|c| document_category::ActiveModel {
            document_id: Set(document_id),
            category_id: Set(c.id),
        });
        document_category::Entity::insert_many(links)
            .exec(conn)
            .await?;
    }

    Ok(categories)
}

async fn find_one<C: ConnectionTrait>(
    conn: &C,
    document_id: &str,
) -> Result<Option<Document>, DbErr> {
    let rows = document::Entity::find()
        .filter(document::Column::DocumentId.eq(document_id))
        .find_with_related(category::Entity)
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .next()
        .map(|(model, categories)| entity::into_document(model, categories)))
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    async fn create(&self, input: NewDocument) -> DocumentResult<Document> {
        let txn = self.db.begin().await?;

        let active_model = document::ActiveModel {
            id: Set(Uuid::now_v7()),
            document_id: Set(input.document_id.clone()),
            name: Set(input.name),
            version: Set(input.version),
            public_link: Set(input.public_link),
            internal_link: Set(input.internal_link),
            last_modified: Set(Utc::now().into()),
        };

        let model = active_model.insert(&txn).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                DocumentError::Duplicate(input.document_id.clone())
            } else {
                DocumentError::Database(e)
            }
        })?;

        let categories = replace_categories(&txn, model.id, &input.categories).await?;
        txn.commit().await?;

        tracing::info!(document_id = %model.document_id, "Created document");
        Ok(entity::into_document(model, categories))
    }

    async fn update(
        &self,
        document_id: &str,
        changes: DocumentChanges,
    ) -> DocumentResult<Option<Document>> {
        let txn = self.db.begin().await?;

        let Some(model) = document::Entity::find()
            .filter(document::Column::DocumentId.eq(document_id))
            .one(&txn)
            .await?
        else {
            return Ok(None);
        };

        let id = model.id;
        let mut active_model = model.into_active_model();
        if let Some(name) = changes.name {
            active_model.name = Set(name);
        }
        if let Some(version) = changes.version {
            active_model.version = Set(version);
        }
        if let Some(public_link) = changes.public_link {
            active_model.public_link = Set(Some(public_link));
        }
        if let Some(internal_link) = changes.internal_link {
            active_model.internal_link = Set(Some(internal_link));
        }
        active_model.last_modified = Set(Utc::now().into());
        active_model.update(&txn).await?;

        if let Some(categories) = changes.categories {
            replace_categories(&txn, id, &categories).await?;
        }

        let updated = find_one(&txn, document_id).await?;
        txn.commit().await?;

        tracing::info!(document_id = %document_id, "Updated document");
        Ok(updated)
    }

    async fn get_by_document_id(&self, document_id: &str) -> DocumentResult<Option<Document>> {
        Ok(find_one(&self.db, document_id).await?)
    }

    async fn list_by_document_ids(&self, document_ids: &[String]) -> DocumentResult<Vec<Document>> {
        if document_ids.is_empty() {
            return Ok(Vec::new());
        }

        // v7 ids are time-ordered, so id order is creation order
        let rows = document::Entity::find()
            .filter(document::Column::DocumentId.is_in(document_ids.iter().cloned()))
            .order_by_asc(document::Column::Id)
            .find_with_related(category::Entity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(model, categories)| entity::into_document(model, categories))
            .collect())
    }
}
