use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, SqlErr,
};

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{NewUser, User, UserStatus},
    repository::UserRepository,
};

pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Maps a unique-index violation back to the offending field.
fn map_insert_error(err: DbErr, input: &NewUser) -> UserError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            if detail.contains("email") {
                UserError::Duplicate {
                    field: "email",
                    value: input.email.clone().unwrap_or_default(),
                }
            } else if detail.contains("phone_number") {
                UserError::Duplicate {
                    field: "phone_no",
                    value: input.phone_number.clone().unwrap_or_default(),
                }
            } else {
                UserError::Duplicate {
                    field: "hrms_id",
                    value: input.hrms_id.clone(),
                }
            }
        }
        _ => UserError::Database(err),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, input: NewUser) -> UserResult<User> {
        let active_model: entity::ActiveModel = User::new(input.clone()).into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_error(e, &input))?;

        tracing::info!(hrms_id = %model.hrms_id, "Created user");
        Ok(model.into())
    }

    async fn get_by_hrms_id(&self, hrms_id: &str) -> UserResult<Option<User>> {
        let model = entity::Entity::find()
            .filter(entity::Column::HrmsId.eq(hrms_id))
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn list(&self, status: Option<UserStatus>) -> UserResult<Vec<User>> {
        let mut query = entity::Entity::find();

        if let Some(status) = status {
            query = query.filter(entity::Column::Status.eq(status));
        }

        let models = query
            .order_by_asc(entity::Column::DateJoined)
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update_status(&self, hrms_id: &str, status: UserStatus) -> UserResult<Option<User>> {
        let Some(model) = entity::Entity::find()
            .filter(entity::Column::HrmsId.eq(hrms_id))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model = model.into_active_model();
        active_model.status = Set(status);
        let updated = active_model.update(&self.db).await?;

        tracing::info!(hrms_id = %hrms_id, status = %status, "Updated user status");
        Ok(Some(updated.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use uuid::Uuid;

    fn model(hrms_id: &str, status: UserStatus) -> entity::Model {
        entity::Model {
            id: Uuid::now_v7(),
            hrms_id: hrms_id.to_string(),
            email: Some(format!("{}@example.com", hrms_id.to_lowercase())),
            phone_number: None,
            password_hash: "$argon2id$hash".to_string(),
            status,
            is_staff: false,
            is_superuser: false,
            date_joined: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_get_by_hrms_id_maps_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model("E100", UserStatus::Accepted)]])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let user = repo.get_by_hrms_id("E100").await.unwrap().unwrap();
        assert_eq!(user.hrms_id, "E100");
        assert_eq!(user.status, UserStatus::Accepted);
        assert_eq!(user.email.as_deref(), Some("e100@example.com"));
    }

    #[tokio::test]
    async fn test_update_status_missing_user_returns_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let result = repo.update_status("E404", UserStatus::Rejected).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_maps_rows_in_order() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                model("E1", UserStatus::Pending),
                model("E2", UserStatus::Pending),
            ]])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let users = repo.list(Some(UserStatus::Pending)).await.unwrap();
        let ids: Vec<_> = users.iter().map(|u| u.hrms_id.as_str()).collect();
        assert_eq!(ids, vec!["E1", "E2"]);
    }
}
