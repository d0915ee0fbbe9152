use crate::models::UserStatus;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for the users table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub hrms_id: String,
    #[sea_orm(unique)]
    pub email: Option<String>,
    #[sea_orm(unique)]
    pub phone_number: Option<String>,
    pub password_hash: String,
    pub status: UserStatus,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            hrms_id: model.hrms_id,
            email: model.email,
            phone_number: model.phone_number,
            password_hash: model.password_hash,
            status: model.status,
            is_staff: model.is_staff,
            is_superuser: model.is_superuser,
            date_joined: model.date_joined.into(),
        }
    }
}

impl From<crate::models::User> for ActiveModel {
    fn from(user: crate::models::User) -> Self {
        ActiveModel {
            id: Set(user.id),
            hrms_id: Set(user.hrms_id),
            email: Set(user.email),
            phone_number: Set(user.phone_number),
            password_hash: Set(user.password_hash),
            status: Set(user.status),
            is_staff: Set(user.is_staff),
            is_superuser: Set(user.is_superuser),
            date_joined: Set(user.date_joined.into()),
        }
    }
}
