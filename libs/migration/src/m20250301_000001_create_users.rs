use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(UserStatus::Enum)
                    .values([
                        UserStatus::Pending,
                        UserStatus::Accepted,
                        UserStatus::Rejected,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_uuid(Users::Id))
                    .col(string_len(Users::HrmsId, 255).unique_key())
                    .col(string_len_null(Users::Email, 254).unique_key())
                    .col(string_len_null(Users::PhoneNumber, 20).unique_key())
                    .col(string(Users::PasswordHash))
                    .col(
                        ColumnDef::new(Users::Status)
                            .enumeration(
                                UserStatus::Enum,
                                [
                                    UserStatus::Pending,
                                    UserStatus::Accepted,
                                    UserStatus::Rejected,
                                ],
                            )
                            .not_null()
                            .default("pending"),
                    )
                    .col(boolean(Users::IsStaff).default(false))
                    .col(boolean(Users::IsSuperuser).default(false))
                    .col(
                        timestamp_with_time_zone(Users::DateJoined)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Review queue: filter by status, listed in registration order
        manager
            .create_index(
                Index::create()
                    .name("idx_users_status_date_joined")
                    .table(Users::Table)
                    .col(Users::Status)
                    .col(Users::DateJoined)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_date_joined")
                    .table(Users::Table)
                    .col(Users::DateJoined)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(UserStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    HrmsId,
    Email,
    PhoneNumber,
    PasswordHash,
    Status,
    IsStaff,
    IsSuperuser,
    DateJoined,
}

#[derive(DeriveIden)]
enum UserStatus {
    #[sea_orm(iden = "user_status")]
    Enum,
    #[sea_orm(iden = "pending")]
    Pending,
    #[sea_orm(iden = "accepted")]
    Accepted,
    #[sea_orm(iden = "rejected")]
    Rejected,
}
