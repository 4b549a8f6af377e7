//! Create `users` table.
//!
//! `uid` is an identity column; `email` is unique; `user_role` holds the
//! role name as a string.
use sea_orm_migration::{prelude::*, schema::*};

use crate::schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table((schema(), Users::Table))
                    .if_not_exists()
                    .col(pk_auto(Users::Uid))
                    .col(string_len(Users::FirstName, 128).not_null())
                    .col(string_len(Users::LastName, 128).not_null())
                    .col(string_len(Users::Email, 255).unique_key().not_null())
                    .col(string_len(Users::Pass, 255).not_null())
                    .col(date(Users::Birthday).not_null())
                    .col(string_len(Users::UserRole, 32).not_null())
                    .col(string_len(Users::Adresses, 512).not_null())
                    .col(string_len(Users::PhoneNumbers, 128).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table((schema(), Users::Table)).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Uid,
    FirstName,
    LastName,
    Email,
    Pass,
    Birthday,
    UserRole,
    Adresses,
    PhoneNumbers,
}
