//! Create `technologies` table.
//!
//! Technologies are referenced by users through `users_technologies`.
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
                    .table((schema(), Technology::Table))
                    .if_not_exists()
                    .col(pk_auto(Technology::Id))
                    .col(string_len(Technology::Name, 64).unique_key().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table((schema(), Technology::Table)).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Technology {
    #[sea_orm(iden = "technologies")]
    Table,
    Id,
    Name,
}
