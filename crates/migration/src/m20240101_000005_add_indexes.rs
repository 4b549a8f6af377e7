use sea_orm_migration::prelude::*;

use crate::schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Reverse lookup: users of a technology
        manager
            .create_index(
                Index::create()
                    .name("idx_users_technologies_technology")
                    .table((schema(), UsersTechnologies::Table))
                    .col(UsersTechnologies::TechnologyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_last_first_name")
                    .table((schema(), Users::Table))
                    .col(Users::LastName)
                    .col(Users::FirstName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_users_technologies_technology")
                    .table((schema(), UsersTechnologies::Table))
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_users_last_first_name")
                    .table((schema(), Users::Table))
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum UsersTechnologies { Table, TechnologyId }

#[derive(DeriveIden)]
enum Users { Table, FirstName, LastName }
