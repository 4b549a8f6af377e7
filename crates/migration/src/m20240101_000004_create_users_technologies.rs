//! Create `users_technologies` join table (many-to-many users <-> technologies).
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
                    .table((schema(), UsersTechnologies::Table))
                    .if_not_exists()
                    .col(integer(UsersTechnologies::UserId).not_null())
                    .col(integer(UsersTechnologies::TechnologyId).not_null())
                    .primary_key(
                        Index::create()
                            .col(UsersTechnologies::UserId)
                            .col(UsersTechnologies::TechnologyId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_technologies_user")
                            .from((schema(), UsersTechnologies::Table), UsersTechnologies::UserId)
                            .to((schema(), Users::Table), Users::Uid)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_technologies_technology")
                            .from((schema(), UsersTechnologies::Table), UsersTechnologies::TechnologyId)
                            .to((schema(), Technology::Table), Technology::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table((schema(), UsersTechnologies::Table)).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UsersTechnologies { Table, UserId, TechnologyId }

#[derive(DeriveIden)]
enum Users { Table, Uid }

#[derive(DeriveIden)]
enum Technology {
    #[sea_orm(iden = "technologies")]
    Table,
    Id,
}
