use sea_orm::{entity::prelude::*, sea_query::OnConflict, ConnectionTrait, NotSet, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{user, user_technology};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(schema_name = "login_app_schema", table_name = "technologies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    UserTechnology,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::UserTechnology => Entity::has_many(user_technology::Entity).into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        user_technology::Relation::User.def()
    }

    fn via() -> Option<RelationDef> {
        Some(user_technology::Relation::Technology.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Return the technology called `name`, inserting it first if needed.
///
/// Safe under concurrent registrations: a name inserted by another
/// transaction in the meantime is picked up instead of failing on the
/// unique index.
pub async fn find_or_create<C: ConnectionTrait>(db: &C, name: &str) -> Result<Model, ModelError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ModelError::Validation("technology name required".into()));
    }
    if let Some(existing) = find_by_name(db, name).await? {
        return Ok(existing);
    }
    let am = ActiveModel { id: NotSet, name: Set(name.to_string()) };
    Entity::insert(am)
        .on_conflict(OnConflict::column(Column::Name).do_nothing().to_owned())
        .exec_without_returning(db)
        .await?;
    find_by_name(db, name)
        .await?
        .ok_or_else(|| ModelError::Db(format!("technology '{name}' missing after insert")))
}

pub async fn find_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Name.eq(name)).one(db).await?)
}

pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_asc(Column::Name).all(db).await?)
}
