use sea_orm::{entity::prelude::*, ConnectionTrait, NotSet, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::role::UserRole;
use crate::{technology, user_technology};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(schema_name = "login_app_schema", table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "uid")]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// argon2 PHC string; never serialized.
    #[serde(skip_serializing, default)]
    pub pass: String,
    pub birthday: Date,
    pub user_role: UserRole,
    pub adresses: String,
    pub phone_numbers: String,
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

impl Related<technology::Entity> for Entity {
    fn to() -> RelationDef {
        user_technology::Relation::Technology.def()
    }

    fn via() -> Option<RelationDef> {
        Some(user_technology::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Column values for a user that has not been inserted yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub pass: String,
    pub birthday: Date,
    pub user_role: UserRole,
    pub adresses: String,
    pub phone_numbers: String,
}

pub async fn create<C: ConnectionTrait>(db: &C, new: NewUser) -> Result<Model, ModelError> {
    if !new.email.contains('@') {
        return Err(ModelError::Validation("invalid email".into()));
    }
    if new.first_name.trim().is_empty() || new.last_name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    if new.pass.trim().is_empty() {
        return Err(ModelError::Validation("password hash required".into()));
    }
    let am = ActiveModel {
        id: NotSet,
        first_name: Set(new.first_name),
        last_name: Set(new.last_name),
        email: Set(new.email),
        pass: Set(new.pass),
        birthday: Set(new.birthday),
        user_role: Set(new.user_role),
        adresses: Set(new.adresses),
        phone_numbers: Set(new.phone_numbers),
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Email.eq(email)).one(db).await?)
}

/// Technologies linked to `user`, ordered by name.
pub async fn technologies<C: ConnectionTrait>(db: &C, user: &Model) -> Result<Vec<technology::Model>, ModelError> {
    Ok(user
        .find_related(technology::Entity)
        .order_by_asc(technology::Column::Name)
        .all(db)
        .await?)
}

pub async fn hard_delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), ModelError> {
    Entity::delete_by_id(id).exec(db).await?;
    Ok(())
}
