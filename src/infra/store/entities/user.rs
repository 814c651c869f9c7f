//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::UserRecord;
use crate::infra::store::StoreError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub name: String,
    /// JSON array of role strings
    #[sea_orm(column_type = "JsonBinary")]
    pub roles: Json,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain record
impl TryFrom<Model> for UserRecord {
    type Error = StoreError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let roles: Vec<String> = serde_json::from_value(model.roles).map_err(|e| {
            StoreError::unavailable(format!("malformed roles for user {}: {}", model.id, e))
        })?;

        Ok(UserRecord {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            name: model.name,
            roles,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
