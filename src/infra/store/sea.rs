//! SeaORM-backed user store.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::{StoreError, StoreResult, UserStore};
use crate::domain::{NewUser, UserRecord};

/// User store over a SeaORM connection.
///
/// Email uniqueness is the `users.email` unique index; a violation surfaces
/// as [`StoreError::Conflict`].
pub struct SeaUserStore {
    db: DatabaseConnection,
}

impl SeaUserStore {
    /// Create new store instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Classify a driver error on insert.
fn insert_error(err: DbErr, email: &str) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::Conflict {
            field: "email",
            value: email.to_string(),
        },
        _ => StoreError::unavailable(err),
    }
}

#[async_trait]
impl UserStore for SeaUserStore {
    async fn insert(&self, new_user: NewUser) -> StoreResult<UserRecord> {
        let now = chrono::Utc::now();
        let email = new_user.email.clone();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            name: Set(new_user.name),
            roles: Set(serde_json::json!(new_user.roles)),
            is_active: Set(new_user.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| insert_error(e, &email))?;

        UserRecord::try_from(model)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(StoreError::unavailable)?
            .map(UserRecord::try_from)
            .transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<UserRecord>> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(StoreError::unavailable)?
            .map(UserRecord::try_from)
            .transpose()
    }
}
