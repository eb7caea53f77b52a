use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::user_role::{self, ActiveModel, Entity as UserRoles};
use crate::types::internal::RoleInsert;

/// Role grants, at most one row per (user, role)
pub struct RoleStore {
    db: DatabaseConnection,
}

impl RoleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn has_role(&self, user_id: &str, role: &str) -> Result<bool, InternalError> {
        let row = UserRoles::find()
            .filter(user_role::Column::UserId.eq(user_id))
            .filter(user_role::Column::Role.eq(role))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_role", e))?;

        Ok(row.is_some())
    }

    /// Insert a role row unless the pair already exists
    ///
    /// Relies on the unique (user_id, role) index, so concurrent callers
    /// cannot create duplicates.
    pub async fn insert_role_if_absent(&self, user_id: &str, role: &str) -> Result<RoleInsert, InternalError> {
        let row = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            role: Set(role.to_string()),
            created_at: Set(Utc::now().timestamp()),
        };

        let result = UserRoles::insert(row)
            .on_conflict(
                OnConflict::columns([user_role::Column::UserId, user_role::Column::Role])
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&self.db)
            .await;

        match result {
            Ok(_) => Ok(RoleInsert::Inserted),
            Err(DbErr::RecordNotInserted) => Ok(RoleInsert::AlreadyPresent),
            Err(e) => Err(InternalError::database("insert_role", e)),
        }
    }
}
