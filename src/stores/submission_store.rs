use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::submission::{self, ActiveModel, Entity as Submissions};
use crate::types::internal::{NewSubmission, Submission};

/// Submission rows; insert and read only
pub struct SubmissionStore {
    db: DatabaseConnection,
}

impl SubmissionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a row, assigning its id and creation time
    pub async fn insert(&self, new: NewSubmission) -> Result<Submission, InternalError> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(new.name),
            description: Set(new.description),
            photo_url: Set(new.photo_url),
            location_city: Set(new.location_city),
            location_state: Set(new.location_state),
            latitude: Set(new.coordinates.map(|c| c.latitude)),
            longitude: Set(new.coordinates.map(|c| c.longitude)),
            created_at: Set(Utc::now().timestamp_millis()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("insert_submission", e))?;

        Ok(Submission::from(model))
    }

    /// All submissions, newest first
    pub async fn list(&self) -> Result<Vec<Submission>, InternalError> {
        let models = Submissions::find()
            .order_by_desc(submission::Column::CreatedAt)
            .order_by_desc(submission::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_submissions", e))?;

        Ok(models.into_iter().map(Submission::from).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Option<Submission>, InternalError> {
        let model = Submissions::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_submission", e))?;

        Ok(model.map(Submission::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::internal::Coordinates;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup_test_db() -> SubmissionStore {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");

        SubmissionStore::new(db)
    }

    fn new_submission(name: &str) -> NewSubmission {
        NewSubmission {
            name: name.to_string(),
            description: "A test entry".to_string(),
            photo_url: format!("http://localhost:3000/storage/submissions/{}.jpg", name),
            location_city: None,
            location_state: Some("Texas".to_string()),
            coordinates: Some(Coordinates::new(30.267153, -97.743057)),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamp() {
        let store = setup_test_db().await;
        let before = Utc::now().timestamp_millis();

        let stored = store.insert(new_submission("first")).await.unwrap();

        assert!(!stored.id.is_empty());
        assert!(stored.created_at.timestamp_millis() >= before);
        assert_eq!(stored.location_city, None);
        assert_eq!(stored.location_state.as_deref(), Some("Texas"));
        assert_eq!(stored.coordinates, Some(Coordinates::new(30.267153, -97.743057)));

        let fetched = store.get(&stored.id).await.unwrap().unwrap();
        assert_eq!(fetched, stored);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = setup_test_db().await;

        let first = store.insert(new_submission("first")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = store.insert(new_submission("second")).await.unwrap();

        let ids: Vec<String> = store.list().await.unwrap().into_iter().map(|s| s.id).collect();

        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_get_unknown_is_none() {
        let store = setup_test_db().await;

        assert!(store.get("missing").await.unwrap().is_none());
    }
}
