//! Read operations for the events table.
//!
//! The pipeline only needs events for the organizer ownership check; event
//! CRUD itself belongs to the event collaborator.

use super::error::Error;
use entity::events::{Entity, Model};
use entity::Id;
use sea_orm::{entity::prelude::*, DatabaseConnection};

/// Finds an event by ID
pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<Option<Model>, Error> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn find_by_id_returns_the_event() -> Result<(), Error> {
        let now = chrono::Utc::now();
        let event = Model {
            id: Id::new_v4(),
            organizer_id: Id::new_v4(),
            title: "Jazz Evening".to_string(),
            location: Some("Riverside Hall".to_string()),
            starts_at: now.into(),
            created_at: now.into(),
            updated_at: now.into(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![event.clone()]])
            .into_connection();

        let found = find_by_id(&db, event.id).await?;

        assert_eq!(found, Some(event));

        Ok(())
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_missing_event() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<Model>::new()])
            .into_connection();

        let found = find_by_id(&db, Id::new_v4()).await?;

        assert_eq!(found, None);

        Ok(())
    }
}
