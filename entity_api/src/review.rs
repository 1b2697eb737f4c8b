//! CRUD operations for the reviews table.
//!
//! Reviews are owned by the review collaborator; the sentiment pipeline reads
//! the comment text and writes the denormalized sentiment fields.

use super::error::Error;
use entity::reviews::{ActiveModel, Column, Entity, Model};
use entity::sentiment_label::SentimentLabel;
use entity::sentiment_status::SentimentStatus;
use entity::Id;
use log::*;
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{Set, Unchanged},
    DatabaseConnection, PaginatorTrait, TryIntoModel,
};

/// Creates a new review record
pub async fn create(db: &DatabaseConnection, model: Model) -> Result<Model, Error> {
    debug!(
        "Creating new review for event {} by user {}",
        model.event_id, model.user_id
    );

    let now = chrono::Utc::now();

    let active_model = ActiveModel {
        user_id: Set(model.user_id),
        event_id: Set(model.event_id),
        rating: Set(model.rating),
        comment: Set(model.comment),
        sentiment_label: Set(None),
        sentiment_score: Set(None),
        sentiment_status: Set(SentimentStatus::Pending),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(active_model.save(db).await?.try_into_model()?)
}

/// Finds a review by ID
pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<Option<Model>, Error> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

/// Finds a user's review of an event, if one exists
pub async fn find_by_user_and_event(
    db: &DatabaseConnection,
    user_id: Id,
    event_id: Id,
) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::EventId.eq(event_id))
        .one(db)
        .await?)
}

/// Counts all reviews for an event, regardless of analysis state
pub async fn count_by_event_id(db: &DatabaseConnection, event_id: Id) -> Result<u64, Error> {
    Ok(Entity::find()
        .filter(Column::EventId.eq(event_id))
        .count(db)
        .await?)
}

/// Updates the denormalized sentiment fields on a review.
///
/// These fields are a fast-read copy of the authoritative sentiment_results
/// row; a vanished review returns `Ok(None)` and is skipped.
pub async fn update_sentiment(
    db: &DatabaseConnection,
    id: Id,
    label: Option<SentimentLabel>,
    score: Option<f64>,
    status: SentimentStatus,
) -> Result<Option<Model>, Error> {
    let result = Entity::find_by_id(id).one(db).await?;

    match result {
        Some(existing) => {
            debug!("Updating review sentiment to {status}: {id}");

            let active_model = ActiveModel {
                id: Unchanged(existing.id),
                user_id: Unchanged(existing.user_id),
                event_id: Unchanged(existing.event_id),
                rating: Unchanged(existing.rating),
                comment: Unchanged(existing.comment),
                sentiment_label: Set(label),
                sentiment_score: Set(score),
                sentiment_status: Set(status),
                created_at: Unchanged(existing.created_at),
                updated_at: Set(chrono::Utc::now().into()),
            };

            Ok(Some(active_model.update(db).await?.try_into_model()?))
        }
        None => {
            debug!("Review {id} no longer exists, skipping sentiment update");
            Ok(None)
        }
    }
}

/// Updates only the denormalized sentiment status, leaving any previously
/// stored label and score in place.
pub async fn update_sentiment_status(
    db: &DatabaseConnection,
    id: Id,
    status: SentimentStatus,
) -> Result<Option<Model>, Error> {
    let result = Entity::find_by_id(id).one(db).await?;

    match result {
        Some(existing) => {
            debug!("Updating review sentiment status to {status}: {id}");

            let active_model = ActiveModel {
                id: Unchanged(existing.id),
                user_id: Unchanged(existing.user_id),
                event_id: Unchanged(existing.event_id),
                rating: Unchanged(existing.rating),
                comment: Unchanged(existing.comment),
                sentiment_label: Unchanged(existing.sentiment_label),
                sentiment_score: Unchanged(existing.sentiment_score),
                sentiment_status: Set(status),
                created_at: Unchanged(existing.created_at),
                updated_at: Set(chrono::Utc::now().into()),
            };

            Ok(Some(active_model.update(db).await?.try_into_model()?))
        }
        None => {
            debug!("Review {id} no longer exists, skipping sentiment status update");
            Ok(None)
        }
    }
}
