//! CRUD operations for the sentiment_jobs table.
//!
//! Jobs move `pending -> processing -> {done | pending | failed}`. State
//! transitions are single-row updates; a transition on a vanished row returns
//! `Ok(None)` so callers can treat it as a benign no-op.

use super::error::Error;
use entity::sentiment_job_status::SentimentJobStatus;
use entity::sentiment_jobs::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{
    entity::prelude::*,
    sea_query::Expr,
    ActiveValue::{Set, Unchanged},
    DatabaseConnection, QueryOrder, QuerySelect, TryIntoModel,
};

/// Creates a new pending job for a review.
///
/// Fails with `RecordAlreadyExists` when a job for the review already exists;
/// the unique constraint on `review_id` enforces at most one job per review.
pub async fn create(db: &DatabaseConnection, review_id: Id) -> Result<Model, Error> {
    debug!("Creating new sentiment job for review: {review_id}");

    let now = chrono::Utc::now();

    let active_model = ActiveModel {
        review_id: Set(review_id),
        status: Set(SentimentJobStatus::Pending),
        attempts: Set(0),
        error: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(active_model.save(db).await?.try_into_model()?)
}

/// Finds a job by ID
pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<Option<Model>, Error> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

/// Finds the job tied to a review, if one exists
pub async fn find_by_review_id(
    db: &DatabaseConnection,
    review_id: Id,
) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::ReviewId.eq(review_id))
        .one(db)
        .await?)
}

/// Returns up to `limit` pending jobs, oldest created first.
///
/// This is a finite re-queryable snapshot for one worker tick, not a live
/// cursor; jobs reset to pending reappear in a later poll.
pub async fn find_pending(db: &DatabaseConnection, limit: u64) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::Status.eq(SentimentJobStatus::Pending))
        .order_by_asc(Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await?)
}

/// Atomically claims a pending job, moving it to processing.
///
/// The conditional update only matches rows still in `pending`, so when two
/// workers poll the same snapshot exactly one claim succeeds. Returns the
/// claimed job, or `None` when the row vanished or another worker won.
pub async fn claim_pending(db: &DatabaseConnection, id: Id) -> Result<Option<Model>, Error> {
    let result = Entity::update_many()
        .col_expr(Column::Status, Expr::value(SentimentJobStatus::Processing))
        .col_expr(
            Column::UpdatedAt,
            Expr::value(DateTimeWithTimeZone::from(chrono::Utc::now())),
        )
        .filter(Column::Id.eq(id))
        .filter(Column::Status.eq(SentimentJobStatus::Pending))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        debug!("Sentiment job {id} was not claimable (already claimed or deleted)");
        return Ok(None);
    }

    find_by_id(db, id).await
}

/// Atomically increments the job's attempt counter
pub async fn increment_attempts(db: &DatabaseConnection, id: Id) -> Result<Option<Model>, Error> {
    let result = Entity::update_many()
        .col_expr(Column::Attempts, Expr::col(Column::Attempts).add(1))
        .col_expr(
            Column::UpdatedAt,
            Expr::value(DateTimeWithTimeZone::from(chrono::Utc::now())),
        )
        .filter(Column::Id.eq(id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        debug!("Sentiment job {id} no longer exists, skipping attempt increment");
        return Ok(None);
    }

    find_by_id(db, id).await
}

/// Marks a job done, keeping any prior error text for the audit trail
pub async fn mark_done(db: &DatabaseConnection, id: Id) -> Result<Option<Model>, Error> {
    update_status(db, id, SentimentJobStatus::Done, None).await
}

/// Marks a job terminally failed with the final error message
pub async fn mark_failed(
    db: &DatabaseConnection,
    id: Id,
    error: String,
) -> Result<Option<Model>, Error> {
    update_status(db, id, SentimentJobStatus::Failed, Some(error)).await
}

/// Resets a job to pending so a future poll retries it.
/// The attempts counter and last error are left untouched.
pub async fn mark_pending(db: &DatabaseConnection, id: Id) -> Result<Option<Model>, Error> {
    update_status(db, id, SentimentJobStatus::Pending, None).await
}

async fn update_status(
    db: &DatabaseConnection,
    id: Id,
    status: SentimentJobStatus,
    error: Option<String>,
) -> Result<Option<Model>, Error> {
    let result = Entity::find_by_id(id).one(db).await?;

    match result {
        Some(existing) => {
            debug!("Updating sentiment job status to {status}: {id}");

            let active_model = ActiveModel {
                id: Unchanged(existing.id),
                review_id: Unchanged(existing.review_id),
                status: Set(status),
                attempts: Unchanged(existing.attempts),
                error: match error {
                    Some(message) => Set(Some(message)),
                    None => Unchanged(existing.error),
                },
                created_at: Unchanged(existing.created_at),
                updated_at: Set(chrono::Utc::now().into()),
            };

            Ok(Some(active_model.update(db).await?.try_into_model()?))
        }
        None => {
            debug!("Sentiment job {id} no longer exists, skipping status update");
            Ok(None)
        }
    }
}
