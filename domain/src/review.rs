//! Review creation and lookup.

use crate::error::{DomainErrorKind, EntityErrorKind, Error, InternalErrorKind};
use crate::sentiment;
use entity::reviews;
use entity_api::review;
use log::*;
use sea_orm::DatabaseConnection;

pub use entity_api::review::find_by_id;

/// Creates a review and enqueues its sentiment analysis job.
///
/// Enqueueing is best effort: a failure to create the job is logged and does
/// not fail the review creation. The worker will never pick the review up, but
/// [`sentiment::analyze_review`] remains available as a manual fallback.
pub async fn create(
    db: &DatabaseConnection,
    model: reviews::Model,
) -> Result<reviews::Model, Error> {
    if !(1..=5).contains(&model.rating) {
        return Err(Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
                EntityErrorKind::Invalid,
            )),
        });
    }

    if review::find_by_user_and_event(db, model.user_id, model.event_id)
        .await?
        .is_some()
    {
        return Err(Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
                EntityErrorKind::Conflict,
            )),
        });
    }

    let review = review::create(db, model).await?;

    if let Err(e) = sentiment::create_job(db, &review).await {
        error!("Failed to enqueue sentiment job for review {}: {e}", review.id);
    }

    Ok(review)
}
