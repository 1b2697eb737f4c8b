//! CRUD operations for the sentiment_results table.
//!
//! One authoritative result row per review; re-analysis overwrites in place
//! via an upsert keyed on `review_id`.

use super::error::Error;
use entity::sentiment_label::SentimentLabel;
use entity::sentiment_results::{ActiveModel, Column, Entity, Model, Relation};
use entity::Id;
use log::*;
use sea_orm::{
    entity::prelude::*, sea_query::OnConflict, ActiveValue::Set, DatabaseConnection, JoinType,
    QueryOrder, QuerySelect,
};

/// Inserts or replaces the sentiment result for a review.
///
/// `score` is expected to already be clamped to [-1.0, 1.0] by the analyzer
/// layer; `class` is the numeric encoding of `label` (+1/-1/0).
pub async fn upsert(
    db: &DatabaseConnection,
    review_id: Id,
    class: i32,
    label: SentimentLabel,
    score: f64,
    negative_summary: Option<String>,
) -> Result<Model, Error> {
    debug!("Upserting sentiment result for review {review_id}: {label} ({score})");

    let now = chrono::Utc::now();

    let active_model = ActiveModel {
        review_id: Set(review_id),
        class: Set(class),
        label: Set(label),
        score: Set(score),
        negative_summary: Set(negative_summary),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    let model = Entity::insert(active_model)
        .on_conflict(
            OnConflict::column(Column::ReviewId)
                .update_columns([
                    Column::Class,
                    Column::Label,
                    Column::Score,
                    Column::NegativeSummary,
                    Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(db)
        .await?;

    Ok(model)
}

/// Finds the result for a review, if one exists
pub async fn find_by_review_id(
    db: &DatabaseConnection,
    review_id: Id,
) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::ReviewId.eq(review_id))
        .one(db)
        .await?)
}

/// Returns all results for an event's reviews, newest first
pub async fn find_by_event_id(db: &DatabaseConnection, event_id: Id) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .join(JoinType::InnerJoin, Relation::Reviews.def())
        .filter(entity::reviews::Column::EventId.eq(event_id))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?)
}
