//! SeaORM Entity for the reviews table.
//! Carries the review text plus denormalized sentiment fields kept eventually
//! consistent with the authoritative sentiment_results row.

use crate::sentiment_label::SentimentLabel;
use crate::sentiment_status::SentimentStatus;
use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(schema_name = "event_platform", table_name = "reviews")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,

    /// Author of the review; user records live with the auth collaborator
    pub user_id: Id,

    pub event_id: Id,

    /// Star rating, 1 through 5
    pub rating: i32,

    #[sea_orm(column_type = "Text")]
    pub comment: Option<String>,

    /// Denormalized copy of the latest sentiment label, for fast reads
    pub sentiment_label: Option<SentimentLabel>,

    /// Denormalized copy of the latest sentiment score
    pub sentiment_score: Option<f64>,

    pub sentiment_status: SentimentStatus,

    #[serde(skip_deserializing)]
    pub created_at: DateTimeWithTimeZone,

    #[serde(skip_deserializing)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::events::Entity",
        from = "Column::EventId",
        to = "super::events::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Events,

    #[sea_orm(has_one = "super::sentiment_jobs::Entity")]
    SentimentJobs,

    #[sea_orm(has_one = "super::sentiment_results::Entity")]
    SentimentResults,
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl Related<super::sentiment_jobs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SentimentJobs.def()
    }
}

impl Related<super::sentiment_results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SentimentResults.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
