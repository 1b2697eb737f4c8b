//! SeaORM Entity for the sentiment_results table.
//! Authoritative computed sentiment per review, replaced on re-analysis.

use crate::sentiment_label::SentimentLabel;
use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(schema_name = "event_platform", table_name = "sentiment_results")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,

    /// One result row per review, overwritten by upsert on re-analysis
    #[sea_orm(unique)]
    pub review_id: Id,

    /// Numeric class for aggregation: +1 positive, -1 negative, 0 neutral
    pub class: i32,

    pub label: SentimentLabel,

    /// Score clamped to [-1.0, 1.0]
    pub score: f64,

    /// Optional summary text returned for negative sentiment
    #[sea_orm(column_type = "Text")]
    pub negative_summary: Option<String>,

    #[serde(skip_deserializing)]
    pub created_at: DateTimeWithTimeZone,

    #[serde(skip_deserializing)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::reviews::Entity",
        from = "Column::ReviewId",
        to = "super::reviews::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Reviews,
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
