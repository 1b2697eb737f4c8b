//! SeaORM Entity for the sentiment_jobs table.
//! One durable unit of pending analysis work per review; terminal rows are
//! never deleted and serve as the failure audit trail.

use crate::sentiment_job_status::SentimentJobStatus;
use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(schema_name = "event_platform", table_name = "sentiment_jobs")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,

    /// At most one job per review, enforced by a unique constraint
    #[sea_orm(unique)]
    pub review_id: Id,

    pub status: SentimentJobStatus,

    /// Number of analyzer invocations so far
    pub attempts: i32,

    /// Last failure message, if any
    #[sea_orm(column_type = "Text")]
    pub error: Option<String>,

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
