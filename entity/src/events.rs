//! SeaORM Entity for the events table.
//! Minimal event record used for organizer ownership checks and review joins.

use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(schema_name = "event_platform", table_name = "events")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,

    /// Organizer that owns this event; authorizes dashboard access
    pub organizer_id: Id,

    pub title: String,

    pub location: Option<String>,

    /// Scheduled start of the event
    pub starts_at: DateTimeWithTimeZone,

    #[serde(skip_deserializing)]
    pub created_at: DateTimeWithTimeZone,

    #[serde(skip_deserializing)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
