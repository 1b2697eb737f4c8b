use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Status of a sentiment analysis job through its lifecycle.
#[derive(
    Debug, Clone, Eq, PartialEq, EnumIter, Deserialize, Default, Serialize, DeriveActiveEnum,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(
    rs_type = "String",
    db_type = "Enum",
    enum_name = "sentiment_job_status"
)]
pub enum SentimentJobStatus {
    /// Job has been enqueued but not picked up by the worker
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    /// Job has been claimed by a worker and is being analyzed
    #[sea_orm(string_value = "processing")]
    Processing,
    /// Analysis completed and the result was stored
    #[sea_orm(string_value = "done")]
    Done,
    /// Job failed terminally; `error` holds the last failure
    #[sea_orm(string_value = "failed")]
    Failed,
}

impl std::fmt::Display for SentimentJobStatus {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentJobStatus::Pending => write!(fmt, "pending"),
            SentimentJobStatus::Processing => write!(fmt, "processing"),
            SentimentJobStatus::Done => write!(fmt, "done"),
            SentimentJobStatus::Failed => write!(fmt, "failed"),
        }
    }
}
