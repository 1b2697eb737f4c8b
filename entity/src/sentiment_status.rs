use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Denormalized analysis state carried on a review row.
#[derive(
    Debug, Clone, Eq, PartialEq, EnumIter, Deserialize, Default, Serialize, DeriveActiveEnum,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "sentiment_status")]
pub enum SentimentStatus {
    /// Review has not been analyzed yet
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    /// A sentiment result exists for the review
    #[sea_orm(string_value = "analyzed")]
    Analyzed,
    /// Analysis failed terminally (attempt cap reached)
    #[sea_orm(string_value = "failed")]
    Failed,
}

impl std::fmt::Display for SentimentStatus {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentStatus::Pending => write!(fmt, "pending"),
            SentimentStatus::Analyzed => write!(fmt, "analyzed"),
            SentimentStatus::Failed => write!(fmt, "failed"),
        }
    }
}
