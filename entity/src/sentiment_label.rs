use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sentiment classification computed for a review.
#[derive(Debug, Clone, Eq, PartialEq, EnumIter, Deserialize, Serialize, DeriveActiveEnum)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "sentiment_label")]
pub enum SentimentLabel {
    #[sea_orm(string_value = "positive")]
    Positive,
    #[sea_orm(string_value = "neutral")]
    Neutral,
    #[sea_orm(string_value = "negative")]
    Negative,
}

impl SentimentLabel {
    /// Numeric class used for aggregation: +1 positive, -1 negative, 0 neutral.
    pub fn class(&self) -> i32 {
        match self {
            SentimentLabel::Positive => 1,
            SentimentLabel::Negative => -1,
            SentimentLabel::Neutral => 0,
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(fmt, "positive"),
            SentimentLabel::Neutral => write!(fmt, "neutral"),
            SentimentLabel::Negative => write!(fmt, "negative"),
        }
    }
}
