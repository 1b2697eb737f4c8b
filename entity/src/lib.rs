use uuid::Uuid;

// Core entities
pub mod events;
pub mod reviews;

// Sentiment pipeline entities
pub mod sentiment_job_status;
pub mod sentiment_jobs;
pub mod sentiment_label;
pub mod sentiment_results;
pub mod sentiment_status;

/// A type alias that represents any Entity's internal id field data type.
/// Aliased so that it's easy to change the underlying type if necessary.
pub type Id = Uuid;
