pub use entity::{events, reviews, sentiment_jobs, sentiment_results, Id};

pub mod error;
pub mod event;
pub mod review;
pub mod sentiment_job;
pub mod sentiment_result;
