//! Review sentiment orchestration.
//!
//! Two entry points write the same result rows: the queue-driven
//! [`process_job`] path (primary, fed by the worker) and the on-demand
//! [`analyze_review`] path (manual override for immediate re-analysis). Both
//! upsert the authoritative sentiment_results row and refresh the
//! denormalized fields on the review.

use crate::error::{
    AccessErrorKind, DomainErrorKind, EntityErrorKind, Error, InternalErrorKind,
};
use entity::sentiment_job_status::SentimentJobStatus;
use entity::sentiment_label::SentimentLabel;
use entity::sentiment_status::SentimentStatus;
use entity::{reviews, sentiment_jobs, sentiment_results, Id};
use entity_api::{event, review, sentiment_job, sentiment_result};
use log::*;
use sea_orm::DatabaseConnection;
use sentiment_ai::{Analysis, Analyzer, Label};
use serde::Serialize;

/// Default maximum analyzer invocations before a job is terminally failed
pub const DEFAULT_MAX_ATTEMPTS: i32 = 3;

/// Final disposition of one worker-driven job run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// Analysis succeeded and the result was stored
    Completed,
    /// Analysis failed below the attempt cap; the job was reset to pending
    Retried,
    /// The job was terminally failed
    Failed,
    /// The job was not claimable (another worker won, or the row vanished)
    Skipped,
}

/// Denormalized sentiment plus job state for a review, for status queries
#[derive(Debug, PartialEq, Serialize)]
pub struct ReviewSentiment {
    pub review_id: Id,
    pub label: Option<SentimentLabel>,
    pub score: Option<f64>,
    pub status: SentimentStatus,
    pub job: Option<JobState>,
}

/// Job progress as exposed by the status query
#[derive(Debug, PartialEq, Serialize)]
pub struct JobState {
    pub status: SentimentJobStatus,
    pub attempts: i32,
    pub error: Option<String>,
}

/// Aggregated sentiment for one event's reviews
#[derive(Debug, PartialEq, Serialize)]
pub struct EventSentimentSummary {
    pub event_id: Id,
    /// All reviews for the event, independent of analysis state
    pub total_reviews: u64,
    /// Reviews with a stored sentiment result
    pub analyzed_count: u64,
    pub positive_count: u64,
    pub negative_count: u64,
    pub neutral_count: u64,
    /// Mean score over analyzed reviews only; `None` when none are analyzed
    pub average_score: Option<f64>,
}

fn to_stored_label(label: Label) -> SentimentLabel {
    match label {
        Label::Positive => SentimentLabel::Positive,
        Label::Negative => SentimentLabel::Negative,
        Label::Neutral => SentimentLabel::Neutral,
    }
}

/// Enqueues a pending analysis job for a newly created review.
///
/// Reviews without comment text are skipped, and a job that already exists is
/// not an error; in both cases `Ok(None)` is returned. Callers log and swallow
/// any remaining error so review creation is never blocked by the pipeline.
pub async fn create_job(
    db: &DatabaseConnection,
    review: &reviews::Model,
) -> Result<Option<sentiment_jobs::Model>, Error> {
    let has_comment = review
        .comment
        .as_ref()
        .is_some_and(|comment| !comment.trim().is_empty());

    if !has_comment {
        debug!("Review {} has no comment text, skipping sentiment job", review.id);
        return Ok(None);
    }

    match sentiment_job::create(db, review.id).await {
        Ok(job) => Ok(Some(job)),
        Err(e) if e.error_kind == entity_api::error::EntityApiErrorKind::RecordAlreadyExists => {
            debug!("Sentiment job already exists for review {}", review.id);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// On-demand analysis of a single review, bypassing the job queue.
///
/// Idempotent: repeated calls overwrite the stored result. Analyzer failures
/// propagate directly to the caller; this path performs no retries.
pub async fn analyze_review(
    db: &DatabaseConnection,
    analyzer: &dyn Analyzer,
    review_id: Id,
) -> Result<sentiment_results::Model, Error> {
    let review = review::find_by_id(db, review_id).await?.ok_or_else(|| Error {
        source: None,
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::NotFound)),
    })?;

    let text = review.comment.clone().unwrap_or_default();
    let analysis = analyzer.analyze(&text).await?;

    store_analysis(db, review_id, &analysis).await
}

/// Runs one worker-claimed job through the retry state machine:
/// `pending -> processing -> {done | pending | failed}`.
///
/// Never returns an error; every failure is recorded on the job row (or
/// logged when the row has vanished) so one bad job cannot abort a batch.
pub async fn process_job(
    db: &DatabaseConnection,
    analyzer: &dyn Analyzer,
    max_attempts: i32,
    job: &sentiment_jobs::Model,
) -> JobOutcome {
    // Claim before any work; losing the claim means another worker owns the job.
    let claimed = match sentiment_job::claim_pending(db, job.id).await {
        Ok(Some(claimed)) => claimed,
        Ok(None) => {
            debug!("Skipping sentiment job {}: not claimable", job.id);
            return JobOutcome::Skipped;
        }
        Err(e) => {
            warn!("Failed to claim sentiment job {}: {e}", job.id);
            return JobOutcome::Skipped;
        }
    };

    match sentiment_job::increment_attempts(db, claimed.id).await {
        Ok(Some(_)) => {}
        Ok(None) => debug!("Sentiment job {} vanished before attempt increment", claimed.id),
        Err(e) => warn!(
            "Failed to increment attempts for sentiment job {}: {e}",
            claimed.id
        ),
    }

    let review = match review::find_by_id(db, claimed.review_id).await {
        Ok(review) => review,
        Err(e) => {
            return fail_or_retry(db, max_attempts, &claimed, e.to_string()).await;
        }
    };

    let Some(review) = review else {
        // A deleted review can never succeed; terminal on the first attempt.
        warn!(
            "Review {} for sentiment job {} not found, failing terminally",
            claimed.review_id, claimed.id
        );
        if let Err(e) = sentiment_job::mark_failed(db, claimed.id, "Review not found".to_string()).await
        {
            warn!("Failed to mark sentiment job {} failed: {e}", claimed.id);
        }
        return JobOutcome::Failed;
    };

    let text = review.comment.clone().unwrap_or_default();

    match analyzer.analyze(&text).await {
        Ok(analysis) => match store_analysis(db, review.id, &analysis).await {
            Ok(_) => {
                if let Err(e) = sentiment_job::mark_done(db, claimed.id).await {
                    warn!("Failed to mark sentiment job {} done: {e}", claimed.id);
                }
                info!(
                    "Processed sentiment for review {}: {}",
                    review.id, analysis.label
                );
                JobOutcome::Completed
            }
            Err(e) => fail_or_retry(db, max_attempts, &claimed, e.to_string()).await,
        },
        Err(e) => fail_or_retry(db, max_attempts, &claimed, e.to_string()).await,
    }
}

/// Applies the bounded-retry policy after a failed attempt: below the cap the
/// job resets to pending for a later poll; at the cap it fails terminally and
/// the review's denormalized status becomes `failed`.
async fn fail_or_retry(
    db: &DatabaseConnection,
    max_attempts: i32,
    job: &sentiment_jobs::Model,
    message: String,
) -> JobOutcome {
    error!("Sentiment job {} attempt failed: {message}", job.id);

    // Re-read the row; the attempt counter was incremented after the claim.
    let attempts = match sentiment_job::find_by_id(db, job.id).await {
        Ok(Some(current)) => current.attempts,
        Ok(None) => {
            debug!("Sentiment job {} vanished during failure handling", job.id);
            return JobOutcome::Skipped;
        }
        Err(e) => {
            warn!("Failed to re-read sentiment job {}: {e}", job.id);
            return JobOutcome::Skipped;
        }
    };

    if attempts >= max_attempts {
        if let Err(e) = sentiment_job::mark_failed(db, job.id, message).await {
            warn!("Failed to mark sentiment job {} failed: {e}", job.id);
        }
        if let Err(e) =
            review::update_sentiment_status(db, job.review_id, SentimentStatus::Failed).await
        {
            warn!(
                "Failed to update sentiment status for review {}: {e}",
                job.review_id
            );
        }
        JobOutcome::Failed
    } else {
        if let Err(e) = sentiment_job::mark_pending(db, job.id).await {
            warn!("Failed to reset sentiment job {} to pending: {e}", job.id);
        }
        JobOutcome::Retried
    }
}

async fn store_analysis(
    db: &DatabaseConnection,
    review_id: Id,
    analysis: &Analysis,
) -> Result<sentiment_results::Model, Error> {
    let label = to_stored_label(analysis.label);

    let result = sentiment_result::upsert(
        db,
        review_id,
        analysis.class(),
        label.clone(),
        analysis.score,
        analysis.negative_summary.clone(),
    )
    .await?;

    // The denormalized copy is best effort; sentiment_results stays authoritative.
    if review::update_sentiment(
        db,
        review_id,
        Some(label),
        Some(analysis.score),
        SentimentStatus::Analyzed,
    )
    .await?
    .is_none()
    {
        warn!("Review {review_id} disappeared after its sentiment result was stored");
    }

    Ok(result)
}

/// Denormalized sentiment and job progress for one review
pub async fn get_review_sentiment(
    db: &DatabaseConnection,
    review_id: Id,
) -> Result<ReviewSentiment, Error> {
    let review = review::find_by_id(db, review_id).await?.ok_or_else(|| Error {
        source: None,
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::NotFound)),
    })?;

    let job = sentiment_job::find_by_review_id(db, review_id)
        .await?
        .map(|job| JobState {
            status: job.status,
            attempts: job.attempts,
            error: job.error,
        });

    Ok(ReviewSentiment {
        review_id: review.id,
        label: review.sentiment_label,
        score: review.sentiment_score,
        status: review.sentiment_status,
        job,
    })
}

/// Aggregated sentiment for an event, gated on organizer ownership
pub async fn get_event_sentiment_summary(
    db: &DatabaseConnection,
    organizer_id: Id,
    event_id: Id,
) -> Result<EventSentimentSummary, Error> {
    authorize_organizer(db, organizer_id, event_id).await?;

    let total_reviews = review::count_by_event_id(db, event_id).await?;
    let results = sentiment_result::find_by_event_id(db, event_id).await?;

    let analyzed_count = results.len() as u64;
    let positive_count = results.iter().filter(|r| r.class > 0).count() as u64;
    let negative_count = results.iter().filter(|r| r.class < 0).count() as u64;
    let neutral_count = analyzed_count - positive_count - negative_count;

    let average_score = if results.is_empty() {
        None
    } else {
        Some(results.iter().map(|r| r.score).sum::<f64>() / results.len() as f64)
    };

    Ok(EventSentimentSummary {
        event_id,
        total_reviews,
        analyzed_count,
        positive_count,
        negative_count,
        neutral_count,
        average_score,
    })
}

/// Raw per-review sentiment list for an event, newest first, gated on
/// organizer ownership
pub async fn get_event_sentiments(
    db: &DatabaseConnection,
    organizer_id: Id,
    event_id: Id,
) -> Result<Vec<sentiment_results::Model>, Error> {
    authorize_organizer(db, organizer_id, event_id).await?;

    Ok(sentiment_result::find_by_event_id(db, event_id).await?)
}

/// Fails with Forbidden unless the event exists and belongs to the organizer.
/// Runs before any aggregate is computed so no partial data leaks.
async fn authorize_organizer(
    db: &DatabaseConnection,
    organizer_id: Id,
    event_id: Id,
) -> Result<(), Error> {
    let event = event::find_by_id(db, event_id).await?.ok_or_else(|| Error {
        source: None,
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::NotFound)),
    })?;

    if event.organizer_id != organizer_id {
        return Err(Error {
            source: None,
            error_kind: DomainErrorKind::Access(AccessErrorKind::Forbidden),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
    use sentiment_ai::KeywordAnalyzer;
    use std::collections::BTreeMap;

    mock! {
        pub TestAnalyzer {}

        #[async_trait]
        impl Analyzer for TestAnalyzer {
            async fn analyze(&self, text: &str) -> Result<Analysis, sentiment_ai::Error>;
            fn analyzer_id(&self) -> &str;
        }
    }

    fn review_model(comment: Option<&str>) -> reviews::Model {
        let now = chrono::Utc::now();
        reviews::Model {
            id: Id::new_v4(),
            user_id: Id::new_v4(),
            event_id: Id::new_v4(),
            rating: 4,
            comment: comment.map(|c| c.to_string()),
            sentiment_label: None,
            sentiment_score: None,
            sentiment_status: SentimentStatus::Pending,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn job_model(review_id: Id, status: SentimentJobStatus, attempts: i32) -> sentiment_jobs::Model {
        let now = chrono::Utc::now();
        sentiment_jobs::Model {
            id: Id::new_v4(),
            review_id,
            status,
            attempts,
            error: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn result_model(review_id: Id, label: SentimentLabel, score: f64) -> sentiment_results::Model {
        let now = chrono::Utc::now();
        sentiment_results::Model {
            id: Id::new_v4(),
            review_id,
            class: label.class(),
            label,
            score,
            negative_summary: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn event_model(organizer_id: Id) -> entity::events::Model {
        let now = chrono::Utc::now();
        entity::events::Model {
            id: Id::new_v4(),
            organizer_id,
            title: "Open Air Cinema".to_string(),
            location: None,
            starts_at: now.into(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn count_row(count: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::BigInt(Some(count)))])
    }

    fn exec_ok() -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }
    }

    #[tokio::test]
    async fn create_job_skips_reviews_without_comment_text() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let no_comment = review_model(None);
        assert_eq!(create_job(&db, &no_comment).await?, None);

        let blank_comment = review_model(Some("   "));
        assert_eq!(create_job(&db, &blank_comment).await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn create_job_enqueues_a_pending_job_for_commented_reviews() -> Result<(), Error> {
        let review = review_model(Some("Loved it"));
        let job = job_model(review.id, SentimentJobStatus::Pending, 0);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![job.clone()]])
            .into_connection();

        let created = create_job(&db, &review).await?;

        assert_eq!(created, Some(job));

        Ok(())
    }

    #[tokio::test]
    async fn analyze_review_fails_with_not_found_for_missing_review() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<reviews::Model>::new()])
            .into_connection();

        let analyzer = KeywordAnalyzer::new();
        let err = analyze_review(&db, &analyzer, Id::new_v4()).await.unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::NotFound))
        );
    }

    #[tokio::test]
    async fn analyze_review_stores_and_returns_the_result() -> Result<(), Error> {
        let review = review_model(Some("This was an amazing trip, loved every moment"));
        let stored = result_model(review.id, SentimentLabel::Positive, 1.0);

        let mut analyzed = review.clone();
        analyzed.sentiment_label = Some(SentimentLabel::Positive);
        analyzed.sentiment_score = Some(1.0);
        analyzed.sentiment_status = SentimentStatus::Analyzed;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![
                // review lookup
                vec![review.clone()],
            ])
            .append_query_results(vec![
                // result upsert returning
                vec![stored.clone()],
            ])
            .append_query_results(vec![
                // denormalized review update: find then update returning
                vec![review.clone()],
                vec![analyzed],
            ])
            .into_connection();

        let analyzer = KeywordAnalyzer::new();
        let result = analyze_review(&db, &analyzer, review.id).await?;

        assert_eq!(result.label, SentimentLabel::Positive);
        assert_eq!(result.class, 1);

        Ok(())
    }

    #[tokio::test]
    async fn process_job_skips_jobs_lost_to_another_worker() {
        let job = job_model(Id::new_v4(), SentimentJobStatus::Pending, 0);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let analyzer = KeywordAnalyzer::new();
        let outcome = process_job(&db, &analyzer, DEFAULT_MAX_ATTEMPTS, &job).await;

        assert_eq!(outcome, JobOutcome::Skipped);
    }

    #[tokio::test]
    async fn process_job_fails_terminally_when_the_review_is_missing() {
        let job = job_model(Id::new_v4(), SentimentJobStatus::Pending, 0);
        let claimed = sentiment_jobs::Model {
            status: SentimentJobStatus::Processing,
            ..job.clone()
        };
        let incremented = sentiment_jobs::Model {
            attempts: 1,
            ..claimed.clone()
        };
        let failed = sentiment_jobs::Model {
            status: SentimentJobStatus::Failed,
            error: Some("Review not found".to_string()),
            ..incremented.clone()
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec_ok(), exec_ok()])
            .append_query_results(vec![
                // claim re-read, attempt increment re-read
                vec![claimed.clone()],
                vec![incremented.clone()],
            ])
            .append_query_results(vec![
                // review lookup comes back empty
                Vec::<reviews::Model>::new(),
            ])
            .append_query_results(vec![
                // mark_failed: find then update returning
                vec![incremented],
                vec![failed],
            ])
            .into_connection();

        let analyzer = KeywordAnalyzer::new();
        let outcome = process_job(&db, &analyzer, DEFAULT_MAX_ATTEMPTS, &job).await;

        assert_eq!(outcome, JobOutcome::Failed);
    }

    #[tokio::test]
    async fn process_job_resets_to_pending_below_the_attempt_cap() {
        let review = review_model(Some("fine"));
        let job = job_model(review.id, SentimentJobStatus::Pending, 0);
        let claimed = sentiment_jobs::Model {
            status: SentimentJobStatus::Processing,
            ..job.clone()
        };
        let incremented = sentiment_jobs::Model {
            attempts: 1,
            ..claimed.clone()
        };
        let reset = sentiment_jobs::Model {
            status: SentimentJobStatus::Pending,
            ..incremented.clone()
        };

        let mut analyzer = MockTestAnalyzer::new();
        analyzer
            .expect_analyze()
            .returning(|_| Err(sentiment_ai::Error::Network("connection reset".to_string())));

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec_ok(), exec_ok()])
            .append_query_results(vec![vec![claimed.clone()], vec![incremented.clone()]])
            .append_query_results(vec![vec![review]])
            .append_query_results(vec![
                // failure handling: attempts re-read, then reset find + update
                vec![incremented.clone()],
                vec![incremented],
                vec![reset],
            ])
            .into_connection();

        let outcome = process_job(&db, &analyzer, DEFAULT_MAX_ATTEMPTS, &job).await;

        assert_eq!(outcome, JobOutcome::Retried);
    }

    #[tokio::test]
    async fn process_job_fails_terminally_at_the_attempt_cap() {
        let review = review_model(Some("fine"));
        let job = job_model(review.id, SentimentJobStatus::Pending, 2);
        let claimed = sentiment_jobs::Model {
            status: SentimentJobStatus::Processing,
            ..job.clone()
        };
        let incremented = sentiment_jobs::Model {
            attempts: 3,
            ..claimed.clone()
        };
        let failed = sentiment_jobs::Model {
            status: SentimentJobStatus::Failed,
            error: Some("Network error: connection reset".to_string()),
            ..incremented.clone()
        };
        let mut failed_review = review.clone();
        failed_review.sentiment_status = SentimentStatus::Failed;

        let mut analyzer = MockTestAnalyzer::new();
        analyzer
            .expect_analyze()
            .returning(|_| Err(sentiment_ai::Error::Network("connection reset".to_string())));

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec_ok(), exec_ok()])
            .append_query_results(vec![vec![claimed.clone()], vec![incremented.clone()]])
            .append_query_results(vec![vec![review.clone()]])
            .append_query_results(vec![
                // failure handling: attempts re-read at the cap
                vec![incremented.clone()],
                // mark_failed: find + update
                vec![incremented],
                vec![failed],
            ])
            .append_query_results(vec![
                // review status update: find + update
                vec![review],
                vec![failed_review],
            ])
            .into_connection();

        let outcome = process_job(&db, &analyzer, DEFAULT_MAX_ATTEMPTS, &job).await;

        assert_eq!(outcome, JobOutcome::Failed);
    }

    #[tokio::test]
    async fn process_job_stores_result_and_completes_on_success() {
        let review = review_model(Some("Terrible experience, a complete waste of money"));
        let job = job_model(review.id, SentimentJobStatus::Pending, 0);
        let claimed = sentiment_jobs::Model {
            status: SentimentJobStatus::Processing,
            ..job.clone()
        };
        let incremented = sentiment_jobs::Model {
            attempts: 1,
            ..claimed.clone()
        };
        let stored = result_model(review.id, SentimentLabel::Negative, -1.0);
        let mut analyzed = review.clone();
        analyzed.sentiment_label = Some(SentimentLabel::Negative);
        analyzed.sentiment_score = Some(-1.0);
        analyzed.sentiment_status = SentimentStatus::Analyzed;
        let done = sentiment_jobs::Model {
            status: SentimentJobStatus::Done,
            ..incremented.clone()
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec_ok(), exec_ok()])
            .append_query_results(vec![vec![claimed.clone()], vec![incremented.clone()]])
            .append_query_results(vec![vec![review.clone()]])
            .append_query_results(vec![
                // result upsert returning
                vec![stored],
            ])
            .append_query_results(vec![
                // denormalized review update: find + update
                vec![review],
                vec![analyzed],
            ])
            .append_query_results(vec![
                // mark_done: find + update
                vec![incremented],
                vec![done],
            ])
            .into_connection();

        let analyzer = KeywordAnalyzer::new();
        let outcome = process_job(&db, &analyzer, DEFAULT_MAX_ATTEMPTS, &job).await;

        assert_eq!(outcome, JobOutcome::Completed);
    }

    #[tokio::test]
    async fn summary_is_forbidden_for_a_non_owning_organizer() {
        let event = event_model(Id::new_v4());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![event.clone()]])
            .into_connection();

        let err = get_event_sentiment_summary(&db, Id::new_v4(), event.id)
            .await
            .unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::Access(AccessErrorKind::Forbidden)
        );
    }

    #[tokio::test]
    async fn summary_partitions_analyzed_reviews_by_class() -> Result<(), Error> {
        let organizer_id = Id::new_v4();
        let event = event_model(organizer_id);

        let results = vec![
            result_model(Id::new_v4(), SentimentLabel::Positive, 0.8),
            result_model(Id::new_v4(), SentimentLabel::Positive, 0.6),
            result_model(Id::new_v4(), SentimentLabel::Negative, -0.4),
        ];

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![event.clone()]])
            .append_query_results(vec![vec![count_row(5)]])
            .append_query_results(vec![results])
            .into_connection();

        let summary = get_event_sentiment_summary(&db, organizer_id, event.id).await?;

        assert_eq!(summary.total_reviews, 5);
        assert_eq!(summary.analyzed_count, 3);
        assert_eq!(summary.positive_count, 2);
        assert_eq!(summary.negative_count, 1);
        assert_eq!(summary.neutral_count, 0);
        let average = summary.average_score.unwrap();
        assert!((average - (0.8 + 0.6 - 0.4) / 3.0).abs() < 1e-9);

        Ok(())
    }

    #[tokio::test]
    async fn summary_average_is_none_when_nothing_is_analyzed() -> Result<(), Error> {
        let organizer_id = Id::new_v4();
        let event = event_model(organizer_id);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![event.clone()]])
            .append_query_results(vec![vec![count_row(2)]])
            .append_query_results(vec![Vec::<sentiment_results::Model>::new()])
            .into_connection();

        let summary = get_event_sentiment_summary(&db, organizer_id, event.id).await?;

        assert_eq!(summary.total_reviews, 2);
        assert_eq!(summary.analyzed_count, 0);
        assert_eq!(summary.average_score, None);

        Ok(())
    }

    #[tokio::test]
    async fn get_review_sentiment_includes_job_progress() -> Result<(), Error> {
        let mut review = review_model(Some("fine"));
        review.sentiment_status = SentimentStatus::Pending;
        let mut job = job_model(review.id, SentimentJobStatus::Pending, 2);
        job.error = Some("Provider error: 502".to_string());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![review.clone()]])
            .append_query_results(vec![vec![job.clone()]])
            .into_connection();

        let sentiment = get_review_sentiment(&db, review.id).await?;

        assert_eq!(sentiment.review_id, review.id);
        assert_eq!(sentiment.status, SentimentStatus::Pending);
        assert_eq!(
            sentiment.job,
            Some(JobState {
                status: SentimentJobStatus::Pending,
                attempts: 2,
                error: Some("Provider error: 502".to_string()),
            })
        );

        Ok(())
    }
}
