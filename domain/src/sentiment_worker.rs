//! Background scheduler that drains the sentiment job queue.
//!
//! One worker polls on a fixed interval and processes a bounded batch of
//! pending jobs sequentially per tick. Multiple workers may run against the
//! same database; the per-job claim in [`sentiment::process_job`] keeps them
//! from processing the same job twice.

use crate::sentiment;
use entity_api::sentiment_job;
use log::*;
use sea_orm::DatabaseConnection;
use sentiment_ai::Analyzer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;

/// Default seconds between queue polls
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
/// Default maximum jobs processed per tick
pub const DEFAULT_BATCH_SIZE: u64 = 5;

/// Polling worker for the sentiment job queue
pub struct SentimentWorker {
    db: Arc<DatabaseConnection>,
    analyzer: Arc<dyn Analyzer>,
    poll_interval: Duration,
    batch_size: u64,
    max_attempts: i32,
    running: Arc<AtomicBool>,
    shutdown: Arc<Notify>,
}

impl SentimentWorker {
    pub fn new(
        db: Arc<DatabaseConnection>,
        analyzer: Arc<dyn Analyzer>,
        poll_interval: Duration,
        batch_size: u64,
        max_attempts: i32,
    ) -> Self {
        Self {
            db,
            analyzer,
            poll_interval,
            batch_size,
            max_attempts,
            running: Arc::new(AtomicBool::new(false)),
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Starts the polling loop on a background task. The first poll happens
    /// immediately rather than one interval in. Starting an already running
    /// worker logs a warning and changes nothing.
    pub fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Sentiment worker is already running");
            return;
        }

        info!(
            "Starting sentiment worker (poll interval {:?}, batch size {})",
            self.poll_interval, self.batch_size
        );

        let db = self.db.clone();
        let analyzer = self.analyzer.clone();
        let batch_size = self.batch_size;
        let max_attempts = self.max_attempts;
        let running = self.running.clone();
        let shutdown = self.shutdown.clone();
        let poll_interval = self.poll_interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = shutdown.notified() => {
                        // A stop() that lands mid-batch leaves its permit
                        // behind for the next run; the running flag is
                        // authoritative for whether this run is over.
                        if running.load(Ordering::SeqCst) {
                            continue;
                        }
                        break;
                    }
                }

                if !running.load(Ordering::SeqCst) {
                    break;
                }

                process_batch(&db, analyzer.as_ref(), batch_size, max_attempts).await;
            }

            info!("Sentiment worker stopped");
        });
    }

    /// Signals the polling loop to exit. An in-flight batch completes its
    /// current job before the loop observes the flag. Stopping a worker that
    /// is not running logs a warning and changes nothing.
    pub fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            warn!("Sentiment worker is not running");
            return;
        }

        info!("Stopping sentiment worker");
        self.shutdown.notify_one();
    }

    pub fn is_active(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// One poll: fetch up to `batch_size` pending jobs and run them sequentially.
/// A failed fetch is logged and skipped; the scheduler itself never dies.
async fn process_batch(
    db: &DatabaseConnection,
    analyzer: &dyn Analyzer,
    batch_size: u64,
    max_attempts: i32,
) {
    let jobs = match sentiment_job::find_pending(db, batch_size).await {
        Ok(jobs) => jobs,
        Err(e) => {
            error!("Failed to fetch pending sentiment jobs: {e}");
            return;
        }
    };

    if jobs.is_empty() {
        return;
    }

    debug!("Processing {} pending sentiment job(s)", jobs.len());

    for job in &jobs {
        let outcome = sentiment::process_job(db, analyzer, max_attempts, job).await;
        debug!("Sentiment job {} outcome: {outcome:?}", job.id);
    }
}
