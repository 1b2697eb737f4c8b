use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Lifecycle of a queued analysis job
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE TYPE event_platform.sentiment_job_status AS ENUM (
                    'pending',
                    'processing',
                    'done',
                    'failed'
                )",
            )
            .await?;

        // One durable work item per review; terminal rows are kept as the
        // failure audit trail.
        let create_jobs_sql = r#"
            CREATE TABLE IF NOT EXISTS event_platform.sentiment_jobs (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                review_id UUID NOT NULL
                    REFERENCES event_platform.reviews(id) ON DELETE CASCADE,
                status event_platform.sentiment_job_status NOT NULL DEFAULT 'pending',
                attempts INTEGER NOT NULL DEFAULT 0,
                error TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

                CONSTRAINT sentiment_jobs_review_unique UNIQUE(review_id)
            )
        "#;

        manager
            .get_connection()
            .execute_unprepared(create_jobs_sql)
            .await?;

        // The worker polls oldest-first for pending jobs
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_sentiment_jobs_status_created
                 ON event_platform.sentiment_jobs(status, created_at)",
            )
            .await?;

        // Authoritative analysis output, one row per review, overwritten on
        // re-analysis.
        let create_results_sql = r#"
            CREATE TABLE IF NOT EXISTS event_platform.sentiment_results (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                review_id UUID NOT NULL
                    REFERENCES event_platform.reviews(id) ON DELETE CASCADE,
                class INTEGER NOT NULL,
                label event_platform.sentiment_label NOT NULL,
                score DOUBLE PRECISION NOT NULL,
                negative_summary TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

                CONSTRAINT sentiment_results_review_unique UNIQUE(review_id)
            )
        "#;

        manager
            .get_connection()
            .execute_unprepared(create_results_sql)
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS event_platform.sentiment_results")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS event_platform.sentiment_jobs")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP TYPE IF EXISTS event_platform.sentiment_job_status")
            .await?;

        Ok(())
    }
}
