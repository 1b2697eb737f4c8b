use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create the platform's schema
        manager
            .get_connection()
            .execute_unprepared("CREATE SCHEMA IF NOT EXISTS event_platform;")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("SET search_path TO event_platform, public;")
            .await?;

        // Sentiment classification for a review
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE TYPE event_platform.sentiment_label AS ENUM (
                    'positive',
                    'neutral',
                    'negative'
                )",
            )
            .await?;

        // Denormalized pipeline state carried on each review
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE TYPE event_platform.sentiment_status AS ENUM (
                    'pending',
                    'analyzed',
                    'failed'
                )",
            )
            .await?;

        // Organizers and review authors live in an external identity system
        // and are referenced by bare UUID.
        let create_events_sql = r#"
            CREATE TABLE IF NOT EXISTS event_platform.events (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                organizer_id UUID NOT NULL,
                title VARCHAR(255) NOT NULL,
                location VARCHAR(255),
                starts_at TIMESTAMPTZ NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
        "#;

        manager
            .get_connection()
            .execute_unprepared(create_events_sql)
            .await?;

        let create_reviews_sql = r#"
            CREATE TABLE IF NOT EXISTS event_platform.reviews (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                user_id UUID NOT NULL,
                event_id UUID NOT NULL
                    REFERENCES event_platform.events(id) ON DELETE CASCADE,
                rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
                comment TEXT,
                sentiment_label event_platform.sentiment_label,
                sentiment_score DOUBLE PRECISION,
                sentiment_status event_platform.sentiment_status NOT NULL DEFAULT 'pending',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

                CONSTRAINT reviews_user_event_unique UNIQUE(user_id, event_id)
            )
        "#;

        manager
            .get_connection()
            .execute_unprepared(create_reviews_sql)
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_reviews_event
                 ON event_platform.reviews(event_id)",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_events_organizer
                 ON event_platform.events(organizer_id)",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS event_platform.reviews")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS event_platform.events")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP TYPE IF EXISTS event_platform.sentiment_status")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP TYPE IF EXISTS event_platform.sentiment_label")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP SCHEMA IF EXISTS event_platform CASCADE;")
            .await?;

        Ok(())
    }
}
