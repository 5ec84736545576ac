//! Repository for the association tables that point at topics:
//! `audios_to_topics`, `videos_to_topics` and `users_to_topics`.
//!
//! Rows are owned by the audio, video and user subsystems. Topic deletion
//! reads the first two as reference guards; the feature-topics ranking reads
//! the third.

use catalog_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

/// Provides link management and reference-guard checks for topics.
pub struct TopicLinkRepo;

impl TopicLinkRepo {
    /// Link an audio to a topic (idempotent).
    pub async fn link_audio(
        pool: &PgPool,
        audio_id: DbId,
        topic_key: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO audios_to_topics (audio_id, topic_key) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(audio_id)
        .bind(topic_key)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove an audio link. Returns `true` if a row was removed.
    pub async fn unlink_audio(
        pool: &PgPool,
        audio_id: DbId,
        topic_key: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM audios_to_topics WHERE audio_id = $1 AND topic_key = $2")
                .bind(audio_id)
                .bind(topic_key)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Link a video to a topic (idempotent).
    pub async fn link_video(
        pool: &PgPool,
        video_id: DbId,
        topic_key: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO videos_to_topics (video_id, topic_key) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(video_id)
        .bind(topic_key)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove a video link. Returns `true` if a row was removed.
    pub async fn unlink_video(
        pool: &PgPool,
        video_id: DbId,
        topic_key: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM videos_to_topics WHERE video_id = $1 AND topic_key = $2")
                .bind(video_id)
                .bind(topic_key)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record that a user selected a topic (idempotent).
    pub async fn select_topic(
        pool: &PgPool,
        user_id: DbId,
        topic_key: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO users_to_topics (user_id, topic_key) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(topic_key)
        .execute(pool)
        .await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Reference guards (run inside the caller's delete transaction)
    // -----------------------------------------------------------------------

    /// Whether any audio is linked to any of `topic_keys`.
    pub(crate) async fn any_audio_linked(
        tx: &mut Transaction<'_, Postgres>,
        topic_keys: &[String],
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM audios_to_topics WHERE topic_key = ANY($1))",
        )
        .bind(topic_keys)
        .fetch_one(&mut **tx)
        .await
    }

    /// Whether any video is linked to any of `topic_keys`.
    pub(crate) async fn any_video_linked(
        tx: &mut Transaction<'_, Postgres>,
        topic_keys: &[String],
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM videos_to_topics WHERE topic_key = ANY($1))",
        )
        .bind(topic_keys)
        .fetch_one(&mut **tx)
        .await
    }
}
