//! Integration tests for topic and product soft delete.
//!
//! Covers the reference guard (audio before video), bulk delete counts,
//! and that soft-deleted rows disappear from every read.

use assert_matches::assert_matches;
use catalog_core::lang::Lang;
use catalog_db::models::product::CreateProduct;
use catalog_db::models::topic::{
    CreateTopic, SoftDeleteCounts, TopicCreateOutcome, TopicDeleteOutcome, TopicQuery,
    UpdateTopic,
};
use catalog_db::repositories::{ProductRepo, TopicLinkRepo, TopicRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_topic(pool: &PgPool, key: &str, name: &str) {
    let input = CreateTopic {
        key: key.to_string(),
        name: name.to_string(),
        lang: Lang::En,
        description: None,
        enabled: None,
    };
    let outcome = TopicRepo::create(pool, &input).await.unwrap();
    assert_matches!(outcome, TopicCreateOutcome::Created(_));
}

/// Give `key` a second translation in Vietnamese.
async fn add_vi(pool: &PgPool, key: &str, name: &str) {
    let input = UpdateTopic {
        lang: None,
        name: Some(name.to_string()),
        description: None,
        enabled: None,
    };
    TopicRepo::update(pool, key, Lang::Vi, &input).await.unwrap();
}

async fn deleted_at_is_set(pool: &PgPool, key: &str) -> bool {
    let (deleted,): (bool,) =
        sqlx::query_as("SELECT deleted_at IS NOT NULL FROM topics WHERE key = $1")
            .bind(key)
            .fetch_one(pool)
            .await
            .unwrap();
    deleted
}

async fn live_translation_count(pool: &PgPool, key: &str) -> i64 {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM topic_translations WHERE topic_key = $1 AND deleted_at IS NULL",
    )
    .bind(key)
    .fetch_one(pool)
    .await
    .unwrap();
    count
}

// ---------------------------------------------------------------------------
// Single topic
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_topic_and_translations(pool: PgPool) {
    create_topic(&pool, "sports", "Sports").await;
    add_vi(&pool, "sports", "The thao").await;

    let outcome = TopicRepo::soft_delete(&pool, "sports").await.unwrap();
    assert_eq!(
        outcome,
        TopicDeleteOutcome::Deleted(SoftDeleteCounts {
            topics: 1,
            translations: 2,
        })
    );

    assert!(deleted_at_is_set(&pool, "sports").await);
    assert_eq!(live_translation_count(&pool, "sports").await, 0);
    assert!(TopicRepo::find_by_key(&pool, "sports").await.unwrap().is_none());
    let listed = TopicRepo::list(&pool, &TopicQuery::for_lang(Lang::En))
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_is_not_repeatable(pool: PgPool) {
    create_topic(&pool, "sports", "Sports").await;

    TopicRepo::soft_delete(&pool, "sports").await.unwrap();
    let again = TopicRepo::soft_delete(&pool, "sports").await.unwrap();
    assert_eq!(again, TopicDeleteOutcome::NotFound);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_missing_topic(pool: PgPool) {
    let outcome = TopicRepo::soft_delete(&pool, "ghost").await.unwrap();
    assert_eq!(outcome, TopicDeleteOutcome::NotFound);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_audio_link_blocks_delete(pool: PgPool) {
    create_topic(&pool, "sports", "Sports").await;
    TopicLinkRepo::link_audio(&pool, 7, "sports").await.unwrap();
    TopicLinkRepo::link_video(&pool, 9, "sports").await.unwrap();

    let outcome = TopicRepo::soft_delete(&pool, "sports").await.unwrap();
    assert_eq!(outcome, TopicDeleteOutcome::LinkedToAudio);
    assert!(!deleted_at_is_set(&pool, "sports").await);
    assert_eq!(live_translation_count(&pool, "sports").await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_video_link_blocks_delete(pool: PgPool) {
    create_topic(&pool, "sports", "Sports").await;
    TopicLinkRepo::link_video(&pool, 9, "sports").await.unwrap();

    let outcome = TopicRepo::soft_delete(&pool, "sports").await.unwrap();
    assert_eq!(outcome, TopicDeleteOutcome::LinkedToVideo);
    assert!(!deleted_at_is_set(&pool, "sports").await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unlinked_topic_becomes_deletable(pool: PgPool) {
    create_topic(&pool, "sports", "Sports").await;
    TopicLinkRepo::link_audio(&pool, 7, "sports").await.unwrap();
    TopicLinkRepo::link_video(&pool, 9, "sports").await.unwrap();
    assert!(TopicLinkRepo::unlink_audio(&pool, 7, "sports").await.unwrap());
    assert!(TopicLinkRepo::unlink_video(&pool, 9, "sports").await.unwrap());
    assert!(!TopicLinkRepo::unlink_video(&pool, 9, "sports").await.unwrap());

    let outcome = TopicRepo::soft_delete(&pool, "sports").await.unwrap();
    assert_matches!(outcome, TopicDeleteOutcome::Deleted(_));
}

// ---------------------------------------------------------------------------
// Bulk
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_many_counts(pool: PgPool) {
    create_topic(&pool, "a", "A").await;
    create_topic(&pool, "b", "B").await;
    create_topic(&pool, "c", "C").await;
    add_vi(&pool, "a", "A vi").await;

    let keys = vec!["a".to_string(), "b".to_string(), "missing".to_string()];
    let outcome = TopicRepo::soft_delete_many(&pool, &keys).await.unwrap();
    assert_eq!(
        outcome,
        TopicDeleteOutcome::Deleted(SoftDeleteCounts {
            topics: 2,
            translations: 3,
        })
    );

    assert!(deleted_at_is_set(&pool, "a").await);
    assert!(deleted_at_is_set(&pool, "b").await);
    assert!(!deleted_at_is_set(&pool, "c").await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_many_without_matches(pool: PgPool) {
    create_topic(&pool, "a", "A").await;

    let keys = vec!["x".to_string(), "y".to_string()];
    let outcome = TopicRepo::soft_delete_many(&pool, &keys).await.unwrap();
    assert_eq!(outcome, TopicDeleteOutcome::NotFound);
    assert!(!deleted_at_is_set(&pool, "a").await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_one_linked_key_blocks_whole_batch(pool: PgPool) {
    create_topic(&pool, "a", "A").await;
    create_topic(&pool, "b", "B").await;
    TopicLinkRepo::link_video(&pool, 1, "b").await.unwrap();

    let keys = vec!["a".to_string(), "b".to_string()];
    let outcome = TopicRepo::soft_delete_many(&pool, &keys).await.unwrap();
    assert_eq!(outcome, TopicDeleteOutcome::LinkedToVideo);
    assert!(!deleted_at_is_set(&pool, "a").await);
    assert!(!deleted_at_is_set(&pool, "b").await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_batch_waits_for_pending_link_before_guard(pool: PgPool) {
    create_topic(&pool, "sports", "Sports").await;
    create_topic(&pool, "music", "Music").await;

    // A writer holds the row while it attaches an audio.
    let mut writer = pool.begin().await.unwrap();
    sqlx::query("SELECT key FROM topics WHERE key = 'sports' FOR UPDATE")
        .execute(&mut *writer)
        .await
        .unwrap();

    let keys = vec!["music".to_string(), "sports".to_string()];
    let delete_pool = pool.clone();
    let batch =
        tokio::spawn(async move { TopicRepo::soft_delete_many(&delete_pool, &keys).await });

    loop {
        let (waiting,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM pg_stat_activity \
             WHERE datname = current_database() AND wait_event_type = 'Lock'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        if waiting > 0 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    sqlx::query("INSERT INTO audios_to_topics (audio_id, topic_key) VALUES (1, 'sports')")
        .execute(&mut *writer)
        .await
        .unwrap();
    writer.commit().await.unwrap();

    let outcome = batch.await.unwrap().unwrap();
    assert_eq!(outcome, TopicDeleteOutcome::LinkedToAudio);
    assert!(!deleted_at_is_set(&pool, "sports").await);
    assert!(!deleted_at_is_set(&pool, "music").await);
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_product_drops_links(pool: PgPool) {
    sqlx::query("INSERT INTO categories (key, slug, name) VALUES ('mugs', 'mugs', 'Mugs')")
        .execute(&pool)
        .await
        .unwrap();
    let input = CreateProduct {
        key: "blue-mug".to_string(),
        name: "Blue mug".to_string(),
        price: Some(1200),
        image: None,
        description: None,
        enabled: None,
        status_id: None,
        theme_key: None,
        category_keys: vec!["mugs".to_string()],
    };
    ProductRepo::create(&pool, &input).await.unwrap();

    assert!(ProductRepo::soft_delete(&pool, "blue-mug").await.unwrap());
    assert!(!ProductRepo::soft_delete(&pool, "blue-mug").await.unwrap());
    assert!(ProductRepo::find_one(&pool, "blue-mug", None)
        .await
        .unwrap()
        .is_none());

    let (links,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM products_to_categories WHERE product_key = 'blue-mug'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(links, 0);
}
