#![allow(dead_code)]

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tagreview::conversations::{self, NewConversation};
use tagreview::reviews::{self, NewReview};
use tagreview::tagdata::{ContainerImport, ImportBatch, TagImport, import_batch};
use tagreview::users;
use uuid::Uuid;

pub async fn test_pool() -> SqlitePool {
    let db_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    tagreview::db::init_schema(&db_pool).await.unwrap();
    db_pool
}

pub async fn seed_user(db_pool: &SqlitePool, username: &str) -> Uuid {
    let user_id = Uuid::now_v7();
    users::upsert_user(db_pool, user_id, username).await.unwrap();
    user_id
}

pub async fn seed_container(db_pool: &SqlitePool, project_id: Uuid) -> Uuid {
    let container_id = Uuid::now_v7();
    import_batch(
        db_pool,
        ImportBatch {
            containers: vec![ContainerImport {
                id: container_id,
                name: format!("container-{container_id}"),
                revision: "A".to_owned(),
                project_id,
            }],
            tags: vec![],
        },
    )
    .await
    .unwrap();
    container_id
}

pub async fn seed_tag(
    db_pool: &SqlitePool,
    project_id: Uuid,
    revision_container_id: Option<Uuid>,
) -> Uuid {
    let tag_id = Uuid::now_v7();
    import_batch(
        db_pool,
        ImportBatch {
            containers: vec![],
            tags: vec![TagImport {
                id: tag_id,
                project_id,
                tag_number: format!("20-PT-{tag_id}"),
                description: "pressure transmitter".to_owned(),
                category: "Instrument".to_owned(),
                area: "A10".to_owned(),
                discipline: "I".to_owned(),
                revision_container_id,
            }],
        },
    )
    .await
    .unwrap();
    tag_id
}

pub async fn seed_review(
    db_pool: &SqlitePool,
    revision_container_id: Uuid,
    approver_id: Uuid,
) -> Uuid {
    let review = reviews::create_review(
        db_pool,
        NewReview {
            revision_container_id,
            status: "Open".to_owned(),
        },
        approver_id,
    )
    .await
    .unwrap();
    Uuid::parse_str(&review.id).unwrap()
}

pub async fn seed_conversation(db_pool: &SqlitePool, review_id: Uuid, requester_id: Uuid) -> Uuid {
    let conversation =
        conversations::create_conversation(db_pool, review_id, NewConversation { property: None }, requester_id)
            .await
            .unwrap()
            .unwrap();
    Uuid::parse_str(&conversation.id).unwrap()
}
