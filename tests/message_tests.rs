mod common;

use tagreview::AppError;
use tagreview::conversations::{
    NewMessage, add_message, delete_message, get_conversation, get_message, list_messages,
    update_message,
};
use uuid::Uuid;

async fn seeded_conversation(db_pool: &sqlx::SqlitePool) -> (Uuid, Uuid, Uuid) {
    let container_id = common::seed_container(db_pool, Uuid::now_v7()).await;
    let approver_id = common::seed_user(db_pool, "ada").await;
    let review_id = common::seed_review(db_pool, container_id, approver_id).await;
    let conversation_id = common::seed_conversation(db_pool, review_id, approver_id).await;
    (review_id, conversation_id, approver_id)
}

#[tokio::test]
async fn add_message_resolves_the_author_username() {
    let db_pool = common::test_pool().await;
    let (review_id, conversation_id, _) = seeded_conversation(&db_pool).await;
    let author_id = common::seed_user(&db_pool, "grace").await;

    let message = add_message(
        &db_pool,
        review_id,
        conversation_id,
        NewMessage { content: "looks wrong to me".to_owned() },
        author_id,
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(message.conversation_id, conversation_id.to_string());
    assert_eq!(message.author_id, author_id.to_string());
    assert_eq!(message.author_username, "grace");
    assert!(!message.is_deleted);
}

#[tokio::test]
async fn writing_into_a_conversation_joins_it() {
    let db_pool = common::test_pool().await;
    let (review_id, conversation_id, creator_id) = seeded_conversation(&db_pool).await;
    let author_id = common::seed_user(&db_pool, "grace").await;

    add_message(
        &db_pool,
        review_id,
        conversation_id,
        NewMessage { content: "hello".to_owned() },
        author_id,
    )
    .await
    .unwrap()
    .unwrap();

    let conversation = get_conversation(&db_pool, review_id, conversation_id, false)
        .await
        .unwrap()
        .unwrap();

    let participant_ids: Vec<&str> = conversation
        .participants
        .iter()
        .map(|p| p.user_id.as_str())
        .collect();
    assert_eq!(
        participant_ids,
        vec![creator_id.to_string(), author_id.to_string()]
    );
}

#[tokio::test]
async fn add_message_to_unknown_conversation_is_absent() {
    let db_pool = common::test_pool().await;
    let (review_id, _, author_id) = seeded_conversation(&db_pool).await;

    let message = add_message(
        &db_pool,
        review_id,
        Uuid::now_v7(),
        NewMessage { content: "hello".to_owned() },
        author_id,
    )
    .await
    .unwrap();

    assert!(message.is_none());
}

#[tokio::test]
async fn update_replaces_content_and_preserves_identity_author_and_timestamp() {
    let db_pool = common::test_pool().await;
    let (review_id, conversation_id, author_id) = seeded_conversation(&db_pool).await;

    let created = add_message(
        &db_pool,
        review_id,
        conversation_id,
        NewMessage { content: "draft".to_owned() },
        author_id,
    )
    .await
    .unwrap()
    .unwrap();
    let message_id = Uuid::parse_str(&created.id).unwrap();

    let original = get_message(&db_pool, review_id, conversation_id, message_id)
        .await
        .unwrap()
        .unwrap();

    let updated = update_message(
        &db_pool,
        review_id,
        conversation_id,
        message_id,
        "final wording".to_owned(),
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.author_id, original.author_id);
    assert_eq!(updated.created_at, original.created_at);
    assert_eq!(updated.content, "final wording");
}

#[tokio::test]
async fn delete_by_non_author_fails_and_leaves_the_message_visible() {
    let db_pool = common::test_pool().await;
    let (review_id, conversation_id, author_id) = seeded_conversation(&db_pool).await;
    let intruder_id = common::seed_user(&db_pool, "mallory").await;

    let message = add_message(
        &db_pool,
        review_id,
        conversation_id,
        NewMessage { content: "mine".to_owned() },
        author_id,
    )
    .await
    .unwrap()
    .unwrap();
    let message_id = Uuid::parse_str(&message.id).unwrap();

    let result =
        delete_message(&db_pool, review_id, conversation_id, message_id, intruder_id).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let message = get_message(&db_pool, review_id, conversation_id, message_id)
        .await
        .unwrap()
        .unwrap();
    assert!(!message.is_deleted);
}

#[tokio::test]
async fn delete_soft_deletes_and_listing_still_carries_the_row() {
    let db_pool = common::test_pool().await;
    let (review_id, conversation_id, author_id) = seeded_conversation(&db_pool).await;

    let message = add_message(
        &db_pool,
        review_id,
        conversation_id,
        NewMessage { content: "oops".to_owned() },
        author_id,
    )
    .await
    .unwrap()
    .unwrap();
    let message_id = Uuid::parse_str(&message.id).unwrap();

    delete_message(&db_pool, review_id, conversation_id, message_id, author_id)
        .await
        .unwrap()
        .unwrap();

    let messages = list_messages(&db_pool, review_id, conversation_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].is_deleted);
}

#[tokio::test]
async fn messages_are_scoped_to_their_conversation() {
    let db_pool = common::test_pool().await;
    let (review_id, conversation_id, author_id) = seeded_conversation(&db_pool).await;
    let other_conversation_id =
        common::seed_conversation(&db_pool, review_id, author_id).await;

    let message = add_message(
        &db_pool,
        review_id,
        conversation_id,
        NewMessage { content: "here".to_owned() },
        author_id,
    )
    .await
    .unwrap()
    .unwrap();
    let message_id = Uuid::parse_str(&message.id).unwrap();

    let misses = get_message(&db_pool, review_id, other_conversation_id, message_id)
        .await
        .unwrap();
    assert!(misses.is_none());

    let hits = get_message(&db_pool, review_id, conversation_id, message_id)
        .await
        .unwrap();
    assert!(hits.is_some());
}

#[tokio::test]
async fn listing_messages_of_unknown_conversation_is_absent() {
    let db_pool = common::test_pool().await;
    let (review_id, _, _) = seeded_conversation(&db_pool).await;

    let messages = list_messages(&db_pool, review_id, Uuid::now_v7()).await.unwrap();

    assert!(messages.is_none());
}
