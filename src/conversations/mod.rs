mod conversation;
mod list;
mod msg;
mod new;
mod property;

use axum::{Router, routing::get};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::db::{ConversationRow, MessageRow};
use crate::{AppState, AppResult, users};

pub use conversation::get_conversation;
pub use list::list_conversations;
pub use msg::{add_message, delete_message, get_message, list_messages, update_message};
pub use new::create_conversation;
pub use property::recognized_property;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{review_id}/conversations",
            get(list::all).post(new::create),
        )
        .route(
            "/{review_id}/conversations/{conversation_id}",
            get(conversation::one),
        )
        .route(
            "/{review_id}/conversations/{conversation_id}/messages",
            get(msg::all).post(msg::create),
        )
        .route(
            "/{review_id}/conversations/{conversation_id}/messages/{message_id}",
            get(msg::one).put(msg::update).delete(msg::delete),
        )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationDto {
    pub id: String,
    pub review_id: String,
    pub property: Option<String>,
    pub participants: Vec<ParticipantDto>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_message: Option<MessageDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub user_id: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: String,
    pub conversation_id: String,
    pub author_id: String,
    pub author_username: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub is_deleted: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConversation {
    pub property: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewMessage {
    pub content: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ListQuery {
    pub(crate) include_latest_message: bool,
}

pub(crate) async fn conversation_in_review(
    db_pool: &SqlitePool,
    review_id: Uuid,
    conversation_id: Uuid,
) -> AppResult<Option<ConversationRow>> {
    let row = sqlx::query_as(
        "SELECT uuid,review_id,property,created_at
         FROM conversations WHERE uuid=? AND review_id=?",
    )
    .bind(conversation_id.to_string())
    .bind(review_id.to_string())
    .fetch_optional(db_pool)
    .await?;

    Ok(row)
}

pub(crate) async fn review_exists(db_pool: &SqlitePool, review_id: Uuid) -> AppResult<bool> {
    Ok(
        sqlx::query_as::<_, (i64,)>("SELECT 1 FROM revision_reviews WHERE uuid=?")
            .bind(review_id.to_string())
            .fetch_optional(db_pool)
            .await?
            .is_some(),
    )
}

pub(crate) async fn conversation_dto(
    db_pool: &SqlitePool,
    row: ConversationRow,
    include_latest_message: bool,
) -> AppResult<ConversationDto> {
    let participant_ids: Vec<(String,)> =
        sqlx::query_as("SELECT user_id FROM participants WHERE conversation_id=?")
            .bind(&row.uuid)
            .fetch_all(db_pool)
            .await?;
    let participant_ids: Vec<String> = participant_ids.into_iter().map(|(id,)| id).collect();

    let usernames = users::resolve_usernames(db_pool, &participant_ids).await?;
    let participants = participant_ids
        .into_iter()
        .map(|user_id| {
            let username = usernames
                .get(&user_id)
                .cloned()
                .unwrap_or_else(|| users::UNKNOWN_USER.to_owned());
            ParticipantDto { user_id, username }
        })
        .collect();

    let latest_message = if include_latest_message {
        latest_message(db_pool, &row.uuid).await?
    } else {
        None
    };

    Ok(ConversationDto {
        id: row.uuid,
        review_id: row.review_id,
        property: row.property,
        participants,
        created_at: row.created_at,
        latest_message,
    })
}

// most recent non-deleted message; when every message has been soft-deleted,
// the most recent deleted one is surfaced instead
pub(crate) async fn latest_message(
    db_pool: &SqlitePool,
    conversation_id: &str,
) -> AppResult<Option<MessageDto>> {
    let row: Option<MessageRow> = sqlx::query_as(
        "SELECT uuid,conversation_id,author_id,content,created_at,is_deleted
         FROM messages WHERE conversation_id=?
         ORDER BY is_deleted ASC, created_at DESC, uuid DESC
         LIMIT 1",
    )
    .bind(conversation_id)
    .fetch_optional(db_pool)
    .await?;

    match row {
        Some(row) => Ok(Some(message_dto(db_pool, row).await?)),
        None => Ok(None),
    }
}

pub(crate) async fn message_dto(db_pool: &SqlitePool, row: MessageRow) -> AppResult<MessageDto> {
    let author_username = users::username_of(db_pool, &row.author_id).await?;

    Ok(MessageDto {
        id: row.uuid,
        conversation_id: row.conversation_id,
        author_id: row.author_id,
        author_username,
        content: row.content,
        created_at: row.created_at,
        is_deleted: row.is_deleted,
    })
}
