use axum::{Json, debug_handler, extract::{Path, State}, http::StatusCode};
use sqlx::SqlitePool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::Requester;
use crate::db::MessageRow;
use crate::{AppError, AppResult};

use super::{MessageDto, NewMessage, conversation_in_review, message_dto};

#[debug_handler]
pub(crate) async fn all(
    State(db_pool): State<SqlitePool>,
    Path((review_id, conversation_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<Vec<MessageDto>>> {
    let messages = list_messages(&db_pool, review_id, conversation_id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(messages))
}

#[debug_handler]
pub(crate) async fn create(
    State(db_pool): State<SqlitePool>,
    Requester(author_id): Requester,
    Path((review_id, conversation_id)): Path<(Uuid, Uuid)>,
    Json(new): Json<NewMessage>,
) -> AppResult<(StatusCode, Json<MessageDto>)> {
    let message = add_message(&db_pool, review_id, conversation_id, new, author_id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok((StatusCode::CREATED, Json(message)))
}

#[debug_handler]
pub(crate) async fn one(
    State(db_pool): State<SqlitePool>,
    Path((review_id, conversation_id, message_id)): Path<(Uuid, Uuid, Uuid)>,
) -> AppResult<Json<MessageDto>> {
    let message = get_message(&db_pool, review_id, conversation_id, message_id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(message))
}

#[debug_handler]
pub(crate) async fn update(
    State(db_pool): State<SqlitePool>,
    Path((review_id, conversation_id, message_id)): Path<(Uuid, Uuid, Uuid)>,
    Json(NewMessage { content }): Json<NewMessage>,
) -> AppResult<Json<MessageDto>> {
    let message = update_message(&db_pool, review_id, conversation_id, message_id, content)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(message))
}

#[debug_handler]
pub(crate) async fn delete(
    State(db_pool): State<SqlitePool>,
    Requester(requester_id): Requester,
    Path((review_id, conversation_id, message_id)): Path<(Uuid, Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    delete_message(&db_pool, review_id, conversation_id, message_id, requester_id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(StatusCode::NO_CONTENT)
}

// store order; soft-deleted messages are included, flagged
pub async fn list_messages(
    db_pool: &SqlitePool,
    review_id: Uuid,
    conversation_id: Uuid,
) -> AppResult<Option<Vec<MessageDto>>> {
    if conversation_in_review(db_pool, review_id, conversation_id)
        .await?
        .is_none()
    {
        return Ok(None);
    }

    let rows: Vec<MessageRow> = sqlx::query_as(
        "SELECT uuid,conversation_id,author_id,content,created_at,is_deleted
         FROM messages WHERE conversation_id=?",
    )
    .bind(conversation_id.to_string())
    .fetch_all(db_pool)
    .await?;

    let mut messages = Vec::with_capacity(rows.len());
    for row in rows {
        messages.push(message_dto(db_pool, row).await?);
    }

    Ok(Some(messages))
}

pub async fn add_message(
    db_pool: &SqlitePool,
    review_id: Uuid,
    conversation_id: Uuid,
    NewMessage { content }: NewMessage,
    author_id: Uuid,
) -> AppResult<Option<MessageDto>> {
    if conversation_in_review(db_pool, review_id, conversation_id)
        .await?
        .is_none()
    {
        return Ok(None);
    }

    let uuid = Uuid::now_v7();
    let created_at = OffsetDateTime::now_utc();
    sqlx::query(
        "INSERT INTO messages (uuid,conversation_id,author_id,content,created_at,is_deleted)
         VALUES (?,?,?,?,?,0)",
    )
    .bind(uuid.to_string())
    .bind(conversation_id.to_string())
    .bind(author_id.to_string())
    .bind(&content)
    .bind(created_at)
    .execute(db_pool)
    .await?;

    // writing into a conversation joins it
    sqlx::query("INSERT OR IGNORE INTO participants (conversation_id,user_id) VALUES (?,?)")
        .bind(conversation_id.to_string())
        .bind(author_id.to_string())
        .execute(db_pool)
        .await?;

    let row = MessageRow {
        uuid: uuid.to_string(),
        conversation_id: conversation_id.to_string(),
        author_id: author_id.to_string(),
        content,
        created_at,
        is_deleted: false,
    };

    Ok(Some(message_dto(db_pool, row).await?))
}

pub async fn get_message(
    db_pool: &SqlitePool,
    review_id: Uuid,
    conversation_id: Uuid,
    message_id: Uuid,
) -> AppResult<Option<MessageDto>> {
    let Some(row) = message_in_conversation(db_pool, review_id, conversation_id, message_id).await?
    else {
        return Ok(None);
    };

    Ok(Some(message_dto(db_pool, row).await?))
}

// an edit, not a new message: identity, author and timestamp stay put
pub async fn update_message(
    db_pool: &SqlitePool,
    review_id: Uuid,
    conversation_id: Uuid,
    message_id: Uuid,
    content: String,
) -> AppResult<Option<MessageDto>> {
    let Some(mut row) =
        message_in_conversation(db_pool, review_id, conversation_id, message_id).await?
    else {
        return Ok(None);
    };

    sqlx::query("UPDATE messages SET content=? WHERE uuid=?")
        .bind(&content)
        .bind(&row.uuid)
        .execute(db_pool)
        .await?;

    row.content = content;
    Ok(Some(message_dto(db_pool, row).await?))
}

// soft delete; only the original author may delete their message
pub async fn delete_message(
    db_pool: &SqlitePool,
    review_id: Uuid,
    conversation_id: Uuid,
    message_id: Uuid,
    requester_id: Uuid,
) -> AppResult<Option<()>> {
    let Some(row) =
        message_in_conversation(db_pool, review_id, conversation_id, message_id).await?
    else {
        return Ok(None);
    };

    if row.author_id != requester_id.to_string() {
        return Err(AppError::Validation(
            "only the author can delete a message".to_owned(),
        ));
    }

    sqlx::query("UPDATE messages SET is_deleted=1 WHERE uuid=?")
        .bind(&row.uuid)
        .execute(db_pool)
        .await?;

    Ok(Some(()))
}

async fn message_in_conversation(
    db_pool: &SqlitePool,
    review_id: Uuid,
    conversation_id: Uuid,
    message_id: Uuid,
) -> AppResult<Option<MessageRow>> {
    let row = sqlx::query_as(
        "SELECT m.uuid,m.conversation_id,m.author_id,m.content,m.created_at,m.is_deleted
         FROM messages m
         JOIN conversations c ON c.uuid = m.conversation_id
         WHERE m.uuid=? AND m.conversation_id=? AND c.review_id=?",
    )
    .bind(message_id.to_string())
    .bind(conversation_id.to_string())
    .bind(review_id.to_string())
    .fetch_optional(db_pool)
    .await?;

    Ok(row)
}
