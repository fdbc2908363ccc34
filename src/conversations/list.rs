use axum::{Json, debug_handler, extract::{Path, Query, State}};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db::ConversationRow;
use crate::{AppError, AppResult};

use super::{ConversationDto, ListQuery, conversation_dto, review_exists};

#[debug_handler]
pub(crate) async fn all(
    State(db_pool): State<SqlitePool>,
    Path(review_id): Path<Uuid>,
    Query(ListQuery { include_latest_message }): Query<ListQuery>,
) -> AppResult<Json<Vec<ConversationDto>>> {
    let conversations = list_conversations(&db_pool, review_id, include_latest_message)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(conversations))
}

/// Conversations under a review, in store order. `Ok(None)` when the review
/// does not exist.
pub async fn list_conversations(
    db_pool: &SqlitePool,
    review_id: Uuid,
    include_latest_message: bool,
) -> AppResult<Option<Vec<ConversationDto>>> {
    if !review_exists(db_pool, review_id).await? {
        return Ok(None);
    }

    let rows: Vec<ConversationRow> = sqlx::query_as(
        "SELECT uuid,review_id,property,created_at FROM conversations WHERE review_id=?",
    )
    .bind(review_id.to_string())
    .fetch_all(db_pool)
    .await?;

    let mut conversations = Vec::with_capacity(rows.len());
    for row in rows {
        conversations.push(conversation_dto(db_pool, row, include_latest_message).await?);
    }

    Ok(Some(conversations))
}
