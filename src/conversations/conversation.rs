use axum::{Json, debug_handler, extract::{Path, Query, State}};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{AppError, AppResult};

use super::{ConversationDto, ListQuery, conversation_dto, conversation_in_review};

#[debug_handler]
pub(crate) async fn one(
    State(db_pool): State<SqlitePool>,
    Path((review_id, conversation_id)): Path<(Uuid, Uuid)>,
    Query(ListQuery { include_latest_message }): Query<ListQuery>,
) -> AppResult<Json<ConversationDto>> {
    let conversation =
        get_conversation(&db_pool, review_id, conversation_id, include_latest_message)
            .await?
            .ok_or(AppError::NotFound)?;

    Ok(Json(conversation))
}

pub async fn get_conversation(
    db_pool: &SqlitePool,
    review_id: Uuid,
    conversation_id: Uuid,
    include_latest_message: bool,
) -> AppResult<Option<ConversationDto>> {
    let Some(row) = conversation_in_review(db_pool, review_id, conversation_id).await? else {
        return Ok(None);
    };

    Ok(Some(
        conversation_dto(db_pool, row, include_latest_message).await?,
    ))
}
