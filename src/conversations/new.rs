use axum::{Json, debug_handler, extract::{Path, State}, http::StatusCode};
use sqlx::SqlitePool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::Requester;
use crate::db::ConversationRow;
use crate::{AppError, AppResult};

use super::{ConversationDto, NewConversation, conversation_dto, property, review_exists};

#[debug_handler]
pub(crate) async fn create(
    State(db_pool): State<SqlitePool>,
    Requester(requester_id): Requester,
    Path(review_id): Path<Uuid>,
    Json(new): Json<NewConversation>,
) -> AppResult<(StatusCode, Json<ConversationDto>)> {
    let conversation = create_conversation(&db_pool, review_id, new, requester_id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok((StatusCode::CREATED, Json(conversation)))
}

// Ok(None) when the review does not exist; validation error when the
// property is not on any recognized schema
pub async fn create_conversation(
    db_pool: &SqlitePool,
    review_id: Uuid,
    NewConversation { property }: NewConversation,
    requester_id: Uuid,
) -> AppResult<Option<ConversationDto>> {
    if let Some(property) = &property {
        if !property::recognized_property(property) {
            return Err(AppError::Validation(format!(
                "unsupported property '{property}'"
            )));
        }
    }

    if !review_exists(db_pool, review_id).await? {
        return Ok(None);
    }

    let uuid = Uuid::now_v7();
    let created_at = OffsetDateTime::now_utc();
    sqlx::query(
        "INSERT INTO conversations (uuid,review_id,property,created_at) VALUES (?,?,?,?)",
    )
    .bind(uuid.to_string())
    .bind(review_id.to_string())
    .bind(property.as_deref())
    .bind(created_at)
    .execute(db_pool)
    .await?;

    sqlx::query("INSERT INTO participants (conversation_id,user_id) VALUES (?,?)")
        .bind(uuid.to_string())
        .bind(requester_id.to_string())
        .execute(db_pool)
        .await?;

    let row = ConversationRow {
        uuid: uuid.to_string(),
        review_id: review_id.to_string(),
        property,
        created_at,
    };

    Ok(Some(conversation_dto(db_pool, row, false).await?))
}
