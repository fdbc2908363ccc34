use axum::{Json, debug_handler, extract::{Path, State}};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db::ReviewRow;
use crate::{AppError, AppResult};

use super::ReviewDto;

#[debug_handler]
pub(crate) async fn one(
    State(db_pool): State<SqlitePool>,
    Path(review_id): Path<Uuid>,
) -> AppResult<Json<ReviewDto>> {
    let review = get_review(&db_pool, review_id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(review))
}

pub async fn get_review(db_pool: &SqlitePool, review_id: Uuid) -> AppResult<Option<ReviewDto>> {
    let row: Option<ReviewRow> = sqlx::query_as(
        "SELECT uuid,revision_container_id,approver_id,status,created_at
         FROM revision_reviews WHERE uuid=?",
    )
    .bind(review_id.to_string())
    .fetch_optional(db_pool)
    .await?;

    Ok(row.map(ReviewDto::from))
}
