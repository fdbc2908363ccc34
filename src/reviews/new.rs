use axum::{Json, debug_handler, extract::State, http::StatusCode};
use sqlx::SqlitePool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::Requester;
use crate::{AppError, AppResult};

use super::{NewReview, ReviewDto};

#[debug_handler]
pub(crate) async fn create(
    State(db_pool): State<SqlitePool>,
    Requester(approver_id): Requester,
    Json(new): Json<NewReview>,
) -> AppResult<(StatusCode, Json<ReviewDto>)> {
    let review = create_review(&db_pool, new, approver_id).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

// approver is always the requester, never taken from the body
pub async fn create_review(
    db_pool: &SqlitePool,
    NewReview { revision_container_id, status }: NewReview,
    approver_id: Uuid,
) -> AppResult<ReviewDto> {
    if sqlx::query_as::<_, (i64,)>("SELECT 1 FROM revision_containers WHERE uuid=?")
        .bind(revision_container_id.to_string())
        .fetch_optional(db_pool)
        .await?
        .is_none()
    {
        return Err(AppError::Validation(format!(
            "unknown revision container {revision_container_id}"
        )));
    }

    let uuid = Uuid::now_v7();
    let created_at = OffsetDateTime::now_utc();
    sqlx::query(
        "INSERT INTO revision_reviews (uuid,revision_container_id,approver_id,status,created_at)
         VALUES (?,?,?,?,?)",
    )
    .bind(uuid.to_string())
    .bind(revision_container_id.to_string())
    .bind(approver_id.to_string())
    .bind(&status)
    .bind(created_at)
    .execute(db_pool)
    .await?;

    // tag snapshots only ever change through review linkage
    sqlx::query("UPDATE tag_data SET review_id=? WHERE revision_container_id=?")
        .bind(uuid.to_string())
        .bind(revision_container_id.to_string())
        .execute(db_pool)
        .await?;

    tracing::debug!("created review {uuid} for container {revision_container_id}");

    Ok(ReviewDto {
        id: uuid.to_string(),
        revision_container_id: revision_container_id.to_string(),
        approver_id: approver_id.to_string(),
        status,
        created_at,
    })
}
